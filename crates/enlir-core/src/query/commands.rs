use super::{matches_eq, matches_text, QueryContext};
use crate::model::{ActionProfile, Command, Id, MergeResultsContainer, Record, SynchroCommand};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Fields shared by commands and synchro commands
trait CommandLike: Record + Clone {
    fn character_id(&self) -> Id;
    fn school(&self) -> Id;
    fn name(&self) -> &str;
    fn action(&self) -> &ActionProfile;
}

impl CommandLike for Command {
    fn character_id(&self) -> Id {
        self.character_id
    }

    fn school(&self) -> Id {
        self.school
    }

    fn name(&self) -> &str {
        &self.command_name
    }

    fn action(&self) -> &ActionProfile {
        &self.action
    }
}

impl CommandLike for SynchroCommand {
    fn character_id(&self) -> Id {
        self.character_id
    }

    fn school(&self) -> Id {
        self.school
    }

    fn name(&self) -> &str {
        &self.command_name
    }

    fn action(&self) -> &ActionProfile {
        &self.action
    }
}

/// Command search prototype; unset fields are ignored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandSearch {
    pub ability_type: Option<Id>,
    pub character_id: Option<Id>,
    pub command_name: Option<String>,
    pub element: Option<Id>,
    pub effect_text: Option<String>,
    /// Minimum multiplier
    pub multiplier: Option<f64>,
    pub school: Option<Id>,
    pub target_type: Option<Id>,
}

impl CommandSearch {
    fn matches<C: CommandLike>(&self, command: &C) -> bool {
        let action = command.action();
        matches_eq(&self.ability_type, &action.ability_type)
            && matches_eq(&self.character_id, &command.character_id())
            && matches_text(&self.command_name, command.name())
            && self.element.map_or(true, |element| action.elements.contains(&element))
            && matches_text(&self.effect_text, &action.effects)
            && self.multiplier.map_or(true, |min| action.multiplier >= min)
            && matches_eq(&self.school, &command.school())
            && matches_eq(&self.target_type, &action.target_type)
    }
}

/// Queries common to both command collections
#[derive(Debug, Clone)]
struct CommandQueries {
    context: QueryContext,
    collection: &'static str,
}

impl CommandQueries {
    fn all<C: CommandLike>(&self, items: fn(&MergeResultsContainer) -> &[C]) -> Vec<C> {
        tracing::info!(method = "all", collection = self.collection, "commands query");
        items(&self.context.snapshot().results).to_vec()
    }

    fn by_id<C: CommandLike>(
        &self,
        items: fn(&MergeResultsContainer) -> &[C],
        id: Id,
    ) -> Option<C> {
        tracing::info!(method = "by_id", collection = self.collection, id, "commands query");
        let snapshot = self.context.snapshot();
        items(&snapshot.results).iter().find(|c| c.id() == id).cloned()
    }

    fn search<C: CommandLike>(
        &self,
        items: fn(&MergeResultsContainer) -> &[C],
        criteria: &CommandSearch,
    ) -> Vec<C> {
        tracing::info!(method = "search", collection = self.collection, ?criteria, "commands query");
        let snapshot = self.context.snapshot();
        items(&snapshot.results)
            .iter()
            .filter(|c| criteria.matches(*c))
            .cloned()
            .collect()
    }

    fn filter<C: CommandLike>(
        &self,
        items: fn(&MergeResultsContainer) -> &[C],
        method: &'static str,
        arg: impl Display,
        predicate: impl Fn(&C) -> bool,
    ) -> Vec<C> {
        let key = format!("{}:{}:{}", self.collection, method, arg);
        tracing::info!(method, collection = self.collection, %arg, "commands query");
        let snapshot = self.context.snapshot();
        self.context.cached(
            key,
            &snapshot,
            items(&snapshot.results),
            predicate,
        )
    }
}

fn commands(results: &MergeResultsContainer) -> &[Command] {
    &results.commands
}

fn synchro_commands(results: &MergeResultsContainer) -> &[SynchroCommand] {
    &results.synchro_commands
}

#[derive(Debug, Clone)]
pub struct CommandsLogic {
    queries: CommandQueries,
}

impl CommandsLogic {
    pub fn new(context: QueryContext) -> Self {
        Self {
            queries: CommandQueries {
                context,
                collection: "commands",
            },
        }
    }

    pub fn all(&self) -> Vec<Command> {
        self.queries.all(commands)
    }

    pub fn by_id(&self, id: Id) -> Option<Command> {
        self.queries.by_id(commands, id)
    }

    pub fn by_ability_type(&self, ability_type: Id) -> Vec<Command> {
        self.queries.filter(commands, "by_ability_type", ability_type, |c| {
            c.action.ability_type == ability_type
        })
    }

    pub fn by_character(&self, character_id: Id) -> Vec<Command> {
        self.queries.filter(commands, "by_character", character_id, |c| {
            c.character_id == character_id
        })
    }

    pub fn by_school(&self, school: Id) -> Vec<Command> {
        self.queries.filter(commands, "by_school", school, |c| c.school == school)
    }

    pub fn by_element(&self, element: Id) -> Vec<Command> {
        self.queries.filter(commands, "by_element", element, |c| {
            c.action.elements.contains(&element)
        })
    }

    pub fn search(&self, criteria: &CommandSearch) -> Vec<Command> {
        self.queries.search(commands, criteria)
    }
}

#[derive(Debug, Clone)]
pub struct SynchroCommandsLogic {
    queries: CommandQueries,
}

impl SynchroCommandsLogic {
    pub fn new(context: QueryContext) -> Self {
        Self {
            queries: CommandQueries {
                context,
                collection: "synchro_commands",
            },
        }
    }

    pub fn all(&self) -> Vec<SynchroCommand> {
        self.queries.all(synchro_commands)
    }

    pub fn by_id(&self, id: Id) -> Option<SynchroCommand> {
        self.queries.by_id(synchro_commands, id)
    }

    pub fn by_ability_type(&self, ability_type: Id) -> Vec<SynchroCommand> {
        self.queries.filter(synchro_commands, "by_ability_type", ability_type, |c| {
            c.action.ability_type == ability_type
        })
    }

    pub fn by_character(&self, character_id: Id) -> Vec<SynchroCommand> {
        self.queries.filter(synchro_commands, "by_character", character_id, |c| {
            c.character_id == character_id
        })
    }

    pub fn by_school(&self, school: Id) -> Vec<SynchroCommand> {
        self.queries.filter(synchro_commands, "by_school", school, |c| c.school == school)
    }

    pub fn by_element(&self, element: Id) -> Vec<SynchroCommand> {
        self.queries.filter(synchro_commands, "by_element", element, |c| {
            c.action.elements.contains(&element)
        })
    }

    pub fn by_soul_break(&self, soul_break_id: Id) -> Vec<SynchroCommand> {
        self.queries.filter(synchro_commands, "by_soul_break", soul_break_id, |c| {
            c.source_soul_break_id == soul_break_id
        })
    }

    pub fn search(&self, criteria: &CommandSearch) -> Vec<SynchroCommand> {
        self.queries.search(synchro_commands, criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::query::test_support::{context_for, sample_context};

    #[test]
    fn test_commands_by_character_and_search() {
        let logic = CommandsLogic::new(sample_context());

        let found = logic.by_character(1);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].source_soul_break_id, 1);

        let criteria = CommandSearch {
            command_name: Some("CROSS".to_string()),
            character_id: Some(1),
            ..Default::default()
        };
        assert_eq!(logic.search(&criteria).len(), 1);
        assert!(logic.by_school(9).is_empty());
    }

    #[test]
    fn test_synchro_commands_by_soul_break() {
        let mut graph = fixtures::sample_graph();
        graph.synchro_commands.push(SynchroCommand {
            id: 1,
            description: "Braver - Climhazzard".to_string(),
            command_name: "Climhazzard".to_string(),
            character_name: "Cloud".to_string(),
            source_soul_break_name: "Braver".to_string(),
            ..Default::default()
        });
        let logic = SynchroCommandsLogic::new(context_for(graph));

        assert_eq!(logic.by_soul_break(1).len(), 1);
        assert!(logic.by_soul_break(2).is_empty());
        assert_eq!(logic.by_id(1).map(|c| c.command_name), Some("Climhazzard".to_string()));
    }
}
