//! Stage containers: transform output and merge output

use super::*;
use crate::error::Result;
use crate::type_list::IdLabel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Entity collections as produced by the transform stage; no cross-links yet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformResultsContainer {
    pub abilities: Vec<Ability>,
    pub characters: Vec<Character>,
    pub commands: Vec<Command>,
    pub synchro_commands: Vec<SynchroCommand>,
    pub brave_actions: Vec<BraveAction>,
    pub events: Vec<Event>,
    pub experiences: Vec<Experience>,
    pub legend_materias: Vec<LegendMateria>,
    pub legend_spheres: Vec<LegendSphere>,
    pub magicite_skills: Vec<MagiciteSkill>,
    pub magicites: Vec<Magicite>,
    pub missions: Vec<Mission>,
    pub others: Vec<Other>,
    pub record_materias: Vec<RecordMateria>,
    pub record_spheres: Vec<RecordSphere>,
    pub relics: Vec<Relic>,
    pub soul_breaks: Vec<SoulBreak>,
    pub limit_breaks: Vec<LimitBreak>,
    pub statuses: Vec<Status>,
}

impl TransformResultsContainer {
    /// Record count per entity collection
    pub fn counts(&self) -> Vec<(EntityKind, usize)> {
        EntityKind::ALL
            .into_iter()
            .map(|kind| (kind, self.count(kind)))
            .collect()
    }

    /// Get the number of records in one collection
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Ability => self.abilities.len(),
            EntityKind::Character => self.characters.len(),
            EntityKind::Command => self.commands.len(),
            EntityKind::SynchroCommand => self.synchro_commands.len(),
            EntityKind::BraveAction => self.brave_actions.len(),
            EntityKind::Event => self.events.len(),
            EntityKind::Experience => self.experiences.len(),
            EntityKind::LegendMateria => self.legend_materias.len(),
            EntityKind::LegendSphere => self.legend_spheres.len(),
            EntityKind::MagiciteSkill => self.magicite_skills.len(),
            EntityKind::Magicite => self.magicites.len(),
            EntityKind::Mission => self.missions.len(),
            EntityKind::Other => self.others.len(),
            EntityKind::RecordMateria => self.record_materias.len(),
            EntityKind::RecordSphere => self.record_spheres.len(),
            EntityKind::Relic => self.relics.len(),
            EntityKind::SoulBreak => self.soul_breaks.len(),
            EntityKind::LimitBreak => self.limit_breaks.len(),
            EntityKind::Status => self.statuses.len(),
        }
    }
}

/// `(id, label)` lookup lists, one per entity collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdLists {
    pub abilities: Vec<IdLabel>,
    pub characters: Vec<IdLabel>,
    pub commands: Vec<IdLabel>,
    pub synchro_commands: Vec<IdLabel>,
    pub brave_actions: Vec<IdLabel>,
    pub events: Vec<IdLabel>,
    pub experiences: Vec<IdLabel>,
    pub legend_materias: Vec<IdLabel>,
    pub legend_spheres: Vec<IdLabel>,
    pub magicite_skills: Vec<IdLabel>,
    pub magicites: Vec<IdLabel>,
    pub missions: Vec<IdLabel>,
    pub others: Vec<IdLabel>,
    pub record_materias: Vec<IdLabel>,
    pub record_spheres: Vec<IdLabel>,
    pub relics: Vec<IdLabel>,
    pub soul_breaks: Vec<IdLabel>,
    pub limit_breaks: Vec<IdLabel>,
    pub statuses: Vec<IdLabel>,
}

impl IdLists {
    /// Lookup list for one collection
    pub fn get(&self, kind: EntityKind) -> &[IdLabel] {
        match kind {
            EntityKind::Ability => &self.abilities,
            EntityKind::Character => &self.characters,
            EntityKind::Command => &self.commands,
            EntityKind::SynchroCommand => &self.synchro_commands,
            EntityKind::BraveAction => &self.brave_actions,
            EntityKind::Event => &self.events,
            EntityKind::Experience => &self.experiences,
            EntityKind::LegendMateria => &self.legend_materias,
            EntityKind::LegendSphere => &self.legend_spheres,
            EntityKind::MagiciteSkill => &self.magicite_skills,
            EntityKind::Magicite => &self.magicites,
            EntityKind::Mission => &self.missions,
            EntityKind::Other => &self.others,
            EntityKind::RecordMateria => &self.record_materias,
            EntityKind::RecordSphere => &self.record_spheres,
            EntityKind::Relic => &self.relics,
            EntityKind::SoulBreak => &self.soul_breaks,
            EntityKind::LimitBreak => &self.limit_breaks,
            EntityKind::Status => &self.statuses,
        }
    }
}

/// The merged, cross-referenced data graph handed to the query layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeResultsContainer {
    pub abilities: Vec<Ability>,
    pub characters: Vec<Character>,
    pub commands: Vec<Command>,
    pub synchro_commands: Vec<SynchroCommand>,
    pub brave_actions: Vec<BraveAction>,
    pub events: Vec<Event>,
    pub experiences: Vec<Experience>,
    pub legend_materias: Vec<LegendMateria>,
    pub legend_spheres: Vec<LegendSphere>,
    pub magicite_skills: Vec<MagiciteSkill>,
    pub magicites: Vec<Magicite>,
    pub missions: Vec<Mission>,
    pub others: Vec<Other>,
    pub record_materias: Vec<RecordMateria>,
    pub record_spheres: Vec<RecordSphere>,
    pub relics: Vec<Relic>,
    pub soul_breaks: Vec<SoulBreak>,
    pub limit_breaks: Vec<LimitBreak>,
    pub statuses: Vec<Status>,
    /// Static type lists keyed by list name
    pub type_lists: BTreeMap<String, Vec<IdLabel>>,
    pub id_lists: IdLists,
}

fn find_json<T: Record + Serialize>(items: &[T], id: Id) -> Result<Option<serde_json::Value>> {
    items
        .iter()
        .find(|item| item.id() == id)
        .map(serde_json::to_value)
        .transpose()
        .map_err(Into::into)
}

impl MergeResultsContainer {
    /// `(id, label)` pairs for one entity collection
    pub fn id_list(&self, kind: EntityKind) -> &[IdLabel] {
        self.id_lists.get(kind)
    }

    /// A single record as JSON, if present
    pub fn record_json(&self, kind: EntityKind, id: Id) -> Result<Option<serde_json::Value>> {
        match kind {
            EntityKind::Ability => find_json(&self.abilities, id),
            EntityKind::Character => find_json(&self.characters, id),
            EntityKind::Command => find_json(&self.commands, id),
            EntityKind::SynchroCommand => find_json(&self.synchro_commands, id),
            EntityKind::BraveAction => find_json(&self.brave_actions, id),
            EntityKind::Event => find_json(&self.events, id),
            EntityKind::Experience => find_json(&self.experiences, id),
            EntityKind::LegendMateria => find_json(&self.legend_materias, id),
            EntityKind::LegendSphere => find_json(&self.legend_spheres, id),
            EntityKind::MagiciteSkill => find_json(&self.magicite_skills, id),
            EntityKind::Magicite => find_json(&self.magicites, id),
            EntityKind::Mission => find_json(&self.missions, id),
            EntityKind::Other => find_json(&self.others, id),
            EntityKind::RecordMateria => find_json(&self.record_materias, id),
            EntityKind::RecordSphere => find_json(&self.record_spheres, id),
            EntityKind::Relic => find_json(&self.relics, id),
            EntityKind::SoulBreak => find_json(&self.soul_breaks, id),
            EntityKind::LimitBreak => find_json(&self.limit_breaks, id),
            EntityKind::Status => find_json(&self.statuses, id),
        }
    }

    /// Lookup entries whose label contains `text`, ignoring case
    pub fn search_labels(&self, kind: EntityKind, text: &str) -> Vec<IdLabel> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.id_list(kind)
            .iter()
            .filter(|entry| entry.label.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

/// Entity collection selector used by lookups and the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Ability,
    Character,
    Command,
    SynchroCommand,
    BraveAction,
    Event,
    Experience,
    LegendMateria,
    LegendSphere,
    MagiciteSkill,
    Magicite,
    Mission,
    Other,
    RecordMateria,
    RecordSphere,
    Relic,
    SoulBreak,
    LimitBreak,
    Status,
}

impl EntityKind {
    /// Every collection, in container field order
    pub const ALL: [EntityKind; 19] = [
        EntityKind::Ability,
        EntityKind::Character,
        EntityKind::Command,
        EntityKind::SynchroCommand,
        EntityKind::BraveAction,
        EntityKind::Event,
        EntityKind::Experience,
        EntityKind::LegendMateria,
        EntityKind::LegendSphere,
        EntityKind::MagiciteSkill,
        EntityKind::Magicite,
        EntityKind::Mission,
        EntityKind::Other,
        EntityKind::RecordMateria,
        EntityKind::RecordSphere,
        EntityKind::Relic,
        EntityKind::SoulBreak,
        EntityKind::LimitBreak,
        EntityKind::Status,
    ];

    /// Collection name as used in snapshots and on the command line
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Ability => "abilities",
            EntityKind::Character => "characters",
            EntityKind::Command => "commands",
            EntityKind::SynchroCommand => "synchro_commands",
            EntityKind::BraveAction => "brave_actions",
            EntityKind::Event => "events",
            EntityKind::Experience => "experiences",
            EntityKind::LegendMateria => "legend_materias",
            EntityKind::LegendSphere => "legend_spheres",
            EntityKind::MagiciteSkill => "magicite_skills",
            EntityKind::Magicite => "magicites",
            EntityKind::Mission => "missions",
            EntityKind::Other => "others",
            EntityKind::RecordMateria => "record_materias",
            EntityKind::RecordSphere => "record_spheres",
            EntityKind::Relic => "relics",
            EntityKind::SoulBreak => "soul_breaks",
            EntityKind::LimitBreak => "limit_breaks",
            EntityKind::Status => "statuses",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    /// Accepts collection names with or without separators, singular or plural
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        EntityKind::ALL
            .into_iter()
            .find(|kind| {
                let name = kind.name().replace('_', "");
                name == wanted || format!("{:?}", kind).to_ascii_lowercase() == wanted
            })
            .ok_or_else(|| format!("unknown entity kind '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_from_str() {
        assert_eq!("soul_breaks".parse::<EntityKind>(), Ok(EntityKind::SoulBreak));
        assert_eq!("SoulBreak".parse::<EntityKind>(), Ok(EntityKind::SoulBreak));
        assert_eq!("limit-breaks".parse::<EntityKind>(), Ok(EntityKind::LimitBreak));
        assert_eq!("status".parse::<EntityKind>(), Ok(EntityKind::Status));
        assert!("dungeons".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_record_json_and_search() {
        let mut results = MergeResultsContainer::default();
        results.statuses.push(Status {
            id: 1,
            description: "Haste".to_string(),
            common_name: "Haste".to_string(),
            ..Default::default()
        });
        results.id_lists.statuses.push(IdLabel::new(1, "Haste"));

        let json = results.record_json(EntityKind::Status, 1).unwrap().unwrap();
        assert_eq!(json["common_name"], "Haste");
        assert!(results.record_json(EntityKind::Status, 2).unwrap().is_none());

        assert_eq!(results.search_labels(EntityKind::Status, "HAS").len(), 1);
        assert!(results.search_labels(EntityKind::Status, "  ").is_empty());
    }
}
