use super::{contains_text, search_text, QueryContext};
use crate::model::{Ability, Id};

#[derive(Debug, Clone)]
pub struct AbilitiesLogic {
    context: QueryContext,
}

impl AbilitiesLogic {
    pub fn new(context: QueryContext) -> Self {
        Self { context }
    }

    pub fn all(&self) -> Vec<Ability> {
        tracing::info!(method = "all", "abilities query");
        self.context.snapshot().results.abilities.clone()
    }

    pub fn by_id(&self, id: Id) -> Option<Ability> {
        tracing::info!(method = "by_id", id, "abilities query");
        let snapshot = self.context.snapshot();
        snapshot.results.abilities.iter().find(|a| a.id == id).cloned()
    }

    pub fn by_ability_type(&self, ability_type: Id) -> Vec<Ability> {
        tracing::info!(method = "by_ability_type", ability_type, "abilities query");
        self.filter(format!("by_ability_type:{}", ability_type), |a| {
            a.action.ability_type == ability_type
        })
    }

    pub fn by_rarity(&self, rarity: i64) -> Vec<Ability> {
        tracing::info!(method = "by_rarity", rarity, "abilities query");
        self.filter(format!("by_rarity:{}", rarity), |a| a.rarity == rarity)
    }

    pub fn by_school(&self, school: Id) -> Vec<Ability> {
        tracing::info!(method = "by_school", school, "abilities query");
        self.filter(format!("by_school:{}", school), |a| a.school == school)
    }

    pub fn by_element(&self, element: Id) -> Vec<Ability> {
        tracing::info!(method = "by_element", element, "abilities query");
        self.filter(format!("by_element:{}", element), |a| {
            a.action.elements.contains(&element)
        })
    }

    pub fn by_name(&self, name: &str) -> Vec<Ability> {
        tracing::info!(method = "by_name", name, "abilities query");
        let Some(needle) = search_text(name) else {
            return Vec::new();
        };
        self.filter(format!("by_name:{}", needle), |a| contains_text(&a.ability_name, &needle))
    }

    pub fn by_effect(&self, effect_text: &str) -> Vec<Ability> {
        tracing::info!(method = "by_effect", effect_text, "abilities query");
        let Some(needle) = search_text(effect_text) else {
            return Vec::new();
        };
        self.filter(format!("by_effect:{}", needle), |a| {
            contains_text(&a.action.effects, &needle)
        })
    }

    fn filter(&self, key: String, predicate: impl Fn(&Ability) -> bool) -> Vec<Ability> {
        let snapshot = self.context.snapshot();
        self.context.cached(
            format!("abilities:{}", key),
            &snapshot,
            &snapshot.results.abilities,
            predicate,
        )
    }
}
