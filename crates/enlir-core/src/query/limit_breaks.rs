use super::{contains_text, matches_eq, matches_text, search_text, QueryContext};
use crate::model::{Id, LimitBreak};
use serde::{Deserialize, Serialize};

/// Limit break search prototype; unset fields are ignored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LimitBreakSearch {
    pub ability_type: Option<Id>,
    pub auto_target_type: Option<Id>,
    /// Maximum cast time
    pub cast_time: Option<f64>,
    pub character_id: Option<Id>,
    pub damage_formula_type: Option<Id>,
    pub element: Option<Id>,
    pub effect_text: Option<String>,
    pub limit_break_bonus: Option<String>,
    pub limit_break_name: Option<String>,
    pub limit_break_tier: Option<Id>,
    /// Minimum multiplier
    pub multiplier: Option<f64>,
    pub realm: Option<Id>,
    pub status_id: Option<Id>,
    pub target_type: Option<Id>,
}

impl LimitBreakSearch {
    fn matches(&self, limit_break: &LimitBreak) -> bool {
        let action = &limit_break.action;
        matches_eq(&self.ability_type, &action.ability_type)
            && matches_eq(&self.auto_target_type, &action.auto_target_type)
            && self.cast_time.map_or(true, |max| action.cast_time <= max)
            && matches_eq(&self.character_id, &limit_break.character_id)
            && matches_eq(&self.damage_formula_type, &action.damage_formula_type)
            && self.element.map_or(true, |element| has_element(limit_break, element))
            && matches_text(&self.effect_text, &action.effects)
            && matches_text(&self.limit_break_bonus, &limit_break.limit_break_bonus)
            && matches_text(&self.limit_break_name, &limit_break.limit_break_name)
            && matches_eq(&self.limit_break_tier, &limit_break.limit_break_tier)
            && self.multiplier.map_or(true, |min| action.multiplier >= min)
            && matches_eq(&self.realm, &limit_break.realm)
            && self.status_id.map_or(true, |id| has_status(limit_break, id))
            && matches_eq(&self.target_type, &action.target_type)
    }
}

fn has_element(limit_break: &LimitBreak, element: Id) -> bool {
    limit_break.action.elements.contains(&element)
        || limit_break
            .other_effects
            .iter()
            .any(|other| other.action.elements.contains(&element))
}

fn has_status(limit_break: &LimitBreak, status_id: Id) -> bool {
    limit_break.statuses.iter().any(|status| status.id == status_id)
}

#[derive(Debug, Clone)]
pub struct LimitBreaksLogic {
    context: QueryContext,
}

impl LimitBreaksLogic {
    pub fn new(context: QueryContext) -> Self {
        Self { context }
    }

    pub fn all(&self) -> Vec<LimitBreak> {
        tracing::info!(method = "all", "limit breaks query");
        self.context.snapshot().results.limit_breaks.clone()
    }

    pub fn by_id(&self, id: Id) -> Option<LimitBreak> {
        tracing::info!(method = "by_id", id, "limit breaks query");
        let snapshot = self.context.snapshot();
        snapshot.results.limit_breaks.iter().find(|lb| lb.id == id).cloned()
    }

    pub fn by_ability_type(&self, ability_type: Id) -> Vec<LimitBreak> {
        tracing::info!(method = "by_ability_type", ability_type, "limit breaks query");
        self.filter(format!("by_ability_type:{}", ability_type), |lb| {
            lb.action.ability_type == ability_type
        })
    }

    /// Case-insensitive name containment
    pub fn by_name(&self, name: &str) -> Vec<LimitBreak> {
        tracing::info!(method = "by_name", name, "limit breaks query");
        let Some(needle) = search_text(name) else {
            return Vec::new();
        };
        self.filter(format!("by_name:{}", needle), |lb| {
            contains_text(&lb.limit_break_name, &needle)
        })
    }

    pub fn by_realm(&self, realm: Id) -> Vec<LimitBreak> {
        tracing::info!(method = "by_realm", realm, "limit breaks query");
        self.filter(format!("by_realm:{}", realm), |lb| lb.realm == realm)
    }

    pub fn by_character(&self, character_id: Id) -> Vec<LimitBreak> {
        tracing::info!(method = "by_character", character_id, "limit breaks query");
        self.filter(format!("by_character:{}", character_id), |lb| {
            lb.character_id == character_id
        })
    }

    /// Limit breaks whose multiplier is at least `minimum`
    pub fn by_multiplier(&self, minimum: f64) -> Vec<LimitBreak> {
        tracing::info!(method = "by_multiplier", minimum, "limit breaks query");
        self.filter(format!("by_multiplier:{}", minimum), |lb| {
            lb.action.multiplier >= minimum
        })
    }

    /// Own elements, or the elements of any attached other effect
    pub fn by_element(&self, element: Id) -> Vec<LimitBreak> {
        tracing::info!(method = "by_element", element, "limit breaks query");
        self.filter(format!("by_element:{}", element), |lb| has_element(lb, element))
    }

    pub fn by_effect(&self, effect_text: &str) -> Vec<LimitBreak> {
        tracing::info!(method = "by_effect", effect_text, "limit breaks query");
        let Some(needle) = search_text(effect_text) else {
            return Vec::new();
        };
        self.filter(format!("by_effect:{}", needle), |lb| {
            contains_text(&lb.action.effects, &needle)
        })
    }

    pub fn by_tier(&self, tier: Id) -> Vec<LimitBreak> {
        tracing::info!(method = "by_tier", tier, "limit breaks query");
        self.filter(format!("by_tier:{}", tier), |lb| lb.limit_break_tier == tier)
    }

    pub fn by_limit_break_bonus(&self, bonus_text: &str) -> Vec<LimitBreak> {
        tracing::info!(method = "by_limit_break_bonus", bonus_text, "limit breaks query");
        let Some(needle) = search_text(bonus_text) else {
            return Vec::new();
        };
        self.filter(format!("by_limit_break_bonus:{}", needle), |lb| {
            contains_text(&lb.limit_break_bonus, &needle)
        })
    }

    pub fn by_status(&self, status_id: Id) -> Vec<LimitBreak> {
        tracing::info!(method = "by_status", status_id, "limit breaks query");
        self.filter(format!("by_status:{}", status_id), |lb| has_status(lb, status_id))
    }

    /// Prototype search; not cached since the criteria space is open-ended
    pub fn search(&self, criteria: &LimitBreakSearch) -> Vec<LimitBreak> {
        tracing::info!(method = "search", ?criteria, "limit breaks query");
        let snapshot = self.context.snapshot();
        snapshot
            .results
            .limit_breaks
            .iter()
            .filter(|lb| criteria.matches(lb))
            .cloned()
            .collect()
    }

    fn filter(&self, key: String, predicate: impl Fn(&LimitBreak) -> bool) -> Vec<LimitBreak> {
        let snapshot = self.context.snapshot();
        self.context.cached(
            format!("limit_breaks:{}", key),
            &snapshot,
            &snapshot.results.limit_breaks,
            predicate,
        )
    }
}
