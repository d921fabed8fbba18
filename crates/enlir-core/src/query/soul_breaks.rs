use super::{contains_text, search_text, QueryContext};
use crate::model::{Id, SoulBreak};

#[derive(Debug, Clone)]
pub struct SoulBreaksLogic {
    context: QueryContext,
}

impl SoulBreaksLogic {
    pub fn new(context: QueryContext) -> Self {
        Self { context }
    }

    pub fn all(&self) -> Vec<SoulBreak> {
        tracing::info!(method = "all", "soul breaks query");
        self.context.snapshot().results.soul_breaks.clone()
    }

    pub fn by_id(&self, id: Id) -> Option<SoulBreak> {
        tracing::info!(method = "by_id", id, "soul breaks query");
        let snapshot = self.context.snapshot();
        snapshot.results.soul_breaks.iter().find(|sb| sb.id == id).cloned()
    }

    pub fn by_character(&self, character_id: Id) -> Vec<SoulBreak> {
        tracing::info!(method = "by_character", character_id, "soul breaks query");
        self.filter(format!("by_character:{}", character_id), |sb| {
            sb.character_id == character_id
        })
    }

    pub fn by_name(&self, name: &str) -> Vec<SoulBreak> {
        tracing::info!(method = "by_name", name, "soul breaks query");
        let Some(needle) = search_text(name) else {
            return Vec::new();
        };
        self.filter(format!("by_name:{}", needle), |sb| {
            contains_text(&sb.soul_break_name, &needle)
        })
    }

    pub fn by_tier(&self, tier: Id) -> Vec<SoulBreak> {
        tracing::info!(method = "by_tier", tier, "soul breaks query");
        self.filter(format!("by_tier:{}", tier), |sb| sb.soul_break_tier == tier)
    }

    pub fn by_status(&self, status_id: Id) -> Vec<SoulBreak> {
        tracing::info!(method = "by_status", status_id, "soul breaks query");
        self.filter(format!("by_status:{}", status_id), |sb| {
            sb.statuses.iter().any(|status| status.id == status_id)
        })
    }

    pub fn by_effect(&self, effect_text: &str) -> Vec<SoulBreak> {
        tracing::info!(method = "by_effect", effect_text, "soul breaks query");
        let Some(needle) = search_text(effect_text) else {
            return Vec::new();
        };
        self.filter(format!("by_effect:{}", needle), |sb| {
            contains_text(&sb.action.effects, &needle)
        })
    }

    fn filter(&self, key: String, predicate: impl Fn(&SoulBreak) -> bool) -> Vec<SoulBreak> {
        let snapshot = self.context.snapshot();
        self.context.cached(
            format!("soul_breaks:{}", key),
            &snapshot,
            &snapshot.results.soul_breaks,
            predicate,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::test_support::sample_context;

    #[test]
    fn test_by_status_uses_resolved_statuses() {
        let logic = SoulBreaksLogic::new(sample_context());

        let found = logic.by_status(2);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].soul_break_name, "Braver");
        assert_eq!(logic.by_status(1).len(), 1);
        assert!(logic.by_status(9).is_empty());
    }

    #[test]
    fn test_by_character_and_effect() {
        let logic = SoulBreaksLogic::new(sample_context());

        assert_eq!(logic.by_character(1).len(), 1);
        assert!(logic.by_character(0).is_empty());
        assert_eq!(logic.by_effect("five SINGLE").len(), 1);
        assert_eq!(logic.by_id(1).map(|sb| sb.realm), Some(7));
    }
}
