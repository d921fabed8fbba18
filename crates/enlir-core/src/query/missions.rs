use super::{contains_text, search_text, QueryContext};
use crate::model::{Experience, Id, Mission};

#[derive(Debug, Clone)]
pub struct MissionsLogic {
    context: QueryContext,
}

impl MissionsLogic {
    pub fn new(context: QueryContext) -> Self {
        Self { context }
    }

    pub fn all(&self) -> Vec<Mission> {
        tracing::info!(method = "all", "missions query");
        self.context.snapshot().results.missions.clone()
    }

    pub fn by_id(&self, id: Id) -> Option<Mission> {
        tracing::info!(method = "by_id", id, "missions query");
        let snapshot = self.context.snapshot();
        snapshot.results.missions.iter().find(|m| m.id == id).cloned()
    }

    pub fn by_mission_type(&self, mission_type: &str) -> Vec<Mission> {
        tracing::info!(method = "by_mission_type", mission_type, "missions query");
        self.text_filter("by_mission_type", mission_type, |m| m.mission_type.as_str())
    }

    pub fn by_event(&self, event_name: &str) -> Vec<Mission> {
        tracing::info!(method = "by_event", event_name, "missions query");
        self.text_filter("by_event", event_name, |m| m.associated_event.as_str())
    }

    pub fn by_description(&self, description: &str) -> Vec<Mission> {
        tracing::info!(method = "by_description", description, "missions query");
        self.text_filter("by_description", description, |m| m.description.as_str())
    }

    /// Missions with any reward whose item name contains `reward`
    pub fn by_reward(&self, reward: &str) -> Vec<Mission> {
        tracing::info!(method = "by_reward", reward, "missions query");
        let Some(needle) = search_text(reward) else {
            return Vec::new();
        };
        let snapshot = self.context.snapshot();
        self.context.cached(
            format!("missions:by_reward:{}", needle),
            &snapshot,
            &snapshot.results.missions,
            |m| m.rewards.iter().any(|r| contains_text(&r.item_name, &needle)),
        )
    }

    fn text_filter(
        &self,
        method: &str,
        text: &str,
        field: fn(&Mission) -> &str,
    ) -> Vec<Mission> {
        let Some(needle) = search_text(text) else {
            return Vec::new();
        };
        let snapshot = self.context.snapshot();
        self.context.cached(
            format!("missions:{}:{}", method, needle),
            &snapshot,
            &snapshot.results.missions,
            |m| contains_text(field(m), &needle),
        )
    }
}

#[derive(Debug, Clone)]
pub struct ExperiencesLogic {
    context: QueryContext,
}

impl ExperiencesLogic {
    pub fn new(context: QueryContext) -> Self {
        Self { context }
    }

    pub fn all(&self) -> Vec<Experience> {
        tracing::info!(method = "all", "experiences query");
        self.context.snapshot().results.experiences.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::model::MissionReward;
    use crate::query::test_support::{context_for, sample_context};

    #[test]
    fn test_by_reward_matches_item_names() {
        let mut graph = fixtures::sample_graph();
        graph.missions[0].rewards = vec![
            MissionReward::parse("Major Power x3"),
            MissionReward::parse("Gil x5000"),
        ];
        let logic = MissionsLogic::new(context_for(graph));

        assert_eq!(logic.by_reward("major power").len(), 1);
        assert!(logic.by_reward("Crystal").is_empty());
        assert!(logic.by_reward(" ").is_empty());
    }

    #[test]
    fn test_text_queries() {
        let context = sample_context();
        let logic = MissionsLogic::new(context.clone());

        assert_eq!(logic.by_event("fat chocobo").len(), 1);
        assert_eq!(logic.by_mission_type("EVENT").len(), 1);
        assert_eq!(logic.by_description("ramuh").len(), 1);
        assert_eq!(ExperiencesLogic::new(context).all().len(), 1);
    }
}
