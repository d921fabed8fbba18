//! Events, missions and the experience table

use super::{impl_record, Id};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An in-game event with its server schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Event name
    pub event_name: String,
    /// Id from the Realm list
    pub realm: Id,
    /// Id from the EventType list
    pub event_type: Id,
    /// Global server start date
    pub global_start: Option<NaiveDate>,
    /// Global server end date
    pub global_end: Option<NaiveDate>,
    /// Japanese server start date
    pub japan_start: Option<NaiveDate>,
    /// Japanese server end date
    pub japan_end: Option<NaiveDate>,
    /// Characters unlocked by the event
    pub heroes_rescued: Vec<String>,
    /// Abilities awarded by the event
    pub abilities_awarded: Vec<String>,
    /// Magicite awarded by the event
    pub magicite_awarded: Vec<String>,
}
impl_record!(Event, event_name);

/// One reward line of a mission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionReward {
    /// Item name
    pub item_name: String,
    /// Item count
    pub quantity: i64,
}

impl MissionReward {
    /// Parse a reward such as "Major Power x3"; a missing count means 1
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let (name, quantity) = match text.rsplit_once(" x") {
            Some((name, count)) if !count.is_empty() && count.chars().all(|c| c.is_ascii_digit()) => {
                (name.trim(), count.parse().unwrap_or(1))
            }
            _ => (text, 1),
        };
        Self {
            item_name: name.to_string(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Mission category
    pub mission_type: String,
    /// Event the mission belongs to
    pub associated_event: String,
    /// Link to the event
    pub associated_event_id: Id,
    /// Rewards for completing it
    pub rewards: Vec<MissionReward>,
}
impl_record!(Mission);

/// One row of the experience table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Character level
    pub level: i64,
    /// Experience needed to reach this level
    pub experience_required: i64,
    /// Cumulative experience at this level
    pub total_experience: i64,
}
impl_record!(Experience);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mission_reward_parse() {
        let reward = MissionReward::parse("Major Power x3");
        assert_eq!(reward.item_name, "Major Power");
        assert_eq!(reward.quantity, 3);

        let reward = MissionReward::parse(" Rainbow Crystal ");
        assert_eq!(reward.item_name, "Rainbow Crystal");
        assert_eq!(reward.quantity, 1);

        let reward = MissionReward::parse("Phoenix Down xl");
        assert_eq!(reward.item_name, "Phoenix Down xl");
        assert_eq!(reward.quantity, 1);
    }
}
