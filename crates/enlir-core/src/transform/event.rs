use super::RowTransformer;
use crate::convert::{to_date, to_int, to_list};
use crate::model::{Event, Experience, Id, Mission, MissionReward};
use crate::sheet::{RowView, SheetKind};
use crate::type_list::{EVENT_TYPES, REALMS};

#[derive(Debug, Default)]
pub struct EventTransformer;

impl RowTransformer for EventTransformer {
    type Output = Event;

    fn sheet(&self) -> SheetKind {
        SheetKind::Events
    }

    fn key_column(&self) -> &'static str {
        "Event"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> Event {
        Event {
            id: generated_id,
            description: row.get("Event").to_string(),
            event_name: row.get("Event").to_string(),
            realm: REALMS.id_of(row.get("Realm")),
            event_type: EVENT_TYPES.id_of(row.get("Type")),
            global_start: to_date(row.get("Global Start")),
            global_end: to_date(row.get("Global End")),
            japan_start: to_date(row.get("Japan Start")),
            japan_end: to_date(row.get("Japan End")),
            heroes_rescued: to_list(row.get("Heroes Rescued")),
            abilities_awarded: to_list(row.get("Abilities Awarded")),
            magicite_awarded: to_list(row.get("Magicite Awarded")),
        }
    }
}

#[derive(Debug, Default)]
pub struct MissionTransformer;

impl RowTransformer for MissionTransformer {
    type Output = Mission;

    fn sheet(&self) -> SheetKind {
        SheetKind::Missions
    }

    fn key_column(&self) -> &'static str {
        "Description"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> Mission {
        Mission {
            id: generated_id,
            description: row.trimmed("Description").to_string(),
            mission_type: row.trimmed("Type").to_string(),
            associated_event: row.get("Event").to_string(),
            associated_event_id: 0,
            rewards: to_list(row.get("Reward"))
                .iter()
                .map(|reward| MissionReward::parse(reward))
                .collect(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ExperienceTransformer;

impl RowTransformer for ExperienceTransformer {
    type Output = Experience;

    fn sheet(&self) -> SheetKind {
        SheetKind::Experiences
    }

    fn key_column(&self) -> &'static str {
        "Level"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> Experience {
        let level = to_int(row.get("Level"));
        Experience {
            id: generated_id,
            description: format!("Level {}", level),
            level,
            experience_required: to_int(row.get("Exp")),
            total_experience: to_int(row.get("Total Exp")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::parser::parse_sheet_str;

    #[test]
    fn test_event_row() {
        let sheet = parse_sheet_str(
            "Event,Realm,Type,Global Start,Global End,Heroes Rescued\n\
             Fat Chocobo,V,Challenge,2019-03-14,03/28/2019,\"Bartz, Faris\"\n",
            SheetKind::Events,
        )
        .unwrap();

        let events = EventTransformer.transform(&sheet).unwrap();
        let event = &events[0];

        assert_eq!(event.realm, 5);
        assert_eq!(event.event_type, 1);
        assert_eq!(event.global_start, NaiveDate::from_ymd_opt(2019, 3, 14));
        assert_eq!(event.global_end, NaiveDate::from_ymd_opt(2019, 3, 28));
        assert_eq!(event.japan_start, None);
        assert_eq!(event.heroes_rescued, vec!["Bartz", "Faris"]);
    }

    #[test]
    fn test_mission_rewards() {
        let sheet = parse_sheet_str(
            "Type,Event,Description,Reward\nEvent,Fat Chocobo,Defeat the boss,\"Major Power x3, Gil\"\n",
            SheetKind::Missions,
        )
        .unwrap();

        let missions = MissionTransformer.transform(&sheet).unwrap();

        assert_eq!(missions[0].rewards.len(), 2);
        assert_eq!(missions[0].rewards[0].quantity, 3);
        assert_eq!(missions[0].rewards[1].item_name, "Gil");
    }
}
