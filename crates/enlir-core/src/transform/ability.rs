use super::{action_profile, RowTransformer};
use crate::convert::{to_bool, to_double, to_int, to_list};
use crate::model::{
    Ability, BraveAction, Command, Id, LimitBreak, OrbRequirement, Other, OtherSource, SoulBreak,
    Status, SynchroCommand,
};
use crate::sheet::{RowView, SheetKind};
use crate::type_list::{orb_type_of, LIMIT_BREAK_TIERS, REALMS, SCHOOLS, SOUL_BREAK_TIERS};

const ORB_COLUMNS: [&str; 4] = ["Orb 1 Required", "Orb 2 Required", "Orb 3 Required", "Orb 4 Required"];

/// Placeholder the worksheet uses for "no character"
const DASH: &str = "-";

#[derive(Debug, Default)]
pub struct AbilityTransformer;

impl RowTransformer for AbilityTransformer {
    type Output = Ability;

    fn sheet(&self) -> SheetKind {
        SheetKind::Abilities
    }

    fn key_column(&self) -> &'static str {
        "Name"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> Ability {
        let orb_requirements = ORB_COLUMNS
            .iter()
            .map(|column| row.trimmed(column))
            .filter(|orb| !orb.is_empty() && *orb != DASH)
            .map(|orb| OrbRequirement {
                orb_name: orb.to_string(),
                orb_type: orb_type_of(orb),
            })
            .collect();

        Ability {
            id: generated_id,
            description: row.trimmed("Name").to_string(),
            ability_name: row.trimmed("Name").to_string(),
            action: action_profile(row),
            school: SCHOOLS.id_of(row.get("School")),
            rarity: to_int(row.get("Rarity")),
            soul_break_points_gained: to_int(row.get("SB")),
            uses_per_battle: to_int(row.get("Uses")),
            orb_requirements,
            introducing_event_name: row.trimmed("Introducing Event").to_string(),
            introducing_event_id: 0,
            is_in_global: to_bool(row.get("Global")),
            enlir_id: row.trimmed("ID").to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct StatusTransformer;

impl RowTransformer for StatusTransformer {
    type Output = Status;

    fn sheet(&self) -> SheetKind {
        SheetKind::Statuses
    }

    fn key_column(&self) -> &'static str {
        "Common Name"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> Status {
        Status {
            id: generated_id,
            description: row.trimmed("Common Name").to_string(),
            // kept untrimmed; status joins compare trimmed text at merge time
            common_name: row.get("Common Name").to_string(),
            effects: row.get("Effects").to_string(),
            default_duration: to_int(row.get("Default Duration")),
            mind_modifier: to_double(row.get("MND Modifier")),
            exclusive_statuses: to_list(row.get("Exclusive Status")),
            notes: row.trimmed("Notes").to_string(),
            enlir_id: row.trimmed("ID").to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CommandTransformer;

impl RowTransformer for CommandTransformer {
    type Output = Command;

    fn sheet(&self) -> SheetKind {
        SheetKind::Commands
    }

    fn key_column(&self) -> &'static str {
        "Name"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> Command {
        Command {
            id: generated_id,
            description: format!("{} - {}", row.get("Source"), row.get("Name")),
            command_name: row.get("Name").to_string(),
            character_name: row.get("Character").to_string(),
            character_id: 0,
            source_soul_break_name: row.get("Source").to_string(),
            source_soul_break_id: 0,
            action: action_profile(row),
            soul_break_points_gained: to_int(row.get("SB")),
            school: SCHOOLS.id_of(row.get("School")),
            is_in_global: to_bool(row.get("Global")),
            enlir_id: row.trimmed("ID").to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct SynchroCommandTransformer;

impl RowTransformer for SynchroCommandTransformer {
    type Output = SynchroCommand;

    fn sheet(&self) -> SheetKind {
        SheetKind::SynchroCommands
    }

    fn key_column(&self) -> &'static str {
        "Name"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> SynchroCommand {
        SynchroCommand {
            id: generated_id,
            description: format!("{} - {}", row.get("Source"), row.get("Name")),
            command_name: row.get("Name").to_string(),
            character_name: row.get("Character").to_string(),
            character_id: 0,
            source_soul_break_name: row.get("Source").to_string(),
            source_soul_break_id: 0,
            synchro_ability_slot: to_int(row.get("Synchro Ability Slot")),
            synchro_condition: row.trimmed("Synchro Condition").to_string(),
            action: action_profile(row),
            soul_break_points_gained: to_int(row.get("SB")),
            school: SCHOOLS.id_of(row.get("School")),
            is_in_global: to_bool(row.get("Global")),
            enlir_id: row.trimmed("ID").to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct BraveActionTransformer;

impl RowTransformer for BraveActionTransformer {
    type Output = BraveAction;

    fn sheet(&self) -> SheetKind {
        SheetKind::BraveActions
    }

    fn key_column(&self) -> &'static str {
        "Name"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> BraveAction {
        BraveAction {
            id: generated_id,
            description: format!("{} - {}", row.get("Source"), row.get("Name")),
            brave_action_name: row.get("Name").to_string(),
            character_name: row.get("Character").to_string(),
            character_id: 0,
            source_soul_break_name: row.get("Source").to_string(),
            source_soul_break_id: 0,
            brave_level: to_int(row.get("Brave Level")),
            brave_condition: row.trimmed("Brave Condition").to_string(),
            action: action_profile(row),
            soul_break_points_gained: to_int(row.get("SB")),
            school: SCHOOLS.id_of(row.get("School")),
            is_in_global: to_bool(row.get("Global")),
            enlir_id: row.trimmed("ID").to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct SoulBreakTransformer;

impl RowTransformer for SoulBreakTransformer {
    type Output = SoulBreak;

    fn sheet(&self) -> SheetKind {
        SheetKind::SoulBreaks
    }

    fn key_column(&self) -> &'static str {
        "Name"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> SoulBreak {
        SoulBreak {
            id: generated_id,
            description: row.get("Name").to_string(),
            soul_break_name: row.get("Name").to_string(),
            character_name: row.get("Character").to_string(),
            character_id: 0,
            relic_name: row.get("Relic").to_string(),
            relic_id: 0,
            realm: REALMS.id_of(row.get("Realm")),
            action: action_profile(row),
            soul_break_points_required: to_int(row.get("Points")),
            soul_break_tier: SOUL_BREAK_TIERS.id_of(row.get("Tier")),
            mastery_bonus: row.trimmed("Master").to_string(),
            is_in_global: to_bool(row.get("Global")),
            enlir_id: row.trimmed("ID").to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct LimitBreakTransformer;

impl RowTransformer for LimitBreakTransformer {
    type Output = LimitBreak;

    fn sheet(&self) -> SheetKind {
        SheetKind::LimitBreaks
    }

    fn key_column(&self) -> &'static str {
        "Name"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> LimitBreak {
        let character = row.get("Character");
        let character_name = if character.trim() == DASH { "" } else { character };

        LimitBreak {
            id: generated_id,
            description: row.get("Name").to_string(),
            limit_break_name: row.get("Name").to_string(),
            character_name: character_name.to_string(),
            character_id: 0,
            relic_name: row.get("Relic").to_string(),
            relic_id: 0,
            realm: REALMS.id_of(row.get("Realm")),
            action: action_profile(row),
            minimum_lb_points: to_int(row.get("Minimum LB Points")),
            limit_break_tier: LIMIT_BREAK_TIERS.id_of(row.get("Tier")),
            limit_break_bonus: row.trimmed("Limit Break Bonus").to_string(),
            mastery_bonus: row.trimmed("Master").to_string(),
            is_in_global: to_bool(row.get("Global")),
            enlir_id: row.trimmed("ID").to_string(),
            statuses: Vec::new(),
            other_effects: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct OtherTransformer;

impl RowTransformer for OtherTransformer {
    type Output = Other;

    fn sheet(&self) -> SheetKind {
        SheetKind::Others
    }

    fn key_column(&self) -> &'static str {
        "Source"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> Other {
        Other {
            id: generated_id,
            description: format!("{} - {}", row.get("Source"), row.get("Name")),
            other_name: row.get("Name").to_string(),
            character_name: row.get("Character").to_string(),
            source_name: row.get("Source").to_string(),
            source: OtherSource::Unresolved,
            action: action_profile(row),
            soul_break_points_gained: to_int(row.get("SB")),
            school: SCHOOLS.id_of(row.get("School")),
            enlir_id: row.trimmed("ID").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_sheet_str;

    #[test]
    fn test_command_description_and_links_unresolved() {
        let sheet = parse_sheet_str(
            "Character,Source,Name,Type,SB,School\nCloud,Ultra Cross Slash,Cross Slash,PHY,150,Combat\n",
            SheetKind::Commands,
        )
        .unwrap();

        let commands = CommandTransformer.transform(&sheet).unwrap();

        assert_eq!(commands[0].description, "Ultra Cross Slash - Cross Slash");
        assert_eq!(commands[0].source_soul_break_id, 0);
        assert_eq!(commands[0].character_id, 0);
        assert_eq!(commands[0].soul_break_points_gained, 150);
        assert_eq!(commands[0].school, 4);
    }

    #[test]
    fn test_limit_break_dash_character_becomes_empty() {
        let sheet = parse_sheet_str(
            "Realm,Character,Name,Tier,Relic\nVII,-,Omnislash Version 5,GLB,Ultima Weapon (VII)\n",
            SheetKind::LimitBreaks,
        )
        .unwrap();

        let limit_breaks = LimitBreakTransformer.transform(&sheet).unwrap();

        assert_eq!(limit_breaks[0].character_name, "");
        assert_eq!(limit_breaks[0].realm, 7);
        assert_eq!(limit_breaks[0].limit_break_tier, 3);
        assert_eq!(limit_breaks[0].relic_name, "Ultima Weapon (VII)");
    }

    #[test]
    fn test_ability_orbs() {
        let sheet = parse_sheet_str(
            "Name,Rarity,School,Orb 1 Required,Orb 2 Required,Orb 3 Required,Orb 4 Required\n\
             Full Break,4,Combat,Major Power,Greater Earth,-,\n",
            SheetKind::Abilities,
        )
        .unwrap();

        let abilities = AbilityTransformer.transform(&sheet).unwrap();

        assert_eq!(abilities[0].rarity, 4);
        assert_eq!(abilities[0].orb_requirements.len(), 2);
        assert_eq!(abilities[0].orb_requirements[0].orb_type, 1);
        assert_eq!(abilities[0].orb_requirements[1].orb_type, 10);
    }

    #[test]
    fn test_other_starts_unresolved() {
        let sheet = parse_sheet_str(
            "Character,Source,Name\nCloud,Omnislash,Cross Slash Follow-up\n",
            SheetKind::Others,
        )
        .unwrap();

        let others = OtherTransformer.transform(&sheet).unwrap();

        assert_eq!(others[0].description, "Omnislash - Cross Slash Follow-up");
        assert_eq!(others[0].source, OtherSource::Unresolved);
    }
}
