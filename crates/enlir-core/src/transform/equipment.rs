use super::{action_profile, RowTransformer};
use crate::convert::{to_bool, to_int};
use crate::model::{Id, Magicite, MagiciteSkill, Relic, StatBlock};
use crate::sheet::{RowView, SheetKind};
use crate::type_list::{ELEMENTS, REALMS, RELIC_TYPES};

const PASSIVE_COLUMNS: [&str; 3] = ["Passive 1", "Passive 2", "Passive 3"];

#[derive(Debug, Default)]
pub struct RelicTransformer;

impl RowTransformer for RelicTransformer {
    type Output = Relic;

    fn sheet(&self) -> SheetKind {
        SheetKind::Relics
    }

    fn key_column(&self) -> &'static str {
        "Name"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> Relic {
        let stats = StatBlock {
            atk: to_int(row.get("ATK")),
            def: to_int(row.get("DEF")),
            mag: to_int(row.get("MAG")),
            res: to_int(row.get("RES")),
            mnd: to_int(row.get("MND")),
            acc: to_int(row.get("ACC")),
            eva: to_int(row.get("EVA")),
            ..Default::default()
        };

        Relic {
            id: generated_id,
            description: format!("{} ({})", row.get("Name"), row.get("Character")),
            relic_name: row.get("Name").to_string(),
            realm: REALMS.id_of(row.get("Realm")),
            character_name: row.get("Character").to_string(),
            character_id: 0,
            relic_type: RELIC_TYPES.id_of(row.get("Type")),
            rarity: to_int(row.get("Rarity")),
            level: to_int(row.get("Level")),
            stats,
            effect: row.trimmed("Effect").to_string(),
            soul_break_name: row.get("Soul Break").to_string(),
            soul_break_id: 0,
            soul_break: None,
            limit_break_id: 0,
            limit_break: None,
            legend_materia_name: row.get("Legend Materia").to_string(),
            legend_materia_id: 0,
            is_synergy: to_bool(row.get("Synergy")),
            is_in_global: to_bool(row.get("Global")),
            enlir_id: row.trimmed("ID").to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MagiciteTransformer;

impl RowTransformer for MagiciteTransformer {
    type Output = Magicite;

    fn sheet(&self) -> SheetKind {
        SheetKind::Magicites
    }

    fn key_column(&self) -> &'static str {
        "Name"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> Magicite {
        Magicite {
            id: generated_id,
            description: row.get("Name").to_string(),
            magicite_name: row.get("Name").to_string(),
            realm: REALMS.id_of(row.get("Realm")),
            rarity: to_int(row.get("Rarity")),
            element: ELEMENTS.id_of(row.get("Element")),
            passives: PASSIVE_COLUMNS
                .iter()
                .map(|column| row.trimmed(column))
                .filter(|passive| !passive.is_empty())
                .map(str::to_string)
                .collect(),
            introducing_event_name: row.get("Introducing Event").to_string(),
            introducing_event_id: 0,
            is_in_global: to_bool(row.get("Global")),
            enlir_id: row.trimmed("ID").to_string(),
            magicite_skills: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MagiciteSkillTransformer;

impl RowTransformer for MagiciteSkillTransformer {
    type Output = MagiciteSkill;

    fn sheet(&self) -> SheetKind {
        SheetKind::MagiciteSkills
    }

    fn key_column(&self) -> &'static str {
        "Magicite"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> MagiciteSkill {
        MagiciteSkill {
            id: generated_id,
            description: format!("{} - {}", row.get("Magicite"), row.get("Name")),
            magicite_skill_name: row.get("Name").to_string(),
            magicite_name: row.get("Magicite").to_string(),
            magicite_id: 0,
            action: action_profile(row),
            enlir_id: row.trimmed("ID").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_sheet_str;

    #[test]
    fn test_relic_row() {
        let sheet = parse_sheet_str(
            "Name,Realm,Character,Type,Rarity,ATK,Soul Break,Legend Materia,Synergy\n\
             Buster Sword,VII,Cloud,Sword,5,120,Braver,Sword Saint,Y\n",
            SheetKind::Relics,
        )
        .unwrap();

        let relics = RelicTransformer.transform(&sheet).unwrap();
        let relic = &relics[0];

        assert_eq!(relic.description, "Buster Sword (Cloud)");
        assert_eq!(relic.relic_type, 2);
        assert_eq!(relic.stats.atk, 120);
        assert_eq!(relic.soul_break_name, "Braver");
        assert!(relic.is_synergy);
        assert!(relic.soul_break.is_none());
    }

    #[test]
    fn test_magicite_skill_description() {
        let sheet = parse_sheet_str("Magicite,Name\nRamuh (IX),Judgment Bolt\n", SheetKind::MagiciteSkills).unwrap();

        let skills = MagiciteSkillTransformer.transform(&sheet).unwrap();

        assert_eq!(skills[0].description, "Ramuh (IX) - Judgment Bolt");
        assert_eq!(skills[0].magicite_name, "Ramuh (IX)");
    }
}
