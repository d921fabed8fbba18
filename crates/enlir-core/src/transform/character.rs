use super::RowTransformer;
use crate::convert::{to_bool, to_int};
use crate::model::{
    Character, Id, LegendMateria, LegendSphere, RecordMateria, RecordSphere, StatBlock,
    StatsByLevelInfo,
};
use crate::sheet::{RowView, SheetKind};
use crate::type_list::{REALMS, RELIC_TYPES, SCHOOLS};

/// Stat set id paired with the column suffix the character sheet uses for it
const STAT_SETS: [(Id, &str); 7] = [
    (1, "Lv50"),
    (2, "Lv65"),
    (3, "Lv80"),
    (4, "Lv99"),
    (5, "Record Spheres"),
    (6, "Legend Spheres"),
    (7, "Record Board"),
];

fn stat_block(row: RowView<'_>, suffix: &str) -> StatBlock {
    let stat = |name: &str| to_int(row.get(&format!("{} ({})", name, suffix)));
    StatBlock {
        hp: stat("HP"),
        atk: stat("ATK"),
        def: stat("DEF"),
        mag: stat("MAG"),
        res: stat("RES"),
        mnd: stat("MND"),
        acc: stat("ACC"),
        eva: stat("EVA"),
        spd: stat("SPD"),
    }
}

/// Type-list ids whose name column is checked on this row
fn access_ids(row: RowView<'_>, entries: &[(Id, &'static str)]) -> Vec<Id> {
    entries
        .iter()
        .filter(|(id, name)| *id != 0 && to_bool(row.get(name)))
        .map(|(id, _)| *id)
        .collect()
}

#[derive(Debug, Default)]
pub struct CharacterTransformer;

impl RowTransformer for CharacterTransformer {
    type Output = Character;

    fn sheet(&self) -> SheetKind {
        SheetKind::Characters
    }

    fn key_column(&self) -> &'static str {
        "Name"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> Character {
        let stats_by_level = STAT_SETS
            .iter()
            .map(|(stat_set, suffix)| StatsByLevelInfo {
                stat_set: *stat_set,
                introducing_event_name: row
                    .trimmed(&format!("Introducing Event ({})", suffix))
                    .to_string(),
                introducing_event_id: 0,
                stats: stat_block(row, suffix),
            })
            .collect();

        Character {
            id: generated_id,
            description: row.get("Name").to_string(),
            character_name: row.get("Name").to_string(),
            realm: REALMS.id_of(row.get("Realm")),
            stats_by_level,
            equipment_access: access_ids(row, RELIC_TYPES.entries),
            school_access: access_ids(row, SCHOOLS.entries),
            is_in_global: to_bool(row.get("Global")),
            enlir_id: row.trimmed("ID").to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordSphereTransformer;

impl RowTransformer for RecordSphereTransformer {
    type Output = RecordSphere;

    fn sheet(&self) -> SheetKind {
        SheetKind::RecordSpheres
    }

    fn key_column(&self) -> &'static str {
        "Character"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> RecordSphere {
        let sphere_level = to_int(row.get("Level"));
        RecordSphere {
            id: generated_id,
            description: format!("{} Record Sphere {}", row.get("Character"), sphere_level),
            character_name: row.get("Character").to_string(),
            character_id: 0,
            realm: REALMS.id_of(row.get("Realm")),
            sphere_level,
            benefit: row.trimmed("Benefit").to_string(),
            is_in_global: to_bool(row.get("Global")),
            enlir_id: row.trimmed("ID").to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct LegendSphereTransformer;

impl RowTransformer for LegendSphereTransformer {
    type Output = LegendSphere;

    fn sheet(&self) -> SheetKind {
        SheetKind::LegendSpheres
    }

    fn key_column(&self) -> &'static str {
        "Character"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> LegendSphere {
        let sphere_level = to_int(row.get("Level"));
        LegendSphere {
            id: generated_id,
            description: format!("{} Legend Sphere {}", row.get("Character"), sphere_level),
            character_name: row.get("Character").to_string(),
            character_id: 0,
            realm: REALMS.id_of(row.get("Realm")),
            sphere_level,
            benefit: row.trimmed("Benefit").to_string(),
            tier: 0,
            is_in_global: to_bool(row.get("Global")),
            enlir_id: row.trimmed("ID").to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordMateriaTransformer;

impl RowTransformer for RecordMateriaTransformer {
    type Output = RecordMateria;

    fn sheet(&self) -> SheetKind {
        SheetKind::RecordMaterias
    }

    fn key_column(&self) -> &'static str {
        "Name"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> RecordMateria {
        RecordMateria {
            id: generated_id,
            description: row.get("Name").to_string(),
            record_materia_name: row.get("Name").to_string(),
            character_name: row.get("Character").to_string(),
            character_id: 0,
            realm: REALMS.id_of(row.get("Realm")),
            effect: row.trimmed("Effect").to_string(),
            unlock_criteria: row.trimmed("Unlock Criteria").to_string(),
            is_in_global: to_bool(row.get("Global")),
            enlir_id: row.trimmed("ID").to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct LegendMateriaTransformer;

impl RowTransformer for LegendMateriaTransformer {
    type Output = LegendMateria;

    fn sheet(&self) -> SheetKind {
        SheetKind::LegendMaterias
    }

    fn key_column(&self) -> &'static str {
        "Name"
    }

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> LegendMateria {
        LegendMateria {
            id: generated_id,
            description: row.get("Name").to_string(),
            legend_materia_name: row.get("Name").to_string(),
            character_name: row.get("Character").to_string(),
            character_id: 0,
            relic_name: row.get("Relic").to_string(),
            relic_id: 0,
            realm: REALMS.id_of(row.get("Realm")),
            effect: row.trimmed("Effect").to_string(),
            mastery_bonus: row.trimmed("Master").to_string(),
            is_in_global: to_bool(row.get("Global")),
            enlir_id: row.trimmed("ID").to_string(),
        }
    }
}
