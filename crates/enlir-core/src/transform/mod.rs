//! Row transformers: raw worksheet rows to typed, unlinked entities

mod ability;
mod character;
mod equipment;
mod event;

pub use ability::{
    AbilityTransformer, BraveActionTransformer, CommandTransformer, LimitBreakTransformer,
    OtherTransformer, SoulBreakTransformer, StatusTransformer, SynchroCommandTransformer,
};
pub use character::{
    CharacterTransformer, LegendMateriaTransformer, LegendSphereTransformer,
    RecordMateriaTransformer, RecordSphereTransformer,
};
pub use equipment::{MagiciteSkillTransformer, MagiciteTransformer, RelicTransformer};
pub use event::{EventTransformer, ExperienceTransformer, MissionTransformer};

use crate::convert::{to_bool, to_double};
use crate::error::{Error, Result};
use crate::model::{ActionProfile, Id, Record, TransformResultsContainer};
use crate::scanner::ImportResults;
use crate::sheet::{RowView, Sheet, SheetKind};
use crate::type_list::{
    ABILITY_TYPES, AUTO_TARGET_TYPES, DAMAGE_FORMULA_TYPES, ELEMENTS, TARGET_TYPES,
};

/// Converts the rows of one worksheet into typed entities
pub trait RowTransformer {
    type Output: Record;

    /// Worksheet this transformer reads
    fn sheet(&self) -> SheetKind;

    /// Column that must be present for the worksheet to be usable
    fn key_column(&self) -> &'static str;

    fn convert_row(&self, generated_id: Id, row: RowView<'_>) -> Self::Output;

    /// Convert every row, assigning ids 1, 2, 3, ... in row order
    fn transform(&self, sheet: &Sheet) -> Result<Vec<Self::Output>> {
        if sheet.find_column(self.key_column()).is_none() {
            return Err(Error::ColumnMismatch {
                sheet: sheet.kind.title().to_string(),
                column: self.key_column().to_string(),
            });
        }

        let mut results = Vec::with_capacity(sheet.row_count());
        for (generated_id, row) in (1..).zip(sheet.records()) {
            let model = self.convert_row(generated_id, row);
            tracing::debug!(
                sheet = %sheet.kind,
                id = model.id(),
                description = model.description(),
                "converted row"
            );
            results.push(model);
        }
        Ok(results)
    }
}

/// Shared combat columns: Type, Target, Formula, Multiplier, Element, Time,
/// Effects, Counter, Auto Target
pub(crate) fn action_profile(row: RowView<'_>) -> ActionProfile {
    ActionProfile {
        ability_type: ABILITY_TYPES.id_of(row.get("Type")),
        target_type: TARGET_TYPES.id_of(row.get("Target")),
        auto_target_type: AUTO_TARGET_TYPES.id_of(row.get("Auto Target")),
        damage_formula_type: DAMAGE_FORMULA_TYPES.id_of(row.get("Formula")),
        multiplier: to_double(row.get("Multiplier")),
        elements: ELEMENTS.ids_of_list(row.get("Element")),
        cast_time: to_double(row.get("Time")),
        effects: row.trimmed("Effects").to_string(),
        is_counterable: to_bool(row.get("Counter")),
    }
}

/// Runs every row transformer over an import
#[derive(Debug, Default)]
pub struct TransformManager;

impl TransformManager {
    pub fn new() -> Self {
        Self
    }

    /// Transform every worksheet of an import into entity collections
    ///
    /// A missing worksheet yields an empty collection; a worksheet without its
    /// key column is an error.
    #[tracing::instrument(skip_all, fields(root = %import.root.display()))]
    pub fn transform_all(&self, import: &ImportResults) -> Result<TransformResultsContainer> {
        let results = TransformResultsContainer {
            abilities: run(&AbilityTransformer, import)?,
            characters: run(&CharacterTransformer, import)?,
            commands: run(&CommandTransformer, import)?,
            synchro_commands: run(&SynchroCommandTransformer, import)?,
            brave_actions: run(&BraveActionTransformer, import)?,
            events: run(&EventTransformer, import)?,
            experiences: run(&ExperienceTransformer, import)?,
            legend_materias: run(&LegendMateriaTransformer, import)?,
            legend_spheres: run(&LegendSphereTransformer, import)?,
            magicite_skills: run(&MagiciteSkillTransformer, import)?,
            magicites: run(&MagiciteTransformer, import)?,
            missions: run(&MissionTransformer, import)?,
            others: run(&OtherTransformer, import)?,
            record_materias: run(&RecordMateriaTransformer, import)?,
            record_spheres: run(&RecordSphereTransformer, import)?,
            relics: run(&RelicTransformer, import)?,
            soul_breaks: run(&SoulBreakTransformer, import)?,
            limit_breaks: run(&LimitBreakTransformer, import)?,
            statuses: run(&StatusTransformer, import)?,
        };

        for (kind, count) in results.counts() {
            tracing::info!(entity = %kind, count, "transformed entities");
        }
        Ok(results)
    }
}

fn run<T: RowTransformer>(transformer: &T, import: &ImportResults) -> Result<Vec<T::Output>> {
    match import.sheet(transformer.sheet()) {
        Some(sheet) => transformer.transform(sheet),
        None => {
            tracing::warn!(sheet = %transformer.sheet(), "worksheet missing from import");
            Ok(Vec::new())
        }
    }
}
