//! Structural checks on an import before it is transformed

use crate::scanner::ImportResults;
use crate::sheet::SheetKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Header columns a worksheet must carry for its records to transform and join
pub fn required_columns(kind: SheetKind) -> &'static [&'static str] {
    match kind {
        SheetKind::Characters => &["Name", "Realm", "ID"],
        SheetKind::RecordSpheres | SheetKind::LegendSpheres => &["Character", "Realm", "Level", "Benefit"],
        SheetKind::RecordMaterias => &["Name", "Character", "Realm", "Effect"],
        SheetKind::LegendMaterias => &["Name", "Character", "Realm", "Relic", "Effect"],
        SheetKind::Abilities => &["Name", "Type", "School", "Rarity", "Effects"],
        SheetKind::SoulBreaks | SheetKind::LimitBreaks => {
            &["Name", "Character", "Realm", "Relic", "Tier", "Effects"]
        }
        SheetKind::Commands | SheetKind::SynchroCommands | SheetKind::BraveActions | SheetKind::Others => {
            &["Name", "Character", "Source", "Effects"]
        }
        SheetKind::Statuses => &["Common Name", "Effects"],
        SheetKind::Relics => &["Name", "Realm", "Character", "Type", "Soul Break", "Legend Materia"],
        SheetKind::Magicites => &["Name", "Realm", "Introducing Event"],
        SheetKind::MagiciteSkills => &["Name", "Magicite", "Effects"],
        SheetKind::Events => &["Event", "Realm", "Type"],
        SheetKind::Missions => &["Type", "Event", "Description", "Reward"],
        SheetKind::Experiences => &["Level", "Exp", "Total Exp"],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingColumn {
    pub sheet: SheetKind,
    pub column: String,
}

/// Everything structurally wrong with an import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub missing_sheets: Vec<SheetKind>,
    pub missing_columns: Vec<MissingColumn>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.missing_sheets.is_empty() && self.missing_columns.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return writeln!(f, "import is valid");
        }
        for sheet in &self.missing_sheets {
            writeln!(f, "missing worksheet: {}", sheet.title())?;
        }
        for missing in &self.missing_columns {
            writeln!(f, "worksheet '{}' is missing column '{}'", missing.sheet.title(), missing.column)?;
        }
        Ok(())
    }
}

/// Compare every worksheet's header against its schema
pub fn validate_import(import: &ImportResults) -> ValidationReport {
    let mut report = ValidationReport::default();

    for kind in SheetKind::ALL {
        let Some(sheet) = import.sheet(kind) else {
            tracing::warn!(sheet = %kind, "worksheet missing from import");
            report.missing_sheets.push(kind);
            continue;
        };
        for column in required_columns(kind) {
            if sheet.find_column(column).is_none() {
                tracing::warn!(sheet = %kind, column, "worksheet structure does not match the expected structure");
                report.missing_columns.push(MissingColumn {
                    sheet: kind,
                    column: column.to_string(),
                });
            }
        }
    }

    tracing::info!(valid = report.is_valid(), "validated import");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_sheet_str;

    #[test]
    fn test_reports_missing_sheets_and_columns() {
        let events = parse_sheet_str("Event,Realm,Type\nFat Chocobo,V,Challenge\n", SheetKind::Events).unwrap();
        let statuses = parse_sheet_str("Common Name,Notes\nHaste,\n", SheetKind::Statuses).unwrap();
        let import = ImportResults::from_sheets(vec![events, statuses]);

        let report = validate_import(&import);

        assert!(!report.is_valid());
        assert_eq!(report.missing_sheets.len(), SheetKind::ALL.len() - 2);
        assert_eq!(
            report.missing_columns,
            vec![MissingColumn {
                sheet: SheetKind::Statuses,
                column: "Effects".to_string(),
            }]
        );
        assert!(report.to_string().contains("'Effects'"));
    }

    #[test]
    fn test_every_sheet_has_a_schema() {
        for kind in SheetKind::ALL {
            assert!(!required_columns(kind).is_empty(), "{} has no schema", kind);
        }
    }
}
