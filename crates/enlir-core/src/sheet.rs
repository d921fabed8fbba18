//! Worksheet types for representing imported Enlir rows

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The worksheets of the Enlir spreadsheet that the pipeline imports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SheetKind {
    Characters,
    RecordSpheres,
    LegendSpheres,
    RecordMaterias,
    LegendMaterias,
    Abilities,
    SoulBreaks,
    LimitBreaks,
    Commands,
    SynchroCommands,
    BraveActions,
    Others,
    Statuses,
    Relics,
    Magicites,
    MagiciteSkills,
    Events,
    Missions,
    Experiences,
}

impl SheetKind {
    /// Every worksheet, in import order
    pub const ALL: [SheetKind; 19] = [
        SheetKind::Characters,
        SheetKind::RecordSpheres,
        SheetKind::LegendSpheres,
        SheetKind::RecordMaterias,
        SheetKind::LegendMaterias,
        SheetKind::Abilities,
        SheetKind::SoulBreaks,
        SheetKind::LimitBreaks,
        SheetKind::Commands,
        SheetKind::SynchroCommands,
        SheetKind::BraveActions,
        SheetKind::Others,
        SheetKind::Statuses,
        SheetKind::Relics,
        SheetKind::Magicites,
        SheetKind::MagiciteSkills,
        SheetKind::Events,
        SheetKind::Missions,
        SheetKind::Experiences,
    ];

    /// Worksheet title as it appears in the spreadsheet
    pub fn title(self) -> &'static str {
        match self {
            SheetKind::Characters => "Characters",
            SheetKind::RecordSpheres => "Record Spheres",
            SheetKind::LegendSpheres => "Legend Spheres",
            SheetKind::RecordMaterias => "Record Materia",
            SheetKind::LegendMaterias => "Legend Materia",
            SheetKind::Abilities => "Abilities",
            SheetKind::SoulBreaks => "Soul Breaks",
            SheetKind::LimitBreaks => "Limit Breaks",
            SheetKind::Commands => "Commands",
            SheetKind::SynchroCommands => "Synchro",
            SheetKind::BraveActions => "Brave",
            SheetKind::Others => "Other",
            SheetKind::Statuses => "Status",
            SheetKind::Relics => "Relics",
            SheetKind::Magicites => "Magicite",
            SheetKind::MagiciteSkills => "Magicite Skills",
            SheetKind::Events => "Events",
            SheetKind::Missions => "Missions",
            SheetKind::Experiences => "Experience",
        }
    }

    /// Map an exported file stem onto a worksheet
    ///
    /// Matching ignores case and any non-alphanumeric characters, and accepts
    /// both the spreadsheet title and the plural/snake-case variants:
    /// - "Soul Breaks" -> SoulBreaks
    /// - "soul_breaks" -> SoulBreaks
    /// - "Record Materia" -> RecordMaterias
    pub fn from_file_stem(stem: &str) -> Option<SheetKind> {
        let normalized: String = stem
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let kind = match normalized.as_str() {
            "characters" | "character" => SheetKind::Characters,
            "recordspheres" | "recordsphere" => SheetKind::RecordSpheres,
            "legendspheres" | "legendsphere" => SheetKind::LegendSpheres,
            "recordmateria" | "recordmaterias" => SheetKind::RecordMaterias,
            "legendmateria" | "legendmaterias" => SheetKind::LegendMaterias,
            "abilities" | "ability" => SheetKind::Abilities,
            "soulbreaks" | "soulbreak" => SheetKind::SoulBreaks,
            "limitbreaks" | "limitbreak" => SheetKind::LimitBreaks,
            "commands" | "command" => SheetKind::Commands,
            "synchro" | "synchrocommands" | "synchrocommand" => SheetKind::SynchroCommands,
            "brave" | "braveactions" | "braveaction" => SheetKind::BraveActions,
            "other" | "others" => SheetKind::Others,
            "status" | "statuses" => SheetKind::Statuses,
            "relics" | "relic" => SheetKind::Relics,
            "magicite" | "magicites" => SheetKind::Magicites,
            "magiciteskills" | "magiciteskill" => SheetKind::MagiciteSkills,
            "events" | "event" => SheetKind::Events,
            "missions" | "mission" => SheetKind::Missions,
            "experience" | "experiences" => SheetKind::Experiences,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A parsed worksheet from a single CSV export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    /// Which worksheet this is
    pub kind: SheetKind,
    /// Column definitions
    pub columns: Vec<Column>,
    /// Row data
    pub rows: Vec<SheetRow>,
    /// Source file path
    pub source_path: PathBuf,
}

impl Sheet {
    /// Create a new empty sheet
    pub fn new(kind: SheetKind, source_path: PathBuf) -> Self {
        Self {
            kind,
            columns: Vec::new(),
            rows: Vec::new(),
            source_path,
        }
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find a column by name
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Iterate rows with by-name field access
    pub fn records(&self) -> impl Iterator<Item = RowView<'_>> {
        self.rows.iter().map(move |row| RowView {
            columns: &self.columns,
            row,
        })
    }
}

/// A column definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Header text (e.g., "Soul Break" or "Realm")
    pub name: String,
    /// Column index (0-based)
    pub index: usize,
}

impl Column {
    /// Create a new column
    pub fn new(name: String, index: usize) -> Self {
        Self { name, index }
    }
}

/// A row of raw worksheet cells; every cell is kept as text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetRow {
    pub cells: Vec<String>,
}

impl SheetRow {
    /// Create a new row
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Check whether every cell is blank
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

/// A row together with its sheet's header, for lookups by column name
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    columns: &'a [Column],
    row: &'a SheetRow,
}

impl<'a> RowView<'a> {
    /// Cell text under `column`, or "" when the column or cell is missing
    pub fn get(&self, column: &str) -> &'a str {
        self.columns
            .iter()
            .find(|c| c.name == column)
            .and_then(|c| self.row.cells.get(c.index))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Cell text under `column` with surrounding whitespace removed
    pub fn trimmed(&self, column: &str) -> &'a str {
        self.get(column).trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_kind_from_file_stem() {
        assert_eq!(SheetKind::from_file_stem("Soul Breaks"), Some(SheetKind::SoulBreaks));
        assert_eq!(SheetKind::from_file_stem("soul_breaks"), Some(SheetKind::SoulBreaks));
        assert_eq!(SheetKind::from_file_stem("Record Materia"), Some(SheetKind::RecordMaterias));
        assert_eq!(SheetKind::from_file_stem("Synchro"), Some(SheetKind::SynchroCommands));
        assert_eq!(SheetKind::from_file_stem("Calculator"), None);
    }

    #[test]
    fn test_every_title_maps_back() {
        for kind in SheetKind::ALL {
            assert_eq!(SheetKind::from_file_stem(kind.title()), Some(kind));
        }
    }

    #[test]
    fn test_row_view_get() {
        let mut sheet = Sheet::new(SheetKind::Events, PathBuf::from("events.csv"));
        sheet.columns = vec![
            Column::new("Event".to_string(), 0),
            Column::new("Realm".to_string(), 1),
        ];
        sheet.rows = vec![SheetRow::new(vec![" Fat Chocobo ".to_string(), "V".to_string()])];

        let row = sheet.records().next().unwrap();
        assert_eq!(row.get("Event"), " Fat Chocobo ");
        assert_eq!(row.trimmed("Event"), "Fat Chocobo");
        assert_eq!(row.get("Realm"), "V");
        assert_eq!(row.get("Missing"), "");
    }

    #[test]
    fn test_row_is_blank() {
        assert!(SheetRow::new(vec!["".to_string(), "  ".to_string()]).is_blank());
        assert!(!SheetRow::new(vec!["".to_string(), "x".to_string()]).is_blank());
    }
}
