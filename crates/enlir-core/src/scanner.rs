//! Directory scanner for discovering exported Enlir worksheets

use crate::error::Result;
use crate::parser::parse_sheet;
use crate::sheet::{Sheet, SheetKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Every worksheet found in an import directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportResults {
    /// Root directory that was scanned
    pub root: PathBuf,
    /// Parsed worksheets, at most one per kind
    pub sheets: BTreeMap<SheetKind, Sheet>,
    /// CSV files that did not map to a known worksheet
    pub ignored_files: Vec<PathBuf>,
}

impl ImportResults {
    /// Build from already-parsed sheets (useful for testing)
    pub fn from_sheets(sheets: impl IntoIterator<Item = Sheet>) -> Self {
        Self {
            root: PathBuf::new(),
            sheets: sheets.into_iter().map(|s| (s.kind, s)).collect(),
            ignored_files: Vec::new(),
        }
    }

    /// Find a sheet by kind
    pub fn sheet(&self, kind: SheetKind) -> Option<&Sheet> {
        self.sheets.get(&kind)
    }

    /// Worksheets that were not found
    pub fn missing_sheets(&self) -> Vec<SheetKind> {
        SheetKind::ALL
            .into_iter()
            .filter(|k| !self.sheets.contains_key(k))
            .collect()
    }

    /// Total number of imported rows
    pub fn total_rows(&self) -> usize {
        self.sheets.values().map(Sheet::row_count).sum()
    }
}

/// Scan a directory for worksheet CSV exports and parse them
///
/// When two files map to the same worksheet, the one whose path sorts last wins
/// and the other is reported in `ignored_files`.
pub fn scan_import_dir<P: AsRef<Path>>(root: P) -> Result<ImportResults> {
    let root = root.as_ref();
    let mut found: BTreeMap<SheetKind, Vec<PathBuf>> = BTreeMap::new();
    let mut ignored_files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        // Only process CSV files
        if !path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv")) {
            continue;
        }

        match path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(SheetKind::from_file_stem)
        {
            Some(kind) => found.entry(kind).or_default().push(path.to_path_buf()),
            None => {
                tracing::info!(path = %path.display(), "skipping file that is not a known worksheet");
                ignored_files.push(path.to_path_buf());
            }
        }
    }

    let mut sheets = BTreeMap::new();
    for (kind, mut paths) in found {
        paths.sort();
        let chosen = match paths.pop() {
            Some(p) => p,
            None => continue,
        };
        if !paths.is_empty() {
            tracing::warn!(
                sheet = %kind,
                chosen = %chosen.display(),
                duplicates = paths.len(),
                "multiple exports found for worksheet"
            );
            ignored_files.extend(paths);
        }

        let sheet = parse_sheet(&chosen, kind)?;
        tracing::info!(sheet = %kind, rows = sheet.row_count(), "imported worksheet");
        sheets.insert(kind, sheet);
    }

    Ok(ImportResults {
        root: root.to_path_buf(),
        sheets,
        ignored_files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_sheet_str;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("enlir-scanner-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_scan_maps_file_names() {
        let dir = temp_dir("maps");
        fs::write(dir.join("Events.csv"), "Event,Realm\nFat Chocobo,V\n").unwrap();
        fs::write(dir.join("soul_breaks.csv"), "Name,Character\nOmnislash,Cloud\n").unwrap();
        fs::write(dir.join("Calculator.csv"), "A\n1\n").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let result = scan_import_dir(&dir).unwrap();

        assert_eq!(result.sheets.len(), 2);
        assert_eq!(result.sheet(SheetKind::Events).unwrap().row_count(), 1);
        assert!(result.sheet(SheetKind::SoulBreaks).is_some());
        assert_eq!(result.ignored_files.len(), 1);
        assert!(result.missing_sheets().contains(&SheetKind::Characters));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_from_sheets() {
        let sheet = parse_sheet_str("Event\nFat Chocobo\n", SheetKind::Events).unwrap();
        let result = ImportResults::from_sheets(vec![sheet]);

        assert_eq!(result.total_rows(), 1);
        assert_eq!(result.missing_sheets().len(), SheetKind::ALL.len() - 1);
    }
}
