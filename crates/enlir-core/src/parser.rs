//! CSV parser for exported Enlir worksheets

use crate::error::{Error, Result};
use crate::sheet::{Column, Sheet, SheetKind, SheetRow};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Parse a CSV export of a worksheet into a Sheet
pub fn parse_sheet<P: AsRef<Path>>(path: P, kind: SheetKind) -> Result<Sheet> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    read_sheet(BufReader::new(file), kind, path.to_path_buf())
}

/// Parse CSV from a string (useful for testing)
pub fn parse_sheet_str(content: &str, kind: SheetKind) -> Result<Sheet> {
    read_sheet(content.as_bytes(), kind, PathBuf::from(kind.title()))
}

fn read_sheet<R: Read>(reader: R, kind: SheetKind, path: PathBuf) -> Result<Sheet> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // Worksheet exports have ragged trailing cells
        .from_reader(reader);

    // Parse headers into columns
    let headers = csv_reader.headers().map_err(|e| Error::Csv {
        path: path.clone(),
        source: e,
    })?;

    let columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| Column::new(name.trim().to_string(), i))
        .collect();

    if columns.is_empty() {
        return Err(Error::SheetParse {
            path,
            message: "no columns found in CSV".to_string(),
        });
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| Error::Csv {
            path: path.clone(),
            source: e,
        })?;

        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();

        // Pad with empty cells if row is shorter than header
        if cells.len() < columns.len() {
            cells.resize(columns.len(), String::new());
        }

        if cells.len() > columns.len() {
            tracing::warn!(
                row = row_idx + 1,
                path = %path.display(),
                "row has more cells than columns, truncating"
            );
            cells.truncate(columns.len());
        }

        let row = SheetRow::new(cells);
        if row.is_blank() {
            skipped += 1;
            continue;
        }
        rows.push(row);
    }

    tracing::debug!(
        sheet = %kind,
        rows = rows.len(),
        skipped,
        "parsed worksheet"
    );

    Ok(Sheet {
        kind,
        columns,
        rows,
        source_path: path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_sheet() {
        let csv = "Event,Realm,Type\nFat Chocobo,V,Challenge\nMog's Party,Core,Festival\n";
        let sheet = parse_sheet_str(csv, SheetKind::Events).unwrap();

        assert_eq!(sheet.columns.len(), 3);
        assert_eq!(sheet.columns[0].name, "Event");
        assert_eq!(sheet.columns[2].name, "Type");
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.kind, SheetKind::Events);
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let csv = "Event,Realm,Type\nFat Chocobo\n";
        let sheet = parse_sheet_str(csv, SheetKind::Events).unwrap();

        assert_eq!(sheet.rows[0].cells.len(), 3);
        let row = sheet.records().next().unwrap();
        assert_eq!(row.get("Type"), "");
    }

    #[test]
    fn test_parse_truncates_long_rows() {
        let csv = "Event,Realm\nFat Chocobo,V,extra\n";
        let sheet = parse_sheet_str(csv, SheetKind::Events).unwrap();

        assert_eq!(sheet.rows[0].cells, vec!["Fat Chocobo", "V"]);
    }

    #[test]
    fn test_parse_skips_blank_rows() {
        let csv = "Event,Realm\n,\nFat Chocobo,V\n , \n";
        let sheet = parse_sheet_str(csv, SheetKind::Events).unwrap();

        assert_eq!(sheet.row_count(), 1);
    }

    #[test]
    fn test_parse_keeps_quoted_commas() {
        let csv = "Name,Element\nFlare Star,\"Fire, Wind\"\n";
        let sheet = parse_sheet_str(csv, SheetKind::Abilities).unwrap();

        let row = sheet.records().next().unwrap();
        assert_eq!(row.get("Element"), "Fire, Wind");
    }
}
