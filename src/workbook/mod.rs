//! In-memory tabular source: named sheets of loosely-typed header -> cell rows.

mod json;
mod xlsx;

use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::TARGET_WORKBOOK;

/// A single cell value as read from the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Spreadsheet error value such as `#REF!`
    Error(String),
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Textual form of the cell, `None` for empty cells.
    ///
    /// Integral numbers are rendered without a decimal part so that `3543.0` reads as `3543`.
    pub fn as_text(&self) -> Result<Option<String>> {
        match self {
            Cell::Empty => Ok(None),
            Cell::Text(s) => Ok(Some(s.clone())),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Ok(Some(format!("{}", *n as i64)))
                } else {
                    Ok(Some(format!("{}", n)))
                }
            }
            Cell::Bool(b) => Ok(Some(if *b { "TRUE" } else { "FALSE" }.to_string())),
            Cell::Error(e) => Err(anyhow!("cell holds spreadsheet error {}", e)),
        }
    }
}

/// Normalize a column header so lookups ignore case and stray whitespace.
pub fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// One data row, keyed by normalized column header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: HashMap<String, Cell>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cell. The first value for a given header wins.
    pub fn insert(&mut self, header: &str, cell: Cell) {
        let key = normalize_header(header);
        if key.is_empty() {
            return;
        }
        self.cells.entry(key).or_insert(cell);
    }

    pub fn with(mut self, header: &str, cell: Cell) -> Self {
        self.insert(header, cell);
        self
    }

    pub fn with_text(self, header: &str, value: &str) -> Self {
        self.with(header, Cell::Text(value.to_string()))
    }

    pub fn get(&self, header: &str) -> Option<&Cell> {
        self.cells.get(&normalize_header(header))
    }

    /// First non-blank cell among a list of header aliases.
    pub fn get_any(&self, headers: &[&str]) -> Option<&Cell> {
        headers
            .iter()
            .filter_map(|h| self.get(h))
            .find(|cell| !cell.is_blank())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.values().all(Cell::is_blank)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<RawRow>,
}

impl Sheet {
    pub fn new(name: &str, rows: Vec<RawRow>) -> Self {
        Self {
            name: name.to_string(),
            rows,
        }
    }
}

fn same_sheet_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Every sheet of a source workbook, in source order.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: &str, rows: Vec<RawRow>) -> Self {
        self.add_sheet(Sheet::new(name, rows));
        self
    }

    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    /// Open a workbook from disk. Failure here is fatal for a run.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow!("Workbook does not exist: {}", path.display()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let workbook = match extension.as_str() {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => xlsx::load(path),
            "json" => json::load(path),
            other => Err(anyhow!("Unsupported workbook format '{}'", other)),
        }
        .with_context(|| format!("Failed to read workbook {}", path.display()))?;

        info!(
            target: TARGET_WORKBOOK,
            "Loaded {} sheets ({} rows) from {}",
            workbook.sheets.len(),
            workbook.sheets.iter().map(|s| s.rows.len()).sum::<usize>(),
            path.display()
        );

        Ok(workbook)
    }

    /// Look a sheet up by name, ignoring case and surrounding whitespace.
    ///
    /// When several sheets match, the first one wins and the others are shadowed.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        let mut matches = self.sheets.iter().filter(|s| same_sheet_name(&s.name, name));
        let first = matches.next()?;
        for shadowed in matches {
            warn!(
                target: TARGET_WORKBOOK,
                "Sheet '{}' has the same name as '{}' and is ignored", shadowed.name, first.name
            );
        }
        Some(first)
    }

    /// Sheets hidden behind an earlier sheet of the same name, paired with that sheet's name.
    pub fn shadowed_sheets(&self) -> Vec<(&str, &str)> {
        self.sheets
            .iter()
            .filter_map(|sheet| {
                let first = self
                    .sheets
                    .iter()
                    .find(|s| same_sheet_name(&s.name, &sheet.name))?;
                if std::ptr::eq(first, sheet) {
                    None
                } else {
                    Some((sheet.name.as_str(), first.name.as_str()))
                }
            })
            .collect()
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_normalization() {
        assert_eq!(normalize_header("  Total   Members "), "total members");
        assert_eq!(normalize_header("Sl. No"), "sl. no");
    }

    #[test]
    fn test_row_lookup_and_emptiness() {
        let row = RawRow::new()
            .with_text("Organisation Type ", "Hindu Jagruti Sena")
            .with("Total Members", Cell::Number(3543.0))
            .with_text("Email", "  ");

        assert_eq!(
            row.get("organisation type"),
            Some(&Cell::Text("Hindu Jagruti Sena".to_string()))
        );
        assert_eq!(row.get_any(&["Email", "Total Members"]), Some(&Cell::Number(3543.0)));
        assert!(!row.is_empty());

        let blank = RawRow::new().with(" A ", Cell::Empty).with_text("B", "   ");
        assert!(blank.is_empty());
        assert!(RawRow::new().is_empty());
    }

    #[test]
    fn test_first_duplicate_header_wins() {
        let row = RawRow::new().with_text("Name", "first").with_text("NAME", "second");
        assert_eq!(row.get("name"), Some(&Cell::Text("first".to_string())));
        assert_eq!(row, RawRow::new().with_text("name", "first"));
    }

    #[test]
    fn test_cell_text_rendering() {
        assert_eq!(Cell::Number(3543.0).as_text().unwrap(), Some("3543".to_string()));
        assert_eq!(Cell::Number(12.5).as_text().unwrap(), Some("12.5".to_string()));
        assert_eq!(Cell::Empty.as_text().unwrap(), None);
        assert!(Cell::Error("REF!".to_string()).as_text().is_err());
    }

    #[test]
    fn test_sheet_lookup_is_case_insensitive() {
        let workbook = Workbook::new().with_sheet("Muslim Groups ", vec![]);
        assert!(workbook.sheet("muslim groups").is_some());
        assert!(workbook.sheet("Christian Groups").is_none());
    }

    #[test]
    fn test_same_name_sheets_first_wins() {
        let workbook = Workbook::new()
            .with_sheet("Muslim Groups", vec![RawRow::new().with_text("A", "1")])
            .with_sheet("MUSLIM GROUPS", vec![])
            .with_sheet("Trade Unions", vec![]);

        assert_eq!(workbook.sheet("muslim groups").unwrap().rows.len(), 1);
        assert_eq!(
            workbook.shadowed_sheets(),
            vec![("MUSLIM GROUPS", "Muslim Groups")]
        );
    }

    #[test]
    fn test_open_rejects_missing_and_unknown() {
        assert!(Workbook::open(Path::new("/nonexistent/groups.xlsx")).is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groups.txt");
        std::fs::write(&path, "hello").unwrap();
        assert!(Workbook::open(&path).is_err());
    }
}
