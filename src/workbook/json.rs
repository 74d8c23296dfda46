//! JSON workbook export: `{ "<sheet name>": [ { "<column>": <value>, ... }, ... ], ... }`.

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

use super::{Cell, RawRow, Sheet, Workbook};

pub(super) fn load(path: &Path) -> Result<Workbook> {
    let data = fs::read_to_string(path).context("Failed to read JSON workbook")?;
    parse(&data)
}

pub(super) fn parse(data: &str) -> Result<Workbook> {
    let value: Value = serde_json::from_str(data).context("Failed to parse JSON workbook")?;

    let sheets = match value {
        Value::Object(sheets) => sheets,
        _ => return Err(anyhow!("JSON workbook must be an object of sheet name to rows")),
    };

    let mut workbook = Workbook::new();
    for (sheet_name, rows) in sheets {
        let rows = match rows {
            Value::Array(rows) => rows,
            _ => return Err(anyhow!("Sheet '{}' must be an array of rows", sheet_name)),
        };

        let mut data_rows = Vec::with_capacity(rows.len());
        for row in rows {
            let mut raw = RawRow::new();
            // Non-object rows carry no columns and read as empty
            if let Value::Object(columns) = row {
                for (header, value) in columns {
                    raw.insert(&header, to_cell(value));
                }
            }
            data_rows.push(raw);
        }

        workbook.add_sheet(Sheet::new(&sheet_name, data_rows));
    }

    Ok(workbook)
}

fn to_cell(value: Value) -> Cell {
    match value {
        Value::Null => Cell::Empty,
        Value::String(s) => Cell::Text(s),
        Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Empty),
        Value::Bool(b) => Cell::Bool(b),
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sheets_and_cells() {
        let workbook = parse(
            r#"{
                "Muslim Groups": [
                    {"Organisation Type": "Popular Front", "Total Members": 1200, "Email": null},
                    {}
                ],
                "Trade Unions": []
            }"#,
        )
        .unwrap();

        let sheet = workbook.sheet("Muslim Groups").unwrap();
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(
            sheet.rows[0].get("total members"),
            Some(&Cell::Number(1200.0))
        );
        assert_eq!(sheet.rows[0].get("email"), Some(&Cell::Empty));
        assert!(sheet.rows[1].is_empty());
        assert!(workbook.sheet("Trade Unions").is_some());
    }

    #[test]
    fn test_parse_rejects_bad_shape() {
        assert!(parse("[1, 2]").is_err());
        assert!(parse(r#"{"Sheet": 5}"#).is_err());
        assert!(parse("not json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groups.json");
        fs::write(&path, r#"{"Cultural Forums": [{"Organisation Name": "Ranga Shankara"}]}"#)
            .unwrap();

        let workbook = Workbook::open(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Cultural Forums"]);
    }

    #[test]
    fn test_sheets_keep_source_order() {
        let workbook = parse(
            r#"{
                "Trade Unions": [],
                "Scratch": [],
                "Banned Organisations": [],
                "Muslim Groups": []
            }"#,
        )
        .unwrap();
        assert_eq!(
            workbook.sheet_names(),
            vec!["Trade Unions", "Scratch", "Banned Organisations", "Muslim Groups"]
        );
    }
}
