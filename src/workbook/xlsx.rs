//! Spreadsheet loading (xlsx, xls, xlsb, ods) through calamine.

use anyhow::{anyhow, Result};
use calamine::{open_workbook_auto, Data, Reader, Sheets};
use std::path::Path;
use tracing::debug;

use super::{Cell, RawRow, Sheet, Workbook};
use crate::TARGET_WORKBOOK;

pub(super) fn load(path: &Path) -> Result<Workbook> {
    let mut source: Sheets<_> =
        open_workbook_auto(path).map_err(|e| anyhow!("Failed to open spreadsheet: {}", e))?;

    let sheet_names: Vec<String> = source.sheet_names().to_vec();
    let mut workbook = Workbook::new();

    for sheet_name in &sheet_names {
        let range = source
            .worksheet_range(sheet_name)
            .map_err(|e| anyhow!("Failed to read sheet '{}': {}", sheet_name, e))?;

        let mut rows = range.rows();

        // First row carries the column headers
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row.iter().map(|h| h.to_string()).collect(),
            None => {
                debug!(target: TARGET_WORKBOOK, "Sheet '{}' is empty", sheet_name);
                workbook.add_sheet(Sheet::new(sheet_name, Vec::new()));
                continue;
            }
        };

        let data_rows: Vec<RawRow> = rows
            .map(|cells| {
                let mut row = RawRow::new();
                for (header, data) in headers.iter().zip(cells.iter()) {
                    row.insert(header, to_cell(data));
                }
                row
            })
            .collect();

        debug!(
            target: TARGET_WORKBOOK,
            "Sheet '{}': {} columns, {} data rows",
            sheet_name,
            headers.iter().filter(|h| !h.trim().is_empty()).count(),
            data_rows.len()
        );

        workbook.add_sheet(Sheet::new(sheet_name, data_rows));
    }

    Ok(workbook)
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::Error(e) => Cell::Error(format!("{:?}", e)),
        // Dates are kept as their serial number
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        other => Cell::Text(other.to_string()),
    }
}
