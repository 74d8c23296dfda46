//! Row-at-a-time processing of a single sheet.

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::entity::{BuildOutcome, CanonicalEntity, EntityBuilder};
use crate::formats::FieldExtractor;
use crate::workbook::RawRow;
use crate::TARGET_PIPELINE;

/// Result of processing one sheet.
///
/// `entities.len() + skipped_count == total_rows` always holds.
#[derive(Debug, Clone, Default)]
pub struct SheetOutcome {
    pub sheet_name: String,
    pub entities: Vec<CanonicalEntity>,
    pub skipped_count: usize,
    pub total_rows: usize,
    /// Row failures, already formatted for the run summary
    pub errors: Vec<String>,
}

/// Turn every row of a sheet into an entity or a skip.
///
/// A failing row never aborts the sheet: extraction errors are logged with the sheet name and
/// row index, recorded, and counted as skipped. Row indices are 1-based over data rows.
pub fn process_sheet(
    rows: &[RawRow],
    sheet_name: &str,
    extractor: &dyn FieldExtractor,
    builder: &EntityBuilder,
) -> SheetOutcome {
    let mut outcome = SheetOutcome {
        sheet_name: sheet_name.to_string(),
        total_rows: rows.len(),
        ..Default::default()
    };
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (offset, row) in rows.iter().enumerate() {
        let row_index = offset + 1;

        match builder.build(row, sheet_name, row_index, extractor) {
            Ok(BuildOutcome::Built(entity)) => {
                let mut entity = *entity;
                if seen_ids.contains(&entity.id) {
                    let unique = disambiguate(&entity.id, row_index, &seen_ids);
                    warn!(
                        target: TARGET_PIPELINE,
                        "Sheet '{}' row {}: id {} already used, renamed to {}",
                        sheet_name, row_index, entity.id, unique
                    );
                    entity.id = unique;
                }
                seen_ids.insert(entity.id.clone());
                outcome.entities.push(entity);
            }
            Ok(BuildOutcome::Skipped(reason)) => {
                debug!(
                    target: TARGET_PIPELINE,
                    "Sheet '{}' row {}: skipped ({:?})", sheet_name, row_index, reason
                );
                outcome.skipped_count += 1;
            }
            Err(err) => {
                warn!(
                    target: TARGET_PIPELINE,
                    "Sheet '{}' row {}: failed to build entity: {:#}", sheet_name, row_index, err
                );
                outcome
                    .errors
                    .push(format!("Sheet '{}' row {}: {:#}", sheet_name, row_index, err));
                outcome.skipped_count += 1;
            }
        }
    }

    outcome
}

fn disambiguate(id: &str, row_index: usize, seen: &HashSet<String>) -> String {
    let base = format!("{}_r{}", id, row_index);
    if !seen.contains(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", base, n);
        if !seen.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizerConfig;
    use crate::formats::FormatGroup;
    use crate::workbook::Cell;
    use chrono::Utc;

    fn builder() -> EntityBuilder {
        EntityBuilder::new(&NormalizerConfig::default(), Utc::now())
    }

    fn named(name: &str) -> RawRow {
        RawRow::new().with_text("Organisation Type", name)
    }

    #[test]
    fn test_counts_are_conserved() {
        let rows = vec![
            named("Sri Rama Sena"),
            RawRow::new(),
            named("   "),
            named("Unnamed Group"),
            named("Hindu Seva Trust").with("Total Members", Cell::Error("VALUE!".to_string())),
            named("Vishwa Parishad"),
        ];

        let outcome = process_sheet(
            &rows,
            "Right Hindu Groups",
            FormatGroup::Standard.extractor(),
            &builder(),
        );

        assert_eq!(outcome.total_rows, 6);
        assert_eq!(outcome.entities.len(), 2);
        assert_eq!(outcome.skipped_count, 4);
        assert_eq!(outcome.entities.len() + outcome.skipped_count, outcome.total_rows);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].starts_with("Sheet 'Right Hindu Groups' row 5:"));
    }

    #[test]
    fn test_row_order_drives_fallback_ids() {
        let rows = vec![named("A Trust"), named("B Trust"), named("C Trust")];
        let outcome = process_sheet(
            &rows,
            "Muslim Groups",
            FormatGroup::Standard.extractor(),
            &builder(),
        );
        let ids: Vec<&str> = outcome.entities.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["muslim_groups_1", "muslim_groups_2", "muslim_groups_3"]
        );
    }

    #[test]
    fn test_duplicate_ids_are_renamed() {
        let rows = vec![
            named("First").with_text("Sl. No", "2"),
            // Falls back to row index 2, clashing with the serial above
            named("Second"),
            named("Third").with_text("Sl. No", "2"),
        ];
        let outcome = process_sheet(
            &rows,
            "Christian Groups",
            FormatGroup::Standard.extractor(),
            &builder(),
        );

        let ids: HashSet<&str> = outcome.entities.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(outcome.entities[0].id, "christian_groups_2");
        assert_eq!(outcome.entities[1].id, "christian_groups_2_r2");
        assert_eq!(outcome.entities[2].id, "christian_groups_2_r3");
    }

    #[test]
    fn test_disambiguate_keeps_counting() {
        let mut seen = HashSet::new();
        seen.insert("x_1".to_string());
        seen.insert("x_1_r4".to_string());
        seen.insert("x_1_r4_2".to_string());
        assert_eq!(disambiguate("x_1", 4, &seen), "x_1_r4_3");
    }
}
