//! Dry-run orchestration: workbook in, entities and summary out, no store writes.

pub mod report;
pub mod sheet;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::config::NormalizerConfig;
use crate::entity::{CanonicalEntity, EntityBuilder};
use crate::formats::{registry, resolve_format_group, FormatGroup};
use crate::workbook::Workbook;
use crate::TARGET_PIPELINE;
pub use report::{write_entities_ndjson, PreviewReport, Summary};
pub use sheet::{process_sheet, SheetOutcome};

/// Everything one run produced, before it is turned into a report.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub entities: Vec<CanonicalEntity>,
    pub summary: Summary,
}

enum SheetResult {
    Processed(SheetOutcome),
    NotFound(&'static str),
}

pub struct Pipeline {
    builder: EntityBuilder,
    sample_size: usize,
    parallel: bool,
}

impl Pipeline {
    pub fn new(config: &NormalizerConfig) -> Self {
        Self::with_run_time(config, Utc::now())
    }

    /// Fix the timestamp stamped on every entity of the run.
    pub fn with_run_time(config: &NormalizerConfig, run_time: DateTime<Utc>) -> Self {
        Self {
            builder: EntityBuilder::new(config, run_time),
            sample_size: config.sample_size,
            parallel: false,
        }
    }

    /// Fan sheets out over a thread pool. Output is identical to a sequential run.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn run_time(&self) -> DateTime<Utc> {
        self.builder.run_time()
    }

    /// Normalize every registered sheet present in `workbook`.
    pub fn normalize(&self, workbook: &Workbook) -> Normalized {
        let start = Instant::now();
        let jobs: Vec<(FormatGroup, &'static str)> = registry()
            .iter()
            .flat_map(|(group, sheets)| sheets.iter().map(move |sheet| (*group, *sheet)))
            .collect();

        let results: Vec<SheetResult> = if self.parallel {
            jobs.par_iter()
                .map(|(group, sheet)| self.process_job(workbook, *group, *sheet))
                .collect()
        } else {
            jobs.iter()
                .map(|(group, sheet)| self.process_job(workbook, *group, *sheet))
                .collect()
        };

        let mut summary = Summary::default();
        let mut entities = Vec::new();
        for result in results {
            match result {
                SheetResult::Processed(outcome) => {
                    summary.add_sheet(&outcome);
                    entities.extend(outcome.entities);
                }
                SheetResult::NotFound(sheet_name) => summary.add_missing_sheet(sheet_name),
            }
        }

        for name in workbook.sheet_names() {
            if resolve_format_group(name).is_none() {
                info!(
                    target: TARGET_PIPELINE,
                    "Sheet '{}' is not declared by any format group, ignoring", name
                );
                summary.unregistered_sheets.push(name.to_string());
            }
        }

        for (shadowed, first) in workbook.shadowed_sheets() {
            if resolve_format_group(shadowed).is_some() {
                summary.add_shadowed_sheet(shadowed, first);
            }
        }

        info!(
            target: TARGET_PIPELINE,
            "Normalized {} groups from {} sheets ({} rows skipped, {} errors) in {:?}",
            summary.total_groups,
            summary.total_sheets,
            summary.total_skipped(),
            summary.errors.len(),
            start.elapsed()
        );

        Normalized { entities, summary }
    }

    fn process_job(
        &self,
        workbook: &Workbook,
        group: FormatGroup,
        sheet_name: &'static str,
    ) -> SheetResult {
        match workbook.sheet(sheet_name) {
            Some(sheet) => {
                let outcome =
                    process_sheet(&sheet.rows, &sheet.name, group.extractor(), &self.builder);
                info!(
                    target: TARGET_PIPELINE,
                    "Sheet '{}' ({}): {} groups, {} skipped of {} rows",
                    sheet.name,
                    group,
                    outcome.entities.len(),
                    outcome.skipped_count,
                    outcome.total_rows
                );
                SheetResult::Processed(outcome)
            }
            None => {
                warn!(
                    target: TARGET_PIPELINE,
                    "Sheet '{}' ({}) not found in workbook", sheet_name, group
                );
                SheetResult::NotFound(sheet_name)
            }
        }
    }

    /// Normalize and wrap the result in a preview report.
    pub fn run(&self, workbook: &Workbook) -> PreviewReport {
        let normalized = self.normalize(workbook);
        self.report(&normalized)
    }

    pub fn report(&self, normalized: &Normalized) -> PreviewReport {
        PreviewReport::new(
            normalized.summary.clone(),
            &normalized.entities,
            self.sample_size,
            self.run_time(),
        )
    }

    /// Open the workbook and normalize it. An unreadable workbook aborts the run.
    pub fn normalize_path(&self, path: &Path) -> Result<Normalized> {
        let workbook = Workbook::open(path)?;
        Ok(self.normalize(&workbook))
    }

    pub fn run_path(&self, path: &Path) -> Result<PreviewReport> {
        let normalized = self.normalize_path(path)?;
        Ok(self
            .report(&normalized)
            .with_source(&path.display().to_string()))
    }
}
