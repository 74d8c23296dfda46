//! Run summary and the preview report artifact.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use super::sheet::SheetOutcome;
use crate::entity::{CanonicalEntity, GroupType, RiskLevel};
use crate::TARGET_PIPELINE;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Sheets found in the workbook and processed
    pub total_sheets: usize,
    pub total_groups: usize,
    pub by_sheet: BTreeMap<String, usize>,
    pub skipped_by_sheet: BTreeMap<String, usize>,
    pub by_type: BTreeMap<GroupType, usize>,
    pub by_risk_level: BTreeMap<RiskLevel, usize>,
    pub errors: Vec<String>,
    /// Workbook sheets no format group declares
    pub unregistered_sheets: Vec<String>,
}

impl Summary {
    pub fn add_sheet(&mut self, outcome: &SheetOutcome) {
        self.total_sheets += 1;
        self.total_groups += outcome.entities.len();
        *self.by_sheet.entry(outcome.sheet_name.clone()).or_insert(0) += outcome.entities.len();
        *self
            .skipped_by_sheet
            .entry(outcome.sheet_name.clone())
            .or_insert(0) += outcome.skipped_count;

        for entity in &outcome.entities {
            *self.by_type.entry(entity.group_type).or_insert(0) += 1;
            *self.by_risk_level.entry(entity.risk_level).or_insert(0) += 1;
        }

        self.errors.extend(outcome.errors.iter().cloned());
    }

    pub fn add_missing_sheet(&mut self, sheet_name: &str) {
        self.errors
            .push(format!("Sheet '{}' not found in workbook", sheet_name));
    }

    pub fn add_shadowed_sheet(&mut self, sheet_name: &str, kept: &str) {
        self.errors.push(format!(
            "Sheet '{}' ignored: same name as sheet '{}'",
            sheet_name, kept
        ));
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped_by_sheet.values().sum()
    }
}

/// Read-only artifact describing what a commit would write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewReport {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub summary: Summary,
    pub sample_groups: Vec<CanonicalEntity>,
    pub total_groups: usize,
}

impl PreviewReport {
    pub fn new(
        summary: Summary,
        entities: &[CanonicalEntity],
        sample_size: usize,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            generated_at,
            source: None,
            total_groups: entities.len(),
            sample_groups: entities.iter().take(sample_size).cloned().collect(),
            summary,
        }
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).context("Failed to serialize report")?;
        writer.flush()?;
        info!(target: TARGET_PIPELINE, "Wrote preview report to {}", path.display());
        Ok(())
    }
}

/// Write every entity as one JSON object per line, the hand-off format for the commit step.
pub fn write_entities_ndjson(entities: &[CanonicalEntity], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create entity export {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for entity in entities {
        serde_json::to_writer(&mut writer, entity)
            .with_context(|| format!("Failed to serialize entity {}", entity.id))?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    info!(
        target: TARGET_PIPELINE,
        "Wrote {} entities to {}",
        entities.len(),
        path.display()
    );
    Ok(())
}
