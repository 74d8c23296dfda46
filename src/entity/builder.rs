use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use super::types::{CanonicalEntity, ContactInfo, Platform, RiskLevel, Status};
use crate::classify::Classifier;
use crate::cleaner::ValueCleaner;
use crate::config::NormalizerConfig;
use crate::formats::{ExtractContext, FieldBag, FieldExtractor};
use crate::workbook::RawRow;
use crate::TARGET_ENTITY;

pub const UNKNOWN_PLATFORM: &str = "unknown";

/// Why a row produced no entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyRow,
    MissingName,
    PlaceholderName,
}

#[derive(Debug)]
pub enum BuildOutcome {
    Built(Box<CanonicalEntity>),
    Skipped(SkipReason),
}

/// Lowercase ASCII slug of a sheet name, used as the id prefix.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_separator = false;

    for c in value.nfkd().filter(char::is_ascii) {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        slug.push_str("sheet");
    }
    slug
}

/// Assembles canonical entities from raw rows of one run.
///
/// All entities built by one builder share the same creation timestamp.
pub struct EntityBuilder {
    cleaner: ValueCleaner,
    classifier: Classifier,
    placeholder_names: Vec<String>,
    run_time: DateTime<Utc>,
}

impl EntityBuilder {
    pub fn new(config: &NormalizerConfig, run_time: DateTime<Utc>) -> Self {
        Self {
            cleaner: config.cleaner(),
            classifier: config.classifier(),
            placeholder_names: config.placeholder_names.clone(),
            run_time,
        }
    }

    pub fn run_time(&self) -> DateTime<Utc> {
        self.run_time
    }

    fn is_placeholder(&self, name: &str) -> bool {
        self.placeholder_names
            .iter()
            .any(|p| p.trim().eq_ignore_ascii_case(name.trim()))
    }

    /// Build the entity for one row. Errors come from extraction and are the caller's to
    /// isolate; a row without a usable name is a skip, not an error.
    pub fn build(
        &self,
        row: &RawRow,
        sheet_name: &str,
        row_index: usize,
        extractor: &dyn FieldExtractor,
    ) -> Result<BuildOutcome> {
        if row.is_empty() {
            return Ok(BuildOutcome::Skipped(SkipReason::EmptyRow));
        }

        let cx = ExtractContext::new(sheet_name, row_index, &self.cleaner);
        let mut fields = extractor.extract(row, &cx)?;

        let name = match fields.name.take() {
            Some(name) if self.is_placeholder(&name) => {
                return Ok(BuildOutcome::Skipped(SkipReason::PlaceholderName))
            }
            Some(name) => name,
            None => return Ok(BuildOutcome::Skipped(SkipReason::MissingName)),
        };

        Ok(BuildOutcome::Built(Box::new(self.assemble(
            name, fields, sheet_name, row_index,
        ))))
    }

    fn assemble(
        &self,
        name: String,
        fields: FieldBag,
        sheet_name: &str,
        row_index: usize,
    ) -> CanonicalEntity {
        let suffix = fields
            .serial
            .as_deref()
            .map(slugify_serial)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| row_index.to_string());
        let id = format!("{}_{}", slugify(sheet_name), suffix);

        let members = fields.members.unwrap_or(0);
        let social_media = social_media(&fields);
        let platforms: Vec<Platform> = social_media.keys().copied().collect();
        let primary_platform = platforms
            .first()
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| UNKNOWN_PLATFORM.to_string());

        let group_type = self.classifier.determine_type(sheet_name, &name);
        let risk_level = self
            .classifier
            .determine_risk_level(sheet_name, &name, members);

        debug!(
            target: TARGET_ENTITY,
            "Built {} '{}' ({}, {}, {} platforms)",
            id,
            name,
            group_type,
            risk_level,
            platforms.len()
        );

        CanonicalEntity {
            id,
            description: format!("{} - {} members", name, members),
            name,
            group_type,
            members,
            platforms,
            primary_platform,
            social_media,
            location: fields.address,
            contact_info: ContactInfo::from_parts(fields.phone, fields.email, fields.website),
            influencers: fields.influencers,
            risk_level,
            category: sheet_name.to_string(),
            status: Status::Active,
            monitoring_enabled: risk_level == RiskLevel::High,
            created_at: self.run_time,
            updated_at: self.run_time,
        }
    }
}

/// Serials are free text in the source; keep them id-safe.
fn slugify_serial(serial: &str) -> String {
    serial
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect::<String>()
        .trim_matches('_')
        .to_string()
}

fn social_media(fields: &FieldBag) -> BTreeMap<Platform, String> {
    Platform::ALL
        .iter()
        .filter_map(|platform| {
            let value = match platform {
                Platform::Facebook => &fields.facebook,
                Platform::Instagram => &fields.instagram,
                Platform::Twitter => &fields.twitter,
                Platform::Youtube => &fields.youtube,
            };
            value.clone().map(|v| (*platform, v))
        })
        .collect()
}
