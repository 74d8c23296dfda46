//! Format-group registry.
//!
//! Every source sheet belongs to exactly one format group, and each group knows how to read
//! the canonical fields out of its own column layout. This is the only place that knows which
//! sheet uses which columns; nothing downstream looks at sheet names to decide how to read a row.

mod civic;
mod political;
mod standard;

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use tracing::debug;

use crate::cleaner::ValueCleaner;
use crate::workbook::RawRow;
use crate::TARGET_EXTRACT;

pub use civic::CivicFormat;
pub use political::PoliticalFormat;
pub use standard::StandardFormat;

lazy_static! {
    static ref DIGITS: Regex = Regex::new(r"\d+").unwrap();
}

/// Closed set of known column layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatGroup {
    Standard,
    Political,
    Civic,
}

impl fmt::Display for FormatGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Format groups and the sheets they own, in processing order.
pub const REGISTRY: &[(FormatGroup, &[&str])] = &[
    (
        FormatGroup::Standard,
        &[
            "Right Hindu Groups",
            "Muslim Groups",
            "Christian Groups",
            "Banned Organisations",
        ],
    ),
    (
        FormatGroup::Political,
        &[
            "Political Parties",
            "Student Organisations",
            "Farmers Associations",
            "Trade Unions",
        ],
    ),
    (
        FormatGroup::Civic,
        &[
            "Human Rights Organisations",
            "Kannada Organisations",
            "Cultural Forums",
        ],
    ),
];

impl FormatGroup {
    pub fn name(&self) -> &'static str {
        match self {
            FormatGroup::Standard => "standard",
            FormatGroup::Political => "political",
            FormatGroup::Civic => "civic",
        }
    }

    /// Sheets declared for this group.
    pub fn sheet_names(&self) -> &'static [&'static str] {
        REGISTRY
            .iter()
            .find(|(group, _)| group == self)
            .map(|(_, sheets)| *sheets)
            .unwrap_or(&[])
    }

    pub fn extractor(&self) -> &'static dyn FieldExtractor {
        match self {
            FormatGroup::Standard => &StandardFormat,
            FormatGroup::Political => &PoliticalFormat,
            FormatGroup::Civic => &CivicFormat,
        }
    }
}

pub fn registry() -> &'static [(FormatGroup, &'static [&'static str])] {
    REGISTRY
}

/// Find the format group that declares `sheet_name` (case-insensitive, trimmed).
pub fn resolve_format_group(sheet_name: &str) -> Option<FormatGroup> {
    let wanted = sheet_name.trim();
    REGISTRY
        .iter()
        .find(|(_, sheets)| sheets.iter().any(|s| s.eq_ignore_ascii_case(wanted)))
        .map(|(group, _)| *group)
}

/// Per-row state handed to every field accessor.
pub struct ExtractContext<'a> {
    pub sheet_name: &'a str,
    pub row_index: usize,
    pub cleaner: &'a ValueCleaner,
}

impl<'a> ExtractContext<'a> {
    pub fn new(sheet_name: &'a str, row_index: usize, cleaner: &'a ValueCleaner) -> Self {
        Self {
            sheet_name,
            row_index,
            cleaner,
        }
    }

    /// Read and clean the first non-blank column among `headers`.
    pub fn text(&self, row: &RawRow, headers: &[&str]) -> Result<Option<String>> {
        let cell = match row.get_any(headers) {
            Some(cell) => cell,
            None => return Ok(None),
        };
        let raw = cell
            .as_text()
            .with_context(|| format!("column '{}'", headers.first().copied().unwrap_or("?")))?;
        Ok(self.cleaner.clean(raw.as_deref()))
    }

    /// Read a member count, tolerating thousands separators and trailing noise.
    pub fn count(&self, row: &RawRow, headers: &[&str]) -> Result<Option<u64>> {
        let text = self.text(row, headers)?;
        let parsed = text.as_deref().and_then(parse_count);
        if text.is_some() && parsed.is_none() {
            debug!(
                target: TARGET_EXTRACT,
                "Sheet '{}' row {}: member count {:?} has no digits, using 0",
                self.sheet_name, self.row_index, text
            );
        }
        Ok(parsed)
    }
}

/// Lenient integer parse: `"3,543"` -> 3543, `"5000+"` -> 5000, `"12000.0"` -> 12000.
pub fn parse_count(value: &str) -> Option<u64> {
    let compact: String = value
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    // Negative counts are data-entry errors, not memberships
    if compact.starts_with('-') {
        return None;
    }

    if let Ok(n) = compact.parse::<u64>() {
        return Some(n);
    }
    if let Ok(f) = compact.parse::<f64>() {
        if f.is_finite() && f >= 0.0 {
            return Some(f.trunc() as u64);
        }
    }

    DIGITS
        .find(&compact)
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// Intermediate field bag. Every value has already been through the value cleaner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldBag {
    pub serial: Option<String>,
    pub name: Option<String>,
    pub members: Option<u64>,
    pub influencers: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub youtube: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

/// Row-to-fields capability implemented once per format group.
///
/// Accessors return `Ok(None)` for fields the layout never had.
pub trait FieldExtractor: Sync {
    fn serial(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>>;
    fn name(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>>;
    fn members(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<u64>>;
    fn influencers(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>>;
    fn facebook(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>>;
    fn instagram(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>>;
    fn twitter(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>>;
    fn youtube(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>>;
    fn address(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>>;
    fn phone(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>>;
    fn email(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>>;

    fn website(&self, _row: &RawRow, _cx: &ExtractContext) -> Result<Option<String>> {
        Ok(None)
    }

    /// Run every accessor over `row`.
    fn extract(&self, row: &RawRow, cx: &ExtractContext) -> Result<FieldBag> {
        Ok(FieldBag {
            serial: self.serial(row, cx)?,
            name: self.name(row, cx)?,
            members: self.members(row, cx)?,
            influencers: self.influencers(row, cx)?,
            facebook: self.facebook(row, cx)?,
            instagram: self.instagram(row, cx)?,
            twitter: self.twitter(row, cx)?,
            youtube: self.youtube(row, cx)?,
            address: self.address(row, cx)?,
            phone: self.phone(row, cx)?,
            email: self.email(row, cx)?,
            website: self.website(row, cx)?,
        })
    }
}
