//! Normalization of single raw cell values.
//!
//! Source sheets are hand-maintained and full of "no data" tokens (`NIL`, `n/a`, typo variants
//! like `not manation`) and column labels pasted into values (`Email ID: x@y.org`). The cleaner
//! turns those into `None` or strips them, and is idempotent: `clean(clean(v)) == clean(v)`.

use std::collections::HashSet;

/// Observed "no data" tokens. Compared case-insensitively against the whole trimmed value.
pub const DEFAULT_SENTINELS: &[&str] = &["nil", "nill", "null", "na", "n/a", "not manation", "-"];

/// Column labels observed leaking into the start of cell values.
pub const DEFAULT_LABEL_ARTIFACTS: &[&str] = &[
    "email id:",
    "email:",
    "e-mail:",
    "mail id:",
    "phone:",
    "contact:",
];

#[derive(Debug, Clone)]
pub struct ValueCleaner {
    sentinels: HashSet<String>,
    label_artifacts: Vec<String>,
}

impl Default for ValueCleaner {
    fn default() -> Self {
        Self::new(DEFAULT_SENTINELS.iter().copied(), DEFAULT_LABEL_ARTIFACTS.iter().copied())
    }
}

impl ValueCleaner {
    pub fn new<S, L>(sentinels: S, label_artifacts: L) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        L: IntoIterator,
        L::Item: AsRef<str>,
    {
        let sentinels = sentinels
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        let label_artifacts = label_artifacts
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            sentinels,
            label_artifacts,
        }
    }

    /// Add sentinel tokens on top of the current lexicon.
    pub fn with_sentinels<I>(mut self, extra: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for token in extra {
            let token = token.as_ref().trim().to_lowercase();
            if !token.is_empty() {
                self.sentinels.insert(token);
            }
        }
        self
    }

    pub fn is_sentinel(&self, value: &str) -> bool {
        self.sentinels.contains(&value.trim().to_lowercase())
    }

    /// Clean one raw value. `None`, blank, sentinel and label-only inputs all become `None`.
    pub fn clean(&self, raw: Option<&str>) -> Option<String> {
        let mut value = raw?.trim();

        // Strip leaked labels until none is left at the front
        while let Some(rest) = self.strip_label_artifact(value) {
            value = rest.trim();
        }

        if value.is_empty() || self.is_sentinel(value) {
            return None;
        }

        Some(value.to_string())
    }

    fn strip_label_artifact<'a>(&self, value: &'a str) -> Option<&'a str> {
        self.label_artifacts.iter().find_map(|artifact| {
            let head = value.get(..artifact.len())?;
            if head.eq_ignore_ascii_case(artifact) {
                value.get(artifact.len()..)
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_become_none() {
        let cleaner = ValueCleaner::default();
        assert_eq!(cleaner.clean(Some("  NIL  ")), None);
        assert_eq!(cleaner.clean(Some("N/A")), None);
        assert_eq!(cleaner.clean(Some("Not Manation")), None);
        assert_eq!(cleaner.clean(Some("-")), None);
        assert_eq!(cleaner.clean(Some("   ")), None);
        assert_eq!(cleaner.clean(Some("")), None);
        assert_eq!(cleaner.clean(None), None);
    }

    #[test]
    fn test_sentinel_substring_is_kept() {
        let cleaner = ValueCleaner::default();
        assert_eq!(
            cleaner.clean(Some("nil-organization")),
            Some("nil-organization".to_string())
        );
        assert_eq!(cleaner.clean(Some("Nanda Trust")), Some("Nanda Trust".to_string()));
    }

    #[test]
    fn test_label_artifact_stripped() {
        let cleaner = ValueCleaner::default();
        assert_eq!(
            cleaner.clean(Some("Email ID: contact@sena.org ")),
            Some("contact@sena.org".to_string())
        );
        assert_eq!(
            cleaner.clean(Some("mail id:E-mail: a@b.in")),
            Some("a@b.in".to_string())
        );
        // A label with nothing behind it is empty
        assert_eq!(cleaner.clean(Some("Email:")), None);
        // Label followed by a sentinel
        assert_eq!(cleaner.clean(Some("Email: nil")), None);
    }

    #[test]
    fn test_extra_sentinels() {
        let cleaner = ValueCleaner::default().with_sentinels(["not available", " "]);
        assert_eq!(cleaner.clean(Some("Not Available")), None);
        assert_eq!(cleaner.clean(Some("available")), Some("available".to_string()));
    }

    #[test]
    fn test_clean_is_idempotent() {
        let cleaner = ValueCleaner::default();
        let samples = [
            "  NIL  ",
            "nil-organization",
            "Email ID: Email: x@y.com",
            "  Bangalore ",
            "Email ID:   -",
            "  n/a",
            "Phone:+91 98450 00000",
            "ಕನ್ನಡ ಸಂಘ",
            "",
        ];

        for sample in samples {
            let once = cleaner.clean(Some(sample));
            let twice = cleaner.clean(once.as_deref());
            assert_eq!(once, twice, "not idempotent for {:?}", sample);
        }
    }
}
