use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::classify::{rules, Classifier, RiskRule, TypeRule};
use crate::cleaner::{ValueCleaner, DEFAULT_LABEL_ARTIFACTS, DEFAULT_SENTINELS};
use crate::environment::{get_env_var_as_usize, get_env_var_as_vec};
use crate::TARGET_PIPELINE;

pub const ENV_RULES_PATH: &str = "GROUPNORM_RULES_PATH";
pub const ENV_EXTRA_SENTINELS: &str = "GROUPNORM_EXTRA_SENTINELS";
pub const ENV_SAMPLE_SIZE: &str = "GROUPNORM_SAMPLE_SIZE";
pub const ENV_WORKBOOK: &str = "GROUPNORM_WORKBOOK";

pub const DEFAULT_SAMPLE_SIZE: usize = 10;
pub const DEFAULT_PLACEHOLDER_NAMES: &[&str] = &["Unnamed Group"];

/// Tunable lexicons and rule tables for a normalization run.
///
/// Every key is optional in the rules file; missing keys keep the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NormalizerConfig {
    pub sentinels: Vec<String>,
    /// Tokens added on top of `sentinels`, typically from `GROUPNORM_EXTRA_SENTINELS`
    pub extra_sentinels: Vec<String>,
    pub label_artifacts: Vec<String>,
    pub placeholder_names: Vec<String>,
    pub type_rules: Vec<TypeRule>,
    pub risk_rules: Vec<RiskRule>,
    pub sample_size: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            sentinels: DEFAULT_SENTINELS.iter().map(|s| s.to_string()).collect(),
            extra_sentinels: Vec::new(),
            label_artifacts: DEFAULT_LABEL_ARTIFACTS.iter().map(|s| s.to_string()).collect(),
            placeholder_names: DEFAULT_PLACEHOLDER_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            type_rules: rules::default_type_rules(),
            risk_rules: rules::default_risk_rules(),
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl NormalizerConfig {
    /// Read a JSON rules file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file {}", path.display()))?;
        let config: NormalizerConfig = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse rules file {}", path.display()))?;
        info!(target: TARGET_PIPELINE, "Loaded rules from {}", path.display());
        Ok(config)
    }

    /// Defaults, overlaid with the rules file (explicit path first, then
    /// `GROUPNORM_RULES_PATH`), then the environment extensions.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var(ENV_RULES_PATH).ok();
        let path = path.or_else(|| env_path.as_deref().map(Path::new));

        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        Ok(config.apply_env())
    }

    pub fn apply_env(mut self) -> Self {
        self.extra_sentinels
            .extend(get_env_var_as_vec(ENV_EXTRA_SENTINELS, ';'));
        if let Some(size) = get_env_var_as_usize(ENV_SAMPLE_SIZE) {
            self.sample_size = size;
        }
        self
    }

    pub fn cleaner(&self) -> ValueCleaner {
        ValueCleaner::new(&self.sentinels, &self.label_artifacts)
            .with_sentinels(&self.extra_sentinels)
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.type_rules.clone(), self.risk_rules.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::RiskLevel;

    #[test]
    fn test_partial_rules_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(
            &path,
            r#"{
                "sentinels": ["nil", "not available"],
                "riskRules": [{"when": {"membersAbove": 1000}, "level": "high"}]
            }"#,
        )
        .unwrap();

        let config = NormalizerConfig::from_file(&path).unwrap();
        assert_eq!(config.sentinels, vec!["nil", "not available"]);
        assert_eq!(config.sample_size, DEFAULT_SAMPLE_SIZE);
        assert_eq!(config.type_rules, rules::default_type_rules());

        let cleaner = config.cleaner();
        assert_eq!(cleaner.clean(Some("NOT AVAILABLE")), None);
        assert_eq!(cleaner.clean(Some("n/a")), Some("n/a".to_string()));

        let classifier = config.classifier();
        assert_eq!(classifier.determine_risk_level("x", "y", 1001), RiskLevel::High);
    }

    #[test]
    fn test_environment_extends_config() {
        std::env::set_var(ENV_EXTRA_SENTINELS, "not available;;NIL; tbd ");
        std::env::set_var(ENV_SAMPLE_SIZE, "3");
        let config = NormalizerConfig::default().apply_env();
        std::env::remove_var(ENV_EXTRA_SENTINELS);
        std::env::remove_var(ENV_SAMPLE_SIZE);

        assert_eq!(config.sample_size, 3);
        assert_eq!(config.extra_sentinels, vec!["not available", "NIL", "tbd"]);

        let cleaner = config.cleaner();
        assert_eq!(cleaner.clean(Some("Not Available")), None);
        assert_eq!(cleaner.clean(Some("TBD")), None);
        assert_eq!(cleaner.clean(Some("nil")), None);
        assert_eq!(cleaner.clean(Some("Bengaluru")), Some("Bengaluru".to_string()));
    }

    #[test]
    fn test_malformed_rules_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(&path, "{ sentinels: }").unwrap();
        assert!(NormalizerConfig::from_file(&path).is_err());
        assert!(NormalizerConfig::from_file(&dir.path().join("missing.json")).is_err());
    }
}
