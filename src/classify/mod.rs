pub mod rules;

use tracing::debug;

use crate::entity::{GroupType, RiskLevel};
use crate::TARGET_CLASSIFY;
pub use rules::{MatchField, RiskCondition, RiskRule, TypeRule};

/// Derives `type` and `riskLevel` from `(sheet, name, members)`.
///
/// Both functions are total and pure: they depend only on their arguments and the rule
/// tables, never on row position or on other rows.
#[derive(Debug, Clone)]
pub struct Classifier {
    type_rules: Vec<TypeRule>,
    risk_rules: Vec<RiskRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(rules::default_type_rules(), rules::default_risk_rules())
    }
}

impl Classifier {
    pub fn new(type_rules: Vec<TypeRule>, risk_rules: Vec<RiskRule>) -> Self {
        // Keywords are matched against lowercased input
        let type_rules = type_rules
            .into_iter()
            .map(|mut rule| {
                rule.keywords = lowercase_all(&rule.keywords);
                rule
            })
            .collect();

        let risk_rules = risk_rules
            .into_iter()
            .map(|mut rule| {
                rule.when = match rule.when {
                    RiskCondition::NameContainsAny(k) => {
                        RiskCondition::NameContainsAny(lowercase_all(&k))
                    }
                    RiskCondition::SheetContainsAny(k) => {
                        RiskCondition::SheetContainsAny(lowercase_all(&k))
                    }
                    RiskCondition::MembersAboveAndNameContainsAny { members, keywords } => {
                        RiskCondition::MembersAboveAndNameContainsAny {
                            members,
                            keywords: lowercase_all(&keywords),
                        }
                    }
                    other => other,
                };
                rule
            })
            .collect();

        Self {
            type_rules,
            risk_rules,
        }
    }

    pub fn type_rules(&self) -> &[TypeRule] {
        &self.type_rules
    }

    pub fn risk_rules(&self) -> &[RiskRule] {
        &self.risk_rules
    }

    pub fn determine_type(&self, sheet_name: &str, name: &str) -> GroupType {
        let sheet = sheet_name.to_lowercase();
        let name = name.to_lowercase();

        for (index, rule) in self.type_rules.iter().enumerate() {
            let haystack = match rule.field {
                MatchField::Sheet => &sheet,
                MatchField::Name => &name,
            };
            if contains_any(haystack, &rule.keywords) {
                debug!(
                    target: TARGET_CLASSIFY,
                    "Type rule {} ({:?}) matched '{}' / '{}' -> {}",
                    index, rule.field, sheet_name, name, rule.group_type
                );
                return rule.group_type;
            }
        }

        GroupType::Other
    }

    pub fn determine_risk_level(&self, sheet_name: &str, name: &str, members: u64) -> RiskLevel {
        let sheet = sheet_name.to_lowercase();
        let name = name.to_lowercase();

        for (index, rule) in self.risk_rules.iter().enumerate() {
            let matched = match &rule.when {
                RiskCondition::NameContainsAny(keywords) => contains_any(&name, keywords),
                RiskCondition::SheetContainsAny(keywords) => contains_any(&sheet, keywords),
                RiskCondition::MembersAbove(threshold) => members > *threshold,
                RiskCondition::MembersAboveAndNameContainsAny {
                    members: threshold,
                    keywords,
                } => members > *threshold && contains_any(&name, keywords),
            };
            if matched {
                debug!(
                    target: TARGET_CLASSIFY,
                    "Risk rule {} matched '{}' / '{}' ({} members) -> {}",
                    index, sheet_name, name, members, rule.level
                );
                return rule.level;
            }
        }

        RiskLevel::Low
    }
}

fn lowercase_all(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| haystack.contains(k.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_rules_win_over_name() {
        let classifier = Classifier::default();
        // Name mentions "student" but the sheet says political
        assert_eq!(
            classifier.determine_type("Political Parties", "Student Federation"),
            GroupType::Political
        );
        assert_eq!(
            classifier.determine_type("Right Hindu Groups", "Hindu Jagruti Sena"),
            GroupType::Religious
        );
        assert_eq!(
            classifier.determine_type("Trade Unions", "Auto Drivers Sangha"),
            GroupType::Professional
        );
        assert_eq!(
            classifier.determine_type("Human Rights Organisations", "PUCL"),
            GroupType::Social
        );
        assert_eq!(
            classifier.determine_type("Kannada Organisations", "Vedike"),
            GroupType::Cultural
        );
    }

    #[test]
    fn test_name_fallback_and_default() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.determine_type("Banned Organisations", "Students Islamic Movement"),
            GroupType::Social
        );
        assert_eq!(
            classifier.determine_type("Banned Organisations", "Muslim Youth Forum"),
            GroupType::Religious
        );
        assert_eq!(
            classifier.determine_type("Banned Organisations", "Unknown Collective"),
            GroupType::Other
        );
    }

    #[test]
    fn test_rule_order_decides_overlaps() {
        let classifier = Classifier::default();
        // Both the religious and the political sheet keywords match; religious comes first
        assert_eq!(
            classifier.determine_type("Hindu Political Wing", "X"),
            GroupType::Religious
        );
    }

    #[test]
    fn test_risk_levels() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.determine_risk_level("Right Hindu Groups", "Hindu Jagruti Sena", 3543),
            RiskLevel::High
        );
        assert_eq!(
            classifier.determine_risk_level("Banned Organisations", "Quiet Circle", 10),
            RiskLevel::High
        );
        assert_eq!(
            classifier.determine_risk_level("Political Parties", "Janata Front", 75_000),
            RiskLevel::Medium
        );
        assert_eq!(
            classifier.determine_risk_level("Muslim Groups", "Muslim Welfare Trust", 12_000),
            RiskLevel::Medium
        );
        assert_eq!(
            classifier.determine_risk_level("Muslim Groups", "Welfare Trust", 12_000),
            RiskLevel::Low
        );
        assert_eq!(
            classifier.determine_risk_level("Political Parties", "Janata Front", 50_000),
            RiskLevel::Low
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = Classifier::default();
        let inputs = [
            ("Right Hindu Groups", "Sri Rama Sena", 900),
            ("Trade Unions", "Garment Workers Union", 60_000),
            ("Cultural Forums", "Christian Choir", 11_000),
        ];
        for (sheet, name, members) in inputs {
            let first = (
                classifier.determine_type(sheet, name),
                classifier.determine_risk_level(sheet, name, members),
            );
            let second = (
                classifier.determine_type(sheet, name),
                classifier.determine_risk_level(sheet, name, members),
            );
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_custom_rules_are_case_insensitive() {
        let classifier = Classifier::new(
            vec![TypeRule {
                field: MatchField::Name,
                keywords: vec!["  SANGHA ".to_string()],
                group_type: GroupType::Cultural,
            }],
            vec![RiskRule {
                when: RiskCondition::MembersAbove(100),
                level: RiskLevel::High,
            }],
        );
        assert_eq!(
            classifier.determine_type("Anything", "Kala Sangha"),
            GroupType::Cultural
        );
        assert_eq!(classifier.determine_risk_level("Anything", "x", 101), RiskLevel::High);
        assert_eq!(classifier.determine_risk_level("Anything", "x", 100), RiskLevel::Low);
    }
}
