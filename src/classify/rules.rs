//! Ordered, data-driven classification rules.
//!
//! Both tables are evaluated top to bottom and the first matching rule wins, so the order of
//! entries is part of their meaning. Keyword matching is a case-insensitive substring test.
//! Thresholds and keyword lists are heuristics taken from the observed source data and can be
//! replaced wholesale through the rules file.

use serde::{Deserialize, Serialize};

use crate::entity::{GroupType, RiskLevel};

/// Which input a type rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Sheet,
    Name,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRule {
    pub field: MatchField,
    pub keywords: Vec<String>,
    #[serde(rename = "type")]
    pub group_type: GroupType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskCondition {
    NameContainsAny(Vec<String>),
    SheetContainsAny(Vec<String>),
    MembersAbove(u64),
    MembersAboveAndNameContainsAny { members: u64, keywords: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRule {
    pub when: RiskCondition,
    pub level: RiskLevel,
}

/// Militant-organization-style name tokens.
pub const HIGH_RISK_NAME_KEYWORDS: &[&str] = &[
    "sena", "bajrang", "militant", "army", "brigade", "jihad", "commando",
];

/// Sheet-level provenance markers for high risk.
pub const HIGH_RISK_SHEET_KEYWORDS: &[&str] = &["banned", "extremist"];

pub const RELIGIOUS_NAME_KEYWORDS: &[&str] = &[
    "hindu", "muslim", "christian", "islam", "church", "masjid", "mandir", "temple",
];

pub const MEDIUM_RISK_MEMBERS: u64 = 50_000;
pub const RELIGIOUS_MEDIUM_RISK_MEMBERS: u64 = 10_000;

/// Keyword groups shared by the sheet rules and the name fallback rules, in priority order.
const TYPE_KEYWORDS: &[(&[&str], GroupType)] = &[
    (&["hindu", "muslim", "christian"], GroupType::Religious),
    (&["political"], GroupType::Political),
    (&["student"], GroupType::Social),
    (&["farmer", "trade union"], GroupType::Professional),
    (&["human rights"], GroupType::Social),
    (&["kannad", "cultural"], GroupType::Cultural),
];

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Sheet rules first, then the same mapping against the name.
pub fn default_type_rules() -> Vec<TypeRule> {
    [MatchField::Sheet, MatchField::Name]
        .iter()
        .flat_map(|field| {
            TYPE_KEYWORDS.iter().map(move |(keywords, group_type)| TypeRule {
                field: *field,
                keywords: to_strings(keywords),
                group_type: *group_type,
            })
        })
        .collect()
}

pub fn default_risk_rules() -> Vec<RiskRule> {
    vec![
        RiskRule {
            when: RiskCondition::NameContainsAny(to_strings(HIGH_RISK_NAME_KEYWORDS)),
            level: RiskLevel::High,
        },
        RiskRule {
            when: RiskCondition::SheetContainsAny(to_strings(HIGH_RISK_SHEET_KEYWORDS)),
            level: RiskLevel::High,
        },
        RiskRule {
            when: RiskCondition::MembersAbove(MEDIUM_RISK_MEMBERS),
            level: RiskLevel::Medium,
        },
        RiskRule {
            when: RiskCondition::MembersAboveAndNameContainsAny {
                members: RELIGIOUS_MEDIUM_RISK_MEMBERS,
                keywords: to_strings(RELIGIOUS_NAME_KEYWORDS),
            },
            level: RiskLevel::Medium,
        },
    ]
}
