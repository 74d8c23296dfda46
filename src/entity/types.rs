use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Group type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    Religious,
    Political,
    Social,
    Professional,
    Cultural,
    Other,
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupType::Religious => write!(f, "religious"),
            GroupType::Political => write!(f, "political"),
            GroupType::Social => write!(f, "social"),
            GroupType::Professional => write!(f, "professional"),
            GroupType::Cultural => write!(f, "cultural"),
            GroupType::Other => write!(f, "other"),
        }
    }
}

impl From<&str> for GroupType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "religious" => GroupType::Religious,
            "political" => GroupType::Political,
            "social" => GroupType::Social,
            "professional" => GroupType::Professional,
            "cultural" => GroupType::Cultural,
            _ => GroupType::Other,
        }
    }
}

/// Derived risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

impl From<&str> for RiskLevel {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "high" => RiskLevel::High,
            "medium" => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Inactive,
    Monitored,
}

/// Social platforms, declared in primary-platform preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
    Twitter,
    Youtube,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Facebook,
        Platform::Instagram,
        Platform::Twitter,
        Platform::Youtube,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::Youtube => "youtube",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl ContactInfo {
    /// Returns `None` when every sub-field is absent.
    pub fn from_parts(
        phone: Option<String>,
        email: Option<String>,
        website: Option<String>,
    ) -> Option<Self> {
        if phone.is_none() && email.is_none() && website.is_none() {
            return None;
        }
        Some(Self {
            phone,
            email,
            website,
        })
    }
}

/// The unified record every source row is normalized into.
///
/// Keyed by `id` for the downstream upsert. `platforms` and `primary_platform` are derived
/// from `social_media` and never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalEntity {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: GroupType,
    pub members: u64,
    pub platforms: Vec<Platform>,
    pub primary_platform: String,
    pub social_media: BTreeMap<Platform, String>,
    pub location: Option<String>,
    pub contact_info: Option<ContactInfo>,
    pub influencers: Option<String>,
    pub description: String,
    pub risk_level: RiskLevel,
    pub category: String,
    pub status: Status,
    pub monitoring_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_preference_order() {
        let mut platforms = vec![Platform::Youtube, Platform::Twitter, Platform::Facebook];
        platforms.sort();
        assert_eq!(
            platforms,
            vec![Platform::Facebook, Platform::Twitter, Platform::Youtube]
        );
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&GroupType::Professional).unwrap(), "\"professional\"");
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&Status::Active).unwrap(), "\"active\"");
        assert_eq!(GroupType::from("CULTURAL"), GroupType::Cultural);
        assert_eq!(RiskLevel::from("unknown"), RiskLevel::Low);
    }

    #[test]
    fn test_contact_info_null_when_empty() {
        assert_eq!(ContactInfo::from_parts(None, None, None), None);
        let info = ContactInfo::from_parts(None, Some("a@b.in".to_string()), None).unwrap();
        assert_eq!(serde_json::to_string(&info).unwrap(), r#"{"email":"a@b.in"}"#);
    }
}
