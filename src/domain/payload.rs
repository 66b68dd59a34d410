use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static BADGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(VIP|GENAD|VISITORS|REGULAR)-([A-Z]+-)?([0-9]+)$").expect("badge pattern compiles")
});

const URL_PREFIXES: [&str; 3] = ["http://", "https://", "www."];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayloadCategory {
    Url,
    Badge,
    LegacyJsonBadge,
    Text,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BadgeType {
    Vip,
    Genad,
    Visitors,
    Regular,
}

impl BadgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeType::Vip => "VIP",
            BadgeType::Genad => "GENAD",
            BadgeType::Visitors => "VISITORS",
            BadgeType::Regular => "REGULAR",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "VIP" => Some(BadgeType::Vip),
            "GENAD" => Some(BadgeType::Genad),
            "VISITORS" => Some(BadgeType::Visitors),
            "REGULAR" => Some(BadgeType::Regular),
            _ => None,
        }
    }
}

impl fmt::Display for BadgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment state printed on a badge code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum StatusCode {
    Paid,
    Unpaid,
    Sponsored,
    Free,
    Other(String),
}

impl StatusCode {
    pub fn as_str(&self) -> &str {
        match self {
            StatusCode::Paid => "P",
            StatusCode::Unpaid => "UP",
            StatusCode::Sponsored => "S",
            StatusCode::Free => "F",
            StatusCode::Other(code) => code.as_str(),
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "P" => StatusCode::Paid,
            "UP" => StatusCode::Unpaid,
            "S" => StatusCode::Sponsored,
            "F" => StatusCode::Free,
            other => StatusCode::Other(other.to_string()),
        }
    }
}

impl From<StatusCode> for String {
    fn from(code: StatusCode) -> Self {
        code.as_str().to_string()
    }
}

impl From<String> for StatusCode {
    fn from(code: String) -> Self {
        StatusCode::from_code(&code)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeCode {
    pub badge_type: BadgeType,
    pub status_code: StatusCode,
    pub numeric_id: String,
}

impl BadgeCode {
    pub fn is_unpaid(&self) -> bool {
        self.status_code == StatusCode::Unpaid
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanPayload {
    Url {
        raw: String,
        link: String,
    },
    Badge {
        raw: String,
        badge: BadgeCode,
    },
    LegacyJsonBadge {
        raw: String,
        fields: serde_json::Map<String, serde_json::Value>,
    },
    Text {
        raw: String,
    },
}

impl ScanPayload {
    pub fn raw(&self) -> &str {
        match self {
            ScanPayload::Url { raw, .. }
            | ScanPayload::Badge { raw, .. }
            | ScanPayload::LegacyJsonBadge { raw, .. }
            | ScanPayload::Text { raw } => raw,
        }
    }

    pub fn category(&self) -> PayloadCategory {
        match self {
            ScanPayload::Url { .. } => PayloadCategory::Url,
            ScanPayload::Badge { .. } => PayloadCategory::Badge,
            ScanPayload::LegacyJsonBadge { .. } => PayloadCategory::LegacyJsonBadge,
            ScanPayload::Text { .. } => PayloadCategory::Text,
        }
    }

    /// The `status` field of a legacy envelope, when it is a string.
    pub fn legacy_status(&self) -> Option<&str> {
        self.legacy_str("status")
    }

    pub fn legacy_data(&self) -> Option<&str> {
        self.legacy_str("data")
    }

    fn legacy_str(&self, key: &str) -> Option<&str> {
        match self {
            ScanPayload::LegacyJsonBadge { fields, .. } => fields.get(key).and_then(|v| v.as_str()),
            _ => None,
        }
    }
}

type Extractor = fn(&str) -> Option<ScanPayload>;

// First match wins; `Text` is the fallback.
const EXTRACTORS: [Extractor; 3] = [extract_url, extract_badge, extract_legacy_json];

pub fn classify(raw: &str) -> ScanPayload {
    EXTRACTORS
        .iter()
        .find_map(|extract| extract(raw))
        .unwrap_or_else(|| ScanPayload::Text {
            raw: raw.to_string(),
        })
}

fn extract_url(raw: &str) -> Option<ScanPayload> {
    if !URL_PREFIXES.iter().any(|p| raw.starts_with(p)) {
        return None;
    }
    let link = if raw.starts_with("www.") {
        format!("https://{raw}")
    } else {
        raw.to_string()
    };
    Some(ScanPayload::Url {
        raw: raw.to_string(),
        link,
    })
}

fn extract_badge(raw: &str) -> Option<ScanPayload> {
    let caps = BADGE_PATTERN.captures(raw)?;
    let badge_type = BadgeType::from_name(caps.get(1)?.as_str())?;
    let status_code = if badge_type == BadgeType::Visitors {
        StatusCode::Free
    } else if let Some(group) = caps.get(2) {
        StatusCode::from_code(group.as_str().trim_end_matches('-'))
    } else {
        StatusCode::Paid
    };

    Some(ScanPayload::Badge {
        raw: raw.to_string(),
        badge: BadgeCode {
            badge_type,
            status_code,
            numeric_id: caps.get(3)?.as_str().to_string(),
        },
    })
}

fn extract_legacy_json(raw: &str) -> Option<ScanPayload> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let fields = match value {
        serde_json::Value::Object(map) => map,
        _ => return None,
    };
    if fields.get("type").and_then(|t| t.as_str()) != Some("uuid") {
        return None;
    }
    Some(ScanPayload::LegacyJsonBadge {
        raw: raw.to_string(),
        fields,
    })
}
