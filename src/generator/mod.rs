use crate::domain::checkin::UuidEnvelope;
use crate::domain::payload::{BadgeType, StatusCode};
use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod media_store;
pub mod render;

pub const MAX_BADGE_ID_LEN: usize = 36;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttendeeStatus {
    Regular,
    Vip,
    Staff,
}

impl AttendeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendeeStatus::Regular => "regular",
            AttendeeStatus::Vip => "vip",
            AttendeeStatus::Staff => "staff",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorInput {
    Text(String),
    Url(String),
    /// `uuid` JSON envelope read by the legacy check-in path.
    Badge {
        id: String,
        status: AttendeeStatus,
    },
    /// `TYPE-[STATUS-]ID` badge code.
    BadgeCode {
        badge_type: BadgeType,
        status_code: Option<StatusCode>,
        id: String,
    },
}

pub fn compose_payload(input: &GeneratorInput, now: DateTime<Utc>) -> Result<String> {
    match input {
        GeneratorInput::Text(text) | GeneratorInput::Url(text) => {
            if text.trim().is_empty() {
                bail!("nothing to encode");
            }
            Ok(text.clone())
        }
        GeneratorInput::Badge { id, status } => {
            let id = sanitize_badge_id(id)?;
            let envelope = UuidEnvelope::new(&id, status.as_str(), now);
            Ok(serde_json::to_string(&envelope)?)
        }
        GeneratorInput::BadgeCode {
            badge_type,
            status_code,
            id,
        } => {
            let id = sanitize_badge_id(id)?;
            match status_code {
                Some(code) if *badge_type != BadgeType::Visitors => {
                    let code = code.as_str();
                    if code.is_empty() || !code.chars().all(|c| c.is_ascii_uppercase()) {
                        bail!("status code must be upper-case letters, got {code:?}");
                    }
                    Ok(format!("{badge_type}-{code}-{id}"))
                }
                _ => Ok(format!("{badge_type}-{id}")),
            }
        }
    }
}

fn sanitize_badge_id(id: &str) -> Result<String> {
    let digits: String = id
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_BADGE_ID_LEN)
        .collect();
    if digits.is_empty() {
        bail!("badge id must contain at least one digit");
    }
    Ok(digits)
}
