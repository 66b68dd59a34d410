use crate::domain::payload::BadgeCode;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const FALLBACK_FAILURE_MESSAGE: &str = "Failed to process Time In";
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Unexpected response from check-in server";

/// Badge envelope carried inside the `uuid` wire field; also what the
/// generator encodes for `uuid`-type QR codes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UuidEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: String,
    pub status: String,
    pub created: String,
}

impl UuidEnvelope {
    pub fn new(data: &str, status: &str, now: DateTime<Utc>) -> Self {
        Self {
            kind: "uuid".to_string(),
            data: data.to_string(),
            status: status.to_string(),
            created: iso_timestamp(now),
        }
    }
}

/// Millisecond precision with a `Z` suffix.
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckInRequest {
    pub uuid: String,
}

impl CheckInRequest {
    pub fn for_badge(raw: &str, badge: &BadgeCode, now: DateTime<Utc>) -> anyhow::Result<Self> {
        let envelope = UuidEnvelope::new(raw, badge.status_code.as_str(), now);
        Ok(Self {
            uuid: serde_json::to_string(&envelope)?,
        })
    }

    pub fn for_legacy(raw: &str) -> Self {
        Self {
            uuid: raw.to_string(),
        }
    }
}

/// Fields picked from the gateway reply. A field of the wrong JSON type is
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayReplyBody {
    pub success: Option<bool>,
    pub already_scanned: Option<bool>,
    pub time_in: Option<String>,
    pub security_message: Option<String>,
    pub message: Option<String>,
}

impl GatewayReplyBody {
    pub fn parse(body: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        let obj = value.as_object()?;
        let text = |key: &str| obj.get(key).and_then(|v| v.as_str()).map(str::to_string);
        Some(Self {
            success: obj.get("success").and_then(|v| v.as_bool()),
            already_scanned: obj.get("alreadyScanned").and_then(|v| v.as_bool()),
            time_in: text("timeIn"),
            security_message: text("securityMessage"),
            message: text("message"),
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckInOutcome {
    Success,
    AlreadyScanned,
    Unpaid,
    Failure,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckInResult {
    Success {
        time_in: Option<String>,
        status: Option<String>,
    },
    AlreadyScanned {
        time_in: Option<String>,
        security_message: Option<String>,
    },
    Unpaid {
        badge: BadgeCode,
    },
    Failure {
        error_message: String,
    },
}

impl CheckInResult {
    pub fn outcome(&self) -> CheckInOutcome {
        match self {
            CheckInResult::Success { .. } => CheckInOutcome::Success,
            CheckInResult::AlreadyScanned { .. } => CheckInOutcome::AlreadyScanned,
            CheckInResult::Unpaid { .. } => CheckInOutcome::Unpaid,
            CheckInResult::Failure { .. } => CheckInOutcome::Failure,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        CheckInResult::Failure {
            error_message: message.into(),
        }
    }
}

/// The only place that looks at gateway response fields.
pub fn interpret_response(http_status: u16, body: &str, status: Option<String>) -> CheckInResult {
    let parsed = GatewayReplyBody::parse(body);

    if !(200..300).contains(&http_status) {
        return match parsed.and_then(|b| b.message) {
            Some(message) => CheckInResult::failure(message),
            None => CheckInResult::failure(format!("{FALLBACK_FAILURE_MESSAGE} (HTTP {http_status})")),
        };
    }

    let Some(reply) = parsed else {
        return CheckInResult::failure(MALFORMED_RESPONSE_MESSAGE);
    };

    match (reply.success, reply.already_scanned) {
        (Some(true), _) => CheckInResult::Success {
            time_in: reply.time_in,
            status,
        },
        (Some(false), Some(true)) => CheckInResult::AlreadyScanned {
            time_in: reply.time_in,
            security_message: reply.security_message,
        },
        (Some(false), _) => {
            CheckInResult::failure(reply.message.unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string()))
        }
        (None, _) => CheckInResult::failure(MALFORMED_RESPONSE_MESSAGE),
    }
}
