use crate::domain::checkin::{CheckInRequest, CheckInResult};
use crate::domain::payload::ScanPayload;
use crate::gateways::CheckInGateway;
use std::sync::Arc;

#[derive(Clone)]
pub struct CheckInService {
    pub gateway: Arc<dyn CheckInGateway>,
}

impl CheckInService {
    pub fn new(gateway: Arc<dyn CheckInGateway>) -> Self {
        Self { gateway }
    }

    pub async fn check_in(&self, payload: &ScanPayload) -> CheckInResult {
        let (request, status) = match payload {
            ScanPayload::Badge { badge, .. } if badge.is_unpaid() => {
                tracing::info!(badge_type = %badge.badge_type, id = %badge.numeric_id, "unpaid badge, gateway skipped");
                return CheckInResult::Unpaid { badge: badge.clone() };
            }
            ScanPayload::Badge { raw, badge } => {
                match CheckInRequest::for_badge(raw, badge, chrono::Utc::now()) {
                    Ok(req) => (req, Some(badge.status_code.to_string())),
                    Err(e) => return CheckInResult::failure(e.to_string()),
                }
            }
            ScanPayload::LegacyJsonBadge { raw, .. } => (
                CheckInRequest::for_legacy(raw),
                payload.legacy_status().map(str::to_string),
            ),
            ScanPayload::Url { .. } | ScanPayload::Text { .. } => {
                return CheckInResult::failure("not a badge payload");
            }
        };

        let result = match self.gateway.submit(&request, status).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(gateway = self.gateway.name(), "check-in transport error: {:#}", e);
                CheckInResult::failure(e.to_string())
            }
        };

        tracing::info!(
            gateway = self.gateway.name(),
            category = ?payload.category(),
            outcome = ?result.outcome(),
            "check-in resolved"
        );
        result
    }
}
