use crate::domain::checkin::{interpret_response, CheckInRequest, CheckInResult};
use crate::gateways::CheckInGateway;
use anyhow::Result;

/// Spreadsheet-backed script endpoint that records time-ins.
pub struct AppsScriptGateway {
    pub endpoint_url: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

impl AppsScriptGateway {
    pub fn new(endpoint_url: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            timeout_ms,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl CheckInGateway for AppsScriptGateway {
    fn name(&self) -> &'static str {
        "apps_script"
    }

    async fn submit(&self, request: &CheckInRequest, status: Option<String>) -> Result<CheckInResult> {
        let resp = self
            .client
            .post(&self.endpoint_url)
            .header("Content-Type", "application/json")
            .json(request)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await;

        let result = match resp {
            Ok(r) => {
                let code = r.status().as_u16();
                match r.text().await {
                    Ok(body) => interpret_response(code, &body, status),
                    Err(e) => {
                        tracing::warn!("failed reading check-in response body: {}", e);
                        CheckInResult::failure(e.to_string())
                    }
                }
            }
            Err(e) if e.is_timeout() => {
                tracing::warn!("check-in request timed out after {}ms", self.timeout_ms);
                CheckInResult::failure("gateway timeout")
            }
            Err(e) => {
                tracing::warn!("check-in request failed: {}", e);
                CheckInResult::failure(e.to_string())
            }
        };

        Ok(result)
    }
}
