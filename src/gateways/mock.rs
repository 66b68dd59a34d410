use crate::domain::checkin::{CheckInRequest, CheckInResult};
use crate::gateways::CheckInGateway;
use anyhow::Result;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct MockGateway {
    pub behavior: String,
    calls: AtomicUsize,
}

impl MockGateway {
    pub fn new(behavior: impl Into<String>) -> Self {
        Self {
            behavior: behavior.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CheckInGateway for MockGateway {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn submit(&self, _request: &CheckInRequest, status: Option<String>) -> Result<CheckInResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = chrono::Local::now().format("%H:%M:%S").to_string();

        let result = match self.behavior.as_str() {
            "ALWAYS_DUPLICATE" => CheckInResult::AlreadyScanned {
                time_in: Some(now),
                security_message: Some("mock: badge already checked in".to_string()),
            },
            "ALWAYS_FAILURE" => CheckInResult::failure("mock rejection"),
            "ALWAYS_ERROR" => anyhow::bail!("mock transport error"),
            _ => CheckInResult::Success {
                time_in: Some(now),
                status,
            },
        };

        Ok(result)
    }
}
