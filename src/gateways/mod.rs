use crate::domain::checkin::{CheckInRequest, CheckInResult};
use anyhow::Result;

pub mod apps_script;
pub mod mock;

#[async_trait::async_trait]
pub trait CheckInGateway: Send + Sync {
    fn name(&self) -> &'static str;

    /// `status` is echoed into a successful result for display.
    async fn submit(&self, request: &CheckInRequest, status: Option<String>) -> Result<CheckInResult>;
}
