pub mod config;
pub mod domain {
    pub mod checkin;
    pub mod payload;
}
pub mod gateways;
pub mod generator;
pub mod service {
    pub mod checkin_service;
    pub mod scanner;
}

use config::{AppConfig, GatewayMode};
use gateways::apps_script::AppsScriptGateway;
use gateways::mock::MockGateway;
use gateways::CheckInGateway;
use std::sync::Arc;

pub fn build_gateway(cfg: &AppConfig) -> Arc<dyn CheckInGateway> {
    match cfg.gateway_mode {
        GatewayMode::Live => Arc::new(AppsScriptGateway::new(
            cfg.checkin_endpoint_url.clone(),
            cfg.gateway_timeout_ms,
        )),
        GatewayMode::Mock => Arc::new(MockGateway::new(cfg.mock_behavior.clone())),
    }
}
