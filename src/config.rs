pub const DEFAULT_CHECKIN_ENDPOINT: &str =
    "https://script.google.com/macros/s/AKfycbx1_b7r4eBH5-BQzg-cizb4-iCasjJQ-b8QD2-4XuWhNzNK8Rt-J0lJm7QZWQj70WyzHQ/exec";
pub const DEFAULT_GATEWAY_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayMode {
    Live,
    Mock,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub checkin_endpoint_url: String,
    pub gateway_timeout_ms: u64,
    pub gateway_mode: GatewayMode,
    pub mock_behavior: String,
    pub qr_output_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            checkin_endpoint_url: std::env::var("CHECKIN_ENDPOINT_URL")
                .unwrap_or_else(|_| DEFAULT_CHECKIN_ENDPOINT.to_string()),
            gateway_timeout_ms: std::env::var("GATEWAY_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(DEFAULT_GATEWAY_TIMEOUT_MS),
            gateway_mode: match std::env::var("GATEWAY_MODE").as_deref() {
                Ok("mock") => GatewayMode::Mock,
                _ => GatewayMode::Live,
            },
            mock_behavior: std::env::var("MOCK_BEHAVIOR").unwrap_or_else(|_| "ALWAYS_SUCCESS".to_string()),
            qr_output_dir: std::env::var("QR_OUTPUT_DIR").unwrap_or_else(|_| "./qr-codes".to_string()),
        }
    }
}
