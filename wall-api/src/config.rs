//! Environment-driven application configuration.
//!
//! Everything tunable lives here: intake policy (quota, window, length
//! gates), session expiry, OCR strategy endpoints and credentials, and the
//! optional object-store / messaging-gateway settings. Values come from
//! environment variables (a `.env` file is honored via dotenvy in `main`),
//! with the reference policy as defaults.

use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Public submissions allowed per client key per window.
    pub rate_limit_quota: u32,
    /// Rate limit window length in seconds.
    pub rate_limit_window_secs: u64,
    /// Session lifetime in hours from login.
    pub session_expiry_hours: i64,
    /// Minimum accepted length for directly-typed content.
    pub min_content_len: usize,
    /// Minimum accepted length for OCR-derived content. Recognized
    /// handwriting is often very short, so this floor is deliberately low.
    pub min_extracted_len: usize,
    /// Per-strategy timeout for recognition attempts, in seconds.
    pub ocr_attempt_timeout_secs: u64,

    /// Vision API endpoint (strategy A). The strategy is registered only
    /// when an API key is configured.
    pub vision_endpoint: String,
    pub vision_api_key: Option<String>,

    /// Local OCR binary (strategy B); unset means the strategy is skipped.
    pub tesseract_cmd: Option<String>,

    /// Multimodal chat-completions endpoint (strategy C).
    pub multimodal_endpoint: String,
    pub multimodal_api_key: Option<String>,
    pub multimodal_model: String,

    /// Object-store bucket for submitted images; unset disables uploads.
    pub bucket_name: Option<String>,
    pub object_store_endpoint: String,
    pub object_store_token: Option<String>,

    /// Outbound messaging gateway; all four must be set to enable it.
    pub gateway_url: Option<String>,
    pub gateway_token: Option<String>,
    pub gateway_sender: Option<String>,
    pub gateway_recipient: Option<String>,
    pub gateway_template: String,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn var_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            rate_limit_quota: parse_or("WALL_RATE_LIMIT_QUOTA", 5),
            rate_limit_window_secs: parse_or("WALL_RATE_LIMIT_WINDOW_SECS", 3600),
            session_expiry_hours: parse_or("WALL_SESSION_EXPIRY_HOURS", 24),
            min_content_len: parse_or("WALL_MIN_CONTENT_LEN", 10),
            min_extracted_len: parse_or("WALL_MIN_EXTRACTED_LEN", 1),
            ocr_attempt_timeout_secs: parse_or("WALL_OCR_TIMEOUT_SECS", 20),
            vision_endpoint: var_or("WALL_VISION_ENDPOINT", "https://vision.googleapis.com"),
            vision_api_key: var_opt("WALL_VISION_API_KEY"),
            tesseract_cmd: var_opt("WALL_TESSERACT_CMD"),
            multimodal_endpoint: var_or("WALL_MULTIMODAL_ENDPOINT", "https://api.openai.com"),
            multimodal_api_key: var_opt("WALL_MULTIMODAL_API_KEY"),
            multimodal_model: var_or("WALL_MULTIMODAL_MODEL", "gpt-4o-mini"),
            bucket_name: var_opt("WALL_GCS_BUCKET"),
            object_store_endpoint: var_or(
                "WALL_OBJECT_STORE_ENDPOINT",
                "https://storage.googleapis.com",
            ),
            object_store_token: var_opt("WALL_OBJECT_STORE_TOKEN"),
            gateway_url: var_opt("WALL_GATEWAY_URL"),
            gateway_token: var_opt("WALL_GATEWAY_TOKEN"),
            gateway_sender: var_opt("WALL_GATEWAY_SENDER"),
            gateway_recipient: var_opt("WALL_GATEWAY_RECIPIENT"),
            gateway_template: var_or("WALL_GATEWAY_TEMPLATE", "auto_message6"),
        }
    }

    /// Configuration for the test Rocket: reference intake policy, no
    /// external recognition strategies, no outbound services.
    pub fn for_tests() -> Self {
        AppConfig {
            rate_limit_quota: 5,
            rate_limit_window_secs: 3600,
            session_expiry_hours: 24,
            min_content_len: 10,
            min_extracted_len: 1,
            ocr_attempt_timeout_secs: 5,
            vision_endpoint: "https://vision.invalid".to_string(),
            vision_api_key: None,
            tesseract_cmd: None,
            multimodal_endpoint: "https://multimodal.invalid".to_string(),
            multimodal_api_key: None,
            multimodal_model: "test-model".to_string(),
            bucket_name: None,
            object_store_endpoint: "https://storage.invalid".to_string(),
            object_store_token: None,
            gateway_url: None,
            gateway_token: None,
            gateway_sender: None,
            gateway_recipient: None,
            gateway_template: "auto_message6".to_string(),
        }
    }
}
