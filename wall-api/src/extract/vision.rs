//! Strategy A: external vision-API text detection.
//!
//! Calls a Google-Vision-style `images:annotate` endpoint with a
//! `TEXT_DETECTION` feature request and reads the full text annotation
//! from the response. Highest accuracy of the chain when configured.

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde_json::{Value, json};

use super::{DecodedImage, ExtractionStrategy, StrategyError};

pub struct VisionStrategy {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl VisionStrategy {
    pub fn new(endpoint: String, api_key: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        VisionStrategy {
            client,
            endpoint,
            api_key,
        }
    }
}

#[rocket::async_trait]
impl ExtractionStrategy for VisionStrategy {
    fn name(&self) -> &'static str {
        "vision"
    }

    async fn try_extract(&self, image: &DecodedImage) -> Result<Option<String>, StrategyError> {
        let url = format!("{}/v1/images:annotate?key={}", self.endpoint, self.api_key);
        let body = json!({
            "requests": [{
                "image": { "content": BASE64.encode(&image.png) },
                "features": [{ "type": "TEXT_DETECTION" }],
            }]
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| StrategyError::Http(e.to_string()))?
            .error_for_status()
            .map_err(|e| StrategyError::Http(e.to_string()))?;

        let value: Value = response
            .json()
            .await
            .map_err(|e| StrategyError::Malformed(e.to_string()))?;

        let annotation = value["responses"][0]["fullTextAnnotation"]["text"]
            .as_str()
            .or_else(|| value["responses"][0]["textAnnotations"][0]["description"].as_str());

        Ok(annotation
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()))
    }
}
