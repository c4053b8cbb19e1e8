//! Strategy C: secondary external multimodal recognition.
//!
//! Sends the image as a data URL to an OpenAI-style chat-completions
//! endpoint and asks the model to transcribe any handwritten text.

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde_json::{Value, json};

use super::{DecodedImage, ExtractionStrategy, StrategyError};

const PROMPT: &str = "Please extract and return only the handwritten text from this image. \
                      If no clear text is visible, return an empty string.";

pub struct MultimodalStrategy {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl MultimodalStrategy {
    pub fn new(endpoint: String, api_key: String, model: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        MultimodalStrategy {
            client,
            endpoint,
            api_key,
            model,
        }
    }
}

#[rocket::async_trait]
impl ExtractionStrategy for MultimodalStrategy {
    fn name(&self) -> &'static str {
        "multimodal"
    }

    async fn try_extract(&self, image: &DecodedImage) -> Result<Option<String>, StrategyError> {
        let url = format!("{}/v1/chat/completions", self.endpoint);
        let data_url = format!("data:image/png;base64,{}", BASE64.encode(&image.png));
        let body = json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": PROMPT },
                    { "type": "image_url", "image_url": { "url": data_url } },
                ],
            }],
            "max_tokens": 500,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
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

        let content = value["choices"][0]["message"]["content"].as_str();
        Ok(content
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()))
    }
}
