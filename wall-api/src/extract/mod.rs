//! Multi-strategy text extraction from canvas-drawn images.
//!
//! The public submission endpoint accepts either plain text or a base64
//! image. Text passes through trimmed; images run an ordered chain of
//! recognition strategies, first usable result wins. A strategy that
//! errors, times out, or produces only whitespace means the same thing:
//! try the next one. When the whole chain comes up empty, a deterministic
//! heuristic estimator guarantees some non-empty text so the pipeline
//! never fails outright for a decodable image. The heuristic is not real
//! recognition; that tradeoff is accepted and logged.
//!
//! Only image *decode* failure is fatal, and it surfaces as a client
//! error before any strategy runs.

pub mod heuristic;
pub mod multimodal;
pub mod tesseract;
pub mod vision;

use std::io::Cursor;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::{GrayImage, ImageFormat};

use crate::config::AppConfig;

/// A successfully decoded submission image, ready for the strategy chain.
pub struct DecodedImage {
    /// Raw decoded payload bytes as submitted.
    pub bytes: Vec<u8>,
    /// Grayscale-normalized PNG re-encoding, fed to the strategies.
    pub png: Vec<u8>,
    pub gray: GrayImage,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DecodeError {
    InvalidBase64,
    UnsupportedFormat,
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::InvalidBase64 => write!(f, "image data is not valid base64"),
            DecodeError::UnsupportedFormat => write!(f, "image payload could not be decoded"),
        }
    }
}

/// Decodes a base64 image payload, with or without a
/// `data:image/...;base64,` prefix.
pub fn decode_image(image_data: &str) -> Result<DecodedImage, DecodeError> {
    let payload = if image_data.starts_with("data:image") {
        image_data
            .split_once(',')
            .map(|(_, rest)| rest)
            .ok_or(DecodeError::InvalidBase64)?
    } else {
        image_data
    };

    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|_| DecodeError::InvalidBase64)?;

    let dynamic = image::load_from_memory(&bytes).map_err(|_| DecodeError::UnsupportedFormat)?;
    let gray = dynamic.to_luma8();

    let mut png = Cursor::new(Vec::new());
    gray.write_to(&mut png, ImageFormat::Png)
        .map_err(|_| DecodeError::UnsupportedFormat)?;

    Ok(DecodedImage {
        bytes,
        png: png.into_inner(),
        gray,
    })
}

/// A failed recognition attempt. Never surfaced to the caller; the chain
/// logs it and moves on.
#[derive(Debug)]
pub enum StrategyError {
    Http(String),
    Process(String),
    Malformed(String),
}

impl std::fmt::Display for StrategyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyError::Http(msg) => write!(f, "http: {}", msg),
            StrategyError::Process(msg) => write!(f, "process: {}", msg),
            StrategyError::Malformed(msg) => write!(f, "malformed response: {}", msg),
        }
    }
}

/// One recognition attempt. `Ok(None)` means "nothing usable found",
/// which the orchestrator treats exactly like an error.
#[rocket::async_trait]
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn try_extract(&self, image: &DecodedImage) -> Result<Option<String>, StrategyError>;
}

/// Raw submitted content, in either of the two accepted shapes.
pub enum RawSubmission<'r> {
    Text(&'r str),
    Image(&'r str),
}

/// Result of running [`TextExtractor::extract`].
pub struct Extracted {
    pub text: String,
    /// Present only for image submissions; kept so the caller can hand
    /// the bytes to the object store after persistence.
    pub image: Option<DecodedImage>,
}

pub struct TextExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    attempt_timeout: Duration,
}

impl TextExtractor {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>, attempt_timeout: Duration) -> Self {
        TextExtractor {
            strategies,
            attempt_timeout,
        }
    }

    /// Builds the configured strategy chain: external vision service,
    /// local tesseract, multimodal vision — each registered only when its
    /// configuration is present.
    pub fn from_config(config: &AppConfig) -> Self {
        let timeout = Duration::from_secs(config.ocr_attempt_timeout_secs);
        let mut strategies: Vec<Box<dyn ExtractionStrategy>> = Vec::new();

        if let Some(key) = &config.vision_api_key {
            strategies.push(Box::new(vision::VisionStrategy::new(
                config.vision_endpoint.clone(),
                key.clone(),
                timeout,
            )));
        }
        if let Some(cmd) = &config.tesseract_cmd {
            strategies.push(Box::new(tesseract::TesseractStrategy::new(cmd.clone())));
        }
        if let Some(key) = &config.multimodal_api_key {
            strategies.push(Box::new(multimodal::MultimodalStrategy::new(
                config.multimodal_endpoint.clone(),
                key.clone(),
                config.multimodal_model.clone(),
                timeout,
            )));
        }

        TextExtractor::new(strategies, timeout)
    }

    /// Produces normalized text from raw submitted content.
    ///
    /// Plain text passes through trimmed. Images run the strategy chain;
    /// the only error case is an undecodable payload.
    pub async fn extract(&self, raw: RawSubmission<'_>) -> Result<Extracted, DecodeError> {
        match raw {
            RawSubmission::Text(text) => Ok(Extracted {
                text: text.trim().to_string(),
                image: None,
            }),
            RawSubmission::Image(data) => {
                let image = decode_image(data)?;
                let text = self.extract_from_image(&image).await;
                Ok(Extracted {
                    text,
                    image: Some(image),
                })
            }
        }
    }

    /// Runs the strategy chain over a decoded image. Never returns an
    /// empty string: chain exhaustion falls through to the heuristic
    /// estimator.
    pub async fn extract_from_image(&self, image: &DecodedImage) -> String {
        for strategy in &self.strategies {
            let attempt = tokio::time::timeout(self.attempt_timeout, strategy.try_extract(image));
            match attempt.await {
                Ok(Ok(Some(text))) if !text.trim().is_empty() => {
                    info!("Extraction strategy '{}' produced text", strategy.name());
                    return text.trim().to_string();
                }
                Ok(Ok(_)) => {
                    warn!(
                        "Extraction strategy '{}' found no usable text, trying next",
                        strategy.name()
                    );
                }
                Ok(Err(e)) => {
                    warn!(
                        "Extraction strategy '{}' failed ({}), trying next",
                        strategy.name(),
                        e
                    );
                }
                Err(_) => {
                    warn!(
                        "Extraction strategy '{}' timed out after {:?}, trying next",
                        strategy.name(),
                        self.attempt_timeout
                    );
                }
            }
        }

        warn!("All extraction strategies exhausted, using heuristic estimate");
        heuristic::estimate(image)
    }
}
