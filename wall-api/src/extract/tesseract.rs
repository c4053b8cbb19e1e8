//! Strategy B: local tesseract OCR over stdin/stdout.
//!
//! Free offline alternative to the external services. The normalized PNG
//! is piped to the configured binary; a non-zero exit or unreadable output
//! is an ordinary strategy failure.

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::{DecodedImage, ExtractionStrategy, StrategyError};

pub struct TesseractStrategy {
    cmd: String,
}

impl TesseractStrategy {
    pub fn new(cmd: String) -> Self {
        TesseractStrategy { cmd }
    }
}

#[rocket::async_trait]
impl ExtractionStrategy for TesseractStrategy {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    async fn try_extract(&self, image: &DecodedImage) -> Result<Option<String>, StrategyError> {
        // --psm 6: assume a uniform block of text, the closest mode to a
        // handwritten canvas.
        // kill_on_drop: the orchestrator may drop this future on timeout;
        // the child must not outlive the attempt.
        let mut child = Command::new(&self.cmd)
            .args(["stdin", "stdout", "--psm", "6"])
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| StrategyError::Process(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&image.png)
                .await
                .map_err(|e| StrategyError::Process(e.to_string()))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| StrategyError::Process(e.to_string()))?;

        if !output.status.success() {
            return Err(StrategyError::Process(format!(
                "tesseract exited with {}",
                output.status
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(if text.is_empty() { None } else { Some(text) })
    }
}
