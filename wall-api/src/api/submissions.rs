//! The anonymous public intake endpoint.
//!
//! One route, one pipeline: rate limit by connecting IP, extract text
//! (directly or through the recognition chain), validate length, classify,
//! anonymize the IP, persist, then kick off best-effort notification for
//! image submissions. Ordering matters: the quota is consumed before any
//! extraction work so an over-quota client cannot burn recognition calls,
//! and the record is durable before any collaborator runs.

use chrono::Utc;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{Route, State, http::Status};
use serde::{Deserialize, Serialize};

use crate::anonymize::hash_ip;
use crate::classify::classify;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::extract::{RawSubmission, TextExtractor};
use crate::models::NewSubmission;
use crate::orm::DbConn;
use crate::orm::submission::insert_submission;
use crate::rate_limit::RateLimiter;
use crate::services::Notifier;
use crate::session_guards::ClientMeta;
use crate::validate::validate;

#[derive(Deserialize)]
pub struct SubmissionRequest {
    /// Directly-typed text. Exactly one of `content` / `image_data` should
    /// be present; `content` wins if both are.
    pub content: Option<String>,
    /// Base64 canvas image, with or without a data-URL prefix.
    pub image_data: Option<String>,
}

#[derive(Serialize)]
pub struct SubmissionCreated {
    pub success: bool,
    pub message: String,
    pub data: SubmissionCreatedData,
}

#[derive(Serialize)]
pub struct SubmissionCreatedData {
    pub id: i32,
    pub created_at: String,
    /// Only present for image submissions, so the client can show what
    /// the recognizer made of the drawing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
}

/// Accepts an anonymous public submission.
///
/// - **URL:** `/api/submissions`
/// - **Method:** `POST`
/// - **Authentication:** None
///
/// Returns 201 with the stored id, 400 on validation failure, 429 when
/// the per-IP quota is exhausted.
#[post("/submissions", data = "<submission>")]
pub async fn create_submission(
    db: DbConn,
    client: ClientMeta,
    config: &State<AppConfig>,
    limiter: &State<RateLimiter>,
    extractor: &State<TextExtractor>,
    notifier: &State<Notifier>,
    submission: Json<SubmissionRequest>,
) -> Result<status::Custom<Json<SubmissionCreated>>, ApiError> {
    if !limiter.allow(&client.ip) {
        info!("Rate limit hit for {}", client.ip);
        return Err(ApiError::RateLimit);
    }

    let is_image = submission.content.is_none();
    let raw = match (&submission.content, &submission.image_data) {
        (Some(text), _) => RawSubmission::Text(text.as_str()),
        (None, Some(data)) => RawSubmission::Image(data.as_str()),
        (None, None) => {
            return Err(ApiError::Validation("No content provided.".to_string()));
        }
    };

    let extracted = extractor
        .extract(raw)
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let min_len = if is_image {
        config.min_extracted_len
    } else {
        config.min_content_len
    };
    validate(&extracted.text, min_len).map_err(|f| ApiError::Validation(f.message()))?;

    let category = classify(&extracted.text);
    let now = Utc::now().naive_utc();
    let new_submission = NewSubmission {
        content: extracted.text.clone(),
        category: category.as_str().to_string(),
        sentiment: "neutral".to_string(),
        viewed: false,
        created_at: now,
        updated_at: now,
        ip_hash: hash_ip(&client.ip),
        user_agent: client.user_agent.clone(),
    };

    let stored = db.run(move |conn| insert_submission(conn, new_submission)).await?;
    info!(
        "Stored submission {} (category: {})",
        stored.id,
        stored.category
    );

    if let Some(image) = &extracted.image {
        notifier.notify_image_submission(stored.id, &image.png).await;
    }

    Ok(status::Custom(
        Status::Created,
        Json(SubmissionCreated {
            success: true,
            message: "Submission received.".to_string(),
            data: SubmissionCreatedData {
                id: stored.id,
                created_at: stored.created_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
                extracted_text: extracted.image.as_ref().map(|_| stored.content.clone()),
            },
        }),
    ))
}

pub fn routes() -> Vec<Route> {
    routes![create_submission]
}
