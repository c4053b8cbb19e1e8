//! API error taxonomy and its wire representation.
//!
//! Every error leaving a handler is an [`ApiError`]; the responder renders
//! the `{success:false, message, errors, code}` envelope the dashboard
//! frontend expects.

use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::{Json, json};

#[derive(Debug)]
pub enum ApiError {
    /// Bad input shape or a content gate failure (400).
    Validation(String),
    /// Per-client submission quota exceeded (429).
    RateLimit,
    /// Missing, invalid or expired credentials or token (401).
    Auth(String),
    /// Referenced record absent (404).
    NotFound(String),
    /// An external collaborator failed (502). Currently unused: the
    /// object store and messaging gateway run best-effort after the
    /// record is durable, so their failures are logged rather than
    /// surfaced. Reserved for any future collaborator that must fail
    /// the request.
    Dependency(String),
    /// Unexpected failure (500).
    Internal(String),
}

impl ApiError {
    fn status(&self) -> Status {
        match self {
            ApiError::Validation(_) => Status::BadRequest,
            ApiError::RateLimit => Status::TooManyRequests,
            ApiError::Auth(_) => Status::Unauthorized,
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::Dependency(_) => Status::BadGateway,
            ApiError::Internal(_) => Status::InternalServerError,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::RateLimit => "RATE_LIMIT_EXCEEDED",
            ApiError::Auth(_) => "AUTH_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Dependency(_) => "DEPENDENCY_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Validation(msg)
            | ApiError::Auth(msg)
            | ApiError::NotFound(msg)
            | ApiError::Dependency(msg)
            | ApiError::Internal(msg) => msg.clone(),
            ApiError::RateLimit => "Rate limit exceeded. Please try again later.".to_string(),
        }
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(e: diesel::result::Error) -> Self {
        error!("Database error: {:?}", e);
        ApiError::Internal("Internal server error".to_string())
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        let body = Json(json!({
            "success": false,
            "message": self.message(),
            "errors": [],
            "code": self.code(),
        }));
        response::status::Custom(status, body).respond_to(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            Status::BadRequest
        );
        assert_eq!(ApiError::RateLimit.status(), Status::TooManyRequests);
        assert_eq!(ApiError::Auth("x".into()).status(), Status::Unauthorized);
        assert_eq!(ApiError::NotFound("x".into()).status(), Status::NotFound);
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ApiError::RateLimit.code(), "RATE_LIMIT_EXCEEDED");
        assert_eq!(ApiError::Auth("x".into()).code(), "AUTH_ERROR");
    }
}
