//! Request guards for the admin API and the public intake endpoint.
//!
//! `AuthenticatedAdmin` validates a bearer session token and resolves the
//! owning admin account; every failure mode is a plain 401 so callers
//! cannot distinguish unknown, revoked, and expired tokens.
//!
//! # Usage
//!
//! ```rust
//! use rocket::get;
//! use wall_api::session_guards::AuthenticatedAdmin;
//!
//! #[get("/whoami")]
//! fn whoami(admin: AuthenticatedAdmin) -> String {
//!     format!("Logged in as {}", admin.admin.username)
//! }
//! ```

use chrono::Utc;
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::request::{self, FromRequest, Request};

use crate::models::AdminUser;
use crate::orm::DbConn;
use crate::orm::admin_user::get_admin;
use crate::orm::login::get_session;

/// A request guard for routes that require a logged-in administrator.
///
/// Validation steps:
/// 1. Extracts the token from the `Authorization: Bearer <token>` header
/// 2. Looks the session up in the database
/// 3. Rejects revoked and expired sessions
/// 4. Resolves the owning admin account
///
/// Returns `Status::Unauthorized` on any failure, and
/// `Status::InternalServerError` only when no database connection is
/// available.
#[derive(Debug)]
pub struct AuthenticatedAdmin {
    pub admin: AdminUser,
    /// The presented session token, kept so logout can revoke it.
    pub token: String,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedAdmin {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let db = match request.guard::<DbConn>().await {
            Outcome::Success(db) => db,
            _ => return Outcome::Error((Status::InternalServerError, ())),
        };

        let token = match request
            .headers()
            .get_one("Authorization")
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            Some(token) => token.to_string(),
            None => return Outcome::Error((Status::Unauthorized, ())),
        };

        let lookup = token.clone();
        let session_result = db.run(move |conn| get_session(conn, &lookup)).await;

        let session = match session_result {
            Ok(Some(session)) => session,
            Ok(None) => return Outcome::Error((Status::Unauthorized, ())),
            Err(e) => {
                error!("Database error finding session: {:?}", e);
                return Outcome::Error((Status::Unauthorized, ()));
            }
        };

        if !session.is_usable(Utc::now().naive_utc()) {
            return Outcome::Error((Status::Unauthorized, ()));
        }

        let admin_id = session.admin_id;
        let admin_result = db.run(move |conn| get_admin(conn, admin_id)).await;

        match admin_result {
            Ok(Some(admin)) => Outcome::Success(AuthenticatedAdmin { admin, token }),
            Ok(None) => Outcome::Error((Status::Unauthorized, ())),
            Err(e) => {
                error!("Database error finding admin: {:?}", e);
                Outcome::Error((Status::Unauthorized, ()))
            }
        }
    }
}

/// Client metadata captured for every public submission: the connecting
/// IP (rate-limit key, anonymized before persistence) and the user agent.
#[derive(Debug)]
pub struct ClientMeta {
    pub ip: String,
    pub user_agent: String,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ClientMeta {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let ip = request
            .client_ip()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let mut user_agent = request
            .headers()
            .get_one("User-Agent")
            .unwrap_or_default()
            .to_string();
        user_agent.truncate(255);

        Outcome::Success(ClientMeta { ip, user_agent })
    }
}
