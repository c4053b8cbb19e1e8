//! Admin login and logout endpoints.

use rocket::serde::json::Json;
use rocket::{Route, State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::AdminUserPublic;
use crate::orm::DbConn;
use crate::orm::login::{LoginError, process_login};
use crate::orm::logout::revoke_session;
use crate::session_guards::AuthenticatedAdmin;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub session_token: String,
    pub user: AdminUserPublic,
    /// ISO-8601, UTC.
    pub expires_at: String,
}

/// Authenticates an admin and issues a session token.
///
/// - **URL:** `/api/auth/login`
/// - **Method:** `POST`
/// - **Authentication:** None required
///
/// Empty username or password is a 400; bad credentials are a 401 with a
/// generic message so usernames cannot be enumerated.
#[post("/auth/login", data = "<login>")]
pub async fn login(
    db: DbConn,
    config: &State<AppConfig>,
    login: Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let username = login.username.trim().to_string();
    let password = login.password.clone();
    if username.is_empty() || password.is_empty() {
        return Err(ApiError::Validation(
            "Username and password are required.".to_string(),
        ));
    }

    let expiry_hours = config.session_expiry_hours;
    let result = db
        .run(move |conn| process_login(conn, &username, &password, expiry_hours))
        .await;

    match result {
        Ok((admin, session)) => {
            info!("Admin '{}' logged in", admin.username);
            Ok(Json(LoginResponse {
                session_token: session.id,
                user: admin.into(),
                expires_at: session.expires_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            }))
        }
        Err(LoginError::InvalidCredentials) => {
            Err(ApiError::Auth("Invalid credentials".to_string()))
        }
        Err(LoginError::Db(e)) => Err(e.into()),
    }
}

/// Revokes the presented session.
///
/// - **URL:** `/api/auth/logout`
/// - **Method:** `POST`
/// - **Authentication:** Bearer session token
///
/// Revocation is terminal. A second logout with the same token fails the
/// guard (401), since the session is no longer usable.
#[post("/auth/logout")]
pub async fn logout(db: DbConn, admin: AuthenticatedAdmin) -> Result<Json<Value>, ApiError> {
    let token = admin.token.clone();
    let revoked = db.run(move |conn| revoke_session(conn, &token)).await?;

    if revoked == 0 {
        return Err(ApiError::Validation("Invalid session token".to_string()));
    }

    info!("Admin '{}' logged out", admin.admin.username);
    Ok(Json(json!({
        "success": true,
        "message": "Logged out successfully",
    })))
}

/// Reports whether the presented session is still valid.
///
/// - **URL:** `/api/auth/validate`
/// - **Method:** `GET`
/// - **Authentication:** Bearer session token
///
/// The guard does the work; reaching the handler means the session is
/// usable.
#[get("/auth/validate")]
pub async fn validate_session(admin: AuthenticatedAdmin) -> Json<Value> {
    Json(json!({
        "success": true,
        "user": AdminUserPublic::from(admin.admin),
    }))
}

pub fn routes() -> Vec<Route> {
    routes![login, logout, validate_session]
}
