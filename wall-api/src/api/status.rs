//! Status endpoints
//!
//! Health check and build metadata for monitoring the service's
//! operational state.

use rocket::{Route, serde::json::Json};
use serde::Serialize;
use ts_rs::TS;

use crate::built_info;

#[derive(Serialize, TS)]
#[ts(export)]
pub struct HealthStatus {
    status: &'static str,
    version: &'static str,
    built: &'static str,
    git_commit: Option<&'static str>,
}

/// Health Status endpoint.
///
/// - **URL:** `/api/status`
/// - **Method:** `GET`
/// - **Purpose:** Returns the health status of the application
/// - **Authentication:** None required
///
/// Always reports "running" when the application is responsive.
#[rocket::get("/status")]
pub fn health_status() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
        built: built_info::BUILT_TIME_UTC,
        git_commit: built_info::GIT_COMMIT_HASH,
    })
}

pub fn routes() -> Vec<Route> {
    routes![health_status]
}
