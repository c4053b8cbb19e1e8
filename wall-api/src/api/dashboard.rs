//! Dashboard statistics endpoint.

use rocket::Route;
use rocket::serde::json::Json;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::orm::DbConn;
use crate::orm::stats::dashboard_stats;
use crate::session_guards::AuthenticatedAdmin;

/// Returns the aggregate dashboard snapshot: totals, unviewed, today and
/// trailing-week counts, category and sentiment breakdowns, and per-day
/// activity.
#[get("/admin/dashboard/stats")]
pub async fn get_dashboard_stats(
    db: DbConn,
    _admin: AuthenticatedAdmin,
) -> Result<Json<Value>, ApiError> {
    let stats = db.run(dashboard_stats).await?;
    Ok(Json(json!({
        "success": true,
        "data": stats,
    })))
}

pub fn routes() -> Vec<Route> {
    routes![get_dashboard_stats]
}
