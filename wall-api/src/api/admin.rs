//! Moderation endpoints over the submissions table. Everything here sits
//! behind the [`AuthenticatedAdmin`] guard.

use rocket::Route;
use rocket::serde::json::Json;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::models::Submission;
use crate::orm::DbConn;
use crate::orm::submission::{
    delete_submission, get_submission, list_submissions, mark_bulk_viewed, mark_viewed,
};
use crate::session_guards::AuthenticatedAdmin;

/// Lists submissions, newest first, with pagination and an optional
/// viewed filter.
///
/// - **URL:** `/api/admin/submissions?page=<n>&limit=<n>&viewed=<bool>`
/// - **Method:** `GET`
///
/// Pagination metadata uses the camelCase keys the dashboard expects.
#[get("/admin/submissions?<page>&<limit>&<viewed>")]
pub async fn admin_list_submissions(
    db: DbConn,
    _admin: AuthenticatedAdmin,
    page: Option<i64>,
    limit: Option<i64>,
    viewed: Option<bool>,
) -> Result<Json<Value>, ApiError> {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(20).clamp(1, 100);

    let (rows, total) = db
        .run(move |conn| list_submissions(conn, page, limit, viewed))
        .await?;

    let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };

    Ok(Json(json!({
        "success": true,
        "data": rows,
        "pagination": {
            "currentPage": page,
            "totalItems": total,
            "totalPages": total_pages,
            "itemsPerPage": limit,
        },
    })))
}

#[derive(Deserialize)]
pub struct BulkViewRequest {
    pub submission_ids: Vec<i32>,
}

/// Marks a batch of submissions as viewed in one statement. Unknown ids
/// are ignored; the response reports how many rows actually changed.
#[patch("/admin/submissions/bulk-view", data = "<body>")]
pub async fn admin_bulk_view(
    db: DbConn,
    _admin: AuthenticatedAdmin,
    body: Json<BulkViewRequest>,
) -> Result<Json<Value>, ApiError> {
    let ids = body.into_inner().submission_ids;
    let updated = db.run(move |conn| mark_bulk_viewed(conn, &ids)).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("{} submissions marked as viewed", updated),
        "data": { "updated_count": updated },
    })))
}

/// Fetches one submission.
#[get("/admin/submissions/<id>")]
pub async fn admin_get_submission(
    db: DbConn,
    _admin: AuthenticatedAdmin,
    id: i32,
) -> Result<Json<Submission>, ApiError> {
    let submission = db.run(move |conn| get_submission(conn, id)).await?;
    submission
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Submission not found".to_string()))
}

/// Marks one submission as viewed and returns the updated row.
#[patch("/admin/submissions/<id>/view")]
pub async fn admin_mark_viewed(
    db: DbConn,
    _admin: AuthenticatedAdmin,
    id: i32,
) -> Result<Json<Value>, ApiError> {
    let updated = db.run(move |conn| mark_viewed(conn, id)).await?;
    let submission =
        updated.ok_or_else(|| ApiError::NotFound("Submission not found".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "message": "Submission marked as viewed",
        "data": submission,
    })))
}

/// Permanently deletes one submission.
#[delete("/admin/submissions/<id>")]
pub async fn admin_delete_submission(
    db: DbConn,
    _admin: AuthenticatedAdmin,
    id: i32,
) -> Result<Json<Value>, ApiError> {
    let deleted = db.run(move |conn| delete_submission(conn, id)).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Submission not found".to_string()));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Submission deleted successfully",
    })))
}

pub fn routes() -> Vec<Route> {
    routes![
        admin_list_submissions,
        admin_bulk_view,
        admin_get_submission,
        admin_mark_viewed,
        admin_delete_submission,
    ]
}
