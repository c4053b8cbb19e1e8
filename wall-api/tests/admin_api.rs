//! Moderation API tests
//!
//! Covers pagination, the viewed filter, single and bulk view marking,
//! deletion, and the bearer guard on every admin route.

#[macro_use]
extern crate time_test;

use std::net::SocketAddr;

use rocket::http::{Header, Status};
use rocket::local::asynchronous::Client;
use rocket::tokio;
use serde_json::json;

use wall_api::orm::testing::{TEST_ADMIN_PASSWORD, TEST_ADMIN_USERNAME, test_rocket};

async fn login(client: &Client) -> String {
    let response = client
        .post("/api/auth/login")
        .json(&json!({
            "username": TEST_ADMIN_USERNAME,
            "password": TEST_ADMIN_PASSWORD
        }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = response.into_json().await.unwrap();
    body["session_token"].as_str().unwrap().to_string()
}

fn bearer(token: &str) -> Header<'static> {
    Header::new("Authorization", format!("Bearer {}", token))
}

/// Seeds `n` submissions, each from its own IP so the limiter never
/// interferes, and returns their ids in creation order.
async fn seed_submissions(client: &Client, n: usize) -> Vec<i64> {
    let mut ids = Vec::new();
    for i in 0..n {
        let ip: SocketAddr = format!("203.0.113.{}:40000", 10 + i).parse().unwrap();
        let response = client
            .post("/api/submissions")
            .remote(ip)
            .json(&json!({ "content": format!("please consider suggestion {}", i) }))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Created);
        let body: serde_json::Value = response.into_json().await.unwrap();
        ids.push(body["data"]["id"].as_i64().unwrap());
    }
    ids
}

#[tokio::test]
async fn test_admin_routes_require_auth() {
    let client = Client::tracked(test_rocket()).await.unwrap();
    time_test!("test_admin_routes_require_auth");

    assert_eq!(
        client.get("/api/admin/submissions").dispatch().await.status(),
        Status::Unauthorized
    );
    assert_eq!(
        client.get("/api/admin/submissions/1").dispatch().await.status(),
        Status::Unauthorized
    );
    assert_eq!(
        client
            .patch("/api/admin/submissions/1/view")
            .dispatch()
            .await
            .status(),
        Status::Unauthorized
    );
    assert_eq!(
        client
            .delete("/api/admin/submissions/1")
            .dispatch()
            .await
            .status(),
        Status::Unauthorized
    );
}

#[tokio::test]
async fn test_list_pagination() {
    let client = Client::tracked(test_rocket()).await.unwrap();
    time_test!("test_list_pagination");

    seed_submissions(&client, 7).await;
    let token = login(&client).await;

    let response = client
        .get("/api/admin/submissions?page=1&limit=3")
        .header(bearer(&token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = response.into_json().await.unwrap();

    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["pagination"]["totalItems"], 7);
    assert_eq!(body["pagination"]["totalPages"], 3);
    assert_eq!(body["pagination"]["itemsPerPage"], 3);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    // The stored moderation fields never serialize.
    let first = &body["data"][0];
    assert!(first.get("ip_hash").is_none());
    assert!(first.get("user_agent").is_none());

    let response = client
        .get("/api/admin/submissions?page=3&limit=3")
        .header(bearer(&token))
        .dispatch()
        .await;
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_viewed_filter_and_single_view() {
    let client = Client::tracked(test_rocket()).await.unwrap();
    time_test!("test_viewed_filter_and_single_view");

    let ids = seed_submissions(&client, 3).await;
    let token = login(&client).await;

    // Everything starts unviewed.
    let response = client
        .get("/api/admin/submissions?viewed=false")
        .header(bearer(&token))
        .dispatch()
        .await;
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["pagination"]["totalItems"], 3);

    // Mark one as viewed.
    let response = client
        .patch(format!("/api/admin/submissions/{}/view", ids[0]))
        .header(bearer(&token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["data"]["viewed"], true);

    let response = client
        .get("/api/admin/submissions?viewed=true")
        .header(bearer(&token))
        .dispatch()
        .await;
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["pagination"]["totalItems"], 1);
    assert_eq!(body["data"][0]["id"], ids[0]);
}

#[tokio::test]
async fn test_bulk_view() {
    let client = Client::tracked(test_rocket()).await.unwrap();
    time_test!("test_bulk_view");

    let ids = seed_submissions(&client, 4).await;
    let token = login(&client).await;

    // Two real ids plus one that doesn't exist.
    let response = client
        .patch("/api/admin/submissions/bulk-view")
        .header(bearer(&token))
        .json(&json!({ "submission_ids": [ids[0], ids[1], 99999] }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["data"]["updated_count"], 2);
    assert_eq!(body["message"], "2 submissions marked as viewed");

    // An empty batch is a no-op, not an error.
    let response = client
        .patch("/api/admin/submissions/bulk-view")
        .header(bearer(&token))
        .json(&json!({ "submission_ids": [] }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["data"]["updated_count"], 0);
}

#[tokio::test]
async fn test_get_and_delete_submission() {
    let client = Client::tracked(test_rocket()).await.unwrap();
    time_test!("test_get_and_delete_submission");

    let ids = seed_submissions(&client, 1).await;
    let token = login(&client).await;

    let response = client
        .get(format!("/api/admin/submissions/{}", ids[0]))
        .header(bearer(&token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["id"], ids[0]);
    assert_eq!(body["category"], "Request");
    assert_eq!(body["sentiment"], "neutral");

    let response = client
        .delete(format!("/api/admin/submissions/{}", ids[0]))
        .header(bearer(&token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    // Gone now.
    let response = client
        .get(format!("/api/admin/submissions/{}", ids[0]))
        .header(bearer(&token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::NotFound);

    let response = client
        .delete(format!("/api/admin/submissions/{}", ids[0]))
        .header(bearer(&token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::NotFound);
}

#[tokio::test]
async fn test_unknown_submission_is_404() {
    let client = Client::tracked(test_rocket()).await.unwrap();
    time_test!("test_unknown_submission_is_404");

    let token = login(&client).await;
    let response = client
        .get("/api/admin/submissions/424242")
        .header(bearer(&token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::NotFound);
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["message"], "Submission not found");

    let response = client
        .patch("/api/admin/submissions/424242/view")
        .header(bearer(&token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::NotFound);
}
