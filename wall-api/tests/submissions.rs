//! Public intake endpoint tests
//!
//! Covers text and image submissions, the length gates, keyword
//! classification, and per-IP rate limiting.

#[macro_use]
extern crate time_test;

use std::io::Cursor;
use std::net::SocketAddr;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::{GrayImage, ImageFormat, Luma};
use rocket::http::Status;
use rocket::local::asynchronous::{Client, LocalResponse};
use rocket::tokio;
use serde_json::json;

use wall_api::orm::testing::test_rocket;

fn addr(ip: &str) -> SocketAddr {
    format!("{}:40000", ip).parse().unwrap()
}

async fn submit_text<'c>(client: &'c Client, ip: &str, content: &str) -> LocalResponse<'c> {
    client
        .post("/api/submissions")
        .remote(addr(ip))
        .json(&json!({ "content": content }))
        .dispatch()
        .await
}

/// A small canvas-like PNG with a horizontal stroke, base64-encoded.
fn sample_image_b64() -> String {
    let mut img = GrayImage::from_pixel(120, 80, Luma([255u8]));
    for x in 20..100 {
        for y in 38..42 {
            img.put_pixel(x, y, Luma([0u8]));
        }
    }
    let mut png = Cursor::new(Vec::new());
    img.write_to(&mut png, ImageFormat::Png).unwrap();
    BASE64.encode(png.into_inner())
}

#[tokio::test]
async fn test_text_submission_is_stored_and_classified() {
    let client = Client::tracked(test_rocket()).await.unwrap();
    time_test!("test_text_submission_is_stored_and_classified");

    let response = submit_text(&client, "203.0.113.1", "please add a dark mode option").await;
    assert_eq!(response.status(), Status::Created);

    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["data"]["id"].is_number());
    assert!(body["data"]["created_at"].is_string());
    // Text submissions carry no extracted_text echo.
    assert!(body["data"].get("extracted_text").is_none());
}

#[tokio::test]
async fn test_image_submission_yields_extracted_text() {
    let client = Client::tracked(test_rocket()).await.unwrap();
    time_test!("test_image_submission_yields_extracted_text");

    let response = client
        .post("/api/submissions")
        .remote(addr("203.0.113.2"))
        .json(&json!({ "image_data": sample_image_b64() }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Created);

    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["success"], true);
    // No recognition strategies run under test, so this is the heuristic
    // estimate; it must still be non-empty.
    assert!(!body["data"]["extracted_text"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_image_submission_accepts_data_url_prefix() {
    let client = Client::tracked(test_rocket()).await.unwrap();
    time_test!("test_image_submission_accepts_data_url_prefix");

    let payload = format!("data:image/png;base64,{}", sample_image_b64());
    let response = client
        .post("/api/submissions")
        .remote(addr("203.0.113.3"))
        .json(&json!({ "image_data": payload }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Created);
}

#[tokio::test]
async fn test_undecodable_image_is_rejected() {
    let client = Client::tracked(test_rocket()).await.unwrap();
    time_test!("test_undecodable_image_is_rejected");

    let response = client
        .post("/api/submissions")
        .remote(addr("203.0.113.4"))
        .json(&json!({ "image_data": "!!! not base64 !!!" }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_length_gates() {
    let client = Client::tracked(test_rocket()).await.unwrap();
    time_test!("test_length_gates");

    // Typed content under 10 characters fails.
    let response = submit_text(&client, "203.0.113.5", "short").await;
    assert_eq!(response.status(), Status::BadRequest);

    // Whitespace-only means no content.
    let response = submit_text(&client, "203.0.113.5", "   \n ").await;
    assert_eq!(response.status(), Status::BadRequest);

    // Over 1000 characters fails.
    let response = submit_text(&client, "203.0.113.5", &"x".repeat(1001)).await;
    assert_eq!(response.status(), Status::BadRequest);

    // Missing both fields fails.
    let response = client
        .post("/api/submissions")
        .remote(addr("203.0.113.5"))
        .json(&json!({}))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);

    // Exactly at the bounds passes.
    let response = submit_text(&client, "203.0.113.5", "0123456789").await;
    assert_eq!(response.status(), Status::Created);
}

#[tokio::test]
async fn test_sixth_submission_from_same_ip_is_limited() {
    let client = Client::tracked(test_rocket()).await.unwrap();
    time_test!("test_sixth_submission_from_same_ip_is_limited");

    for i in 0..5 {
        let response = submit_text(
            &client,
            "198.51.100.7",
            &format!("please add feature number {}", i),
        )
        .await;
        assert_eq!(response.status(), Status::Created);
    }

    let response = submit_text(&client, "198.51.100.7", "one request too many today").await;
    assert_eq!(response.status(), Status::TooManyRequests);
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["code"], "RATE_LIMIT_EXCEEDED");

    // A different client is unaffected.
    let response = submit_text(&client, "198.51.100.8", "a suggestion from elsewhere").await;
    assert_eq!(response.status(), Status::Created);
}

#[tokio::test]
async fn test_rejected_submissions_still_consume_quota() {
    let client = Client::tracked(test_rocket()).await.unwrap();
    time_test!("test_rejected_submissions_still_consume_quota");

    // The quota check runs before validation, so failed attempts count.
    for _ in 0..5 {
        let response = submit_text(&client, "198.51.100.9", "nope").await;
        assert_eq!(response.status(), Status::BadRequest);
    }
    let response = submit_text(&client, "198.51.100.9", "a perfectly valid suggestion").await;
    assert_eq!(response.status(), Status::TooManyRequests);
}
