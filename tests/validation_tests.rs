// SPDX-License-Identifier: MIT

//! Request-shape validation tests: per-field errors are reported before
//! anything reaches the auth service.

use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let (app, _) = common::create_test_app().await;

    let (status, body) = common::post_json(
        &app,
        "/register",
        json!({
            "email": "not-an-email",
            "password": "Passw0rd",
            "confirmPassword": "Passw0rd",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(body["fields"]["email"][0]
        .as_str()
        .unwrap()
        .contains("valid email"));
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let (app, _) = common::create_test_app().await;

    let (status, body) = common::post_json(
        &app,
        "/register",
        json!({
            "email": "user@example.com",
            "password": "abc",
            "confirmPassword": "abc",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["password"][0]
        .as_str()
        .unwrap()
        .contains("at least 6"));
}

#[tokio::test]
async fn test_register_rejects_mismatched_confirmation() {
    let (app, _) = common::create_test_app().await;

    let (status, body) = common::post_json(
        &app,
        "/register",
        json!({
            "email": "user@example.com",
            "password": "Passw0rd",
            "confirmPassword": "Different1",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["confirm_password"][0]
        .as_str()
        .unwrap()
        .contains("match"));
}

#[tokio::test]
async fn test_validation_failure_never_creates_the_user() {
    let (app, _) = common::create_test_app().await;

    let (status, _) = common::post_json(
        &app,
        "/register",
        json!({
            "email": "user@example.com",
            "password": "Passw0rd",
            "confirmPassword": "Different1",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The email is still free for a correct registration
    common::register_user(&app, "user@example.com", "Passw0rd").await;
}

#[tokio::test]
async fn test_login_rejects_malformed_email() {
    let (app, _) = common::create_test_app().await;

    let (status, body) = common::post_json(
        &app,
        "/login",
        json!({"email": "nope", "password": "Passw0rd"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_refresh_rejects_empty_token() {
    let (app, _) = common::create_test_app().await;

    let (status, body) = common::post_json(&app, "/refresh", json!({"refreshToken": ""})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}
