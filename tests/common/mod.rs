// SPDX-License-Identifier: MIT

use auth_service::config::Config;
use auth_service::db::{self, UserStore};
use auth_service::routes::create_router;
use auth_service::services::{AuthService, TokenService};
use auth_service::AppState;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

/// In-memory SQLite pool. A single connection keeps every query on the
/// same in-memory database.
#[allow(dead_code)]
pub async fn test_pool() -> sqlx::SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    db::init_schema(&pool)
        .await
        .expect("Failed to initialize schema");
    pool
}

/// Create a test app backed by an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let pool = test_pool().await;
    create_test_app_with_pool(pool)
}

/// Create a test app over a caller-supplied pool (e.g. one that has
/// been closed, to simulate store outage).
#[allow(dead_code)]
pub fn create_test_app_with_pool(pool: sqlx::SqlitePool) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let store = UserStore::new(pool);

    let tokens = TokenService::new(
        &config.jwt_secret,
        config.access_token_ttl_secs,
        config.refresh_token_ttl_secs,
    );
    let auth = AuthService::new(store.clone(), tokens, config.bcrypt_cost);

    let state = Arc::new(AppState {
        config,
        store,
        auth,
    });

    (create_router(state.clone()), state)
}

/// POST a JSON body and return (status, parsed body).
#[allow(dead_code)]
pub async fn post_json(
    app: &axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body should be JSON")
    };
    (status, json)
}

/// POST with a bearer token (for logout).
#[allow(dead_code)]
pub async fn post_bearer(
    app: &axum::Router,
    uri: &str,
    token: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body should be JSON")
    };
    (status, json)
}

/// Register a user through the API and return the response body.
#[allow(dead_code)]
pub async fn register_user(app: &axum::Router, email: &str, password: &str) -> serde_json::Value {
    let (status, body) = post_json(
        app,
        "/register",
        serde_json::json!({
            "email": email,
            "password": password,
            "confirmPassword": password,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {}", body);
    body
}
