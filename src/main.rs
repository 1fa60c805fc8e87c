// SPDX-License-Identifier: MIT

//! Auth Service API Server
//!
//! Verifies credentials and issues, verifies and rotates the signed
//! tokens the rest of the deployment uses to authenticate requests.

use auth_service::{
    config::Config,
    db::{self, UserStore},
    services::{AuthService, TokenService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting auth service");

    // Open the bounded connection pool and make sure the schema exists
    let pool = db::connect(&config).await.expect("Failed to open database");
    db::init_schema(&pool)
        .await
        .expect("Failed to initialize schema");
    let store = UserStore::new(pool);

    let tokens = TokenService::new(
        &config.jwt_secret,
        config.access_token_ttl_secs,
        config.refresh_token_ttl_secs,
    );
    let auth = AuthService::new(store.clone(), tokens, config.bcrypt_cost);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        auth,
    });

    // Build router
    let app = auth_service::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("auth_service=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
