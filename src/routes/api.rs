// SPDX-License-Identifier: MIT

//! API routes for authenticated callers.

use crate::models::user::PublicUser;
use crate::AppState;
use axum::{routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

/// Routes that require a valid access token.
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/me", get(get_me))
}

#[derive(Serialize)]
pub struct MeResponse {
    pub user: PublicUser,
}

/// Current user, as established by the auth middleware.
async fn get_me(Extension(user): Extension<PublicUser>) -> Json<MeResponse> {
    Json(MeResponse { user })
}
