// SPDX-License-Identifier: MIT

//! Auth service: credential storage plus the signed-token lifecycle
//! (issue, verify, rotate) that the other services in the deployment
//! rely on to authenticate requests.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::UserStore;
use services::AuthService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: UserStore,
    pub auth: AuthService,
}
