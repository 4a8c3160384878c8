//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe (public)
//! - `/auth` → admin registration, login and profile
//! - `/subjects` → subject catalogue (reads public, writes admin)
//! - `/practicals` → published code samples (reads public, writes admin)
//! - `/submissions` → student intake (public) and review decisions (admin)
//! - `/github` → read-only file proxy onto the code repository (public)
//!
//! Admin-only routes sit behind [`allow_admin`](crate::auth::guards::allow_admin)
//! inside each group.

use crate::routes::{
    auth::auth_routes, github::github_routes, health::health_routes,
    practicals::practicals_routes, subjects::subjects_routes,
    submissions::submissions_routes,
};
use crate::state::AppState;
use axum::Router;

pub mod auth;
pub mod common;
pub mod github;
pub mod health;
pub mod practicals;
pub mod subjects;
pub mod submissions;

/// Builds the complete `/api` router and binds it to `app_state`.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/subjects", subjects_routes())
        .nest("/practicals", practicals_routes())
        .nest("/submissions", submissions_routes())
        .nest("/github", github_routes())
        .with_state(app_state)
}
