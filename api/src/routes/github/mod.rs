//! Read-only proxy onto the configured code repository.

pub mod get;

use crate::state::AppState;
use axum::{Router, routing::get};

/// - `GET /github/files/{*path}` → `get_file`
pub fn github_routes() -> Router<AppState> {
    Router::new().route("/files/{*path}", get(get::get_file))
}
