//! # practicals Routes Module
//!
//! Routes for `/practicals`. Reads are public; writes need an admin token and go
//! through the code repository before touching the database.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use crate::auth::guards::allow_admin;
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};

/// Builds the `/practicals` route group.
///
/// - `GET /practicals` → `list_practicals`
/// - `GET /practicals/{id}` → `get_practical`
/// - `GET /practicals/subject/{subject_id}` → `list_subject_practicals`
/// - `POST /practicals` → `create_practical` (admin)
/// - `PUT /practicals/{id}` → `update_practical` (admin)
/// - `DELETE /practicals/{id}` → `delete_practical` (admin)
pub fn practicals_routes() -> Router<AppState> {
    let public = Router::new()
        .route("/", get(get::list_practicals))
        .route("/{id}", get(get::get_practical))
        .route("/subject/{subject_id}", get(get::list_subject_practicals));

    let admin = Router::new()
        .route("/", post(post::create_practical))
        .route(
            "/{id}",
            axum::routing::put(put::update_practical).delete(delete::delete_practical),
        )
        .route_layer(from_fn(allow_admin));

    public.merge(admin)
}
