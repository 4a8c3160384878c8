//! # subjects Routes Module
//!
//! Routes for `/subjects`. Reads are public; writes need an admin token.

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

/// Builds the `/subjects` route group.
///
/// - `GET /subjects` → `list_subjects`
/// - `GET /subjects/{id}` → `get_subject`
/// - `POST /subjects` → `create_subject` (admin)
/// - `PUT /subjects/{id}` → `update_subject` (admin)
/// - `DELETE /subjects/{id}` → `delete_subject` (admin)
pub fn subjects_routes() -> Router<AppState> {
    let public = Router::new()
        .route("/", get(get::list_subjects))
        .route("/{id}", get(get::get_subject));

    let admin = Router::new()
        .route("/", post(post::create_subject))
        .route("/{id}", axum::routing::put(put::update_subject).delete(delete::delete_subject))
        .route_layer(from_fn(allow_admin));

    public.merge(admin)
}
