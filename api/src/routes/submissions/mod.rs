//! # submissions Routes Module
//!
//! Student intake is public. Listing and the approve/reject decisions require an admin
//! token; the decision handlers hand off to [`services::submission_service`].

pub mod get;
pub mod post;
pub mod put;

use crate::auth::guards::allow_admin;
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};

/// Builds the `/submissions` route group.
///
/// - `POST /submissions` → `create_submission`
/// - `GET /submissions` → `list_submissions` (admin)
/// - `GET /submissions/pending` → `list_pending_submissions` (admin)
/// - `POST /submissions/{id}/approve` → `approve_submission` (admin)
/// - `PUT /submissions/{id}/reject` → `reject_submission` (admin)
pub fn submissions_routes() -> Router<AppState> {
    let public = Router::new().route("/", post(post::create_submission));

    let admin = Router::new()
        .route("/", get(get::list_submissions))
        .route("/pending", get(get::list_pending_submissions))
        .route("/{id}/approve", post(post::approve_submission))
        .route("/{id}/reject", put(put::reject_submission))
        .route_layer(from_fn(allow_admin));

    public.merge(admin)
}
