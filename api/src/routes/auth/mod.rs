//! # auth Routes Module
//!
//! Routes for the `/auth` endpoint group: admin registration, login and the
//! signed-in admin's profile.
//!
//! ## Structure
//! - `post.rs` — POST handlers (register, login)
//! - `get.rs` — GET handlers (current admin)
//! - `put.rs` — PUT handlers (profile update)

pub mod common;
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

use get::get_me;
use post::{login, register};
use put::update_me;

/// Builds the `/auth` route group.
///
/// - `POST /auth/register` → `register` (only while no admin exists)
/// - `POST /auth/login` → `login`
/// - `GET /auth/me` → `get_me` (admin)
/// - `PUT /auth/me` → `update_me` (admin)
pub fn auth_routes() -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login));

    let admin = Router::new()
        .route("/me", get(get_me).put(update_me))
        .route_layer(from_fn(allow_admin));

    public.merge(admin)
}
