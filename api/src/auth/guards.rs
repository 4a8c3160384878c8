use crate::auth::claims::AuthUser;
use crate::routes::common::error_response;
use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Route layer for admin-only endpoints.
///
/// Rejects with `401` when the bearer token is missing or invalid and `403` when it
/// is not an admin token. On success the [`AuthUser`] is stored in the request
/// extensions for handlers to pick up with `Extension<AuthUser>`.
pub async fn allow_admin(
    user: Result<AuthUser, (StatusCode, &'static str)>,
    mut req: Request,
    next: Next,
) -> Response {
    let user = match user {
        Ok(user) => user,
        Err((status, reason)) => {
            debug!(path = %req.uri().path(), reason, "Rejected unauthenticated request");
            return error_response(status, "Authentication required");
        }
    };

    if !user.0.admin {
        return error_response(StatusCode::FORBIDDEN, "Admin access required");
    }

    req.extensions_mut().insert(user);
    next.run(req).await
}
