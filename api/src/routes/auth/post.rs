use super::common::TokenResponse;
use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::routes::common::error_response;
use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::Response,
};
use db::models::admin::Model as AdminModel;
use sea_orm::DbErr;
use serde::Deserialize;
use services::error::format_validation_errors;
use tracing::{error, info, warn};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

type AuthResult = Result<(StatusCode, Json<ApiResponse<TokenResponse>>), Response>;

fn db_failure(e: DbErr) -> Response {
    error!(error = %e, "Admin store query failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {e}"))
}

fn issue_token(admin: &AdminModel) -> Result<TokenResponse, Response> {
    let (token, expires_at) = generate_jwt(admin.id, true).map_err(|e| {
        error!(error = %e, "Token encoding failed");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to issue token")
    })?;

    Ok(TokenResponse {
        id: admin.id,
        email: admin.email.clone(),
        token,
        expires_at,
    })
}

/// POST /auth/register
///
/// Creates the portal's admin account. Only the first registration succeeds; after
/// that the endpoint is closed.
///
/// ### Request Body
/// ```json
/// { "email": "admin@example.com", "password": "strongpassword" }
/// ```
///
/// ### Responses
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 1,
///     "email": "admin@example.com",
///     "token": "jwt_token_here",
///     "expires_at": "2025-05-23T11:00:00Z"
///   },
///   "message": "Admin registered successfully"
/// }
/// ```
/// - `400 Bad Request` (invalid email, short password)
/// - `403 Forbidden` (`"Registration is closed"`)
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<Credentials>,
) -> AuthResult {
    req.validate().map_err(|e| {
        error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e))
    })?;

    let db = app_state.db();
    if AdminModel::any_exists(db).await.map_err(db_failure)? {
        warn!(email = %req.email, "Registration attempted after setup");
        return Err(error_response(StatusCode::FORBIDDEN, "Registration is closed"));
    }

    let admin = AdminModel::create(db, req.email.trim(), &req.password)
        .await
        .map_err(db_failure)?;
    info!(admin_id = admin.id, "Admin registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(issue_token(&admin)?, "Admin registered successfully")),
    ))
}

/// POST /auth/login
///
/// Exchanges admin credentials for a JWT.
///
/// ### Request Body
/// ```json
/// { "email": "admin@example.com", "password": "strongpassword" }
/// ```
///
/// ### Responses
/// - `200 OK` with the same `data` shape as registration, `"Login successful"`
/// - `401 Unauthorized` (`"Invalid password"`)
/// - `404 Not Found` (`"No admin with that email"`)
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<Credentials>,
) -> AuthResult {
    let admin = AdminModel::find_by_email(app_state.db(), req.email.trim())
        .await
        .map_err(db_failure)?
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "No admin with that email"))?;

    if !admin.verify_password(&req.password) {
        warn!(admin_id = admin.id, "Failed login");
        return Err(error_response(StatusCode::UNAUTHORIZED, "Invalid password"));
    }

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(issue_token(&admin)?, "Login successful")),
    ))
}
