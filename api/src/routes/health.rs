use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{Json, Router, routing::get};

/// `GET /health`, for uptime checks and load balancer probes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Always answers `200 OK`:
///
/// ```json
/// { "success": true, "data": "OK", "message": "Health check passed" }
/// ```
async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("OK", "Health check passed"))
}
