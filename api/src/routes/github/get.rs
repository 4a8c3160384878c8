use crate::response::ApiResponse;
use crate::routes::common::ApiError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use services::LifecycleError;

#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub path: String,
    pub revision: String,
    /// File body, decoded as UTF-8 (invalid sequences replaced).
    pub content: String,
}

/// GET /github/files/{*path}
///
/// ### Response
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "path": "CS/SEM3/DSA/loop_demo.py", "revision": "3f1c...", "content": "print(1)" },
///   "message": "File retrieved successfully"
/// }
/// ```
/// - `404 Not Found` when the file does not exist
/// - `502 Bad Gateway` when the repository host is unreachable
pub async fn get_file(
    State(app_state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Json<ApiResponse<FileResponse>>, ApiError> {
    let path = path.trim_matches('/');
    let file = app_state
        .repo()
        .read_file(path)
        .await
        .map_err(LifecycleError::from)?;

    Ok(Json(ApiResponse::success(
        FileResponse {
            content: String::from_utf8_lossy(&file.content).into_owned(),
            path: file.path,
            revision: file.revision,
        },
        "File retrieved successfully",
    )))
}
