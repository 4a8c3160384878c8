//! The JSON envelope every endpoint answers with.

use serde::Serialize;

/// `{ "success": bool, "data": T, "message": string }`
///
/// Failures carry `T::default()` as `data` (usually [`Empty`], serialized as `{}`)
/// and put the reason in `message`:
///
/// ```json
/// { "success": false, "data": {}, "message": "Submission 4 not found" }
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub message: String,
}

/// Placeholder `data` for errors and bodiless successes.
#[derive(Debug, Serialize, Default)]
pub struct Empty {}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}
