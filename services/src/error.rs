use crate::naming::MAX_TITLE_CHARS;
use crate::remote_repository::RemoteError;
use db::models::submission::SubmissionStatus;
use sea_orm::DbErr;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

/// Failure of a submission lifecycle or content-management operation.
///
/// Each variant carries enough for the HTTP layer to pick a status code without
/// inspecting message text.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Input rejected before any state changed.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Submission has already been approved")]
    AlreadyDecided,

    #[error("Submission has already been rejected")]
    AlreadyRejected,

    #[error("Cannot {action} a submission that is {from}")]
    InvalidTransition {
        from: SubmissionStatus,
        action: &'static str,
    },

    #[error("Submission has no code to publish")]
    EmptyCode,

    /// The remote file or a portal record changed underneath the operation.
    #[error("{0}")]
    Conflict(String),

    /// The record is still referenced and cannot be removed.
    #[error("{0}")]
    InUse(String),

    #[error("Code repository unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("No free file name for {base} after {attempts} attempts")]
    NamingExhausted { base: String, attempts: u32 },

    /// The file exists remotely but the portal has no record of it and the compensating
    /// delete also failed.
    #[error("Code was published to {path} but could not be recorded; manual cleanup required")]
    PartialPublish { path: String },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RemoteError> for LifecycleError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::NotFound(path) => {
                LifecycleError::NotFound(format!("File {path} not found in the code repository"))
            }
            RemoteError::Conflict(msg) => LifecycleError::Conflict(msg),
            RemoteError::Unavailable(msg) => LifecycleError::RemoteUnavailable(msg),
            RemoteError::Rejected(msg) => LifecycleError::Validation(msg),
        }
    }
}

impl From<ValidationErrors> for LifecycleError {
    fn from(errors: ValidationErrors) -> Self {
        LifecycleError::Validation(format_validation_errors(&errors))
    }
}

/// Joins the messages of every failed field, ordered by field name.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(_, errs)| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

pub(crate) fn code_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Code is required".into()));
    }
    Ok(())
}

pub(crate) fn title_fits(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > MAX_TITLE_CHARS {
        return Err(ValidationError::new("too_long").with_message(
            format!("Title must be at most {MAX_TITLE_CHARS} characters").into(),
        ));
    }
    Ok(())
}
