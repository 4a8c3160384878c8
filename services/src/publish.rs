//! Remote write patterns shared by submission approval and practical management.

use crate::error::LifecycleError;
use crate::naming::{compute_file_name, numbered_file_name};
use crate::remote_repository::{RemoteError, RemoteRepository};
use tracing::{debug, info, warn};

/// Upper bound on collision candidates tried for one file name.
pub const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Writes `content` to a free path under `folder` and returns that path.
///
/// Probes `name.ext`, `name_1.ext`, `name_2.ext`, ... and writes the first absent
/// candidate as a fresh file. A write that loses a race to another writer comes back
/// as a conflict and moves on to the next suffix, so an existing file is never
/// overwritten. A write the repository refuses outright ends the search.
pub async fn publish_new_file(
    repo: &dyn RemoteRepository,
    folder: &str,
    title: &str,
    extension: &str,
    content: &[u8],
    message: &str,
) -> Result<String, LifecycleError> {
    for n in 0..MAX_NAME_ATTEMPTS {
        let path = format!("{folder}{}", numbered_file_name(title, extension, n));

        if repo.exists(&path).await? {
            debug!(%path, "Name taken, trying next suffix");
            continue;
        }

        match repo.write_file(&path, content, message, None).await {
            Ok(revision) => {
                info!(%path, %revision, "Published file");
                return Ok(path);
            }
            Err(RemoteError::Conflict(_)) => {
                warn!(%path, "Path claimed by a concurrent writer, trying next suffix");
            }
            // A 404 on create means the repository or branch is missing.
            Err(RemoteError::NotFound(what)) => {
                return Err(LifecycleError::RemoteUnavailable(format!(
                    "repository target {what} not found"
                )));
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(LifecycleError::NamingExhausted {
        base: format!("{folder}{}", compute_file_name(title, extension)),
        attempts: MAX_NAME_ATTEMPTS,
    })
}

/// Replaces the content of an existing file.
///
/// Reads the current revision first. A conflict is retried once with a fresh revision;
/// a second conflict is returned.
pub async fn update_file(
    repo: &dyn RemoteRepository,
    path: &str,
    content: &[u8],
    message: &str,
) -> Result<(), LifecycleError> {
    let mut retried = false;
    loop {
        let current = repo.read_file(path).await?;
        match repo
            .write_file(path, content, message, Some(&current.revision))
            .await
        {
            Ok(_) => return Ok(()),
            Err(RemoteError::Conflict(msg)) if !retried => {
                warn!(path, reason = %msg, "Revision moved during update, retrying once");
                retried = true;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Deletes a file. Returns `false` if it was already absent.
///
/// Like [`update_file`], a conflict is retried once after re-reading the revision.
pub async fn remove_file(
    repo: &dyn RemoteRepository,
    path: &str,
    message: &str,
) -> Result<bool, RemoteError> {
    let mut retried = false;
    loop {
        let current = match repo.read_file(path).await {
            Ok(file) => file,
            Err(RemoteError::NotFound(_)) => return Ok(false),
            Err(e) => return Err(e),
        };

        match repo.delete_file(path, &current.revision, message).await {
            Ok(()) => return Ok(true),
            Err(RemoteError::NotFound(_)) => return Ok(false),
            Err(RemoteError::Conflict(msg)) if !retried => {
                warn!(path, reason = %msg, "Revision moved during delete, retrying once");
                retried = true;
            }
            Err(e) => return Err(e),
        }
    }
}
