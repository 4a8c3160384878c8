//! In-memory implementation of `RemoteRepository`.
//!
//! Holds files in a map guarded by a `RwLock` and records every call, so tests can
//! assert on what would have gone over the wire. Faults can be injected to exercise
//! conflict and outage handling. Like GitHub, writes to a path with a segment longer
//! than 255 bytes are refused.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RemoteError, RemoteFile, RemoteRepository, RepoCoordinates, encode_content};

/// One call made against the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    Read {
        path: String,
    },
    Write {
        path: String,
        /// Base64 payload, as the GitHub client would send it.
        content: String,
        message: String,
        revision: Option<String>,
    },
    Delete {
        path: String,
        revision: String,
        message: String,
    },
}

const MAX_SEGMENT_BYTES: usize = 255;

#[derive(Debug, Clone)]
struct StoredFile {
    content: Vec<u8>,
    revision: String,
}

#[derive(Debug, Default)]
struct Faults {
    unavailable: bool,
    /// Number of upcoming writes to answer with `Conflict` regardless of state.
    forced_write_conflicts: u32,
    fail_deletes: bool,
}

pub struct InMemoryRepository {
    coordinates: RepoCoordinates,
    files: RwLock<BTreeMap<String, StoredFile>>,
    calls: RwLock<Vec<RemoteCall>>,
    faults: RwLock<Faults>,
    next_revision: AtomicU64,
}

impl InMemoryRepository {
    pub fn new(coordinates: RepoCoordinates) -> Self {
        Self {
            coordinates,
            files: RwLock::new(BTreeMap::new()),
            calls: RwLock::new(Vec::new()),
            faults: RwLock::new(Faults::default()),
            next_revision: AtomicU64::new(1),
        }
    }

    fn fresh_revision(&self) -> String {
        format!("rev-{}", self.next_revision.fetch_add(1, Ordering::SeqCst))
    }

    /// Stores a file directly, bypassing the call log. Returns its revision.
    pub async fn seed_file(&self, path: &str, content: &[u8]) -> String {
        let revision = self.fresh_revision();
        self.files.write().await.insert(
            path.to_owned(),
            StoredFile {
                content: content.to_vec(),
                revision: revision.clone(),
            },
        );
        revision
    }

    pub async fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(path).map(|f| f.content.clone())
    }

    pub async fn paths(&self) -> Vec<String> {
        self.files.read().await.keys().cloned().collect()
    }

    pub async fn calls(&self) -> Vec<RemoteCall> {
        self.calls.read().await.clone()
    }

    /// Only the write calls, in order.
    pub async fn writes(&self) -> Vec<RemoteCall> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| matches!(c, RemoteCall::Write { .. }))
            .cloned()
            .collect()
    }

    /// Makes every call fail with `Unavailable` until cleared.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.faults.write().await.unavailable = unavailable;
    }

    /// Answers the next `count` writes with `Conflict`, as if another writer got there first.
    pub async fn force_write_conflicts(&self, count: u32) {
        self.faults.write().await.forced_write_conflicts = count;
    }

    pub async fn set_fail_deletes(&self, fail: bool) {
        self.faults.write().await.fail_deletes = fail;
    }

    async fn check_available(&self) -> Result<(), RemoteError> {
        if self.faults.read().await.unavailable {
            return Err(RemoteError::Unavailable("repository offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteRepository for InMemoryRepository {
    fn coordinates(&self) -> &RepoCoordinates {
        &self.coordinates
    }

    async fn read_file(&self, path: &str) -> Result<RemoteFile, RemoteError> {
        self.calls.write().await.push(RemoteCall::Read {
            path: path.to_owned(),
        });
        self.check_available().await?;

        self.files
            .read()
            .await
            .get(path)
            .map(|f| RemoteFile {
                path: path.to_owned(),
                content: f.content.clone(),
                revision: f.revision.clone(),
            })
            .ok_or_else(|| RemoteError::NotFound(path.to_owned()))
    }

    async fn write_file(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        revision: Option<&str>,
    ) -> Result<String, RemoteError> {
        self.calls.write().await.push(RemoteCall::Write {
            path: path.to_owned(),
            content: encode_content(content),
            message: message.to_owned(),
            revision: revision.map(str::to_owned),
        });
        self.check_available().await?;

        if path.split('/').any(|segment| segment.len() > MAX_SEGMENT_BYTES) {
            return Err(RemoteError::Rejected(format!("{path} is not a valid path")));
        }

        {
            let mut faults = self.faults.write().await;
            if faults.forced_write_conflicts > 0 {
                faults.forced_write_conflicts -= 1;
                return Err(RemoteError::Conflict(format!("{path} changed concurrently")));
            }
        }

        let mut files = self.files.write().await;
        match (files.get(path), revision) {
            (Some(_), None) => {
                return Err(RemoteError::Conflict(format!("{path} already exists")));
            }
            (Some(existing), Some(expected)) if existing.revision != expected => {
                return Err(RemoteError::Conflict(format!("{path} changed concurrently")));
            }
            (None, Some(_)) => return Err(RemoteError::NotFound(path.to_owned())),
            _ => {}
        }

        let new_revision = self.fresh_revision();
        files.insert(
            path.to_owned(),
            StoredFile {
                content: content.to_vec(),
                revision: new_revision.clone(),
            },
        );
        Ok(new_revision)
    }

    async fn delete_file(
        &self,
        path: &str,
        revision: &str,
        message: &str,
    ) -> Result<(), RemoteError> {
        self.calls.write().await.push(RemoteCall::Delete {
            path: path.to_owned(),
            revision: revision.to_owned(),
            message: message.to_owned(),
        });
        self.check_available().await?;
        if self.faults.read().await.fail_deletes {
            return Err(RemoteError::Unavailable("delete rejected".into()));
        }

        let mut files = self.files.write().await;
        match files.get(path) {
            None => Err(RemoteError::NotFound(path.to_owned())),
            Some(existing) if existing.revision != revision => {
                Err(RemoteError::Conflict(format!("{path} changed concurrently")))
            }
            Some(_) => {
                files.remove(path);
                Ok(())
            }
        }
    }
}
