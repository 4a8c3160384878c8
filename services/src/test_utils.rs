//! Fixtures shared by service and route tests.

use crate::notification::{Notification, NotificationError, Notifier};
use crate::remote_repository::{InMemoryRepository, RepoCoordinates};
use async_trait::async_trait;
use std::sync::Mutex;

/// Notifier that keeps every message instead of sending it.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every send fails after recording the attempt.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(notification.clone());
        }
        if self.fail {
            return Err(NotificationError::Delivery("smtp refused".into()));
        }
        Ok(())
    }
}

/// In-memory repository at `owner/repo@main` rooted at `CS`.
pub fn memory_repository() -> InMemoryRepository {
    InMemoryRepository::new(RepoCoordinates::new("owner", "repo", "main", "CS"))
}
