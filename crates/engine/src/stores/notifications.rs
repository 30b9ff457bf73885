//! Dismissible user-facing messages.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
}

/// Shared notification list. Clones share the same list.
#[derive(Clone, Default)]
pub struct Notifications {
    entries: Arc<RwLock<Vec<Notification>>>,
    next_id: Arc<AtomicU64>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn info(&self, message: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Info, message.into()).await
    }

    pub async fn error(&self, message: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Error, message.into()).await
    }

    async fn push(&self, level: NotificationLevel, message: String) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.write().await.push(Notification { id, level, message });
        id
    }

    /// Remove a notification. Returns whether it was present.
    pub async fn dismiss(&self, id: u64) -> bool {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|n| n.id != id);
        entries.len() != before
    }

    /// Snapshot of the current notifications, oldest first.
    pub async fn list(&self) -> Vec<Notification> {
        self.entries.read().await.clone()
    }
}
