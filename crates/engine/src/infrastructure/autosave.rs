//! Debounced character autosave.
//!
//! At most one pending write exists per character. Scheduling again cancels
//! the pending write and restarts the delay, so a burst of edits collapses
//! into one save of the latest snapshot. Writes only update existing
//! records, so a character deleted while open is never recreated. Failed
//! writes are reported through [`Notifications`] and are not retried.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chronicle_domain::CharacterId;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::infrastructure::ports::{CharacterRecord, CharacterRepo};
use crate::stores::Notifications;

struct PendingWrite {
    generation: u64,
    handle: JoinHandle<()>,
}

type PendingWrites = Arc<Mutex<HashMap<CharacterId, PendingWrite>>>;

pub struct AutosaveScheduler {
    repo: Arc<dyn CharacterRepo>,
    notifications: Notifications,
    delay: Duration,
    pending: PendingWrites,
    generation: AtomicU64,
}

impl AutosaveScheduler {
    pub fn new(repo: Arc<dyn CharacterRepo>, notifications: Notifications, delay: Duration) -> Self {
        Self {
            repo,
            notifications,
            delay,
            pending: Arc::new(Mutex::new(HashMap::new())),
            generation: AtomicU64::new(0),
        }
    }

    /// Save `record` after the delay, replacing any pending write for it.
    pub async fn schedule(&self, record: CharacterRecord) {
        let id = record.id();
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        let repo = Arc::clone(&self.repo);
        let notifications = self.notifications.clone();
        let pending = Arc::clone(&self.pending);
        let delay = self.delay;

        let mut writes = self.pending.lock().await;
        if let Some(previous) = writes.remove(&id) {
            previous.handle.abort();
        }

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match repo.update(&record).await {
                Ok(()) => tracing::debug!(character_id = %id, "Autosaved character"),
                Err(e) if e.is_not_found() => {
                    tracing::warn!(character_id = %id, "Autosave target no longer exists");
                    notifications
                        .error(format!(
                            "Could not save {}: it was deleted",
                            record.character.name()
                        ))
                        .await;
                }
                Err(e) => {
                    tracing::warn!(character_id = %id, error = %e, "Autosave failed");
                    notifications
                        .error(format!(
                            "Could not save {}: {}",
                            record.character.name(),
                            e
                        ))
                        .await;
                }
            }

            let mut writes = pending.lock().await;
            if writes
                .get(&id)
                .is_some_and(|write| write.generation == generation)
            {
                writes.remove(&id);
            }
        });

        tracing::debug!(character_id = %id, delay = ?delay, "Scheduled autosave");
        writes.insert(id, PendingWrite { generation, handle });
    }

    /// Drop the pending write for `id`. Returns whether one was pending.
    pub async fn cancel(&self, id: CharacterId) -> bool {
        match self.pending.lock().await.remove(&id) {
            Some(write) => {
                write.handle.abort();
                tracing::debug!(character_id = %id, "Cancelled pending autosave");
                true
            }
            None => false,
        }
    }

    pub async fn is_pending(&self, id: CharacterId) -> bool {
        self.pending.lock().await.contains_key(&id)
    }
}
