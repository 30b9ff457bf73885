//! Repository port traits for database access.

use async_trait::async_trait;
use chronicle_domain::{CharacterId, UserId};

use super::error::RepoError;
use super::types::CharacterRecord;

// =============================================================================
// Database Ports
// =============================================================================

/// Stores whole character documents, one per id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterRecord>, RepoError>;

    /// Characters owned by `user_id`, most recently created first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<CharacterRecord>, RepoError>;

    /// Store a new record. Fails if the id is already taken.
    async fn insert(&self, record: &CharacterRecord) -> Result<(), RepoError>;

    /// Replace the snapshot of an existing record.
    ///
    /// Never creates a row: a missing id is `RepoError::NotFound`.
    async fn update(&self, record: &CharacterRecord) -> Result<(), RepoError>;

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError>;
}
