//! Helper types for port operations.

use chrono::{DateTime, Utc};
use chronicle_domain::{Character, CharacterId, UserId};

// =============================================================================
// Persistence Types
// =============================================================================

/// A stored character document and its ownership metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterRecord {
    pub user_id: UserId,
    pub character: Character,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CharacterRecord {
    pub fn new(user_id: UserId, character: Character, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            character,
            created_at: now,
            updated_at: now,
        }
    }

    /// Records are keyed by the character's own id.
    pub fn id(&self) -> CharacterId {
        self.character.id()
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
