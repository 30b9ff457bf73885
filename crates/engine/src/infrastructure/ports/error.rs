//! Errors surfaced by the character store.

/// Storage failures. The message of `Database` carries the driver error text.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// `operation` names the query that failed, e.g. `update_character`.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// A stored document or timestamp could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn database(operation: &'static str, err: impl ToString) -> Self {
        Self::Database {
            operation,
            message: err.to_string(),
        }
    }

    pub fn serialization(err: impl ToString) -> Self {
        Self::Serialization(err.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
