/// Core error types for Tempo
use crate::types::{CollectionId, TrackId};
use thiserror::Error;

/// Result type alias using `TempoError`
pub type Result<T> = std::result::Result<T, TempoError>;

/// Core error type for Tempo
#[derive(Error, Debug)]
pub enum TempoError {
    /// The track is already a member of the collection
    #[error("Track {track_id} is already in collection {collection_id}")]
    DuplicateMembership {
        collection_id: CollectionId,
        track_id: TrackId,
    },

    /// A reorder batch did not apply; nothing was changed
    #[error("Reorder failed: {0}")]
    ReorderFailed(String),

    /// Collection not found
    #[error("Collection not found: {0}")]
    CollectionNotFound(CollectionId),

    /// Track not found
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl TempoError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a reorder failure
    pub fn reorder_failed(msg: impl Into<String>) -> Self {
        Self::ReorderFailed(msg.into())
    }

    /// Whether the caller can treat this as "already done"
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateMembership { .. })
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for TempoError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
