//! Storage errors module

use thiserror::Error;

/// Errors reported by [`crate::UserStorage`] implementations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("User not found: {user_id}")]
    NotFound { user_id: String },

    #[error("User already exists: {user_id}")]
    AlreadyExists { user_id: String },

    #[error("Invalid user: {reason}")]
    InvalidUser { reason: String },

    #[error("Database error: {reason}")]
    DatabaseError { reason: String },

    #[error("Serialization error: {source}")]
    SerializationError { source: serde_json::Error },
}

impl StorageError {
    /// True for errors caused by the caller's input rather than the backend
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StorageError::NotFound { .. }
                | StorageError::AlreadyExists { .. }
                | StorageError::InvalidUser { .. }
        )
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::SerializationError { source: err }
    }
}
