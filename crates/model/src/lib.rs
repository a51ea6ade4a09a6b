//! Userkit model types
//!
//! This crate defines the user record, the storage contract every
//! persistence backend implements, and the errors shared between the
//! storage backends and the HTTP adapters.

pub mod errors;
pub mod storage;
pub mod user;

pub use errors::StorageError;
pub use storage::UserStorage;
pub use user::{validate_user_id, NewUser, User};

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;
