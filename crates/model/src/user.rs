//! User record definitions.
//!
//! A [`User`] is the only entity the service stores. Identifiers are
//! hyphenated UUID strings; [`NewUser`] is the request-side shape used for
//! create and update, where the identifier may be left for the server to
//! assign.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StorageError;

/// Length of a hyphenated UUID string
const HYPHENATED_UUID_LEN: usize = 36;

/// A user in the system.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// UUID in hyphenated form, stored as a string
    pub id: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact email
    pub email: String,
}

impl User {
    /// Check that the record can be handed to a storage backend
    pub fn validate(&self) -> Result<(), StorageError> {
        validate_user_id(&self.id)
    }
}

/// Request body for creating or replacing a user
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NewUser {
    /// Optional client-chosen identifier
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewUser {
    /// Build a [`User`], assigning a fresh v4 UUID when no id was supplied
    pub fn into_user(mut self) -> User {
        let id = self
            .id
            .take()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        self.with_id(id)
    }

    /// Build a [`User`] with the given id, ignoring any id in the body
    pub fn with_id(self, id: String) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

/// Verify that `user_id` is a UUID in hyphenated form
pub fn validate_user_id(user_id: &str) -> Result<(), StorageError> {
    if user_id.len() != HYPHENATED_UUID_LEN || Uuid::try_parse(user_id).is_err() {
        return Err(StorageError::InvalidUser {
            reason: format!("User ID must be a hyphenated UUID, got '{}'", user_id),
        });
    }

    Ok(())
}
