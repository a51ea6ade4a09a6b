//! Persistent user storage
//!
//! Users live in a single sled tree keyed by their id, with the record
//! stored as JSON. Creation and update are single atomic tree operations, so
//! two concurrent creates for the same id cannot both succeed.

use std::path::Path;

use async_trait::async_trait;
use sled::{Db, IVec, Tree};
use tracing::debug;
use userkit_model::{validate_user_id, Result, StorageError, User, UserStorage};

/// Name of the sled tree holding user records
const USERS_TREE: &str = "users";

/// User store backed by an embedded sled database
pub struct SledUserStore {
    /// Main database
    db: Db,
    /// Users tree (user_id -> User JSON)
    users: Tree,
}

impl SledUserStore {
    /// Create or open a store at the given database path
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db = sled::open(db_path.as_ref()).map_err(database_error)?;
        let users = db.open_tree(USERS_TREE).map_err(database_error)?;

        debug!(
            "Opened sled user store at {} ({} users)",
            db_path.as_ref().display(),
            users.len()
        );

        Ok(SledUserStore { db, users })
    }

    /// Flush pending writes to disk
    async fn flush(&self) -> Result<()> {
        self.db.flush_async().await.map_err(database_error)?;
        Ok(())
    }
}

#[async_trait]
impl UserStorage for SledUserStore {
    async fn create(&self, user: User) -> Result<()> {
        user.validate()?;

        let user_json = serde_json::to_vec(&user)?;

        // Only succeeds when no value is currently stored under the id
        let swapped = self
            .users
            .compare_and_swap(user.id.as_bytes(), None::<&[u8]>, Some(user_json))
            .map_err(database_error)?;

        if swapped.is_err() {
            return Err(StorageError::AlreadyExists { user_id: user.id });
        }

        self.flush().await?;
        debug!("Created user {}", user.id);

        Ok(())
    }

    async fn read(&self, user_id: &str) -> Result<User> {
        validate_user_id(user_id)?;

        match self.users.get(user_id).map_err(database_error)? {
            Some(bytes) => decode_user(&bytes),
            None => Err(StorageError::NotFound {
                user_id: user_id.to_string(),
            }),
        }
    }

    async fn update(&self, user: User) -> Result<User> {
        user.validate()?;

        let user_json = serde_json::to_vec(&user)?;

        // Writes only when a previous value exists; returns that value
        let previous = self
            .users
            .fetch_and_update(user.id.as_bytes(), |old| old.map(|_| user_json.clone()))
            .map_err(database_error)?;

        if previous.is_none() {
            return Err(StorageError::NotFound { user_id: user.id });
        }

        self.flush().await?;
        debug!("Updated user {}", user.id);

        Ok(user)
    }

    async fn delete(&self, user_id: &str) -> Result<User> {
        validate_user_id(user_id)?;

        let not_found = || StorageError::NotFound {
            user_id: user_id.to_string(),
        };

        // Decode before removing so an unreadable record stays in place
        let bytes = self
            .users
            .get(user_id)
            .map_err(database_error)?
            .ok_or_else(not_found)?;
        let removed = decode_user(&bytes)?;

        // Only removes the value that was decoded; a concurrent change wins
        let swapped = self
            .users
            .compare_and_swap(user_id, Some(&bytes), None::<&[u8]>)
            .map_err(database_error)?;

        if swapped.is_err() {
            return Err(not_found());
        }

        self.flush().await?;
        debug!("Deleted user {}", user_id);

        Ok(removed)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.users.len())
    }
}

impl std::fmt::Debug for SledUserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledUserStore")
            .field("user_count", &self.users.len())
            .finish()
    }
}

fn decode_user(bytes: &IVec) -> Result<User> {
    Ok(serde_json::from_slice(bytes)?)
}

fn database_error(err: sled::Error) -> StorageError {
    StorageError::DatabaseError {
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, SledUserStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = SledUserStore::open(temp_dir.path()).unwrap();
        (temp_dir, store)
    }

    #[tokio::test]
    async fn test_create_then_read() {
        let (_dir, store) = open_temp();
        contract::create_then_read(&store).await;
    }

    #[tokio::test]
    async fn test_create_rejects_duplicates() {
        let (_dir, store) = open_temp();
        contract::create_rejects_duplicates(&store).await;
    }

    #[tokio::test]
    async fn test_read_missing() {
        let (_dir, store) = open_temp();
        contract::read_missing(&store).await;
    }

    #[tokio::test]
    async fn test_update_replaces() {
        let (_dir, store) = open_temp();
        contract::update_replaces(&store).await;
    }

    #[tokio::test]
    async fn test_update_never_inserts() {
        let (_dir, store) = open_temp();
        contract::update_never_inserts(&store).await;
    }

    #[tokio::test]
    async fn test_delete_returns_record() {
        let (_dir, store) = open_temp();
        contract::delete_returns_record(&store).await;
    }

    #[tokio::test]
    async fn test_rejects_invalid_ids() {
        let (_dir, store) = open_temp();
        contract::rejects_invalid_ids(&store).await;
    }

    #[tokio::test]
    async fn test_users_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();

        {
            let store = SledUserStore::open(temp_dir.path()).unwrap();
            store
                .create(contract::user(contract::ALICE, "Alice"))
                .await
                .unwrap();
        }

        let reopened = SledUserStore::open(temp_dir.path()).unwrap();
        let user = reopened.read(contract::ALICE).await.unwrap();
        assert_eq!(user, contract::user(contract::ALICE, "Alice"));
        assert_eq!(reopened.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_record_is_serialization_error() {
        let (_dir, store) = open_temp();
        store
            .users
            .insert(contract::BOB, b"{not json".to_vec())
            .unwrap();

        let result = store.read(contract::BOB).await;
        assert!(matches!(
            result,
            Err(StorageError::SerializationError { .. })
        ));
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_corrupt_record() {
        let (_dir, store) = open_temp();
        store
            .users
            .insert(contract::BOB, b"{not json".to_vec())
            .unwrap();

        let result = store.delete(contract::BOB).await;
        assert!(matches!(
            result,
            Err(StorageError::SerializationError { .. })
        ));
        assert!(store.users.contains_key(contract::BOB).unwrap());
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
