use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use userkit_model::{validate_user_id, Result, StorageError, User, UserStorage};

/// In-memory, HashMap-based user store.
///
/// Nothing survives a restart. Users are cloned on read and write.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStorage for InMemoryUserStore {
    async fn create(&self, user: User) -> Result<()> {
        user.validate()?;

        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(StorageError::AlreadyExists { user_id: user.id });
        }
        users.insert(user.id.clone(), user);

        Ok(())
    }

    async fn read(&self, user_id: &str) -> Result<User> {
        validate_user_id(user_id)?;

        self.users
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                user_id: user_id.to_string(),
            })
    }

    async fn update(&self, user: User) -> Result<User> {
        user.validate()?;

        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(user)
            }
            None => Err(StorageError::NotFound { user_id: user.id }),
        }
    }

    async fn delete(&self, user_id: &str) -> Result<User> {
        validate_user_id(user_id)?;

        self.users
            .write()
            .await
            .remove(user_id)
            .ok_or_else(|| StorageError::NotFound {
                user_id: user_id.to_string(),
            })
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.users.read().await.len())
    }
}

impl std::fmt::Debug for InMemoryUserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryUserStore").finish_non_exhaustive()
    }
}
