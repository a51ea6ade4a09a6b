//! The storage contract.

use async_trait::async_trait;

use crate::user::User;
use crate::Result;

/// Creating, reading, updating and deleting users in a storage dependency
/// like a database or a file system.
///
/// The HTTP layer only ever sees this trait; backends are injected as
/// `Arc<dyn UserStorage>`.
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Store a new user. Fails with `AlreadyExists` if the id is taken.
    async fn create(&self, user: User) -> Result<()>;

    /// Fetch a user by id.
    async fn read(&self, user_id: &str) -> Result<User>;

    /// Replace an existing user and return the stored value.
    ///
    /// Never inserts: a missing id is `NotFound`.
    async fn update(&self, user: User) -> Result<User>;

    /// Remove a user and return the record that was removed.
    async fn delete(&self, user_id: &str) -> Result<User>;

    /// Number of stored users.
    async fn count(&self) -> Result<usize>;
}
