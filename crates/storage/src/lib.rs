//! Storage backends for userkit
//!
//! Both backends implement [`UserStorage`]:
//!
//! - [`SledUserStore`] persists users in an embedded sled database
//! - [`InMemoryUserStore`] keeps users in a `HashMap`, for tests and
//!   throwaway servers

pub mod memory;
pub mod sled_store;

pub use memory::InMemoryUserStore;
pub use sled_store::SledUserStore;
pub use userkit_model::{StorageError, User, UserStorage};
