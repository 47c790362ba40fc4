//! Storage port for the accounts that own favorites collections.
//!
//! Accounts are only ever created, never renamed, so the port offers an
//! idempotent insert rather than an update.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError for "user repository"
}

/// Port for the user records that own favorites collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store `user` unless its id is already present; `true` when inserted.
    ///
    /// An existing record and its favorites are left untouched.
    async fn insert_if_absent(&self, user: &User) -> Result<bool, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}
