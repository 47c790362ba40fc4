//! Login service that provisions the fixture account on first use.
//!
//! Credentials are checked by [`FixtureLoginService`]. On success the
//! matching user row is created when missing, or read back when it already
//! existed, so the session's user id resolves in the favorites store
//! afterwards.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    FixtureLoginService, LoginService, UserPersistenceError, UserRepository,
};
use crate::domain::{Error, LoginCredentials, UserId};

/// Authenticates with the fixture account and ensures its user record exists.
#[derive(Clone)]
pub struct AccountLoginService {
    users: Arc<dyn UserRepository>,
}

impl AccountLoginService {
    /// Create a service over the given user store.
    #[must_use]
    pub const fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Insert the fixture user unless it is already stored.
    ///
    /// Called once at startup and again on every successful login. When the
    /// row already existed it is read back: a row deleted in between is an
    /// internal error, and a stored username that differs from the fixture's
    /// is kept but logged.
    pub async fn provision_fixture_user(&self) -> Result<UserId, Error> {
        let user = FixtureLoginService::user()?;
        let inserted = self
            .users
            .insert_if_absent(&user)
            .await
            .map_err(map_user_persistence_error)?;
        if inserted {
            info!(user_id = %user.id(), "fixture user provisioned");
            return Ok(user.id().clone());
        }

        let stored = self
            .users
            .find_by_id(user.id())
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| {
                warn!(user_id = %user.id(), "fixture user vanished during provisioning");
                Error::internal("fixture user is missing from the user store")
            })?;
        if stored.username() != user.username() {
            warn!(
                user_id = %user.id(),
                stored = %stored.username(),
                expected = %user.username(),
                "stored fixture user has a different username"
            );
        }
        Ok(stored.id().clone())
    }
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    warn!(%error, unreachable = error.is_connection(), "user store failed");
    Error::internal(error.to_string())
}

#[async_trait]
impl LoginService for AccountLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        FixtureLoginService.authenticate(credentials).await?;
        self.provision_fixture_user().await
    }
}
