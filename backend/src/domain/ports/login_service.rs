//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing identity store, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User, UserId, Username};

/// Username accepted by [`FixtureLoginService`].
pub const FIXTURE_LOGIN_USERNAME: &str = "admin";
/// Password accepted by [`FixtureLoginService`].
pub const FIXTURE_LOGIN_PASSWORD: &str = "password";
/// Identifier returned by [`FixtureLoginService`].
pub const FIXTURE_LOGIN_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Development authenticator with a single fixed account.
///
/// `admin` / `password` authenticates and yields a fixed user id. The same
/// account is provisioned in the favorites store at startup through
/// [`FixtureLoginService::user`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

impl FixtureLoginService {
    /// The user record backing the fixture credentials.
    pub fn user() -> Result<User, Error> {
        let id = UserId::new(FIXTURE_LOGIN_USER_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
        let username = Username::new(FIXTURE_LOGIN_USERNAME)
            .map_err(|err| Error::internal(format!("invalid fixture username: {err}")))?;
        Ok(User::new(id, username))
    }
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.matches(FIXTURE_LOGIN_USERNAME, FIXTURE_LOGIN_PASSWORD) {
            Ok(Self::user()?.id().clone())
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
