//! Favorites domain service.
//!
//! Implements the favorites driving ports on top of a
//! [`FavoritesRepository`]. Unknown users become `not_found` errors and every
//! persistence failure becomes an internal (storage) error.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error};

use crate::domain::ports::{
    FavoritesCommand, FavoritesQuery, FavoritesRepository, FavoritesRepositoryError,
    ToggleFavoriteRequest,
};
use crate::domain::{Error, FavoriteCountry, ToggleOutcome, UserId};

/// Message returned when the authenticated user no longer exists.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found.";

/// Favorites service implementing the driving ports.
#[derive(Clone)]
pub struct FavoritesService<R> {
    repository: Arc<R>,
}

impl<R> FavoritesService<R> {
    /// Create a new service over the given repository.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> FavoritesService<R>
where
    R: FavoritesRepository,
{
    fn map_repository_error(user_id: &UserId, err: FavoritesRepositoryError) -> Error {
        error!(
            user_id = %user_id,
            error = %err,
            unreachable = err.is_connection(),
            "favorites storage failed"
        );
        Error::internal(format!("favorites storage failed: {err}"))
    }

    fn user_not_found(user_id: &UserId) -> Error {
        Error::not_found(USER_NOT_FOUND_MESSAGE).with_details(json!({
            "userId": user_id.as_ref(),
            "code": "user_not_found",
        }))
    }
}

#[async_trait]
impl<R> FavoritesQuery for FavoritesService<R>
where
    R: FavoritesRepository,
{
    async fn fetch_favorites(&self, user_id: &UserId) -> Result<Vec<FavoriteCountry>, Error> {
        self.repository
            .find_by_user_id(user_id)
            .await
            .map_err(|err| Self::map_repository_error(user_id, err))?
            .ok_or_else(|| Self::user_not_found(user_id))
    }
}

#[async_trait]
impl<R> FavoritesCommand for FavoritesService<R>
where
    R: FavoritesRepository,
{
    async fn toggle(&self, request: ToggleFavoriteRequest) -> Result<ToggleOutcome, Error> {
        let ToggleFavoriteRequest { user_id, favorite } = request;
        let outcome = self
            .repository
            .toggle(&user_id, &favorite)
            .await
            .map_err(|err| Self::map_repository_error(&user_id, err))?
            .ok_or_else(|| Self::user_not_found(&user_id))?;
        debug!(
            user_id = %user_id,
            code = %favorite.code(),
            added = outcome.added,
            "favorite toggled"
        );
        Ok(outcome)
    }
}
