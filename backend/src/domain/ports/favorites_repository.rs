//! Port for per-user favorites persistence.
//!
//! The [`FavoritesRepository`] trait is the only way favorites change. Its
//! `toggle` contract is atomic per user: two concurrent toggles for the same
//! user and code must never both insert or both skip the removal.

use async_trait::async_trait;

use crate::domain::{FavoriteCountry, ToggleOutcome, UserId, toggle_favorite};

use super::define_port_error;

define_port_error! {
    /// Errors raised by favorites repository adapters.
    pub enum FavoritesRepositoryError for "favorites repository"
}

/// Port for favorites storage and retrieval.
///
/// Both operations return `Ok(None)` when the user does not exist, so callers
/// can tell an unknown user apart from one with no favorites.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Fetch the user's favorites in collection order.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Vec<FavoriteCountry>>, FavoritesRepositoryError>;

    /// Atomically remove `favorite` if its code is present, else append it.
    async fn toggle(
        &self,
        user_id: &UserId,
        favorite: &FavoriteCountry,
    ) -> Result<Option<ToggleOutcome>, FavoritesRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Every user exists and starts with an empty collection; toggles are not
/// remembered.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFavoritesRepository;

#[async_trait]
impl FavoritesRepository for FixtureFavoritesRepository {
    async fn find_by_user_id(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<Vec<FavoriteCountry>>, FavoritesRepositoryError> {
        Ok(Some(Vec::new()))
    }

    async fn toggle(
        &self,
        _user_id: &UserId,
        favorite: &FavoriteCountry,
    ) -> Result<Option<ToggleOutcome>, FavoritesRepositoryError> {
        Ok(Some(toggle_favorite(Vec::new(), favorite.clone())))
    }
}
