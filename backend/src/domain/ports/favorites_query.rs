//! Driving port for reading a user's favorites.

use async_trait::async_trait;

use crate::domain::{Error, FavoriteCountry, UserId};

/// Domain use-case port for fetching favorites.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesQuery: Send + Sync {
    /// Fetch the authenticated user's favorites verbatim.
    ///
    /// Fails with a not-found error when the user does not exist.
    async fn fetch_favorites(&self, user_id: &UserId) -> Result<Vec<FavoriteCountry>, Error>;
}

/// Fixture query returning an empty collection.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFavoritesQuery;

#[async_trait]
impl FavoritesQuery for FixtureFavoritesQuery {
    async fn fetch_favorites(&self, _user_id: &UserId) -> Result<Vec<FavoriteCountry>, Error> {
        Ok(Vec::new())
    }
}
