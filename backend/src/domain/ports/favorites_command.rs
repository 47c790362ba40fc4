//! Driving port for toggling a favorite country.
//!
//! HTTP handlers validate the request payload, build a
//! [`ToggleFavoriteRequest`], and call [`FavoritesCommand::toggle`]. The
//! returned [`ToggleOutcome`] carries the whole updated list so clients can
//! replace their state without a follow-up read.

use async_trait::async_trait;

use crate::domain::{Error, FavoriteCountry, ToggleOutcome, UserId, toggle_favorite};

/// Request to toggle one country in a user's favorites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleFavoriteRequest {
    /// The user whose favorites change.
    pub user_id: UserId,
    /// Record to insert when its code is absent.
    pub favorite: FavoriteCountry,
}

/// Domain use-case port for toggling favorites.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesCommand: Send + Sync {
    /// Remove the country if present, else append it.
    async fn toggle(&self, request: ToggleFavoriteRequest) -> Result<ToggleOutcome, Error>;
}

/// Fixture command that treats every toggle as an insert into an empty list.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFavoritesCommand;

#[async_trait]
impl FavoritesCommand for FixtureFavoritesCommand {
    async fn toggle(&self, request: ToggleFavoriteRequest) -> Result<ToggleOutcome, Error> {
        Ok(toggle_favorite(Vec::new(), request.favorite))
    }
}
