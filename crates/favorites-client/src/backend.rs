//! The favorites backend port shared by the remote and local sources.

use async_trait::async_trait;

use crate::error::ClientError;
use crate::record::FavoriteCountry;

/// Which source produced a favorites list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// The favorites API.
    Remote,
    /// The local cache.
    Local,
}

/// Result of a toggle: the full list afterwards and whether the country was
/// added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Favorites after the toggle, in insertion order.
    pub favorites: Vec<FavoriteCountry>,
    /// `true` when the country was added, `false` when removed.
    pub added: bool,
}

/// Source of a user's favorites.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesBackend: Send + Sync {
    /// Load the complete favorites list.
    async fn fetch(&self) -> Result<Vec<FavoriteCountry>, ClientError>;

    /// Add `country` when absent from the favorites, remove it when present.
    ///
    /// `current` is the caller's view of the list; sources that hold their
    /// own authoritative copy may ignore it.
    async fn toggle(
        &self,
        current: &[FavoriteCountry],
        country: &FavoriteCountry,
    ) -> Result<ToggleOutcome, ClientError>;
}
