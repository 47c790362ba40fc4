//! Favorites backend over the local cache.
//!
//! The stored value is a JSON array of records under [`FAVORITES_KEY`].
//! Entries written by older clients may carry `cca3` in place of `code`; they
//! are normalised on load.

use async_trait::async_trait;
use tracing::warn;

use crate::backend::{FavoritesBackend, ToggleOutcome};
use crate::cache::{FAVORITES_KEY, LocalCache};
use crate::error::ClientError;
use crate::record::{FavoriteCountry, RawRecord, contains, ingest};

/// Apply a toggle to `current` without touching any storage.
///
/// Membership is decided by normalised identity; an added country goes to
/// the end of the list.
#[must_use]
pub fn toggle_in(current: &[FavoriteCountry], country: &FavoriteCountry) -> ToggleOutcome {
    if contains(current, country.code()) {
        ToggleOutcome {
            favorites: current
                .iter()
                .filter(|favorite| favorite.code() != country.code())
                .cloned()
                .collect(),
            added: false,
        }
    } else {
        let mut favorites = current.to_vec();
        favorites.push(country.clone());
        ToggleOutcome {
            favorites,
            added: true,
        }
    }
}

/// Cache-backed favorites source.
#[derive(Debug)]
pub struct LocalBackend<C> {
    cache: C,
}

impl<C: LocalCache> LocalBackend<C> {
    /// Wrap a cache.
    #[must_use]
    pub const fn new(cache: C) -> Self {
        Self { cache }
    }

    /// Underlying cache.
    #[must_use]
    pub const fn cache(&self) -> &C {
        &self.cache
    }

    /// Read the stored list; a missing or unreadable value is an empty list.
    #[must_use]
    pub fn load(&self) -> Vec<FavoriteCountry> {
        let stored = match self.cache.get(FAVORITES_KEY) {
            Ok(Some(stored)) => stored,
            Ok(None) => return Vec::new(),
            Err(error) => {
                warn!(%error, "local favorites unreadable; treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<RawRecord>>(&stored) {
            Ok(records) => ingest(records, "local"),
            Err(error) => {
                warn!(%error, "local favorites are not a JSON array; treating as empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the stored list.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Cache`] when the cache rejects the write.
    pub fn store(&self, favorites: &[FavoriteCountry]) -> Result<(), ClientError> {
        let encoded = serde_json::to_string(favorites)
            .map_err(|err| ClientError::cache(FAVORITES_KEY, err.to_string()))?;
        self.cache.set(FAVORITES_KEY, &encoded)
    }
}

#[async_trait]
impl<C: LocalCache> FavoritesBackend for LocalBackend<C> {
    async fn fetch(&self) -> Result<Vec<FavoriteCountry>, ClientError> {
        Ok(self.load())
    }

    async fn toggle(
        &self,
        current: &[FavoriteCountry],
        country: &FavoriteCountry,
    ) -> Result<ToggleOutcome, ClientError> {
        let outcome = toggle_in(current, country);
        self.store(&outcome.favorites)?;
        Ok(outcome)
    }
}
