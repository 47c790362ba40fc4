//! One favorites list for UI code, whatever the session state.
//!
//! Authenticated operations go to the remote backend first and mirror the
//! result into the local cache. Anonymous operations, and any remote call
//! that fails, run against the local backend instead. Remote failures are
//! never fatal: they are logged and returned as a warning in the report.

use tracing::{debug, warn};

use crate::backend::{BackendKind, FavoritesBackend};
use crate::cache::LocalCache;
use crate::local::{LocalBackend, toggle_in};
use crate::record::{FavoriteCountry, contains};

/// Whether the user holds a session with the favorites API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No session; only the local cache is used.
    Anonymous,
    /// Session held; the remote backend is tried first.
    Authenticated,
}

/// Result of [`Reconciler::get_favorites`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesReport {
    /// Current favorites.
    pub favorites: Vec<FavoriteCountry>,
    /// Which backend produced the list.
    pub source: BackendKind,
    /// Why the remote backend was bypassed, if it was.
    pub warning: Option<String>,
}

/// Result of [`Reconciler::toggle_favorite`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleReport {
    /// Favorites after the toggle.
    pub favorites: Vec<FavoriteCountry>,
    /// `true` when the country was added.
    pub added: bool,
    /// Which backend applied the toggle.
    pub source: BackendKind,
    /// Why the remote backend was bypassed, if it was.
    pub warning: Option<String>,
}

/// Selects between the remote and local backends and keeps the current list.
#[derive(Debug)]
pub struct Reconciler<R, C> {
    remote: R,
    local: LocalBackend<C>,
    auth: AuthState,
    favorites: Vec<FavoriteCountry>,
    last_warning: Option<String>,
}

impl<R, C> Reconciler<R, C>
where
    R: FavoritesBackend,
    C: LocalCache,
{
    /// Build a reconciler whose initial list is the local cache contents.
    #[must_use]
    pub fn new(remote: R, local: LocalBackend<C>, auth: AuthState) -> Self {
        let favorites = local.load();
        Self {
            remote,
            local,
            auth,
            favorites,
            last_warning: None,
        }
    }

    /// Record a sign-in or sign-out.
    pub fn set_auth(&mut self, auth: AuthState) {
        self.auth = auth;
    }

    /// Current session state.
    #[must_use]
    pub const fn auth(&self) -> AuthState {
        self.auth
    }

    /// Current favorites.
    #[must_use]
    pub fn favorites(&self) -> &[FavoriteCountry] {
        &self.favorites
    }

    /// Whether `code` is in the current favorites.
    #[must_use]
    pub fn is_favorite(&self, code: &str) -> bool {
        contains(&self.favorites, code)
    }

    /// Warning from the most recent operation, if any.
    #[must_use]
    pub fn last_warning(&self) -> Option<&str> {
        self.last_warning.as_deref()
    }

    /// Remote backend, for session management.
    #[must_use]
    pub const fn remote(&self) -> &R {
        &self.remote
    }

    /// Local backend.
    #[must_use]
    pub const fn local(&self) -> &LocalBackend<C> {
        &self.local
    }

    fn mirror(&self) {
        if let Err(error) = self.local.store(&self.favorites) {
            warn!(%error, "failed to mirror favorites into the local cache");
        }
    }

    /// Load favorites from the best available source.
    pub async fn get_favorites(&mut self) -> FavoritesReport {
        let mut warning = None;
        if self.auth == AuthState::Authenticated {
            match self.remote.fetch().await {
                Ok(favorites) => {
                    self.favorites = favorites;
                    self.mirror();
                    self.last_warning = None;
                    return FavoritesReport {
                        favorites: self.favorites.clone(),
                        source: BackendKind::Remote,
                        warning: None,
                    };
                }
                Err(error) => {
                    warn!(%error, "remote favorites unavailable; using local cache");
                    warning = Some(format!("remote favorites unavailable: {error}"));
                }
            }
        }

        self.favorites = self.local.load();
        self.last_warning.clone_from(&warning);
        debug!(count = self.favorites.len(), "favorites loaded from local cache");
        FavoritesReport {
            favorites: self.favorites.clone(),
            source: BackendKind::Local,
            warning,
        }
    }

    /// Add `country` if absent, remove it if present.
    pub async fn toggle_favorite(&mut self, country: &FavoriteCountry) -> ToggleReport {
        let mut warning = None;
        if self.auth == AuthState::Authenticated {
            match self.remote.toggle(&self.favorites, country).await {
                Ok(outcome) => {
                    self.favorites = outcome.favorites;
                    self.mirror();
                    self.last_warning = None;
                    return ToggleReport {
                        favorites: self.favorites.clone(),
                        added: outcome.added,
                        source: BackendKind::Remote,
                        warning: None,
                    };
                }
                Err(error) => {
                    warn!(%error, code = country.code(), "remote toggle failed; toggling locally");
                    warning = Some(format!("remote toggle failed: {error}"));
                }
            }
        }

        let outcome = match self.local.toggle(&self.favorites, country).await {
            Ok(outcome) => outcome,
            Err(error) => {
                // The list still changes in memory; only persistence failed.
                warn!(%error, code = country.code(), "local favorites not saved");
                let note = format!("local favorites not saved: {error}");
                warning = Some(
                    warning
                        .into_iter()
                        .chain(std::iter::once(note))
                        .collect::<Vec<_>>()
                        .join("; "),
                );
                toggle_in(&self.favorites, country)
            }
        };
        self.favorites = outcome.favorites;
        self.last_warning.clone_from(&warning);
        ToggleReport {
            favorites: self.favorites.clone(),
            added: outcome.added,
            source: BackendKind::Local,
            warning,
        }
    }
}
