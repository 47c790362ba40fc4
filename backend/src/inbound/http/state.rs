//! Ports the HTTP handlers drive, shared through `web::Data`.

use std::sync::Arc;

use crate::domain::ports::{
    FavoritesCommand, FavoritesQuery, FixtureFavoritesCommand, FixtureFavoritesQuery,
    FixtureLoginService, LoginService,
};

/// Driving ports for the session and favorites handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use explorer_backend::domain::ports::FixtureLoginService;
/// use explorer_backend::inbound::http::state::HttpState;
///
/// let state = HttpState::fixtures().with_login(Arc::new(FixtureLoginService));
/// let _login = state.login.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    /// Credential check behind `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Toggle behind `POST /favorites/toggle`.
    pub favorites: Arc<dyn FavoritesCommand>,
    /// Lookup behind `GET /favorites`.
    pub favorites_query: Arc<dyn FavoritesQuery>,
}

impl HttpState {
    /// Fixture adapters for every port; no storage involved.
    #[must_use]
    pub fn fixtures() -> Self {
        Self {
            login: Arc::new(FixtureLoginService),
            favorites: Arc::new(FixtureFavoritesCommand),
            favorites_query: Arc::new(FixtureFavoritesQuery),
        }
    }

    /// Replace the login port.
    #[must_use]
    pub fn with_login(mut self, login: Arc<dyn LoginService>) -> Self {
        self.login = login;
        self
    }

    /// Replace the toggle port.
    #[must_use]
    pub fn with_favorites(mut self, command: Arc<dyn FavoritesCommand>) -> Self {
        self.favorites = command;
        self
    }

    /// Replace the favorites lookup port.
    #[must_use]
    pub fn with_favorites_query(mut self, query: Arc<dyn FavoritesQuery>) -> Self {
        self.favorites_query = query;
        self
    }
}
