//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};

use crate::domain::ports::{FavoritesCommand, FavoritesQuery};
use crate::inbound::http::state::HttpState;
use crate::server::{SessionSettings, session_middleware};

/// Production session middleware over a throwaway key and plain-HTTP cookies.
#[must_use]
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    session_middleware(&SessionSettings::ephemeral())
}

/// Fixture state with either favorites port replaced.
#[must_use]
pub fn state_with(
    command: Option<Arc<dyn FavoritesCommand>>,
    query: Option<Arc<dyn FavoritesQuery>>,
) -> HttpState {
    let mut state = HttpState::fixtures();
    if let Some(port) = command {
        state.favorites = port;
    }
    if let Some(port) = query {
        state.favorites_query = port;
    }
    state
}
