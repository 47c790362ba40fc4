//! Builders wiring storage adapters into the HTTP state ports.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{FavoritesCommand, FavoritesQuery, FavoritesRepository, UserRepository};
use crate::domain::{AccountLoginService, FavoritesService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryFavoritesStore;
use crate::outbound::persistence::{DbPool, DieselFavoritesRepository, DieselUserRepository};

/// Services shared by every HTTP worker.
#[derive(Clone)]
pub struct AppPorts {
    /// Handler state holding the driving ports.
    pub http_state: web::Data<HttpState>,
    /// Login service, also used to provision the fixture user at startup.
    pub accounts: Arc<AccountLoginService>,
}

impl AppPorts {
    /// Wire the ports over a fresh process-local store.
    #[must_use]
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryFavoritesStore::new());
        Self::over(Arc::clone(&store), store)
    }

    /// Wire the ports over PostgreSQL repositories sharing `pool`.
    #[must_use]
    pub fn with_db_pool(pool: &DbPool) -> Self {
        Self::over(
            Arc::new(DieselFavoritesRepository::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool.clone())),
        )
    }

    pub(crate) fn for_pool(pool: Option<&DbPool>) -> Self {
        pool.map_or_else(Self::in_memory, Self::with_db_pool)
    }

    fn over<R>(favorites: Arc<R>, users: Arc<dyn UserRepository>) -> Self
    where
        R: FavoritesRepository + 'static,
    {
        let service = Arc::new(FavoritesService::new(favorites));
        let accounts = Arc::new(AccountLoginService::new(users));
        let command: Arc<dyn FavoritesCommand> = service.clone();
        let query: Arc<dyn FavoritesQuery> = service;
        let http_state = HttpState {
            login: accounts.clone(),
            favorites: command,
            favorites_query: query,
        };
        Self {
            http_state: web::Data::new(http_state),
            accounts,
        }
    }
}
