//! What [`super::create_server`] needs beyond the health state.

use std::net::{SocketAddr, TcpListener};

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

use super::settings::SessionSettings;
use crate::outbound::persistence::DbPool;

/// Socket, session policy and storage for one server instance.
///
/// Without a pool, favorites live in process memory and vanish on restart.
///
/// # Examples
/// ```
/// use explorer_backend::server::{ServerConfig, SessionSettings};
///
/// let config = ServerConfig::new(SessionSettings::ephemeral(), "127.0.0.1:0".parse().unwrap());
/// assert!(!config.is_persistent());
/// ```
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) listener: Option<TcpListener>,
    pub(crate) db_pool: Option<DbPool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// In-memory favorites served on `bind_addr`.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            listener: None,
            db_pool: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Store favorites in PostgreSQL through `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Serve on a socket the caller already bound; `bind_addr` is then unused.
    #[must_use]
    pub fn with_listener(mut self, listener: TcpListener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Export request metrics at `/metrics`.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(mut self, prometheus: PrometheusMetrics) -> Self {
        self.prometheus = Some(prometheus);
        self
    }

    /// Address used when no listener was supplied.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Whether favorites survive a restart.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        self.db_pool.is_some()
    }
}
