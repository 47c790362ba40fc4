//! Shared `bb8` pool of `diesel-async` PostgreSQL connections.
//!
//! Both repositories clone the same [`DbPool`]. A toggle holds its connection
//! for one short transaction, so a small pool with a bounded checkout wait is
//! enough; a saturated pool surfaces as [`PoolError::Checkout`] and the
//! repositories report it as a connection failure.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Connections kept when no limit is configured.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 8;
/// Checkout wait when none is configured.
pub const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool construction or checkout failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection became available in time.
    #[error("database checkout failed: {message}")]
    Checkout {
        /// Underlying `bb8` error text.
        message: String,
    },
    /// The pool could not open its first connections.
    #[error("database pool could not start: {message}")]
    Build {
        /// Underlying `bb8` error text.
        message: String,
    },
}

/// Where to connect and how many connections to hold.
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use explorer_backend::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://explorer@localhost/explorer")
///     .with_max_connections(Some(2))
///     .with_checkout_timeout(None);
/// assert_eq!(config.max_connections(), 2);
/// assert_eq!(config.checkout_timeout(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    database_url: String,
    max_connections: u32,
    checkout_timeout: Duration,
}

impl PoolConfig {
    /// Default limits for `database_url`.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    /// Cap the pool size; `None` or zero keeps the default.
    #[must_use]
    pub fn with_max_connections(mut self, max: Option<u32>) -> Self {
        self.max_connections = max
            .filter(|max| *max > 0)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        self
    }

    /// Bound the checkout wait; `None` or zero keeps the default.
    #[must_use]
    pub fn with_checkout_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.checkout_timeout = timeout
            .filter(|timeout| !timeout.is_zero())
            .unwrap_or(DEFAULT_CHECKOUT_TIMEOUT);
        self
    }

    /// Connection string the pool opens.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Upper bound on open connections.
    #[must_use]
    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }

    /// Longest wait for a free connection.
    #[must_use]
    pub const fn checkout_timeout(&self) -> Duration {
        self.checkout_timeout
    }
}

/// Cloneable handle to the connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Open the pool.
    ///
    /// # Errors
    ///
    /// [`PoolError::Build`] when the database cannot be reached.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let PoolConfig {
            database_url,
            max_connections,
            checkout_timeout,
        } = config;
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        let inner = Pool::builder()
            .max_size(max_connections)
            .connection_timeout(checkout_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::Build {
                message: err.to_string(),
            })?;
        Ok(Self { inner })
    }

    /// Borrow a connection.
    ///
    /// # Errors
    ///
    /// [`PoolError::Checkout`] when the wait exceeds the checkout timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner.get().await.map_err(|err| PoolError::Checkout {
            message: err.to_string(),
        })
    }
}
