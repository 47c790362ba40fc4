//! Backend entry-point: loads settings, prepares storage, and serves the API.

use std::ffi::OsString;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use explorer_backend::inbound::http::health::HealthState;
use explorer_backend::outbound::persistence::{DbPool, run_pending_migrations};
use explorer_backend::server::{
    BuildMode, ServerConfig, ServerSettings, create_server, session_settings,
};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args: Vec<OsString> = std::env::args_os().collect();
    let settings = ServerSettings::load_from_iter(args)
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let session = session_settings(&settings, BuildMode::from_debug_assertions())?;
    let bind_addr = settings.bind_addr()?;

    let mut config = ServerConfig::new(session, bind_addr);

    if let Some(pool_config) = settings.pool_config() {
        let applied = run_pending_migrations(pool_config.database_url())
            .await
            .map_err(std::io::Error::other)?;
        info!(
            applied,
            max_connections = pool_config.max_connections(),
            "database migrations applied"
        );
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database_url configured; favorites are kept in memory");
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(make_metrics()?);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting server");
    create_server(health_state, config).await?.await
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<actix_web_prom::PrometheusMetrics> {
    PrometheusMetricsBuilder::new("explorer")
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("configure Prometheus metrics: {err}")))
}
