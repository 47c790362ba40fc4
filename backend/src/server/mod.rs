//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
pub mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::{BuildMode, ServerSettings, SessionSettings, SettingsError, session_settings};
pub use state_builders::AppPorts;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::time::Duration;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::favorites::{get_favorites, toggle_favorite};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::session::SESSION_COOKIE_NAME;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{login, logout};
use crate::inbound::http::validation::json_config;

/// Everything one worker's `App` is built from.
#[derive(Clone)]
pub struct AppDependencies {
    /// Flags behind `/health/ready` and `/health/live`.
    pub health_state: web::Data<HealthState>,
    /// Ports driven by the session and favorites handlers.
    pub http_state: web::Data<HttpState>,
    /// Cookie key and attributes for the session middleware.
    pub session: SessionSettings,
}

/// Private cookie sessions named [`SESSION_COOKIE_NAME`], valid for two hours.
#[must_use]
pub fn session_middleware(settings: &SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name(SESSION_COOKIE_NAME.into())
        .cookie_path("/".into())
        .cookie_secure(settings.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(settings.same_site)
        .session_lifecycle(PersistentSession::default().session_ttl(Duration::hours(2)))
        .build()
}

/// Assemble the application: session-wrapped `/api/v1` routes, health checks, and
/// (in debug builds) Swagger UI.
#[must_use]
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    let api = web::scope("/api/v1")
        .app_data(json_config())
        .wrap(session_middleware(&session))
        .service(login)
        .service(logout)
        .service(get_favorites)
        .service(toggle_favorite);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let documented =
        app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let documented = app;

    documented
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// Storage is chosen from the configuration: PostgreSQL when a pool is
/// attached, otherwise a process-local store. The fixture user is provisioned
/// before the server reports ready.
///
/// # Errors
/// Returns [`std::io::Error`] when provisioning fails or the socket cannot be
/// bound.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ports = AppPorts::for_pool(config.db_pool.as_ref());
    let user_id = ports
        .accounts
        .provision_fixture_user()
        .await
        .map_err(|err| std::io::Error::other(format!("fixture user provisioning failed: {err}")))?;
    info!(%user_id, persistent = config.is_persistent(), "favorites store ready");

    let server_health_state = health_state.clone();
    let http_state = ports.http_state;
    let ServerConfig {
        session,
        bind_addr,
        listener,
        db_pool: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let http_server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
        });

        #[cfg(feature = "metrics")]
        let instrumented = app.wrap(metrics_layer.clone());
        #[cfg(not(feature = "metrics"))]
        let instrumented = app;

        instrumented
    });
    let bound = match listener {
        Some(socket) => http_server.listen(socket)?,
        None => http_server.bind(bind_addr)?,
    };
    let server = bound.run();

    health_state.mark_ready();
    Ok(server)
}
