//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the session, favorites, and health endpoints together
//! with schema wrappers for domain types, so the domain stays free of utoipa
//! derives. The document backs Swagger UI in debug builds and is exported by
//! the `openapi-dump` binary.

use crate::inbound::http::favorites::{
    FavoritesResponse, ToggleFavoriteBody, ToggleFavoriteResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, FavoriteCountrySchema};
use crate::inbound::http::users::LoginRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Country explorer favorites API",
        description = "Session-authenticated favorite countries and health checks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::favorites::get_favorites,
        crate::inbound::http::favorites::toggle_favorite,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        LoginRequest,
        ToggleFavoriteBody,
        FavoritesResponse,
        ToggleFavoriteResponse,
        FavoriteCountrySchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "session", description = "Login and logout"),
        (name = "favorites", description = "Per-user favorite countries"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
