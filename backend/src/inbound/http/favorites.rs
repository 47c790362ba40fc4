//! Favorite countries HTTP handlers.
//!
//! ```text
//! GET /api/v1/favorites
//! POST /api/v1/favorites/toggle {"countryCode":"DEU","countryName":"Germany","flagUrl":"..."}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::ToggleFavoriteRequest;
use crate::domain::{CountryCode, FavoriteCountry, ToggleOutcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, FavoriteCountrySchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Favorites are per-user and change on every toggle.
const FAVORITES_CACHE_CONTROL: (&str, &str) = ("Cache-Control", "private, no-cache");

/// Request payload for toggling a favorite.
///
/// `countryCode` is modelled as optional so a missing field reports the same
/// validation error as a blank one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFavoriteBody {
    /// Country to toggle; required and non-blank.
    #[schema(example = "DEU")]
    pub country_code: Option<String>,
    /// Display name stored with a newly added favorite.
    #[schema(example = "Germany")]
    pub country_name: Option<String>,
    /// Flag image URL stored with a newly added favorite.
    #[schema(example = "https://flagcdn.com/w320/de.png")]
    pub flag_url: Option<String>,
}

impl ToggleFavoriteBody {
    fn into_favorite(self) -> ApiResult<FavoriteCountry> {
        let code = CountryCode::new(self.country_code.unwrap_or_default())?;
        Ok(FavoriteCountry::new(code, self.country_name, self.flag_url))
    }
}

/// Response payload for `GET /favorites`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesResponse {
    /// The user's favorites in insertion order.
    #[schema(value_type = Vec<FavoriteCountrySchema>)]
    pub favorite_countries: Vec<FavoriteCountry>,
}

/// Response payload for `POST /favorites/toggle`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFavoriteResponse {
    /// Confirmation naming the toggle direction.
    #[schema(example = "Country added to favorites successfully.")]
    pub message: String,
    /// Favorites after the toggle, in insertion order.
    #[schema(value_type = Vec<FavoriteCountrySchema>)]
    pub favorite_countries: Vec<FavoriteCountry>,
    /// `true` when the country was added.
    pub added: bool,
}

impl From<ToggleOutcome> for ToggleFavoriteResponse {
    fn from(outcome: ToggleOutcome) -> Self {
        Self {
            message: outcome.message().to_owned(),
            added: outcome.added,
            favorite_countries: outcome.favorites,
        }
    }
}

/// Fetch the authenticated user's favorite countries.
#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    responses(
        (
            status = 200,
            description = "Favorite countries in insertion order",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = FavoritesResponse
        ),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "getFavorites"
)]
#[get("/favorites")]
pub async fn get_favorites(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let favorite_countries = state.favorites_query.fetch_favorites(&user_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(FAVORITES_CACHE_CONTROL)
        .json(FavoritesResponse { favorite_countries }))
}

/// Add or remove a country from the authenticated user's favorites.
#[utoipa::path(
    post,
    path = "/api/v1/favorites/toggle",
    request_body = ToggleFavoriteBody,
    responses(
        (status = 200, description = "Updated favorites", body = ToggleFavoriteResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "toggleFavorite"
)]
#[post("/favorites/toggle")]
pub async fn toggle_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ToggleFavoriteBody>,
) -> ApiResult<web::Json<ToggleFavoriteResponse>> {
    let user_id = session.require_user_id()?;
    let favorite = payload.into_inner().into_favorite()?;
    let outcome = state
        .favorites
        .toggle(ToggleFavoriteRequest { user_id, favorite })
        .await?;
    Ok(web::Json(ToggleFavoriteResponse::from(outcome)))
}

#[cfg(test)]
#[path = "favorites_tests.rs"]
mod tests;
