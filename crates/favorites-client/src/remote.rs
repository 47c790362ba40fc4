//! Favorites backend that talks to the favorites API over HTTP.
//!
//! The API authenticates by session cookie, so the reqwest client keeps a
//! cookie store: call [`RemoteBackend::login`] once and every later request
//! carries the session.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::backend::{FavoritesBackend, ToggleOutcome};
use crate::config::ClientSettings;
use crate::error::ClientError;
use crate::http::{decode, endpoint, map_transport_error, read_success};
use crate::record::{FavoriteCountry, RawRecord, ingest};

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToggleBody<'a> {
    country_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    country_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flag_url: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FavoritesDto {
    #[serde(default)]
    favorite_countries: Vec<RawRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToggleDto {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    favorite_countries: Vec<RawRecord>,
    added: bool,
}

/// HTTP adapter for `GET /favorites` and `POST /favorites/toggle`.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    client: Client,
    base_url: Url,
}

impl RemoteBackend {
    /// Build an adapter for the API rooted at `base_url`
    /// (for example `http://localhost:8080/api/v1`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the HTTP client cannot be built.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::config("http_client", err.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Build an adapter from loaded settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the API URL is invalid or the
    /// HTTP client cannot be built.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        Self::new(settings.api_base_url()?, settings.request_timeout())
    }

    /// API root this adapter targets.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Open a session; the cookie is kept for later requests.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Server`] with status 401 for wrong credentials
    /// and [`ClientError::Network`] when the API is unreachable.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let url = endpoint(&self.base_url, &["login"])?;
        let response = self
            .client
            .post(url)
            .json(&LoginBody { username, password })
            .send()
            .await
            .map_err(map_transport_error)?;
        read_success(response).await?;
        info!(username, "signed in to favorites API");
        Ok(())
    }

    /// End the session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] when the API is unreachable.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let url = endpoint(&self.base_url, &["logout"])?;
        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        read_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl FavoritesBackend for RemoteBackend {
    async fn fetch(&self) -> Result<Vec<FavoriteCountry>, ClientError> {
        let url = endpoint(&self.base_url, &["favorites"])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        let body = read_success(response).await?;
        let dto: FavoritesDto = decode(&body, "favorites")?;
        Ok(ingest(dto.favorite_countries, "remote"))
    }

    async fn toggle(
        &self,
        _current: &[FavoriteCountry],
        country: &FavoriteCountry,
    ) -> Result<ToggleOutcome, ClientError> {
        let url = endpoint(&self.base_url, &["favorites", "toggle"])?;
        let response = self
            .client
            .post(url)
            .json(&ToggleBody {
                country_code: country.code(),
                country_name: country.name(),
                flag_url: country.flag(),
            })
            .send()
            .await
            .map_err(map_transport_error)?;
        let body = read_success(response).await?;
        let dto: ToggleDto = decode(&body, "toggle")?;
        debug!(
            code = country.code(),
            added = dto.added,
            server_message = dto.message.as_deref().unwrap_or_default(),
            "remote toggle applied"
        );
        Ok(ToggleOutcome {
            favorites: ingest(dto.favorite_countries, "remote"),
            added: dto.added,
        })
    }
}
