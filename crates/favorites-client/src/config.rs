//! Client settings loaded via OrthoConfig.
//!
//! Values come from `FAVORITES_CLIENT_*` environment variables, optional
//! config files, and command-line flags.

use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

use crate::error::ClientError;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";
const DEFAULT_COUNTRIES_BASE_URL: &str = "https://restcountries.com/v3.1";
const DEFAULT_CACHE_DIR: &str = ".favorites-cache";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Where the client finds its services and keeps its cache.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FAVORITES_CLIENT")]
pub struct ClientSettings {
    /// Root of the favorites API.
    pub api_base_url: Option<String>,
    /// Root of the REST Countries API.
    pub countries_base_url: Option<String>,
    /// Directory holding the local favorites cache.
    pub cache_dir: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
}

fn parse_url(field: &'static str, raw: Option<&str>, default: &str) -> Result<Url, ClientError> {
    let chosen = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(default);
    let url =
        Url::parse(chosen).map_err(|err| ClientError::config(field, format!("'{chosen}': {err}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::config(
            field,
            format!("'{chosen}' cannot be a base URL"),
        ));
    }
    Ok(url)
}

impl ClientSettings {
    /// Favorites API root.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the value is not an absolute URL.
    pub fn api_base_url(&self) -> Result<Url, ClientError> {
        parse_url("api_base_url", self.api_base_url.as_deref(), DEFAULT_API_BASE_URL)
    }

    /// REST Countries root.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the value is not an absolute URL.
    pub fn countries_base_url(&self) -> Result<Url, ClientError> {
        parse_url(
            "countries_base_url",
            self.countries_base_url.as_deref(),
            DEFAULT_COUNTRIES_BASE_URL,
        )
    }

    /// Cache directory.
    #[must_use]
    pub fn cache_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.cache_dir.as_deref().unwrap_or(DEFAULT_CACHE_DIR))
    }

    /// Per-request timeout; zero is raised to one second.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
            .max(1);
        Duration::from_secs(secs)
    }
}
