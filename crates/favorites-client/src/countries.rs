//! REST Countries v3.1 catalogue client.
//!
//! Only `cca3`, `name.common`, `flags.png` and, for single-country lookups,
//! `borders` are read. Entries are normalised through [`identity_of`] like
//! every other record the client ingests.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ClientSettings;
use crate::error::ClientError;
use crate::http::{decode, endpoint, map_status_error, map_transport_error};
use crate::record::{FavoriteCountry, RawRecord, identity_of};

const LIST_FIELDS: &str = "cca3,name,flags";
const DETAIL_FIELDS: &str = "cca3,name,flags,borders";

/// A catalogue entry ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountrySummary {
    /// Three-letter country code.
    pub code: String,
    /// Common English name.
    pub name: Option<String>,
    /// PNG flag URL.
    pub flag: Option<String>,
}

/// One country together with the codes of the countries it borders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryDetails {
    /// The country itself.
    pub summary: CountrySummary,
    /// `cca3` codes of land neighbours; empty for islands.
    pub borders: Vec<String>,
}

#[derive(Deserialize)]
struct DetailRecord {
    #[serde(flatten)]
    record: RawRecord,
    #[serde(default)]
    borders: Option<Vec<String>>,
}

/// `/alpha/{code}` answers with an array, or a bare object when `fields` is
/// given.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

impl TryFrom<CountrySummary> for FavoriteCountry {
    type Error = ClientError;

    fn try_from(summary: CountrySummary) -> Result<Self, Self::Error> {
        Self::new(summary.code, summary.name, summary.flag)
    }
}

/// Reads country listings from REST Countries.
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    client: Client,
    base_url: Url,
}

impl RestCountriesClient {
    /// Build a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the HTTP client cannot be built.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::config("http_client", err.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Build a client from loaded settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] for an invalid catalogue URL.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        Self::new(settings.countries_base_url()?, settings.request_timeout())
    }

    /// Every country.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`], [`ClientError::Server`], or
    /// [`ClientError::Decode`] when the listing cannot be read.
    pub async fn all(&self) -> Result<Vec<CountrySummary>, ClientError> {
        let mut url = endpoint(&self.base_url, &["all"])?;
        url.query_pairs_mut().append_pair("fields", LIST_FIELDS);
        self.list(url, false).await
    }

    /// Countries whose name matches `name`; no match is an empty list.
    ///
    /// # Errors
    ///
    /// As for [`RestCountriesClient::all`].
    pub async fn search(&self, name: &str) -> Result<Vec<CountrySummary>, ClientError> {
        let wanted = name.trim();
        if wanted.is_empty() {
            return Ok(Vec::new());
        }
        let url = endpoint(&self.base_url, &["name", wanted])?;
        self.list(url, true).await
    }

    /// Countries in `region` (for example `europe`).
    ///
    /// # Errors
    ///
    /// As for [`RestCountriesClient::all`].
    pub async fn by_region(&self, region: &str) -> Result<Vec<CountrySummary>, ClientError> {
        let url = endpoint(&self.base_url, &["region", region.trim()])?;
        self.list(url, false).await
    }

    /// One country and its border codes; an unknown or blank code is `None`.
    ///
    /// Feed [`CountryDetails::borders`] to [`RestCountriesClient::borders`]
    /// to resolve the neighbours.
    ///
    /// # Errors
    ///
    /// As for [`RestCountriesClient::all`].
    pub async fn by_code(&self, code: &str) -> Result<Option<CountryDetails>, ClientError> {
        let wanted = code.trim();
        if wanted.is_empty() {
            return Ok(None);
        }
        let mut url = endpoint(&self.base_url, &["alpha", wanted])?;
        url.query_pairs_mut().append_pair("fields", DETAIL_FIELDS);
        let Some(body) = self.fetch(url, true).await? else {
            return Ok(None);
        };
        let records: OneOrMany<DetailRecord> = decode(&body, "country")?;
        Ok(records.into_vec().into_iter().find_map(details_of))
    }

    /// Summaries for `codes`, in the catalogue's order.
    ///
    /// Blank codes are dropped; with none left no request is sent. Codes the
    /// catalogue does not know are simply absent from the result.
    ///
    /// # Errors
    ///
    /// As for [`RestCountriesClient::all`].
    pub async fn borders<S: AsRef<str>>(
        &self,
        codes: &[S],
    ) -> Result<Vec<CountrySummary>, ClientError> {
        let wanted: Vec<&str> = codes
            .iter()
            .map(|code| code.as_ref().trim())
            .filter(|code| !code.is_empty())
            .collect();
        if wanted.is_empty() {
            return Ok(Vec::new());
        }
        let mut url = endpoint(&self.base_url, &["alpha"])?;
        url.query_pairs_mut()
            .append_pair("codes", &wanted.join(","))
            .append_pair("fields", LIST_FIELDS);
        self.list(url, true).await
    }

    async fn list(
        &self,
        url: Url,
        not_found_is_empty: bool,
    ) -> Result<Vec<CountrySummary>, ClientError> {
        let Some(body) = self.fetch(url, not_found_is_empty).await? else {
            return Ok(Vec::new());
        };
        let records: Vec<RawRecord> = decode(&body, "countries")?;
        Ok(records.into_iter().filter_map(summary_of).collect())
    }

    /// The body of a successful response, or `None` for a tolerated 404.
    async fn fetch(
        &self,
        url: Url,
        not_found_is_none: bool,
    ) -> Result<Option<Vec<u8>>, ClientError> {
        debug!(%url, "fetching countries");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status == StatusCode::NOT_FOUND && not_found_is_none {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(Some(body.to_vec()))
    }
}

fn summary_of(record: RawRecord) -> Option<CountrySummary> {
    if identity_of(&record).is_none() {
        warn!("skipping country without cca3");
        return None;
    }
    let favorite = record.into_favorite().ok()?;
    Some(CountrySummary {
        code: favorite.code().to_owned(),
        name: favorite.name().map(str::to_owned),
        flag: favorite.flag().map(str::to_owned),
    })
}

fn details_of(detail: DetailRecord) -> Option<CountryDetails> {
    let summary = summary_of(detail.record)?;
    let borders = detail
        .borders
        .unwrap_or_default()
        .into_iter()
        .map(|code| code.trim().to_owned())
        .filter(|code| !code.is_empty())
        .collect();
    Some(CountryDetails { summary, borders })
}
