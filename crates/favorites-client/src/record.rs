//! Favorite records and identity normalisation.
//!
//! Records reach the client in three shapes: the server's `{code, name, flag}`,
//! cache entries written by older clients keyed `cca3`, and REST Countries
//! entries with nested `name.common` and `flags.png`. Every ingestion boundary
//! decodes into [`RawRecord`] and passes through [`identity_of`], so the rest
//! of the crate only ever compares normalised codes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ClientError;

/// A favorited country in canonical form.
///
/// Serialises as `{"code": "DEU", "name": "Germany", "flag": "https://..."}`,
/// omitting absent fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteCountry {
    code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flag: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

impl FavoriteCountry {
    /// Build a record; the code is trimmed and must not be blank.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidCountry`] for a blank code.
    ///
    /// # Examples
    /// ```
    /// use favorites_client::FavoriteCountry;
    ///
    /// let germany = FavoriteCountry::new(" DEU ", Some("Germany".into()), None).unwrap();
    /// assert_eq!(germany.code(), "DEU");
    /// assert!(FavoriteCountry::new("  ", None, None).is_err());
    /// ```
    pub fn new(
        code: impl AsRef<str>,
        name: Option<String>,
        flag: Option<String>,
    ) -> Result<Self, ClientError> {
        let trimmed_code = code.as_ref().trim();
        if trimmed_code.is_empty() {
            return Err(ClientError::invalid_country("country code is required"));
        }
        Ok(Self {
            code: trimmed_code.to_owned(),
            name: non_blank(name),
            flag: non_blank(flag),
        })
    }

    /// Normalised identity.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name, if known.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Flag image URL, if known.
    #[must_use]
    pub fn flag(&self) -> Option<&str> {
        self.flag.as_deref()
    }
}

/// Display name as either a plain string or the REST Countries object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawName {
    /// `"name": "Germany"`
    Plain(String),
    /// `"name": {"common": "Germany", ...}`
    Structured {
        /// Common English name.
        common: Option<String>,
    },
}

/// Flag URLs in the REST Countries shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawFlags {
    /// PNG flag URL.
    pub png: Option<String>,
    /// SVG flag URL.
    pub svg: Option<String>,
}

/// A country record in any accepted shape, before normalisation.
///
/// Unknown fields are ignored and every field may be missing or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    /// Canonical identity field.
    #[serde(default)]
    pub code: Option<String>,
    /// Alternative identity field used by REST Countries and legacy caches.
    #[serde(default)]
    pub cca3: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<RawName>,
    /// Flag URL in the canonical shape.
    #[serde(default)]
    pub flag: Option<String>,
    /// Flag URLs in the REST Countries shape.
    #[serde(default)]
    pub flags: Option<RawFlags>,
}

fn trimmed(value: Option<&String>) -> Option<&str> {
    value.map(|text| text.trim()).filter(|text| !text.is_empty())
}

/// Return the record's identity: `code` when present and non-blank, else
/// `cca3`.
///
/// # Examples
/// ```
/// use favorites_client::{RawRecord, identity_of};
///
/// let legacy: RawRecord = serde_json::from_str(r#"{"cca3":"DEU"}"#).unwrap();
/// assert_eq!(identity_of(&legacy), Some("DEU"));
/// assert_eq!(identity_of(&RawRecord::default()), None);
/// ```
#[must_use]
pub fn identity_of(record: &RawRecord) -> Option<&str> {
    trimmed(record.code.as_ref()).or_else(|| trimmed(record.cca3.as_ref()))
}

impl RawRecord {
    fn display_name(&self) -> Option<String> {
        match self.name.as_ref()? {
            RawName::Plain(name) => Some(name.clone()),
            RawName::Structured { common } => common.clone(),
        }
    }

    fn flag_url(&self) -> Option<String> {
        self.flag.clone().or_else(|| {
            self.flags
                .as_ref()
                .and_then(|flags| flags.png.clone().or_else(|| flags.svg.clone()))
        })
    }

    /// Normalise into a canonical record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidCountry`] when neither `code` nor `cca3`
    /// is usable.
    pub fn into_favorite(self) -> Result<FavoriteCountry, ClientError> {
        let code = identity_of(&self)
            .ok_or_else(|| ClientError::invalid_country("record has neither code nor cca3"))?
            .to_owned();
        FavoriteCountry::new(code, self.display_name(), self.flag_url())
    }
}

/// Normalise a decoded list, skipping records without an identity and later
/// duplicates of an identity already seen.
#[must_use]
pub fn ingest(records: Vec<RawRecord>, source: &'static str) -> Vec<FavoriteCountry> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter_map(|record| match record.into_favorite() {
            Ok(favorite) => Some(favorite),
            Err(error) => {
                warn!(source, %error, "skipping record without identity");
                None
            }
        })
        .filter(|favorite| {
            let fresh = seen.insert(favorite.code().to_owned());
            if !fresh {
                debug!(source, code = favorite.code(), "dropping duplicate record");
            }
            fresh
        })
        .collect()
}

/// Whether `favorites` already holds `code`.
#[must_use]
pub fn contains(favorites: &[FavoriteCountry], code: &str) -> bool {
    let wanted = code.trim();
    favorites.iter().any(|favorite| favorite.code() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawRecord {
        serde_json::from_value(value).expect("record decodes")
    }

    #[rstest]
    #[case(json!({"code": "DEU"}), Some("DEU"))]
    #[case(json!({"cca3": "DEU"}), Some("DEU"))]
    #[case(json!({"code": " FRA ", "cca3": "DEU"}), Some("FRA"))]
    #[case(json!({"code": "  ", "cca3": "DEU"}), Some("DEU"))]
    #[case(json!({"code": null, "cca3": null}), None)]
    #[case(json!({"name": "Germany"}), None)]
    fn identity_prefers_code_then_cca3(
        #[case] value: serde_json::Value,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(identity_of(&raw(value)), expected);
    }

    #[rstest]
    fn rest_countries_shape_normalises() {
        let record = raw(json!({
            "cca3": "JPN",
            "name": {"common": "Japan", "official": "Japan"},
            "flags": {"png": "https://flagcdn.com/w320/jp.png", "svg": "https://flagcdn.com/jp.svg"}
        }));

        let favorite = record.into_favorite().expect("identity present");
        assert_eq!(favorite.code(), "JPN");
        assert_eq!(favorite.name(), Some("Japan"));
        assert_eq!(favorite.flag(), Some("https://flagcdn.com/w320/jp.png"));
    }

    #[rstest]
    fn canonical_shape_round_trips_without_absent_fields() {
        let favorite = raw(json!({"code": "DEU", "name": "Germany", "flag": null}))
            .into_favorite()
            .expect("identity present");

        assert_eq!(
            serde_json::to_value(&favorite).expect("serialise"),
            json!({"code": "DEU", "name": "Germany"})
        );
    }

    #[rstest]
    fn ingest_skips_anonymous_and_duplicate_records() {
        let records = vec![
            raw(json!({"code": "DEU", "name": "Germany"})),
            raw(json!({"name": "Nowhere"})),
            raw(json!({"cca3": "DEU", "name": "Deutschland"})),
            raw(json!({"cca3": "FRA"})),
        ];

        let favorites = ingest(records, "test");
        let codes: Vec<&str> = favorites.iter().map(FavoriteCountry::code).collect();
        assert_eq!(codes, ["DEU", "FRA"]);
        assert_eq!(favorites[0].name(), Some("Germany"));
    }

    #[rstest]
    fn blank_display_fields_become_absent() {
        let favorite =
            FavoriteCountry::new("DEU", Some(" ".to_owned()), Some(String::new())).expect("valid");
        assert_eq!(favorite.name(), None);
        assert_eq!(favorite.flag(), None);
    }
}
