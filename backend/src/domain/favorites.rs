//! Favorite country records and the toggle rule shared by every store.
//!
//! A user's favorites form an ordered collection keyed by [`CountryCode`].
//! Records are appended at the end and removed in place, so the remaining
//! entries keep their relative order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Message returned when a toggle inserted a record.
pub const ADDED_MESSAGE: &str = "Country added to favorites successfully.";
/// Message returned when a toggle removed a record.
pub const REMOVED_MESSAGE: &str = "Country removed from favorites successfully.";

/// Validation errors for favorite records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FavoriteValidationError {
    /// The country code was missing or blank.
    #[error("Country code is required.")]
    EmptyCountryCode,
}

/// Country identifier (ISO 3166-1 alpha-3, e.g. `DEU`).
///
/// Surrounding whitespace is trimmed; comparison is otherwise exact.
///
/// # Examples
/// ```
/// use explorer_backend::domain::CountryCode;
///
/// let code = CountryCode::new(" DEU ").unwrap();
/// assert_eq!(code.as_ref(), "DEU");
/// assert!(CountryCode::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Validate and construct a country code.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FavoriteValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(FavoriteValidationError::EmptyCountryCode);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CountryCode> for String {
    fn from(value: CountryCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for CountryCode {
    type Error = FavoriteValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A user's saved reference to a country.
///
/// `name` and `flag` are denormalised copies taken when the record was
/// created; blank values are stored as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteCountry {
    code: CountryCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flag: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

impl FavoriteCountry {
    /// Build a record, discarding blank display fields.
    #[must_use]
    pub fn new(code: CountryCode, name: Option<String>, flag: Option<String>) -> Self {
        Self {
            code,
            name: non_blank(name),
            flag: non_blank(flag),
        }
    }

    /// Unique key within a user's collection.
    #[must_use]
    pub const fn code(&self) -> &CountryCode {
        &self.code
    }

    /// Display name captured at toggle time.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Flag image URL captured at toggle time.
    #[must_use]
    pub fn flag(&self) -> Option<&str> {
        self.flag.as_deref()
    }
}

/// Result of a toggle: the full list after the change and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleOutcome {
    /// Favorites after the toggle, in collection order.
    pub favorites: Vec<FavoriteCountry>,
    /// `true` when the record was inserted, `false` when removed.
    pub added: bool,
}

impl ToggleOutcome {
    /// Human-readable confirmation for the toggle direction.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        if self.added {
            ADDED_MESSAGE
        } else {
            REMOVED_MESSAGE
        }
    }
}

/// Apply the toggle rule to an in-memory collection.
///
/// Removes the first record whose code matches `candidate`, or appends
/// `candidate` when none does. Stores that cannot run this inside a single
/// atomic step must reproduce it with their own primitive.
///
/// # Examples
/// ```
/// use explorer_backend::domain::{CountryCode, FavoriteCountry, toggle_favorite};
///
/// let deu = FavoriteCountry::new(CountryCode::new("DEU").unwrap(), None, None);
/// let added = toggle_favorite(Vec::new(), deu.clone());
/// assert!(added.added);
/// let removed = toggle_favorite(added.favorites, deu);
/// assert!(!removed.added);
/// assert!(removed.favorites.is_empty());
/// ```
#[must_use]
pub fn toggle_favorite(
    mut favorites: Vec<FavoriteCountry>,
    candidate: FavoriteCountry,
) -> ToggleOutcome {
    match favorites
        .iter()
        .position(|existing| existing.code == candidate.code)
    {
        Some(index) => {
            favorites.remove(index);
            ToggleOutcome {
                favorites,
                added: false,
            }
        }
        None => {
            favorites.push(candidate);
            ToggleOutcome {
                favorites,
                added: true,
            }
        }
    }
}
