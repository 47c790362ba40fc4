//! Login credentials accepted by the session endpoint.
//!
//! The username goes through the same [`Username`] rules as stored users, so
//! a name that could never be provisioned is rejected before any lookup.

use zeroize::Zeroizing;

use super::user::{UserValidationError, Username};

/// Why a login payload was rejected before authentication.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// The username failed [`Username`] validation.
    #[error(transparent)]
    Username(#[from] UserValidationError),
    /// The password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// A username and password pair ready for a [`crate::domain::ports::LoginService`].
///
/// The password keeps its whitespace and is wiped from memory on drop.
///
/// # Examples
/// ```
/// use explorer_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "password").unwrap();
/// assert_eq!(creds.username(), "admin");
/// assert!(creds.matches("admin", "password"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw form values.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let validated = Username::new(username)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: validated,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Trimmed username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_ref()
    }

    /// Password exactly as supplied.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Whether these credentials equal the given pair exactly.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username() == username && self.password() == password
    }
}
