//! Error type shared by every client component.

use thiserror::Error;

/// Failures raised by the favorites client.
///
/// The reconciler treats every variant coming from the remote path as a
/// reason to fall back to the local cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("network error: {message}")]
    Network {
        /// Transport failure description.
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("server responded {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message from the error body, or a preview of the raw body.
        message: String,
    },

    /// A response body could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode {
        /// Decoder failure description.
        message: String,
    },

    /// The local cache could not be read or written.
    #[error("local cache error for '{key}': {message}")]
    Cache {
        /// Cache key being accessed.
        key: String,
        /// Underlying failure description.
        message: String,
    },

    /// A country record has no usable identity.
    #[error("invalid country: {message}")]
    InvalidCountry {
        /// Why the record was rejected.
        message: String,
    },

    /// A configured value could not be used.
    #[error("invalid configuration for {field}: {message}")]
    Config {
        /// Setting name.
        field: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

impl ClientError {
    pub(crate) fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub(crate) fn cache(key: &str, message: impl Into<String>) -> Self {
        Self::Cache {
            key: key.to_owned(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_country(message: impl Into<String>) -> Self {
        Self::InvalidCountry {
            message: message.into(),
        }
    }

    pub(crate) fn config(field: &'static str, message: impl Into<String>) -> Self {
        Self::Config {
            field,
            message: message.into(),
        }
    }
}
