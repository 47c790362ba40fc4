//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - User / UserId (aliases to `user::*`) — owner of a favorites collection.
//! - FavoriteCountry / CountryCode (aliases to `favorites::*`) — saved
//!   country records and the toggle rule.
//! - FavoritesService — implementation of the favorites driving ports.
//! - AccountLoginService — fixture login that provisions the user record.
//! - TraceId — per-request correlation identifier.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod favorites;
pub mod favorites_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountLoginService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::favorites::{
    ADDED_MESSAGE, CountryCode, FavoriteCountry, FavoriteValidationError, REMOVED_MESSAGE,
    ToggleOutcome, toggle_favorite,
};
pub use self::favorites_service::{FavoritesService, USER_NOT_FOUND_MESSAGE};
pub use self::trace_id::TraceId;
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};
