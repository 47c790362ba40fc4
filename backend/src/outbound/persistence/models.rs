//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; repositories convert them
//! to domain values before returning.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{favorite_countries, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub display_name: &'a str,
}

/// Row struct for reading favorites in list order.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = favorite_countries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FavoriteCountryRow {
    pub code: String,
    pub name: Option<String>,
    pub flag: Option<String>,
}

/// Insertable struct for appending a favorite.
///
/// `created_at` and `seq` come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = favorite_countries)]
pub(crate) struct NewFavoriteCountryRow<'a> {
    pub user_id: Uuid,
    pub code: &'a str,
    pub name: Option<&'a str>,
    pub flag: Option<&'a str>,
}
