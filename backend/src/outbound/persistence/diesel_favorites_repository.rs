//! PostgreSQL-backed `FavoritesRepository` implementation using Diesel ORM.
//!
//! The toggle runs in one transaction that first locks the owning `users`
//! row. Concurrent toggles for the same user therefore serialise on that
//! lock, while the `(user_id, code)` primary key keeps duplicates out even if
//! a writer bypasses the adapter.

use async_trait::async_trait;
use diesel::dsl;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{FavoritesRepository, FavoritesRepositoryError};
use crate::domain::{CountryCode, FavoriteCountry, ToggleOutcome, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{FavoriteCountryRow, NewFavoriteCountryRow};
use super::pool::{DbPool, PoolError};
use super::schema::{favorite_countries, users};

/// Diesel-backed implementation of the `FavoritesRepository` port.
#[derive(Clone)]
pub struct DieselFavoritesRepository {
    pool: DbPool,
}

impl DieselFavoritesRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> FavoritesRepositoryError {
    map_pool_error(error, FavoritesRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> FavoritesRepositoryError {
    map_diesel_error(
        error,
        FavoritesRepositoryError::query,
        FavoritesRepositoryError::connection,
    )
}

fn row_to_favorite(row: FavoriteCountryRow) -> Result<FavoriteCountry, FavoritesRepositoryError> {
    let code = CountryCode::new(&row.code).map_err(|err| {
        FavoritesRepositoryError::query(format!("stored favorite has invalid code: {err}"))
    })?;
    Ok(FavoriteCountry::new(code, row.name, row.flag))
}

fn rows_to_favorites(
    rows: Vec<FavoriteCountryRow>,
) -> Result<Vec<FavoriteCountry>, FavoritesRepositoryError> {
    rows.into_iter().map(row_to_favorite).collect()
}

type OwnedFavorites = dsl::Order<
    dsl::Filter<favorite_countries::table, dsl::Eq<favorite_countries::user_id, Uuid>>,
    favorite_countries::seq,
>;

/// Rows owned by `owner` in collection order.
///
/// `seq` is drawn after the `users` row lock is taken, so it follows the
/// order in which toggles acquired that lock. Timestamps are not an ordering
/// key: `now()` would be the transaction start and can run backwards across
/// queued toggles.
fn owned_favorites(owner: Uuid) -> OwnedFavorites {
    favorite_countries::table
        .filter(favorite_countries::user_id.eq(owner))
        .order_by(favorite_countries::seq)
}

async fn load_favorites(
    conn: &mut AsyncPgConnection,
    owner: Uuid,
) -> QueryResult<Vec<FavoriteCountryRow>> {
    owned_favorites(owner)
        .select(FavoriteCountryRow::as_select())
        .load(conn)
        .await
}

#[async_trait]
impl FavoritesRepository for DieselFavoritesRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Vec<FavoriteCountry>>, FavoritesRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let owner = *user_id.as_uuid();

        let rows = conn
            .transaction(|conn| {
                async move {
                    let exists: Option<Uuid> = users::table
                        .find(owner)
                        .select(users::id)
                        .first(conn)
                        .await
                        .optional()?;
                    match exists {
                        Some(_) => load_favorites(conn, owner).await.map(Some),
                        None => Ok(None),
                    }
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        rows.map(rows_to_favorites).transpose()
    }

    async fn toggle(
        &self,
        user_id: &UserId,
        favorite: &FavoriteCountry,
    ) -> Result<Option<ToggleOutcome>, FavoritesRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let owner = *user_id.as_uuid();
        let code = favorite.code().as_ref();
        let new_row = NewFavoriteCountryRow {
            user_id: owner,
            code,
            name: favorite.name(),
            flag: favorite.flag(),
        };

        let result = conn
            .transaction(|conn| {
                async move {
                    let locked: Option<Uuid> = users::table
                        .find(owner)
                        .select(users::id)
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    if locked.is_none() {
                        return Ok(None);
                    }

                    let removed = diesel::delete(
                        favorite_countries::table
                            .filter(favorite_countries::user_id.eq(owner))
                            .filter(favorite_countries::code.eq(code)),
                    )
                    .execute(conn)
                    .await?;
                    let added = removed == 0;
                    if added {
                        diesel::insert_into(favorite_countries::table)
                            .values(&new_row)
                            .execute(conn)
                            .await?;
                    }

                    let rows = load_favorites(conn, owner).await?;
                    Ok(Some((rows, added)))
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        result
            .map(|(rows, added)| {
                Ok(ToggleOutcome {
                    favorites: rows_to_favorites(rows)?,
                    added,
                })
            })
            .transpose()
    }
}
