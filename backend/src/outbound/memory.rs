//! Process-local favorites store used when no database is configured.
//!
//! Users and their favorites live in one map behind a single mutex, so each
//! toggle reads and writes a collection under one guard. Data does not
//! survive a restart.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    FavoritesRepository, FavoritesRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{FavoriteCountry, ToggleOutcome, User, UserId, toggle_favorite};

#[derive(Debug)]
struct Account {
    user: User,
    favorites: Vec<FavoriteCountry>,
}

/// In-memory implementation of the favorites and user ports.
#[derive(Debug, Default)]
pub struct InMemoryFavoritesStore {
    accounts: Mutex<HashMap<UserId, Account>>,
}

const POISONED: &str = "in-memory store lock poisoned";

impl InMemoryFavoritesStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Option<MutexGuard<'_, HashMap<UserId, Account>>> {
        self.accounts.lock().ok()
    }
}

#[async_trait]
impl FavoritesRepository for InMemoryFavoritesStore {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Vec<FavoriteCountry>>, FavoritesRepositoryError> {
        let accounts = self
            .lock()
            .ok_or_else(|| FavoritesRepositoryError::query(POISONED))?;
        Ok(accounts
            .get(user_id)
            .map(|account| account.favorites.clone()))
    }

    async fn toggle(
        &self,
        user_id: &UserId,
        favorite: &FavoriteCountry,
    ) -> Result<Option<ToggleOutcome>, FavoritesRepositoryError> {
        let mut accounts = self
            .lock()
            .ok_or_else(|| FavoritesRepositoryError::query(POISONED))?;
        let Some(account) = accounts.get_mut(user_id) else {
            return Ok(None);
        };
        let current = std::mem::take(&mut account.favorites);
        let outcome = toggle_favorite(current, favorite.clone());
        account.favorites.clone_from(&outcome.favorites);
        Ok(Some(outcome))
    }
}

#[async_trait]
impl UserRepository for InMemoryFavoritesStore {
    async fn insert_if_absent(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let mut accounts = self
            .lock()
            .ok_or_else(|| UserPersistenceError::query(POISONED))?;
        if accounts.contains_key(user.id()) {
            return Ok(false);
        }
        accounts.insert(
            user.id().clone(),
            Account {
                user: user.clone(),
                favorites: Vec::new(),
            },
        );
        Ok(true)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let accounts = self
            .lock()
            .ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(accounts.get(id).map(|account| account.user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{CountryCode, Username};
    use rstest::{fixture, rstest};

    fn record(code: &str) -> FavoriteCountry {
        FavoriteCountry::new(CountryCode::new(code).expect("code"), None, None)
    }

    fn codes(favorites: &[FavoriteCountry]) -> Vec<&str> {
        favorites.iter().map(|f| f.code().as_ref()).collect()
    }

    #[fixture]
    fn user() -> User {
        User::new(UserId::random(), Username::new("ada").expect("username"))
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_user_has_no_collection(user: User) {
        let store = InMemoryFavoritesStore::new();

        assert_eq!(store.find_by_user_id(user.id()).await.expect("read"), None);
        assert_eq!(
            store.toggle(user.id(), &record("DEU")).await.expect("toggle"),
            None
        );
    }

    #[rstest]
    #[tokio::test]
    async fn new_user_starts_empty_and_keeps_insertion_order(user: User) {
        let store = InMemoryFavoritesStore::new();
        store.insert_if_absent(&user).await.expect("insert");

        assert_eq!(
            store.find_by_user_id(user.id()).await.expect("read"),
            Some(Vec::new())
        );
        for code in ["DEU", "FRA", "JPN"] {
            store.toggle(user.id(), &record(code)).await.expect("toggle");
        }
        let removed = store
            .toggle(user.id(), &record("FRA"))
            .await
            .expect("toggle")
            .expect("user exists");

        assert!(!removed.added);
        assert_eq!(codes(&removed.favorites), ["DEU", "JPN"]);
        let stored = store
            .find_by_user_id(user.id())
            .await
            .expect("read")
            .expect("user exists");
        assert_eq!(stored, removed.favorites);
    }

    #[rstest]
    #[tokio::test]
    async fn repeated_insert_keeps_existing_favorites(user: User) {
        let store = InMemoryFavoritesStore::new();
        assert!(store.insert_if_absent(&user).await.expect("insert"));
        store.toggle(user.id(), &record("DEU")).await.expect("toggle");

        let renamed = User::new(user.id().clone(), Username::new("grace").expect("username"));
        assert!(!store.insert_if_absent(&renamed).await.expect("second insert"));

        let stored = store
            .find_by_user_id(user.id())
            .await
            .expect("read")
            .expect("user exists");
        assert_eq!(codes(&stored), ["DEU"]);
        assert_eq!(store.find_by_id(user.id()).await.expect("read"), Some(user));
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_toggles_of_one_code_never_duplicate(user: User) {
        let store = Arc::new(InMemoryFavoritesStore::new());
        store.insert_if_absent(&user).await.expect("insert");

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                let id = user.id().clone();
                tokio::spawn(async move { store.toggle(&id, &record("DEU")).await })
            })
            .collect();
        for handle in handles {
            handle.await.expect("join").expect("toggle");
        }

        let stored = store
            .find_by_user_id(user.id())
            .await
            .expect("read")
            .expect("user exists");
        assert!(stored.is_empty(), "an even number of toggles cancels out");
    }
}
