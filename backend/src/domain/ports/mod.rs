//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod favorites_command;
mod favorites_query;
mod favorites_repository;
mod login_service;
mod user_repository;

#[cfg(test)]
pub use favorites_command::MockFavoritesCommand;
pub use favorites_command::{FavoritesCommand, FixtureFavoritesCommand, ToggleFavoriteRequest};
#[cfg(test)]
pub use favorites_query::MockFavoritesQuery;
pub use favorites_query::{FavoritesQuery, FixtureFavoritesQuery};
#[cfg(test)]
pub use favorites_repository::MockFavoritesRepository;
pub use favorites_repository::{
    FavoritesRepository, FavoritesRepositoryError, FixtureFavoritesRepository,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{
    FIXTURE_LOGIN_PASSWORD, FIXTURE_LOGIN_USER_ID, FIXTURE_LOGIN_USERNAME, FixtureLoginService,
    LoginService,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
