//! Client-side favorites for the country explorer.
//!
//! [`Reconciler`] gives UI code one favorites list and one toggle action. When
//! the user is signed in it talks to the favorites API through
//! [`RemoteBackend`]; otherwise, or whenever the API call fails, it works
//! against [`LocalBackend`] over a [`LocalCache`]. Records from every source
//! are normalised with [`identity_of`], so legacy cache entries keyed `cca3`
//! and REST Countries listings compare equal to server records keyed `code`.
//!
//! ```no_run
//! use favorites_client::{
//!     AuthState, ClientSettings, FileCache, LocalBackend, Reconciler, RemoteBackend,
//! };
//! use ortho_config::OrthoConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ClientSettings::load_from_iter(std::env::args_os())?;
//! let remote = RemoteBackend::from_settings(&settings)?;
//! remote.login("admin", "password").await?;
//!
//! let local = LocalBackend::new(FileCache::open(&settings.cache_dir())?);
//! let mut favorites = Reconciler::new(remote, local, AuthState::Authenticated);
//! let report = favorites.get_favorites().await;
//! println!("{} favorites from {:?}", report.favorites.len(), report.source);
//! # Ok(())
//! # }
//! ```

mod backend;
mod cache;
mod config;
mod countries;
mod error;
mod http;
mod local;
mod reconciler;
mod record;
mod remote;

pub use backend::{BackendKind, FavoritesBackend, ToggleOutcome};
pub use cache::{FAVORITES_KEY, FileCache, LocalCache, MemoryCache};
pub use config::ClientSettings;
pub use countries::{CountryDetails, CountrySummary, RestCountriesClient};
pub use error::ClientError;
pub use local::{LocalBackend, toggle_in};
pub use reconciler::{AuthState, FavoritesReport, Reconciler, ToggleReport};
pub use record::{FavoriteCountry, RawFlags, RawName, RawRecord, identity_of, ingest};
pub use remote::RemoteBackend;
