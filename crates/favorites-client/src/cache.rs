//! Local key-value storage for the favorites mirror.
//!
//! [`FileCache`] keeps one `{key}.json` file per key inside a capability
//! directory and replaces files atomically, so a crash mid-write leaves the
//! previous value intact. [`MemoryCache`] backs tests and short-lived tools.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;

use crate::error::ClientError;

/// Key under which the favorites mirror is stored.
pub const FAVORITES_KEY: &str = "favoriteCountries";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Synchronous string store keyed by name.
#[cfg_attr(test, mockall::automock)]
pub trait LocalCache: Send + Sync {
    /// Read the value stored under `key`, or `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Cache`] when the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, ClientError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Cache`] when the store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;
}

/// File-backed cache rooted at a directory.
#[derive(Debug)]
pub struct FileCache {
    root: Utf8PathBuf,
    dir: Dir,
}

impl FileCache {
    /// Open (creating if needed) the cache directory.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Cache`] when the directory cannot be created or
    /// opened.
    pub fn open(root: &Utf8Path) -> Result<Self, ClientError> {
        let authority = ambient_authority();
        Dir::create_ambient_dir_all(root, authority)
            .map_err(|err| ClientError::cache(root.as_str(), err.to_string()))?;
        let dir = Dir::open_ambient_dir(root, authority)
            .map_err(|err| ClientError::cache(root.as_str(), err.to_string()))?;
        Ok(Self {
            root: root.to_path_buf(),
            dir,
        })
    }

    /// Directory holding the cache files.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn file_name(key: &str) -> Result<String, ClientError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
        if valid {
            Ok(format!("{key}.json"))
        } else {
            Err(ClientError::cache(
                key,
                "keys may only contain ASCII letters, digits, '_' and '-'",
            ))
        }
    }

    fn write_atomic(&self, key: &str, file_name: &str, contents: &str) -> Result<(), ClientError> {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        let tmp_name = format!(
            ".{file_name}.tmp.{}.{suffix}.{counter}",
            std::process::id()
        );

        self.write_temp(&tmp_name, contents)
            .map_err(|err| ClientError::cache(key, err.to_string()))?;
        if let Err(err) = replace(&self.dir, &tmp_name, file_name) {
            drop(self.dir.remove_file(&tmp_name));
            return Err(ClientError::cache(key, err.to_string()));
        }
        // Durability of the rename is best effort.
        if let Ok(handle) = self.dir.open(".") {
            drop(handle.sync_all());
        }
        Ok(())
    }

    fn write_temp(&self, tmp_name: &str, contents: &str) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = self.dir.open_with(tmp_name, &options)?;
        let written = file
            .write_all(contents.as_bytes())
            .and_then(|()| file.sync_all());
        if written.is_err() {
            drop(file);
            drop(self.dir.remove_file(tmp_name));
        }
        written
    }
}

#[cfg(windows)]
fn replace(dir: &Dir, tmp_name: &str, target: &str) -> io::Result<()> {
    match dir.remove_file(target) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target)
}

#[cfg(not(windows))]
fn replace(dir: &Dir, tmp_name: &str, target: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target)
}

impl LocalCache for FileCache {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        let file_name = Self::file_name(key)?;
        match self.dir.read_to_string(&file_name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(key, root = %self.root, "cache miss");
                Ok(None)
            }
            Err(err) => Err(ClientError::cache(key, err.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let file_name = Self::file_name(key)?;
        self.write_atomic(key, &file_name, value)
    }
}

/// In-process cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache pre-populated with `key` holding `value`.
    #[must_use]
    pub fn with_entry(key: &str, value: impl Into<String>) -> Self {
        let cache = Self::new();
        if let Ok(mut entries) = cache.entries.lock() {
            entries.insert(key.to_owned(), value.into());
        }
        cache
    }
}

impl LocalCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| ClientError::cache(key, "cache lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| ClientError::cache(key, "cache lock poisoned"))?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
