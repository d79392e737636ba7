//! Durable string key-value storage backed by one file per key.
//!
//! This is the persistence layer underneath the roster cache: values are
//! opaque strings, keys map to files under a single directory, and there is
//! no expiry of any kind.

use crate::Result;
use ohno::IntoAppError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A directory-backed string key-value store.
#[derive(Debug, Clone)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    /// Create a store rooted at `dir`. The directory is created lazily on the
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the storage directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read the value stored under `key`, or `None` if the key is absent.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).into_app_err_with(|| format!("unable to read storage key '{key}'")),
        }
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).into_app_err_with(|| format!("unable to create storage directory '{}'", self.dir.display()))?;
        fs::write(self.key_path(key), value).into_app_err_with(|| format!("unable to write storage key '{key}'"))
    }

    /// Remove `key`. Removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).into_app_err_with(|| format!("unable to remove storage key '{key}'")),
        }
    }

    /// Whether `key` currently holds a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.key_path(key).is_file()
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(sanitize_key(key))
    }
}

/// Sanitize a key for use as a file name.
///
/// Removes path traversal sequences and dangerous characters so a hostile key
/// cannot escape the storage directory.
fn sanitize_key(key: &str) -> String {
    // Replace ".." but allow single "." so dotted keys survive intact
    let key = key.replace("..", "__");
    key.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_")
}
