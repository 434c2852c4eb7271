// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key-value snapshot store.
//!
//! Each key holds one JSON document:
//! - Directory backend: `<data_dir>/<key>.json`, written via temp file + rename
//! - Memory backend: an in-process map, for tests and dry runs
//!
//! Reads never fail: a missing or unparseable document loads as the type's
//! default so a changed shape falls back to an empty state.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Errors from store writes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("In-memory store lock poisoned")]
    Poisoned,
}

#[derive(Clone)]
enum Backend {
    Dir(PathBuf),
    Memory(Arc<Mutex<HashMap<String, String>>>),
}

/// Snapshot store client.
#[derive(Clone)]
pub struct LocalStore {
    backend: Backend,
}

impl LocalStore {
    /// Store documents as JSON files under `data_dir`.
    ///
    /// The directory is created on first write.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Self {
        let dir = data_dir.as_ref().to_path_buf();
        tracing::info!(path = %dir.display(), "Using file store");
        Self {
            backend: Backend::Dir(dir),
        }
    }

    /// Create an empty in-memory store.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(Mutex::new(HashMap::new()))),
        }
    }

    fn path_for(dir: &Path, key: &str) -> PathBuf {
        dir.join(format!("{}.json", key))
    }

    /// Raw JSON stored under `key`, if any.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        match &self.backend {
            Backend::Dir(dir) => match fs::read_to_string(Self::path_for(dir, key)) {
                Ok(contents) => Some(contents),
                Err(e) if e.kind() == ErrorKind::NotFound => None,
                Err(e) => {
                    tracing::warn!(key, error = %e, "Failed to read snapshot");
                    None
                }
            },
            Backend::Memory(map) => match map.lock() {
                Ok(map) => map.get(key).cloned(),
                Err(_) => {
                    tracing::warn!(key, "In-memory store lock poisoned");
                    None
                }
            },
        }
    }

    /// Replace the raw JSON stored under `key`.
    pub fn put_raw(&self, key: &str, contents: &str) -> Result<(), StoreError> {
        match &self.backend {
            Backend::Dir(dir) => {
                let io_err = |source| StoreError::Io {
                    key: key.to_string(),
                    source,
                };
                fs::create_dir_all(dir).map_err(io_err)?;

                let path = Self::path_for(dir, key);
                let tmp = path.with_extension("json.tmp");
                fs::write(&tmp, contents).map_err(io_err)?;
                fs::rename(&tmp, &path).map_err(io_err)?;
            }
            Backend::Memory(map) => {
                map.lock()
                    .map_err(|_| StoreError::Poisoned)?
                    .insert(key.to_string(), contents.to_string());
            }
        }
        Ok(())
    }

    /// Load the document under `key`, or the default if it is missing or
    /// does not parse.
    pub fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let Some(raw) = self.get_raw(key) else {
            tracing::debug!(key, "No snapshot, using defaults");
            return T::default();
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Unparseable snapshot, using defaults");
                T::default()
            }
        }
    }

    /// Load the document under `key`, distinguishing "no data" from data.
    pub fn load_opt<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Unparseable snapshot, ignoring");
                None
            }
        }
    }

    /// Serialize `value` and store it under `key`.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.put_raw(key, &json)?;
        tracing::debug!(key, bytes = json.len(), "Saved snapshot");
        Ok(())
    }
}
