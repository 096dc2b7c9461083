//! Flat key-value persistence for session fields.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store mirrors each field into one string key. Backends here
//! only move strings in and out; they never fail from the caller's point of
//! view. A backend that cannot read or write logs the problem and behaves as
//! if the key were absent, which the session treats as "unauthenticated".

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A string-to-string store with `localStorage` semantics.
pub trait KeyValueStore {
    /// Read the value stored for `key`, if any.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str);

    /// Remove `key`. Removing an absent key is a no-op.
    fn remove_item(&mut self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) {
        (**self).set_item(key, value);
    }

    fn remove_item(&mut self, key: &str) {
        (**self).remove_item(key);
    }
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-local store. Contents are lost when dropped.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_owned(), value.to_owned());
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}

// =============================================================================
// FILE
// =============================================================================

/// Store backed by a flat JSON object on disk.
///
/// The file is read once when opened and rewritten after every mutation, so a
/// second `FileStorage` opened on the same path later sees the same values.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the store at `path`. Missing or malformed files start empty.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_owned();
        let items = load_items(&path);
        Self { path, items }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        if let Err(e) = write_items(&self.path, &self.items) {
            tracing::warn!(path = %self.path.display(), error = %e, "session file write failed");
        }
    }
}

impl KeyValueStore for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_owned(), value.to_owned());
        self.flush();
    }

    fn remove_item(&mut self, key: &str) {
        if self.items.remove(key).is_some() {
            self.flush();
        }
    }
}

fn load_items(path: &Path) -> BTreeMap<String, String> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "session file unreadable; starting empty");
            return BTreeMap::new();
        }
    };
    if raw.trim().is_empty() {
        return BTreeMap::new();
    }
    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "session file malformed; starting empty");
            BTreeMap::new()
        }
    }
}

fn write_items(path: &Path, items: &BTreeMap<String, String>) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(items)?;
    fs::write(path, raw)
}

// =============================================================================
// BROWSER
// =============================================================================

/// Store backed by the browser's `window.localStorage`.
///
/// Every failure (no window, storage disabled, quota exceeded) degrades to
/// "absent" for reads and a dropped write.
///
/// Only reachable in a browser: build with `--features hydrate` for
/// `wasm32-unknown-unknown`. `web-sys` imports abort on native targets, so the
/// `KeyValueStore` contract is exercised natively through `MemoryStorage`
/// and `FileStorage`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if storage.set_item(key, value).is_err() {
            tracing::warn!(key, "localStorage write failed");
        }
    }

    fn remove_item(&mut self, key: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if storage.remove_item(key).is_err() {
            tracing::warn!(key, "localStorage remove failed");
        }
    }
}
