//! Persistent key/value store
//!
//! The `KeyStore` bridges in-memory state and durable storage. Values are
//! JSON-encoded, one file per key under `Config::store_dir()`, with an
//! in-memory cache in front so a value written in this process is always
//! readable back even when the disk write failed.
//!
//! Uses atomic writes (write to temp file, then rename) to prevent corruption.
//!
//! Reads are fail-soft: a missing key yields the caller's default, and a
//! stored value that is not valid JSON (or has the wrong shape) is logged and
//! replaced by the default rather than surfaced as an error.
//!
//! ## Usage
//!
//! ```ignore
//! let store = KeyStore::open(config)?;
//!
//! store.write(keys::LAST_TAB, &"blog".to_string());
//! let tab: String = store.read(keys::LAST_TAB, String::new());
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::config::Config;
use crate::keys;

/// Change listener for a single key.
///
/// Listeners run synchronously inside `write`/`remove` and must not mutate
/// the store or register new listeners (single-threaded, re-entrancy would
/// hit the interior `RefCell`s).
type Listener = Box<dyn Fn(&Value)>;

/// String-keyed JSON store with an in-memory cache and change listeners
pub struct KeyStore {
    config: Config,
    cache: RefCell<HashMap<String, Value>>,
    listeners: RefCell<HashMap<String, Vec<Listener>>>,
}

impl KeyStore {
    /// Open the store, creating the backing directory if needed
    pub fn open(config: Config) -> Result<Self> {
        let dir = config.store_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create store directory {:?}", dir))?;
        }
        Ok(Self {
            config,
            cache: RefCell::new(HashMap::new()),
            listeners: RefCell::new(HashMap::new()),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read the value for `key`, or `default` if the key is absent
    ///
    /// Absence does NOT write the default back; the store is only ever
    /// mutated by an explicit `write`. A stored value that fails to parse
    /// as JSON, or parses but doesn't match `T`, falls back to `default`
    /// with a warning.
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let value = match self.current_value(key) {
            Some(v) => v,
            None => return default,
        };

        match serde_json::from_value(value) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("stored value for '{}' has unexpected shape, using default: {}", key, e);
                default
            }
        }
    }

    /// Write `value` under `key`, best-effort
    ///
    /// The in-memory cache always reflects the attempted write, so the
    /// process stays usable even when persistence fails (disk full, storage
    /// unavailable); the failure is logged, not propagated.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.write_required(key, value) {
            warn!("best-effort write for '{}' failed: {:#}", key, e);
        }
    }

    /// Write `value` under `key`, propagating persistence failure
    ///
    /// Used where best-effort is not acceptable (the account record). The
    /// cache is still updated before the disk write is attempted.
    pub fn write_required<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .with_context(|| format!("Failed to serialize value for '{}'", key))?;

        self.cache.borrow_mut().insert(key.to_string(), value.clone());
        self.notify(key, &value);

        let json = serde_json::to_string(&value)
            .with_context(|| format!("Failed to encode value for '{}'", key))?;
        atomic_write(&self.key_path(key), json.as_bytes())
            .with_context(|| format!("Failed to persist '{}'", key))?;
        Ok(())
    }

    /// Remove `key` from the cache and from disk
    pub fn remove(&self, key: &str) {
        self.cache.borrow_mut().remove(key);

        let path = self.key_path(key);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                warn!("failed to remove stored file for '{}': {}", key, e);
            }
        }

        self.notify(key, &Value::Null);
    }

    /// Check whether a value exists for `key` (in cache or on disk)
    pub fn contains(&self, key: &str) -> bool {
        self.cache.borrow().contains_key(key) || self.key_path(key).exists()
    }

    /// Read the raw JSON text stored under `key`, if any
    ///
    /// Bypasses the fail-soft default path; the seeder uses this to decide
    /// between "first run" and "present but needs normalization".
    pub fn read_raw(&self, key: &str) -> Option<String> {
        if let Some(value) = self.cache.borrow().get(key) {
            return serde_json::to_string(value).ok();
        }

        let path = self.key_path(key);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!("failed to read stored file for '{}': {}", key, e);
                None
            }
        }
    }

    /// Register a change listener for `key`
    ///
    /// The listener fires after every in-memory update for that key: with
    /// the new value on `write`, and with `Value::Null` on `remove`.
    pub fn subscribe<F: Fn(&Value) + 'static>(&self, key: &str, listener: F) {
        self.listeners
            .borrow_mut()
            .entry(key.to_string())
            .or_default()
            .push(Box::new(listener));
    }

    /// Delete every known key
    ///
    /// This is the full store reset: it destroys the account record along
    /// with all content. Use with caution!
    pub fn reset(&self) {
        for key in keys::ALL {
            self.remove(key);
        }
    }

    /// Current JSON value for `key`: cache first, then disk
    ///
    /// Disk reads populate the cache so later reads skip the filesystem.
    fn current_value(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.cache.borrow().get(key) {
            return Some(value.clone());
        }

        let raw = self.read_raw(key)?;
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => {
                self.cache
                    .borrow_mut()
                    .insert(key.to_string(), value.clone());
                Some(value)
            }
            Err(e) => {
                warn!("stored value for '{}' is not valid JSON, using default: {}", key, e);
                None
            }
        }
    }

    fn notify(&self, key: &str, value: &Value) {
        let listeners = self.listeners.borrow();
        if let Some(subs) = listeners.get(key) {
            for listener in subs {
                listener(value);
            }
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.config.store_dir().join(format!("{}.json", key))
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)
        .with_context(|| format!("Failed to create temp file {:?}", temp_path))?;

    file.write_all(data)
        .with_context(|| format!("Failed to write to temp file {:?}", temp_path))?;

    file.sync_all()
        .with_context(|| format!("Failed to sync temp file {:?}", temp_path))?;

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename {:?} to {:?}", temp_path, path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn test_store(temp_dir: &TempDir) -> KeyStore {
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
        };
        KeyStore::open(config).unwrap()
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        store.write("ui.tab", &"gallery".to_string());
        let tab: String = store.read("ui.tab", String::new());
        assert_eq!(tab, "gallery");

        store.write("blog.posts", &vec![1u32, 2, 3]);
        let nums: Vec<u32> = store.read("blog.posts", Vec::new());
        assert_eq!(nums, vec![1, 2, 3]);
    }

    #[test]
    fn test_read_missing_key_returns_default_without_writing() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let value: String = store.read("profile.bio", "fallback".to_string());
        assert_eq!(value, "fallback");

        // The default must not have been written back
        assert!(!store.contains("profile.bio"));
        assert!(store.read_raw("profile.bio").is_none());
    }

    #[test]
    fn test_corrupt_stored_value_falls_back_to_default() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let path = temp_dir.path().join("store").join("profile.name.json");
        fs::write(&path, "{not json at all").unwrap();

        let value: String = store.read("profile.name", "default".to_string());
        assert_eq!(value, "default");
    }

    #[test]
    fn test_wrong_shape_falls_back_to_default() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        // Valid JSON, wrong type for the requested shape
        store.write("auth.session", &"yes".to_string());
        let flag: bool = store.read("auth.session", false);
        assert!(!flag);
    }

    #[test]
    fn test_last_write_wins() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        store.write("ui.tab", &"blog".to_string());
        store.write("ui.tab", &"about".to_string());

        let tab: String = store.read("ui.tab", String::new());
        assert_eq!(tab, "about");
    }

    #[test]
    fn test_remove_deletes_value_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        store.write("ui.tab", &"blog".to_string());
        assert!(store.contains("ui.tab"));

        store.remove("ui.tab");
        assert!(!store.contains("ui.tab"));

        let value: String = store.read("ui.tab", "gone".to_string());
        assert_eq!(value, "gone");
    }

    #[test]
    fn test_values_persist_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
        };

        {
            let store = KeyStore::open(config.clone()).unwrap();
            store.write("profile.name", &"Ada".to_string());
        }

        let store = KeyStore::open(config).unwrap();
        let name: String = store.read("profile.name", String::new());
        assert_eq!(name, "Ada");
    }

    #[test]
    fn test_subscribe_fires_on_write_and_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let seen = Rc::new(Cell::new(0u32));
        let last_was_null = Rc::new(Cell::new(false));
        {
            let seen = Rc::clone(&seen);
            let last_was_null = Rc::clone(&last_was_null);
            store.subscribe("auth.session", move |value| {
                seen.set(seen.get() + 1);
                last_was_null.set(value.is_null());
            });
        }

        store.write("auth.session", &true);
        assert_eq!(seen.get(), 1);
        assert!(!last_was_null.get());

        store.remove("auth.session");
        assert_eq!(seen.get(), 2);
        assert!(last_was_null.get());

        // Unrelated keys don't notify
        store.write("ui.tab", &"blog".to_string());
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_reset_clears_all_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        store.write(keys::SESSION, &true);
        store.write(keys::PROFILE_NAME, &"Ada".to_string());

        store.reset();

        assert!(!store.contains(keys::SESSION));
        assert!(!store.contains(keys::PROFILE_NAME));
    }

    #[test]
    fn test_read_raw_reflects_cache_writes() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        assert!(store.read_raw("blog.posts").is_none());
        store.write("blog.posts", &vec!["a", "b"]);

        let raw = store.read_raw("blog.posts").unwrap();
        let parsed: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, vec!["a", "b"]);
    }
}
