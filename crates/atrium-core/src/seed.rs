//! Collection seeding and loading
//!
//! First-run seeding is an explicit, idempotent startup step
//! (`ensure_seeded`), not a side effect of reading: loads stay
//! side-effect-free and testable in isolation.
//!
//! Loading normalizes every stored entry into the canonical shape - entries
//! written before ids existed get a fresh one on every load, and the
//! assigned id becomes durable on the next save. A malformed entry is
//! skipped with a warning instead of failing the whole collection.
//!
//! Saving an empty collection keeps the key present as an explicit `[]`, so
//! deleting the last record does not resurrect the seed content; only an
//! absent or unparseable key counts as a first run.

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};

use crate::keys;
use crate::models::{GalleryItem, RawGalleryItem, RawRecord, Record};
use crate::store::KeyStore;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Seeds and loads the post and gallery collections
pub struct Seeder<'s> {
    store: &'s KeyStore,
}

impl<'s> Seeder<'s> {
    pub fn new(store: &'s KeyStore) -> Self {
        Self { store }
    }

    /// Seed both collections with built-in defaults if this is a first run
    ///
    /// Idempotent: a collection whose key holds any JSON array - including
    /// an explicitly emptied one - is left alone.
    pub fn ensure_seeded(&self) {
        if !self.has_collection(keys::POSTS) {
            let posts = default_posts();
            debug!("seeding {} default posts", posts.len());
            self.store.write(keys::POSTS, &posts);
        }
        if !self.has_collection(keys::GALLERY) {
            let items = default_gallery();
            debug!("seeding {} default gallery items", items.len());
            self.store.write(keys::GALLERY, &items);
        }
    }

    /// Load the post collection, normalized to the canonical shape
    pub fn load_posts(&self) -> Vec<Record> {
        self.load_entries(keys::POSTS)
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<RawRecord>(entry) {
                Ok(raw) => Some(raw.normalize()),
                Err(e) => {
                    warn!("skipping malformed post entry: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Persist the post collection
    pub fn save_posts(&self, records: &[Record]) {
        self.store.write(keys::POSTS, &records);
    }

    /// Load the gallery collection, normalized to the canonical shape
    pub fn load_gallery(&self) -> Vec<GalleryItem> {
        self.load_entries(keys::GALLERY)
            .into_iter()
            .filter_map(
                |entry| match serde_json::from_value::<RawGalleryItem>(entry) {
                    Ok(raw) => Some(raw.normalize()),
                    Err(e) => {
                        warn!("skipping malformed gallery entry: {}", e);
                        None
                    }
                },
            )
            .collect()
    }

    /// Persist the gallery collection
    pub fn save_gallery(&self, items: &[GalleryItem]) {
        self.store.write(keys::GALLERY, &items);
    }

    /// Whether the key currently holds a JSON array
    fn has_collection(&self, key: &str) -> bool {
        match self.store.read_raw(key) {
            Some(raw) => matches!(serde_json::from_str::<Value>(&raw), Ok(Value::Array(_))),
            None => false,
        }
    }

    /// Raw array entries for a key; anything else reads as empty
    fn load_entries(&self, key: &str) -> Vec<Value> {
        let raw = match self.store.read_raw(key) {
            Some(raw) => raw,
            None => return Vec::new(),
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) | Err(_) => {
                warn!("stored collection '{}' is not an array, treating as empty", key);
                Vec::new()
            }
        }
    }
}

/// Built-in posts for a fresh store, timestamps strictly decreasing from now
fn default_posts() -> Vec<Record> {
    let now = Utc::now().timestamp_millis();
    let mut welcome = Record::new(
        "Welcome",
        "This site is my corner of the web: posts, photos, and whatever else \
         I feel like keeping around. Everything here lives on this device.",
    );
    welcome.created_at_ms = now;
    welcome.add_tag("meta");

    let mut build_log = Record::new(
        "How this site works",
        "Every post, photo, and profile field is a JSON value in a local \
         key/value store. No server, no sync, no tracking.",
    );
    build_log.created_at_ms = now - DAY_MS;
    build_log.add_tag("meta");
    build_log.add_tag("projects");

    let mut notes = Record::new(
        "Reading notes",
        "A running list of things worth reading twice.",
    );
    notes.created_at_ms = now - 2 * DAY_MS;
    notes.add_tag("notes");

    vec![welcome, build_log, notes]
}

/// Built-in gallery for a fresh store
fn default_gallery() -> Vec<GalleryItem> {
    vec![
        GalleryItem::new("https://picsum.photos/seed/atrium-1/800/600"),
        GalleryItem::new("https://picsum.photos/seed/atrium-2/800/600"),
    ]
}
