//! Profile fields
//!
//! The profile is a handful of independent string values written straight
//! through the store - the only edit-in-place surface in the system. Absent
//! fields read as empty strings.

use crate::keys;
use crate::store::KeyStore;

/// Typed accessors for the profile keys
pub struct Profile<'s> {
    store: &'s KeyStore,
}

impl<'s> Profile<'s> {
    pub fn new(store: &'s KeyStore) -> Self {
        Self { store }
    }

    pub fn display_name(&self) -> String {
        self.store.read(keys::PROFILE_NAME, String::new())
    }

    pub fn set_display_name(&self, name: &str) {
        self.store.write(keys::PROFILE_NAME, &name);
    }

    pub fn bio(&self) -> String {
        self.store.read(keys::PROFILE_BIO, String::new())
    }

    pub fn set_bio(&self, bio: &str) {
        self.store.write(keys::PROFILE_BIO, &bio);
    }

    /// Photo: a URL or an embedded data URL
    pub fn photo(&self) -> String {
        self.store.read(keys::PROFILE_PHOTO, String::new())
    }

    pub fn set_photo(&self, photo: &str) {
        self.store.write(keys::PROFILE_PHOTO, &photo);
    }

    /// Last active tab in the UI
    pub fn last_tab(&self) -> String {
        self.store.read(keys::LAST_TAB, String::new())
    }

    pub fn set_last_tab(&self, tab: &str) {
        self.store.write(keys::LAST_TAB, &tab);
    }
}
