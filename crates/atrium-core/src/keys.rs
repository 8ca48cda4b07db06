//! The persisted key space
//!
//! Every domain binds to its own namespaced keys through the same
//! [`KeyStore`](crate::KeyStore) abstraction. Keys double as file names under
//! the store directory, so they are restricted to `[a-z.]`.

/// Session flag (`bool`)
pub const SESSION: &str = "auth.session";
/// The single account record (`Account`, or absent)
pub const ACCOUNT: &str = "auth.account";
/// Blog posts collection (array of records)
pub const POSTS: &str = "blog.posts";
/// Gallery collection (array of `{id, url}` items)
pub const GALLERY: &str = "gallery.items";
/// Profile display name (`String`)
pub const PROFILE_NAME: &str = "profile.name";
/// Profile bio text (`String`)
pub const PROFILE_BIO: &str = "profile.bio";
/// Profile photo - URL or embedded data URL (`String`)
pub const PROFILE_PHOTO: &str = "profile.photo";
/// Last active tab in the UI (`String`)
pub const LAST_TAB: &str = "ui.tab";

/// All keys, in one place so a full reset can enumerate them.
pub const ALL: &[&str] = &[
    SESSION,
    ACCOUNT,
    POSTS,
    GALLERY,
    PROFILE_NAME,
    PROFILE_BIO,
    PROFILE_PHOTO,
    LAST_TAB,
];
