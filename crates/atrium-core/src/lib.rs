//! Atrium Core Library
//!
//! Core functionality for Atrium, a local-first personal site content
//! manager: blog posts, an image gallery, and profile fields, all persisted
//! as JSON values in a string-keyed store on the local machine.
//!
//! # Architecture
//!
//! - **KeyStore**: the persistent key/value bridge everything else sits on
//! - **AuthGate**: single-account credential check and session flag
//! - **Seeder**: first-run defaults and legacy-record normalization
//! - **query**: pure search/filter/sort derivation over loaded records
//!
//! # Quick Start
//!
//! ```text
//! let store = KeyStore::open(Config::load()?)?;
//! Seeder::new(&store).ensure_seeded();
//!
//! let posts = Seeder::new(&store).load_posts();
//! let view = query::derive(&posts, "dog", &[], SortOrder::Newest);
//! ```
//!
//! # Modules
//!
//! - `store`: persistent key/value store (main entry point)
//! - `auth`: login, account creation, session flag
//! - `seed`: collection seeding, loading, and saving
//! - `query`: derived views (search, tag filter, sort)
//! - `models`: account, record, and gallery shapes
//! - `profile`: direct-keyed profile fields
//! - `media`: data-URL image embedding
//! - `keys`: the persisted key space
//! - `config`: application configuration

pub mod auth;
pub mod config;
pub mod keys;
pub mod media;
pub mod models;
pub mod profile;
pub mod query;
pub mod seed;
pub mod store;

pub use auth::{AuthError, AuthGate};
pub use config::Config;
pub use models::{Account, GalleryItem, Record, SortOrder};
pub use profile::Profile;
pub use seed::Seeder;
pub use store::KeyStore;
