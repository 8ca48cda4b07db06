//! Command handlers, one module per domain

pub mod account;
pub mod gallery;
pub mod post;
pub mod profile;

use anyhow::{bail, Result};
use atrium_core::{AuthGate, KeyStore};

/// Gate for mutating commands - the CLI analogue of the UI hiding its
/// mutation controls when no session is open.
pub fn require_auth(store: &KeyStore) -> Result<()> {
    if AuthGate::new(store).is_authed() {
        Ok(())
    } else {
        bail!("Not logged in. Run 'atrium login <username> <password>' first.")
    }
}
