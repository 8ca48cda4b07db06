//! Authentication gate
//!
//! A minimal local credential check over the key/value store: one optional
//! account record plus a boolean session flag. The account slot holds at
//! most one account for the lifetime of the store; only a full store reset
//! destroys it. Credentials are stored in plaintext - this is a
//! single-device construct with no security hardening in scope.

use thiserror::Error;
use tracing::warn;

use crate::keys;
use crate::models::Account;
use crate::store::KeyStore;

/// Authentication failures. Display strings are the user-visible messages;
/// credential errors are deliberately generic so they don't reveal whether
/// an account exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Username and password are required")]
    InvalidInput,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Username is required")]
    UsernameRequired,
    #[error("Password is required")]
    PasswordRequired,
    #[error("An account already exists on this device")]
    AccountExists,
    #[error("Something went wrong. Please try again.")]
    Internal,
}

/// Session and account operations over the store's auth keys
pub struct AuthGate<'s> {
    store: &'s KeyStore,
}

impl<'s> AuthGate<'s> {
    pub fn new(store: &'s KeyStore) -> Self {
        Self { store }
    }

    /// Whether the current process holds an authenticated session
    pub fn is_authed(&self) -> bool {
        self.store.read(keys::SESSION, false)
    }

    /// The stored account, if one has been created
    ///
    /// A corrupt account record reads back as `None` (store-level fail-soft),
    /// which downstream surfaces as the same generic credential error.
    pub fn account(&self) -> Option<Account> {
        self.store.read(keys::ACCOUNT, None)
    }

    /// Validate credentials against the stored account and open a session
    ///
    /// Both fields are trimmed and must be non-empty. Comparison is exact
    /// and case-sensitive. A missing account and a mismatch produce the same
    /// error.
    pub fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidInput);
        }

        match self.account() {
            Some(account) if account.username == username && account.password == password => {
                self.store.write(keys::SESSION, &true);
                Ok(())
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// Create the single account and open a session
    ///
    /// The slot holds exactly one account: creation fails with
    /// `AccountExists` whenever any account is already stored, regardless of
    /// username. The account record must actually persist - a storage
    /// failure here fails the operation instead of degrading to best-effort.
    pub fn create_account(&self, username: &str, password: &str) -> Result<Account, AuthError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() {
            return Err(AuthError::UsernameRequired);
        }
        if password.is_empty() {
            return Err(AuthError::PasswordRequired);
        }
        if self.account().is_some() {
            return Err(AuthError::AccountExists);
        }

        let account = Account {
            username: username.to_string(),
            password: password.to_string(),
        };
        if let Err(e) = self.store.write_required(keys::ACCOUNT, &account) {
            warn!("failed to persist account record: {:#}", e);
            return Err(AuthError::Internal);
        }
        self.store.write(keys::SESSION, &true);
        Ok(account)
    }

    /// Close the session; the stored account is untouched
    pub fn logout(&self) {
        self.store.write(keys::SESSION, &false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    fn test_store(temp_dir: &TempDir) -> KeyStore {
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
        };
        KeyStore::open(config).unwrap()
    }

    #[test]
    fn test_login_without_account_fails_with_credentials_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        let auth = AuthGate::new(&store);

        assert_eq!(
            auth.login("alice", "secret"),
            Err(AuthError::InvalidCredentials)
        );
        assert!(!auth.is_authed());
    }

    #[test]
    fn test_create_account_then_login() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        let auth = AuthGate::new(&store);

        let account = auth.create_account("alice", "secret").unwrap();
        assert_eq!(account.username, "alice");
        assert!(auth.is_authed());

        auth.logout();
        assert!(!auth.is_authed());

        auth.login("alice", "secret").unwrap();
        assert!(auth.is_authed());

        assert_eq!(
            auth.login("alice", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_login_is_case_sensitive() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        let auth = AuthGate::new(&store);

        auth.create_account("alice", "secret").unwrap();
        auth.logout();

        assert_eq!(
            auth.login("Alice", "secret"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            auth.login("alice", "Secret"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_login_requires_both_fields() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        let auth = AuthGate::new(&store);

        assert_eq!(auth.login("", "secret"), Err(AuthError::InvalidInput));
        assert_eq!(auth.login("alice", "   "), Err(AuthError::InvalidInput));
    }

    #[test]
    fn test_login_trims_fields() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        let auth = AuthGate::new(&store);

        auth.create_account("alice", "secret").unwrap();
        auth.logout();

        auth.login("  alice  ", " secret ").unwrap();
        assert!(auth.is_authed());
    }

    #[test]
    fn test_create_account_validation() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        let auth = AuthGate::new(&store);

        assert_eq!(
            auth.create_account("", "secret"),
            Err(AuthError::UsernameRequired)
        );
        assert_eq!(
            auth.create_account("alice", "  "),
            Err(AuthError::PasswordRequired)
        );
        assert!(auth.account().is_none());
    }

    #[test]
    fn test_second_account_rejected_even_with_different_username() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        let auth = AuthGate::new(&store);

        auth.create_account("alice", "secret").unwrap();

        // Same username
        assert_eq!(
            auth.create_account("alice", "other"),
            Err(AuthError::AccountExists)
        );
        // Different username - still a single-slot store, must not overwrite
        assert_eq!(
            auth.create_account("bob", "hunter2"),
            Err(AuthError::AccountExists)
        );

        // The original account is untouched
        let account = auth.account().unwrap();
        assert_eq!(account.username, "alice");
        assert_eq!(account.password, "secret");
    }

    #[test]
    fn test_logout_keeps_account() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        let auth = AuthGate::new(&store);

        auth.create_account("alice", "secret").unwrap();
        auth.logout();

        assert!(!auth.is_authed());
        assert!(auth.account().is_some());
        auth.login("alice", "secret").unwrap();
    }

    #[test]
    fn test_reset_destroys_account() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        let auth = AuthGate::new(&store);

        auth.create_account("alice", "secret").unwrap();
        store.reset();

        assert!(auth.account().is_none());
        assert!(!auth.is_authed());
        assert_eq!(
            auth.login("alice", "secret"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_corrupt_account_record_reads_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let path = temp_dir.path().join("store").join("auth.account.json");
        std::fs::write(&path, "{broken").unwrap();

        let auth = AuthGate::new(&store);
        assert!(auth.account().is_none());
        assert_eq!(
            auth.login("alice", "secret"),
            Err(AuthError::InvalidCredentials)
        );
    }
}
