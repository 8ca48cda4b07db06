//! Account and session command handlers

use anyhow::Result;
use atrium_core::{AuthGate, KeyStore};

use crate::output::{Output, OutputFormat};

/// Create the device account and open a session
pub fn create(store: &KeyStore, username: &str, password: &str, output: &Output) -> Result<()> {
    let auth = AuthGate::new(store);
    let account = auth.create_account(username, password)?;
    output.success(&format!(
        "Account '{}' created. You are now logged in.",
        account.username
    ));
    Ok(())
}

/// Log in with the device account
pub fn login(store: &KeyStore, username: &str, password: &str, output: &Output) -> Result<()> {
    let auth = AuthGate::new(store);
    auth.login(username, password)?;
    output.success(&format!("Logged in as {}.", username.trim()));
    Ok(())
}

/// Close the session
pub fn logout(store: &KeyStore, output: &Output) -> Result<()> {
    AuthGate::new(store).logout();
    output.success("Logged out.");
    Ok(())
}

/// Show whether an account exists and whether a session is open
///
/// Never prints the password, in any format.
pub fn status(store: &KeyStore, output: &Output) -> Result<()> {
    let auth = AuthGate::new(store);
    let username = auth.account().map(|a| a.username);
    let is_authed = auth.is_authed();

    match output.format {
        OutputFormat::Human => {
            match &username {
                Some(name) => println!("Account:  {}", name),
                None => println!("Account:  (none)"),
            }
            println!("Session:  {}", if is_authed { "active" } else { "none" });
        }
        OutputFormat::Json => {
            let status = serde_json::json!({
                "account": username,
                "isAuthed": is_authed,
            });
            println!("{}", serde_json::to_string_pretty(&status).unwrap());
        }
        OutputFormat::Quiet => {
            println!("{}", if is_authed { "authed" } else { "anonymous" });
        }
    }
    Ok(())
}
