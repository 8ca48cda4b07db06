//! Profile command handlers

use anyhow::{bail, Result};
use atrium_core::{KeyStore, Profile};

use super::require_auth;
use crate::output::{Output, OutputFormat};

/// Show the profile fields
pub fn show(store: &KeyStore, output: &Output) -> Result<()> {
    let profile = Profile::new(store);
    let name = profile.display_name();
    let bio = profile.bio();
    let photo = profile.photo();

    match output.format {
        OutputFormat::Human => {
            println!("Name:   {}", or_unset(&name));
            println!("Bio:    {}", or_unset(&bio));
            println!("Photo:  {}", or_unset(&photo));
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "name": name,
                "bio": bio,
                "photo": photo,
            });
            println!("{}", serde_json::to_string_pretty(&value).unwrap());
        }
        OutputFormat::Quiet => {
            println!("{}", name);
        }
    }
    Ok(())
}

/// Set any of the profile fields
pub fn set(
    store: &KeyStore,
    name: Option<String>,
    bio: Option<String>,
    photo: Option<String>,
    output: &Output,
) -> Result<()> {
    require_auth(store)?;

    if name.is_none() && bio.is_none() && photo.is_none() {
        bail!("Nothing to set. Pass at least one of --name, --bio, --photo.");
    }

    let profile = Profile::new(store);
    if let Some(name) = name {
        profile.set_display_name(&name);
    }
    if let Some(bio) = bio {
        profile.set_bio(&bio);
    }
    if let Some(photo) = photo {
        profile.set_photo(&photo);
    }

    output.success("Profile updated.");
    Ok(())
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() {
        "(unset)"
    } else {
        value
    }
}
