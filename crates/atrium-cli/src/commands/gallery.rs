//! Gallery command handlers

use std::fs;

use anyhow::{bail, Context, Result};
use atrium_core::{media, GalleryItem, KeyStore, Seeder};

use super::require_auth;
use crate::output::Output;

/// Add a gallery item: a URL, or with `--embed` a local file stored as a
/// data URL
pub fn add(store: &KeyStore, source: String, embed: bool, output: &Output) -> Result<()> {
    require_auth(store)?;

    let url = if embed {
        let bytes =
            fs::read(&source).with_context(|| format!("Failed to read image file '{}'", source))?;
        media::encode_data_url(&bytes)
    } else {
        source
    };

    let seeder = Seeder::new(store);
    let mut items = seeder.load_gallery();
    let item = GalleryItem::new(url);
    items.push(item.clone());
    seeder.save_gallery(&items);

    output.success(&format!("Added gallery item {}", item.id));
    Ok(())
}

/// List gallery items
pub fn list(store: &KeyStore, output: &Output) -> Result<()> {
    let items = Seeder::new(store).load_gallery();
    output.print_gallery(&items);
    Ok(())
}

/// Delete a gallery item
pub fn delete(store: &KeyStore, id: &str, output: &Output) -> Result<()> {
    require_auth(store)?;

    let seeder = Seeder::new(store);
    let mut items = seeder.load_gallery();
    let target = find_by_id(&items, id)?.id.clone();

    items.retain(|item| item.id != target);
    seeder.save_gallery(&items);

    output.success(&format!("Deleted gallery item {}", target));
    Ok(())
}

/// Resolve a full id or an unambiguous prefix
fn find_by_id<'a>(items: &'a [GalleryItem], id: &str) -> Result<&'a GalleryItem> {
    if let Some(item) = items.iter().find(|i| i.id == id) {
        return Ok(item);
    }

    let matches: Vec<&GalleryItem> = items.iter().filter(|i| i.id.starts_with(id)).collect();
    match matches.len() {
        0 => bail!("No gallery item found with id '{}'", id),
        1 => Ok(matches[0]),
        n => bail!("Id prefix '{}' is ambiguous ({} matches)", id, n),
    }
}
