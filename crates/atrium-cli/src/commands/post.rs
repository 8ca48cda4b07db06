//! Post command handlers

use anyhow::{bail, Result};
use atrium_core::{query, KeyStore, Record, Seeder, SortOrder};

use super::require_auth;
use crate::output::Output;

/// Create a new post
pub fn create(
    store: &KeyStore,
    title: String,
    content: Option<String>,
    tags: Vec<String>,
    image: Option<String>,
    output: &Output,
) -> Result<()> {
    require_auth(store)?;

    let mut record = Record::new(title, content.unwrap_or_default());
    for tag in tags {
        record.add_tag(tag);
    }
    record.image = image;

    let seeder = Seeder::new(store);
    let mut posts = seeder.load_posts();
    posts.push(record.clone());
    seeder.save_posts(&posts);

    output.success(&format!("Created post {}", record.id));
    output.print_record(&record);
    Ok(())
}

/// List posts through the derived view: search, tag filter, sort
pub fn list(
    store: &KeyStore,
    search: Option<String>,
    tags: Vec<String>,
    sort: String,
    output: &Output,
) -> Result<()> {
    let posts = Seeder::new(store).load_posts();
    let view = query::derive(
        &posts,
        search.as_deref().unwrap_or(""),
        &tags,
        SortOrder::from_name(&sort),
    );
    output.print_records(&view);
    Ok(())
}

/// Show a single post
pub fn show(store: &KeyStore, id: &str, output: &Output) -> Result<()> {
    let posts = Seeder::new(store).load_posts();
    let record = find_by_id(&posts, id)?;
    output.print_record(record);
    Ok(())
}

/// Delete a post
pub fn delete(store: &KeyStore, id: &str, output: &Output) -> Result<()> {
    require_auth(store)?;

    let seeder = Seeder::new(store);
    let mut posts = seeder.load_posts();
    let target = find_by_id(&posts, id)?.id.clone();

    posts.retain(|record| record.id != target);
    seeder.save_posts(&posts);

    output.success(&format!("Deleted post {}", target));
    Ok(())
}

/// Resolve a full id or an unambiguous prefix
fn find_by_id<'a>(records: &'a [Record], id: &str) -> Result<&'a Record> {
    if let Some(record) = records.iter().find(|r| r.id == id) {
        return Ok(record);
    }

    let matches: Vec<&Record> = records.iter().filter(|r| r.id.starts_with(id)).collect();
    match matches.len() {
        0 => bail!("No post found with id '{}'", id),
        1 => Ok(matches[0]),
        n => bail!("Id prefix '{}' is ambiguous ({} matches)", id, n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> Record {
        Record {
            id: id.to_string(),
            title: id.to_string(),
            content: String::new(),
            tags: Vec::new(),
            image: None,
            created_at_ms: 0,
        }
    }

    #[test]
    fn test_find_by_id_exact_and_prefix() {
        let records = vec![record("abc-123"), record("abd-456")];

        assert_eq!(find_by_id(&records, "abc-123").unwrap().id, "abc-123");
        assert_eq!(find_by_id(&records, "abd").unwrap().id, "abd-456");
        assert!(find_by_id(&records, "zzz").is_err());
        // "ab" matches both
        assert!(find_by_id(&records, "ab").is_err());
    }
}
