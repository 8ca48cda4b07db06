//! Derived views over record collections
//!
//! Pure functions: no store access, no caching. The UI recomputes the
//! derived view from the current search text, tag selection, and sort order
//! on every render; the result is never persisted.

use crate::models::{Record, SortOrder};

/// Derive the filtered, tag-constrained, sorted view of `records`
///
/// 1. Search: trimmed and case-folded; when non-empty, a record survives iff
///    the needle is a substring of its title, its content, or any tag.
/// 2. Tags: when `selected_tags` is non-empty, a record survives iff its tag
///    set contains every selected tag (AND semantics).
/// 3. Sort: by resolved timestamp, descending for `Newest`, ascending for
///    `Oldest`. The sort is stable, so records with equal timestamps keep
///    their original relative order.
pub fn derive(
    records: &[Record],
    search_text: &str,
    selected_tags: &[String],
    order: SortOrder,
) -> Vec<Record> {
    let needle = search_text.trim().to_lowercase();

    let mut result: Vec<Record> = records
        .iter()
        .filter(|record| needle.is_empty() || matches_search(record, &needle))
        .filter(|record| selected_tags.iter().all(|tag| record.tags.contains(tag)))
        .cloned()
        .collect();

    match order {
        SortOrder::Newest => result.sort_by(|a, b| b.created_at_ms.cmp(&a.created_at_ms)),
        SortOrder::Oldest => result.sort_by(|a, b| a.created_at_ms.cmp(&b.created_at_ms)),
    }

    result
}

/// All distinct tags across `records`, in first-seen order
///
/// Used to build the tag filter controls.
pub fn tag_universe(records: &[Record]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for record in records {
        for tag in &record.tags {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
    }
    tags
}

fn matches_search(record: &Record, needle: &str) -> bool {
    record.title.to_lowercase().contains(needle)
        || record.content.to_lowercase().contains(needle)
        || record.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}
