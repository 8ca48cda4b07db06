//! Data models
//!
//! Defines the account record, the tolerant "wire" shapes that stored
//! collections are parsed into (`RawRecord`, `RawGalleryItem`), and the
//! canonical shapes everything above the load boundary works with
//! (`Record`, `GalleryItem`).
//!
//! Stored data predates this implementation and comes in several legacy
//! shapes: the main text may live in `content`, `body`, or `excerpt`; the
//! timestamp may be numeric epoch millis or one of several date strings
//! (`date`, `publishedAt`, `createdAt`); entries may lack an `id`; `tags`
//! may be missing or not even an array. Normalization collapses all of that
//! into one canonical `Record` exactly once, at load time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// The single stored account. Plaintext by design: single-device,
/// single-account scope with no security hardening in play.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub password: String,
}

/// Sort order for derived views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest first (descending by timestamp)
    #[default]
    Newest,
    /// Oldest first (ascending by timestamp)
    Oldest,
}

impl SortOrder {
    /// Parse a sort-order name. Anything other than `"newest"` sorts
    /// ascending, matching the UI's two-state toggle.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("newest") {
            SortOrder::Newest
        } else {
            SortOrder::Oldest
        }
    }
}

/// A stored timestamp: epoch millis or a date string
#[derive(Debug, Clone, PartialEq)]
pub enum RawTimestamp {
    Millis(i64),
    Text(String),
}

impl RawTimestamp {
    fn as_millis(&self) -> Option<i64> {
        match self {
            RawTimestamp::Millis(ms) => Some(*ms),
            RawTimestamp::Text(_) => None,
        }
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            RawTimestamp::Millis(_) => None,
            RawTimestamp::Text(s) => Some(s),
        }
    }
}

/// The tolerant wire shape of a stored post
///
/// Any field may be absent; collection loaders deserialize each entry
/// individually so one malformed entry doesn't take the collection down.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<RawTimestamp>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl RawRecord {
    /// Resolve the record's timestamp as epoch millis
    ///
    /// A numeric `createdAt` wins outright. Otherwise the date strings are
    /// tried in priority order: `date`, `publishedAt`, then a string
    /// `createdAt`. Nothing parseable resolves to epoch 0.
    pub fn resolve_timestamp_ms(&self) -> i64 {
        if let Some(ms) = self.created_at.as_ref().and_then(RawTimestamp::as_millis) {
            return ms;
        }

        let candidates = [
            self.date.as_deref(),
            self.published_at.as_deref(),
            self.created_at.as_ref().and_then(RawTimestamp::as_text),
        ];
        for candidate in candidates.into_iter().flatten() {
            if let Some(ms) = parse_date_string(candidate) {
                return ms;
            }
        }
        0
    }

    /// Resolve the primary content field: first non-empty of `content`,
    /// `body`, `excerpt`.
    pub fn resolve_content(&self) -> String {
        [&self.content, &self.body, &self.excerpt]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .cloned()
            .unwrap_or_default()
    }

    /// Collapse into the canonical shape, assigning a fresh id if needed
    ///
    /// Every other field carries over unchanged in meaning.
    pub fn normalize(self) -> Record {
        let created_at_ms = self.resolve_timestamp_ms();
        let content = self.resolve_content();
        Record {
            id: ensure_id(self.id),
            title: self.title,
            content,
            tags: self.tags,
            image: self.image,
            created_at_ms,
        }
    }
}

/// The canonical post shape used everywhere above the load boundary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Unique identifier, immutable once assigned
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Resolved creation time, epoch millis
    #[serde(rename = "createdAt", default)]
    pub created_at_ms: i64,
}

impl Record {
    /// Create a new record with a fresh id, stamped now
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
            image: None,
            created_at_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Add a tag, ignoring duplicates
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }
}

/// The tolerant wire shape of a stored gallery item
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGalleryItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub url: String,
}

impl RawGalleryItem {
    /// Collapse into the canonical shape, assigning a fresh id if needed
    pub fn normalize(self) -> GalleryItem {
        GalleryItem {
            id: ensure_id(self.id),
            url: self.url,
        }
    }
}

/// A gallery image: a stable id plus a URL or embedded data URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GalleryItem {
    pub id: String,
    pub url: String,
}

impl GalleryItem {
    /// Create a new gallery item with a fresh id
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.into(),
        }
    }
}

/// Keep a non-empty id, otherwise mint a fresh one
fn ensure_id(id: String) -> String {
    if id.trim().is_empty() {
        Uuid::new_v4().to_string()
    } else {
        id
    }
}

/// Parse a stored date string as epoch millis
///
/// Accepts RFC 3339, `%Y-%m-%dT%H:%M:%S`, and bare `%Y-%m-%d` (midnight UTC).
fn parse_date_string(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc().timestamp_millis());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis());
    }
    None
}

/// Deserialize `tags` leniently: anything that isn't an array of strings
/// becomes zero tags (non-string elements are skipped).
fn lenient_tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Deserialize `createdAt` leniently: integer or float epoch millis, a date
/// string, or (for anything else) nothing.
fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<RawTimestamp>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map(RawTimestamp::Millis),
        Value::String(s) => Some(RawTimestamp::Text(s)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new() {
        let record = Record::new("Hello", "First post");
        assert!(!record.id.is_empty());
        assert_eq!(record.title, "Hello");
        assert_eq!(record.content, "First post");
        assert!(record.tags.is_empty());
        assert!(record.created_at_ms > 0);
    }

    #[test]
    fn test_record_add_tag_dedupes() {
        let mut record = Record::new("Hello", "");
        record.add_tag("rust");
        record.add_tag("rust");
        record.add_tag("web");
        assert_eq!(record.tags, vec!["rust", "web"]);
    }

    #[test]
    fn test_raw_record_numeric_created_at_wins() {
        let raw: RawRecord = serde_json::from_str(
            r#"{"id":"a","createdAt":1700000000000,"date":"2001-01-01"}"#,
        )
        .unwrap();
        assert_eq!(raw.resolve_timestamp_ms(), 1_700_000_000_000);
    }

    #[test]
    fn test_raw_record_date_string_priority() {
        // date beats publishedAt beats string createdAt
        let raw: RawRecord = serde_json::from_str(
            r#"{"date":"2024-01-02","publishedAt":"2023-01-01","createdAt":"2022-01-01"}"#,
        )
        .unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp_millis();
        assert_eq!(raw.resolve_timestamp_ms(), expected);

        let raw: RawRecord =
            serde_json::from_str(r#"{"publishedAt":"not a date","createdAt":"2022-06-01"}"#)
                .unwrap();
        let expected = NaiveDate::from_ymd_opt(2022, 6, 1)
            .unwrap()
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp_millis();
        assert_eq!(raw.resolve_timestamp_ms(), expected);
    }

    #[test]
    fn test_raw_record_unparseable_timestamp_is_epoch_zero() {
        let raw: RawRecord = serde_json::from_str(r#"{"createdAt":"soonish"}"#).unwrap();
        assert_eq!(raw.resolve_timestamp_ms(), 0);

        let raw: RawRecord = serde_json::from_str(r#"{"title":"undated"}"#).unwrap();
        assert_eq!(raw.resolve_timestamp_ms(), 0);
    }

    #[test]
    fn test_raw_record_rfc3339_created_at() {
        let raw: RawRecord =
            serde_json::from_str(r#"{"createdAt":"2024-05-01T12:30:00Z"}"#).unwrap();
        let expected = DateTime::parse_from_rfc3339("2024-05-01T12:30:00Z")
            .unwrap()
            .timestamp_millis();
        assert_eq!(raw.resolve_timestamp_ms(), expected);
    }

    #[test]
    fn test_content_field_priority() {
        let raw: RawRecord = serde_json::from_str(
            r#"{"content":"main","body":"legacy body","excerpt":"legacy excerpt"}"#,
        )
        .unwrap();
        assert_eq!(raw.resolve_content(), "main");

        let raw: RawRecord =
            serde_json::from_str(r#"{"content":"  ","body":"legacy body"}"#).unwrap();
        assert_eq!(raw.resolve_content(), "legacy body");

        let raw: RawRecord = serde_json::from_str(r#"{"excerpt":"just a teaser"}"#).unwrap();
        assert_eq!(raw.resolve_content(), "just a teaser");

        let raw: RawRecord = serde_json::from_str(r#"{"title":"no text"}"#).unwrap();
        assert_eq!(raw.resolve_content(), "");
    }

    #[test]
    fn test_lenient_tags() {
        let raw: RawRecord = serde_json::from_str(r#"{"tags":"pets"}"#).unwrap();
        assert!(raw.tags.is_empty());

        let raw: RawRecord = serde_json::from_str(r#"{"tags":["pets",42,"fun"]}"#).unwrap();
        assert_eq!(raw.tags, vec!["pets", "fun"]);

        let raw: RawRecord = serde_json::from_str(r#"{"title":"untagged"}"#).unwrap();
        assert!(raw.tags.is_empty());
    }

    #[test]
    fn test_normalize_assigns_id_and_preserves_fields() {
        let raw: RawRecord = serde_json::from_str(
            r#"{"title":"Old post","body":"written long ago","tags":["archive"],"date":"2020-03-04"}"#,
        )
        .unwrap();
        let record = raw.normalize();

        assert!(!record.id.is_empty());
        assert_eq!(record.title, "Old post");
        assert_eq!(record.content, "written long ago");
        assert_eq!(record.tags, vec!["archive"]);
        assert!(record.image.is_none());
        assert!(record.created_at_ms > 0);
    }

    #[test]
    fn test_normalize_keeps_existing_id() {
        let raw: RawRecord = serde_json::from_str(r#"{"id":"post-7","title":"Kept"}"#).unwrap();
        assert_eq!(raw.normalize().id, "post-7");
    }

    #[test]
    fn test_record_serializes_canonical_shape() {
        let record = Record {
            id: "r1".to_string(),
            title: "Hello".to_string(),
            content: "text".to_string(),
            tags: vec!["a".to_string()],
            image: None,
            created_at_ms: 1234,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["createdAt"], 1234);
        assert!(json.get("image").is_none());

        // Canonical output round-trips through the tolerant wire shape
        let raw: RawRecord = serde_json::from_value(json).unwrap();
        assert_eq!(raw.normalize(), record);
    }

    #[test]
    fn test_gallery_item_normalize() {
        let raw: RawGalleryItem =
            serde_json::from_str(r#"{"url":"https://example.com/a.jpg"}"#).unwrap();
        let item = raw.normalize();
        assert!(!item.id.is_empty());
        assert_eq!(item.url, "https://example.com/a.jpg");
    }

    #[test]
    fn test_sort_order_from_name() {
        assert_eq!(SortOrder::from_name("newest"), SortOrder::Newest);
        assert_eq!(SortOrder::from_name("Newest"), SortOrder::Newest);
        assert_eq!(SortOrder::from_name("oldest"), SortOrder::Oldest);
        assert_eq!(SortOrder::from_name("anything"), SortOrder::Oldest);
    }

    #[test]
    fn test_account_serialization() {
        let account = Account {
            username: "alice".to_string(),
            password: "secret".to_string(),
        };
        let json = serde_json::to_string(&account).unwrap();
        let parsed: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, account);
    }
}
