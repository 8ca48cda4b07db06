//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use atrium_core::{GalleryItem, Record};
use chrono::DateTime;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single post in full
    pub fn print_record(&self, record: &Record) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:      {}", record.id);
                println!("Title:   {}", record.title);
                if !record.tags.is_empty() {
                    println!("Tags:    {}", record.tags.join(", "));
                }
                if let Some(ref image) = record.image {
                    println!("Image:   {}", truncate_line(image, 60));
                }
                println!("Created: {}", format_timestamp(record.created_at_ms));
                if !record.content.is_empty() {
                    println!();
                    println!("{}", record.content);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(record).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", record.id);
            }
        }
    }

    /// Print a list of posts, one line each
    pub fn print_records(&self, records: &[Record]) {
        match self.format {
            OutputFormat::Human => {
                if records.is_empty() {
                    println!("No posts found.");
                    return;
                }
                for record in records {
                    let tags = if record.tags.is_empty() {
                        String::new()
                    } else {
                        format!("  [{}]", record.tags.join(", "))
                    };
                    println!(
                        "{}  {}  {}{}",
                        short_id(&record.id),
                        format_timestamp(record.created_at_ms),
                        truncate_line(&record.title, 50),
                        tags
                    );
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(records).unwrap());
            }
            OutputFormat::Quiet => {
                for record in records {
                    println!("{}", record.id);
                }
            }
        }
    }

    /// Print the gallery
    pub fn print_gallery(&self, items: &[GalleryItem]) {
        match self.format {
            OutputFormat::Human => {
                if items.is_empty() {
                    println!("The gallery is empty.");
                    return;
                }
                for item in items {
                    println!("{}  {}", short_id(&item.id), truncate_line(&item.url, 70));
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(items).unwrap());
            }
            OutputFormat::Quiet => {
                for item in items {
                    println!("{}", item.id);
                }
            }
        }
    }

    /// Print the tag universe
    pub fn print_tags(&self, tags: &[String]) {
        match self.format {
            OutputFormat::Human => {
                if tags.is_empty() {
                    println!("No tags yet.");
                    return;
                }
                for tag in tags {
                    println!("{}", tag);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(tags).unwrap());
            }
            OutputFormat::Quiet => {
                for tag in tags {
                    println!("{}", tag);
                }
            }
        }
    }

    /// Print a success message (suppressed in quiet mode)
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", message),
            OutputFormat::Json | OutputFormat::Quiet => {}
        }
    }
}

/// First segment of a uuid, enough to address items interactively
fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

/// Truncate to `max` characters with an ellipsis
fn truncate_line(s: &str, max: usize) -> String {
    let line = s.lines().next().unwrap_or("");
    if line.chars().count() <= max {
        line.to_string()
    } else {
        let truncated: String = line.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

/// Render epoch millis as `YYYY-MM-DD`
fn format_timestamp(ms: i64) -> String {
    match DateTime::from_timestamp_millis(ms) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => "????-??-??".to_string(),
    }
}
