//! Post records derived from files on disk

use crate::core::front_matter::Frontmatter;
use crate::core::value::{is_truthy, to_string_representation};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Date used when neither the filename nor the front matter carries one
pub const UNKNOWN_DATE: &str = "unknown";

fn date_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})").expect("static regex"))
}

/// A scanned post. Rebuilt on every scan, never persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// File name within the content directory
    pub file: String,
    pub title: String,
    /// `YYYY-MM-DD`, or [`UNKNOWN_DATE`]
    pub date: String,
    pub body: String,
    pub path: PathBuf,
}

impl Post {
    /// Build a post from its file name, location and parsed contents
    pub fn from_parts(file: String, path: PathBuf, frontmatter: &Frontmatter, body: String) -> Self {
        let date = extract_date(&file, frontmatter);
        let title = match frontmatter.get("title") {
            Some(Value::String(title)) => title.clone(),
            _ => title_from_file(&file),
        };
        Self {
            file,
            title,
            date,
            body,
            path,
        }
    }
}

/// Date from a `YYYY-MM-DD` filename prefix, else the front matter `date`
/// cut to ten characters, else [`UNKNOWN_DATE`].
pub fn extract_date(file: &str, frontmatter: &Frontmatter) -> String {
    if let Some(m) = date_prefix().captures(file).and_then(|c| c.get(1)) {
        return m.as_str().to_string();
    }

    match frontmatter.get("date") {
        Some(value) if is_truthy(value) => to_string_representation(value).chars().take(10).collect(),
        _ => UNKNOWN_DATE.to_string(),
    }
}

/// Title derived from a filename: date prefix and `.md` removed, hyphens to spaces
pub fn title_from_file(file: &str) -> String {
    let without_date = match date_prefix().find(file) {
        Some(m) if file[m.end()..].starts_with('-') => &file[m.end() + 1..],
        _ => file,
    };
    let stem = without_date.strip_suffix(".md").unwrap_or(without_date);
    stem.replace('-', " ")
}
