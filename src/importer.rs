/// Type definitions for the Pinboard JSON export.
///
/// The export (`https://api.pinboard.in/v1/posts/all?format=json`, or the
/// "JSON" download on the settings page) is a single array of objects:
///
/// ```json
/// [
///   {
///     "href": "https://example.com/",
///     "description": "Example",
///     "extended": "",
///     "meta": "5f8b...",
///     "hash": "a5c6...",
///     "time": "2020-01-02T10:00:00Z",
///     "shared": "yes",
///     "toread": "no",
///     "tags": "rust cli"
///   }
/// ]
/// ```
///
/// Only the five text fields below are used; the rest are ignored.
use eyre::{Context, Result, eyre};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::utils::RecordError;

/// One saved link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Bookmark {
    pub description: String,
    pub href: String,
    pub time: String,
    pub tags: String,
    pub extended: String,
}

impl Bookmark {
    /// Validate a raw JSON record. Fails if any of the five fields is absent or not a string.
    pub fn from_value(value: Value) -> std::result::Result<Self, RecordError> {
        serde_json::from_value(value).map_err(|e| RecordError::InvalidRecord(e.to_string()))
    }
}

/// Read and parse the whole export.
///
/// Records are returned unvalidated so that one malformed entry does not stop
/// the records before it from being written.
pub fn load_bookmarks(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read input: {}", path.display()))?;
    parse_bookmarks(&content).wrap_err_with(|| format!("Failed to parse input: {}", path.display()))
}

pub fn parse_bookmarks(content: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(content).wrap_err("Input is not valid JSON")? {
        Value::Array(records) => Ok(records),
        other => Err(eyre!(
            "Expected a JSON array of bookmarks, found {}",
            json_kind(&other)
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
