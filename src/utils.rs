use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::path::{Path, PathBuf};

pub const FILE_EXTENSION: &str = "md";

/// Most filesystems cap a single path component at 255 bytes.
pub const MAX_FILENAME_BYTES: usize = 255;

/// Configuration required to run the conversion.
/// This decouples the logic from how the arguments were parsed (CLI/Config file).
#[derive(Clone, Debug)]
pub struct ExportConfig {
    pub input_file: PathBuf,
    pub output_path: PathBuf,
    pub extra_tags: String,
    pub prepend_tags: String,
    pub keep_going: bool,
    pub quiet: bool,
}

/// Failures confined to a single bookmark.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("invalid bookmark record: {0}")]
    InvalidRecord(String),
    #[error("unrecognized timestamp {0:?}")]
    InvalidTimestamp(String),
}

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y%m%dT%H%M%S%.f%z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S%.fZ",
    "%Y%m%dT%H%M%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

// Slash dates without a leading year are month first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
];

/// Parse a bookmark timestamp down to its calendar date.
///
/// Accepts RFC 3339 / RFC 2822, ISO 8601 with or without a colon in the offset,
/// the compact `20200102T100000Z` form, slash dates and `Jan 2, 2020` style dates.
/// Offsets are honoured but not converted: `2020-01-02T23:30:00-05:00` is the 2nd.
pub fn parse_bookmark_date(time: &str) -> Result<NaiveDate, RecordError> {
    let s = time.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Ok(dt.date_naive());
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt.date_naive());
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| RecordError::InvalidTimestamp(time.to_string()))
}

fn is_filename_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.' | '(' | ')')
}

/// Reduce free text to a filesystem-safe fragment.
/// Disallowed characters are dropped, never replaced; the result may be empty.
pub fn sanitize_filename(text: &str) -> String {
    let kept: String = text.chars().filter(|&c| is_filename_char(c)).collect();
    kept.trim().trim_matches('.').to_string()
}

/// `<date> <name>.md`, with `name` cut so the result never exceeds 255 bytes.
pub fn output_file_name(date: &NaiveDate, sanitized: &str) -> String {
    let date = date.format("%Y-%m-%d").to_string();
    // date + ' ' + name + '.' + extension
    let budget = MAX_FILENAME_BYTES - date.len() - FILE_EXTENSION.len() - 2;

    let mut end = sanitized.len().min(budget);
    while !sanitized.is_char_boundary(end) {
        end -= 1;
    }
    format!("{} {}.{}", date, &sanitized[..end], FILE_EXTENSION)
}

/// Expand a leading `~` to the current user's home directory.
///
/// `~user/...` is not resolved; such paths are returned unchanged.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
