//! # pindown
//!
//! A CLI tool that converts a [Pinboard](https://pinboard.in) bookmark export into
//! one Markdown file per bookmark, ready to drop into a notes vault.
//!
//! ## What it does
//!
//! Each bookmark in the JSON export becomes `<YYYY-MM-DD> <title>.md`:
//!
//! ```text
//! Title
//! https://example.com/page
//! 2020-01-02
//! #tag1 #tag2
//!
//! Extended notes, written as-is.
//! ```
//!
//! Titles are reduced to a conservative, filesystem-safe character set and names
//! are capped at 255 bytes. Files are overwritten on every run; two bookmarks with
//! the same date and title end up in the same file.
//!
//! ## Usage
//!
//! ```sh
//! # Convert into ./pinboard
//! pindown -i pinboard_export.json
//!
//! # Obsidian-style tags, an extra tag on every note, custom output directory
//! pindown -i pinboard_export.json -p ~/notes/pinboard --prepend-tags '#' --extra-tags pinboard
//! ```
//!
//! Defaults for `output_path`, `extra_tags` and `prepend_tags` can be persisted in
//! `~/.config/pindown/config.toml`.

pub mod exporter;
pub mod importer;
pub mod process;
pub mod utils;
