use crate::exporter;
use crate::importer::{self, Bookmark};
use crate::utils::{self, ExportConfig, RecordError};
use eyre::{Context, Result};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub written: usize,
    pub skipped: usize,
}

/// The main entry point for the business logic.
/// Loads the export and writes one Markdown file per bookmark, in input order.
pub fn run(config: &ExportConfig) -> Result<Summary> {
    let records = importer::load_bookmarks(&config.input_file)?;

    if records.is_empty() {
        if !config.quiet {
            println!("No bookmarks in file {}", config.input_file.display());
        }
        return Ok(Summary::default());
    }

    let output_dir = utils::expand_tilde(&config.output_path);
    tracing::debug!(
        records = records.len(),
        output = %output_dir.display(),
        "converting bookmarks"
    );

    let mut summary = Summary::default();
    for (index, record) in records.into_iter().enumerate() {
        match export_bookmark(record, config, &output_dir)? {
            Ok(path) => {
                summary.written += 1;
                tracing::info!("Wrote: {}", path.display());
            }
            Err(e) if config.keep_going => {
                summary.skipped += 1;
                tracing::warn!("Skipped bookmark #{}: {}", index + 1, e);
            }
            Err(e) => {
                return Err(e).wrap_err_with(|| format!("Failed on bookmark #{}", index + 1));
            }
        }
    }

    if !config.quiet {
        let mut line = format!("Done. {} written", summary.written);
        if summary.skipped > 0 {
            line.push_str(&format!(", {} skipped", summary.skipped));
        }
        println!("{}.", line);
    }

    Ok(summary)
}

/// Convert and write a single record.
///
/// The outer `Result` carries I/O failures, which always end the run; the inner
/// one carries problems with the record itself.
fn export_bookmark(
    record: Value,
    config: &ExportConfig,
    output_dir: &Path,
) -> Result<std::result::Result<PathBuf, RecordError>> {
    let mut bookmark = match Bookmark::from_value(record) {
        Ok(b) => b,
        Err(e) => return Ok(Err(e)),
    };
    let date = match utils::parse_bookmark_date(&bookmark.time) {
        Ok(d) => d,
        Err(e) => return Ok(Err(e)),
    };
    bookmark.tags = exporter::add_extra_tags(&bookmark.tags, &config.extra_tags);

    let sanitized = utils::sanitize_filename(&bookmark.description);
    let path = output_dir.join(utils::output_file_name(&date, &sanitized));

    create_path(output_dir)?;

    let file =
        File::create(&path).wrap_err_with(|| format!("Failed to create: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    exporter::write_bookmark_markdown(&mut writer, &bookmark, &date, &config.prepend_tags)
        .wrap_err_with(|| format!("Failed to write: {}", path.display()))?;
    writer
        .flush()
        .wrap_err_with(|| format!("Failed to flush: {}", path.display()))?;

    Ok(Ok(path))
}

/// Create the output directory and any missing parents.
fn create_path(output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir).wrap_err_with(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })
}
