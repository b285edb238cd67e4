use clap::Parser;
use eyre::{Context, Result, eyre};
use pindown::process;
use pindown::utils::ExportConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Convert Pinboard bookmarks to Markdown.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pinboard JSON export to read.
    #[arg(short, long, value_name = "PATH")]
    input_file: PathBuf,

    /// Directory to write markdown files to.
    /// Defaults to ./pinboard if not set in config.
    #[arg(short = 'p', long, value_name = "PATH")]
    output_path: Option<PathBuf>,

    /// Space separated list of extra tags added to every bookmark.
    #[arg(long, value_name = "TAGS")]
    extra_tags: Option<String>,

    /// Character to prepend each tag with (e.g. "#").
    #[arg(long, value_name = "MARKER")]
    prepend_tags: Option<String>,

    /// Path to a specific configuration file.
    /// Defaults to $XDG_CONFIG_HOME/pindown/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Skip bookmarks with missing fields or unreadable timestamps instead of stopping.
    #[arg(short, long)]
    keep_going: bool,

    /// Print each file written.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress the summary and notices.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    output_path: Option<PathBuf>,
    extra_tags: Option<String>,
    prepend_tags: Option<String>,
}

fn load_file_config(explicit_path: Option<&Path>) -> Result<FileConfig> {
    let path = if let Some(p) = explicit_path {
        if !p.exists() {
            return Err(eyre!("Config file not found: {}", p.display()));
        }
        Some(p.to_path_buf())
    } else {
        dirs::config_dir()
            .map(|d| d.join("pindown/config.toml"))
            .filter(|p| p.exists())
    };

    match path {
        None => Ok(FileConfig::default()),
        Some(p) => {
            let content = fs::read_to_string(&p)
                .wrap_err_with(|| format!("Failed to read config: {}", p.display()))?;
            toml::from_str(&content)
                .wrap_err_with(|| format!("Failed to parse config: {}", p.display()))
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_directive = if quiet {
        "error"
    } else if verbose {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("PINDOWN_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    // 1. Load config file (CLI path > default path)
    let file_cfg = load_file_config(cli.config.as_deref())?;

    // 2. Resolve each setting (CLI > Config > Default)
    let config = ExportConfig {
        input_file: cli.input_file,
        output_path: cli
            .output_path
            .or(file_cfg.output_path)
            .unwrap_or_else(|| PathBuf::from("./pinboard")),
        extra_tags: cli.extra_tags.or(file_cfg.extra_tags).unwrap_or_default(),
        prepend_tags: cli
            .prepend_tags
            .or(file_cfg.prepend_tags)
            .unwrap_or_default(),
        keep_going: cli.keep_going,
        quiet: cli.quiet,
    };

    // 3. Run the conversion
    process::run(&config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn input_file_is_required() {
        assert!(Cli::try_parse_from(["pindown"]).is_err());
        let cli = Cli::try_parse_from(["pindown", "-i", "export.json"]).unwrap();
        assert_eq!(cli.input_file, PathBuf::from("export.json"));
        assert!(cli.output_path.is_none());
    }

    #[test]
    fn config_file_fields() {
        let cfg: FileConfig =
            toml::from_str("output_path = \"~/notes/pinboard\"\nprepend_tags = \"#\"\n").unwrap();
        assert_eq!(cfg.output_path, Some(PathBuf::from("~/notes/pinboard")));
        assert_eq!(cfg.prepend_tags.as_deref(), Some("#"));
        assert!(cfg.extra_tags.is_none());
        assert!(toml::from_str::<FileConfig>("target_dir = \"x\"").is_err());
    }

    #[test]
    fn explicit_config_must_exist() {
        assert!(load_file_config(Some(Path::new("/nonexistent/pindown.toml"))).is_err());
    }
}
