//! Command-line interface for sortwise.
//!
//! Parses arguments, configures the logging subscriber, and drives one
//! organize invocation. Exit codes: 0 for a clean run, 1 when the run
//! completed with per-file errors, 2 when a precondition or configuration
//! failure aborted the run.

use crate::config::OrganizerConfig;
use crate::organizer::{OrganizeError, OrganizeOptions, Organizer};
use crate::output::OutputFormatter;
use clap::{Parser, ValueEnum};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

/// Default log file, written in the working directory unless disabled.
pub const LOG_FILE: &str = "organizer.log";

#[derive(Parser)]
#[command(name = "sortwise")]
#[command(version)]
#[command(about = "Organize files into category folders by type")]
#[command(
    long_about = "Classifies the files in a source directory (keyword rules, extension table, \
optional AI assistance) and moves them into category subfolders of a destination directory. \
Use --dry-run to preview without touching anything."
)]
pub struct Cli {
    /// Source directory to organize (default: ~/Downloads)
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Destination directory for organized files (default: ~/Downloads/Organized)
    #[arg(short, long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Preview changes without actually moving files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable AI-powered classification (requires a configured backend)
    #[arg(long)]
    pub use_ai: bool,

    /// Path to a configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log to stderr instead of the log file
    #[arg(long)]
    pub no_log_file: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_tracing(self) -> tracing::Level {
        match self {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl Cli {
    /// Installs the global tracing subscriber.
    ///
    /// Events go to `organizer.log` by default, or to stderr with
    /// `--no-log-file` (or when the log file cannot be opened).
    pub fn setup_logging(&self) {
        let level = self.log_level.as_tracing();

        if !self.no_log_file {
            match OpenOptions::new().create(true).append(true).open(LOG_FILE) {
                Ok(file) => {
                    tracing_subscriber::fmt()
                        .with_max_level(level)
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file))
                        .init();
                    return;
                }
                Err(e) => {
                    eprintln!(
                        "Warning: could not open {}: {}. Logging to stderr instead.",
                        LOG_FILE, e
                    );
                }
            }
        }

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Runs one organize invocation and returns the process exit code.
pub fn run(cli: &Cli) -> i32 {
    OutputFormatter::header("sortwise - file organizer");

    let config = match OrganizerConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            OutputFormatter::error(&format!("Configuration error: {}", e));
            return 2;
        }
    };

    let organizer = match Organizer::from_config(&config) {
        Ok(organizer) => organizer,
        Err(e) => {
            OutputFormatter::error(&format!("Configuration error: {}", e));
            return 2;
        }
    };

    if cli.dry_run {
        OutputFormatter::dry_run_notice("No files will be moved.");
    }

    if cli.use_ai {
        if organizer.ai_available() {
            OutputFormatter::info("AI classification: enabled");
        } else {
            tracing::warn!("AI classification requested but not available. Using rules only.");
            OutputFormatter::warning("AI classification not available, using rules only");
        }
    }

    let options = OrganizeOptions {
        source: cli.source.clone(),
        dest: cli.dest.clone(),
        dry_run: cli.dry_run,
        use_ai: cli.use_ai,
    };

    match organizer.organize_files(&options) {
        Ok(stats) => {
            OutputFormatter::run_summary(&stats, cli.dry_run);
            if stats.has_errors() {
                OutputFormatter::warning(
                    "Some files could not be organized. See the log for details.",
                );
                1
            } else {
                0
            }
        }
        Err(e) => {
            OutputFormatter::error(&format!("{}", e));
            match e {
                OrganizeError::SourceNotFound(_) | OrganizeError::SourceNotADirectory(_) => {
                    OutputFormatter::plain(
                        "Check that the source directory exists and try again.",
                    );
                }
                OrganizeError::SourceUnreadable { .. } => {
                    OutputFormatter::plain("Check your permissions and try again.");
                }
            }
            2
        }
    }
}
