//! Output formatting and styling module.
//!
//! Provides a centralized interface for the CLI's human-facing output:
//! colored status messages and the end-of-run summary. Structured per-file
//! events go through `tracing` instead; this module only covers what the
//! user sees on the terminal.

use crate::organizer::RunStats;
use colored::*;

/// Manages CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Prints the end-of-run summary for one organize invocation.
    pub fn run_summary(stats: &RunStats, dry_run: bool) {
        Self::header("SUMMARY");

        let moved_label = if dry_run { "Files to move" } else { "Files moved" };
        println!("  {:<22} {}", moved_label, stats.moved.to_string().green());
        println!(
            "  {:<22} {}",
            "Skipped (directories)",
            stats.skipped.to_string().cyan()
        );
        let errors = if stats.errors > 0 {
            stats.errors.to_string().red().bold()
        } else {
            stats.errors.to_string().green()
        };
        println!("  {:<22} {}", "Errors", errors);

        if dry_run {
            Self::success("Dry run complete. No files were modified.");
        }
    }
}
