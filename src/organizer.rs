//! The organize driver.
//!
//! One invocation validates the source directory, scans its immediate
//! entries once, classifies and moves each regular file, and returns the
//! run statistics. Per-file failures are isolated: they are logged, counted,
//! and never abort the run. Only precondition failures on the source
//! directory do, and those are raised before any file is touched.

use crate::ai::AiClassifier;
use crate::category::CategoryTable;
use crate::classify::{Classifier, FileEntry};
use crate::config::{ConfigError, OrganizerConfig};
use crate::mover::Mover;
use crate::rules::RuleSet;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Counters for one organize run.
///
/// Created at the start of a run, accumulated monotonically, returned at
/// completion. In dry-run mode `moved` counts files that would move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Files moved (or, in dry-run mode, that would be moved).
    pub moved: usize,
    /// Non-file entries (subdirectories and the like) left untouched.
    pub skipped: usize,
    /// Per-file failures; the files stay in the source directory.
    pub errors: usize,
}

impl RunStats {
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Precondition failures on the source directory. Fatal to the run; no
/// partial statistics are returned.
#[derive(Debug)]
pub enum OrganizeError {
    /// The source directory does not exist.
    SourceNotFound(PathBuf),
    /// The source path exists but is not a directory.
    SourceNotADirectory(PathBuf),
    /// The source directory could not be read.
    SourceUnreadable { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceNotFound(path) => {
                write!(f, "Source directory not found: {}", path.display())
            }
            Self::SourceNotADirectory(path) => {
                write!(f, "Source path is not a directory: {}", path.display())
            }
            Self::SourceUnreadable { path, source } => {
                write!(f, "Cannot read source directory {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Per-invocation inputs for [`Organizer::organize_files`].
#[derive(Debug, Clone, Default)]
pub struct OrganizeOptions {
    /// Source directory; falls back to the configured default.
    pub source: Option<PathBuf>,
    /// Destination root; falls back to the configured default.
    pub dest: Option<PathBuf>,
    /// Report what would happen without touching the filesystem.
    pub dry_run: bool,
    /// Consult the AI adapter before the rules and extension table.
    pub use_ai: bool,
}

/// Classifies and relocates the contents of a source directory.
pub struct Organizer {
    classifier: Classifier,
    default_source: PathBuf,
    default_dest: PathBuf,
}

impl Organizer {
    /// Builds an organizer from configuration, compiling the category table
    /// and rule set.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for duplicate extensions or invalid rule
    /// patterns.
    pub fn from_config(config: &OrganizerConfig) -> Result<Self, ConfigError> {
        let table = CategoryTable::from_config(&config.categories)?;
        let rules = RuleSet::compile(&config.rules)?;
        Ok(Self {
            classifier: Classifier::new(table, rules),
            default_source: config.default_source_dir(),
            default_dest: config.default_dest_dir(),
        })
    }

    /// Plugs an AI backend in behind the classification chain.
    pub fn with_ai(mut self, ai: Box<dyn AiClassifier>) -> Self {
        self.classifier = self.classifier.with_ai(ai);
        self
    }

    /// Whether the configured AI adapter reports itself available.
    pub fn ai_available(&self) -> bool {
        self.classifier.ai_available()
    }

    /// Organizes the immediate entries of the source directory.
    ///
    /// Regular files are classified and moved into category subdirectories
    /// of the destination root; everything else is counted as skipped. The
    /// scan is non-recursive and sequential, one file fully processed before
    /// the next.
    ///
    /// # Errors
    ///
    /// Returns an `OrganizeError` when the source directory is missing, not
    /// a directory, or unreadable. Per-file failures do not error; they are
    /// reflected in [`RunStats::errors`].
    pub fn organize_files(&self, options: &OrganizeOptions) -> Result<RunStats, OrganizeError> {
        let source = options
            .source
            .clone()
            .unwrap_or_else(|| self.default_source.clone());
        let destination = options
            .dest
            .clone()
            .unwrap_or_else(|| self.default_dest.clone());

        if !source.exists() {
            error!("Source directory not found: {}", source.display());
            return Err(OrganizeError::SourceNotFound(source));
        }
        if !source.is_dir() {
            error!("Source path is not a directory: {}", source.display());
            return Err(OrganizeError::SourceNotADirectory(source));
        }
        let entries = fs::read_dir(&source).map_err(|e| {
            error!("Cannot read source directory {}: {}", source.display(), e);
            OrganizeError::SourceUnreadable {
                path: source.clone(),
                source: e,
            }
        })?;

        let prefix = if options.dry_run { "[DRY RUN] " } else { "" };
        info!("{}Organizing files from: {}", prefix, source.display());
        info!("{}Destination: {}", prefix, destination.display());

        let mover = Mover::new(destination, options.dry_run);
        let mut stats = RunStats::default();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    error!("Failed to read a directory entry: {}", e);
                    stats.errors += 1;
                    continue;
                }
            };

            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    error!(
                        "Failed to stat {}: {}",
                        entry.file_name().to_string_lossy(),
                        e
                    );
                    stats.errors += 1;
                    continue;
                }
            };

            if !file_type.is_file() {
                debug!("Skipped: {}", entry.file_name().to_string_lossy());
                stats.skipped += 1;
                continue;
            }

            let file = FileEntry::from_dir_entry(&entry);
            let classification = self.classifier.classify(&file, options.use_ai);
            let planned = mover.plan(&file.file_name, &classification.category);

            match mover.apply(&file.path, &planned) {
                Ok(()) => {
                    if options.dry_run {
                        info!(
                            "[DRY RUN] Would move: {} -> {}/",
                            file.name, classification.category
                        );
                    } else {
                        info!("Moved: {} -> {}/", file.name, classification.category);
                    }
                    stats.moved += 1;
                }
                Err(e) => {
                    error!("{}", e);
                    stats.errors += 1;
                }
            }
        }

        info!(
            "{}Run complete: {} moved, {} skipped, {} errors",
            prefix, stats.moved, stats.skipped, stats.errors
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn organizer() -> Organizer {
        Organizer::from_config(&OrganizerConfig::default()).expect("default config is valid")
    }

    fn options(source: &Path, dest: &Path) -> OrganizeOptions {
        OrganizeOptions {
            source: Some(source.to_path_buf()),
            dest: Some(dest.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_source_is_a_precondition_error() {
        let result = organizer().organize_files(&OrganizeOptions {
            source: Some(PathBuf::from("/nonexistent/path/12345")),
            dest: Some(PathBuf::from("/tmp")),
            ..Default::default()
        });
        assert!(matches!(result, Err(OrganizeError::SourceNotFound(_))));
    }

    #[test]
    fn test_source_file_is_a_precondition_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let not_a_dir = temp_dir.path().join("not_a_dir.txt");
        fs::write(&not_a_dir, "").expect("Failed to write file");

        let result = organizer().organize_files(&options(&not_a_dir, temp_dir.path()));
        assert!(matches!(result, Err(OrganizeError::SourceNotADirectory(_))));
    }

    #[test]
    fn test_empty_source_yields_zero_stats() {
        let source = TempDir::new().expect("Failed to create temp directory");
        let dest = TempDir::new().expect("Failed to create temp directory");

        let stats = organizer()
            .organize_files(&options(source.path(), dest.path()))
            .expect("Run failed");
        assert_eq!(stats, RunStats::default());
    }

    #[test]
    fn test_subdirectories_are_skipped() {
        let source = TempDir::new().expect("Failed to create temp directory");
        let dest = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(source.path().join("nested")).expect("Failed to create subdir");
        fs::write(source.path().join("photo.jpg"), "").expect("Failed to write file");

        let stats = organizer()
            .organize_files(&options(source.path(), dest.path()))
            .expect("Run failed");
        assert_eq!(stats.moved, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.errors, 0);
        assert!(source.path().join("nested").exists());
    }

    #[test]
    fn test_dry_run_counts_without_moving() {
        let source = TempDir::new().expect("Failed to create temp directory");
        let dest = TempDir::new().expect("Failed to create temp directory");
        fs::write(source.path().join("photo.jpg"), "").expect("Failed to write file");
        fs::write(source.path().join("report.pdf"), "").expect("Failed to write file");

        let stats = organizer()
            .organize_files(&OrganizeOptions {
                dry_run: true,
                ..options(source.path(), dest.path())
            })
            .expect("Run failed");

        assert_eq!(stats.moved, 2);
        assert_eq!(stats.errors, 0);
        assert!(source.path().join("photo.jpg").exists());
        assert!(source.path().join("report.pdf").exists());
        assert_eq!(
            fs::read_dir(dest.path()).expect("Failed to read dest").count(),
            0
        );
    }

    #[test]
    fn test_live_run_moves_into_categories() {
        let source = TempDir::new().expect("Failed to create temp directory");
        let dest = TempDir::new().expect("Failed to create temp directory");
        fs::write(source.path().join("photo.jpg"), "").expect("Failed to write file");
        fs::write(source.path().join("report.pdf"), "").expect("Failed to write file");

        let stats = organizer()
            .organize_files(&options(source.path(), dest.path()))
            .expect("Run failed");

        assert_eq!(stats.moved, 2);
        assert!(dest.path().join("Images").join("photo.jpg").exists());
        assert!(dest.path().join("Documents").join("report.pdf").exists());
        assert_eq!(
            fs::read_dir(source.path())
                .expect("Failed to read source")
                .count(),
            0
        );
    }
}
