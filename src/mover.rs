//! File relocation with deterministic collision handling.
//!
//! The mover computes a destination path under the chosen category, renames
//! on collision (`photo.jpg` -> `photo_1.jpg` -> `photo_2.jpg`, re-checking
//! existence per increment), and performs or simulates the relocation.
//!
//! The existence-check-then-rename sequence is not atomic: another process
//! may claim a planned name between the check and the move. That race is a
//! known limitation and is surfaced as a per-file move error when it loses.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Errors that can occur while relocating a single file.
#[derive(Debug)]
pub enum MoveError {
    /// The OS denied permission for the move or directory creation.
    PermissionDenied { path: PathBuf, source: io::Error },
    /// Failed to create the category directory.
    DirectoryCreationFailed { path: PathBuf, source: io::Error },
    /// The move itself failed (disk full, cross-device rename, ...).
    MoveFailed {
        source_path: PathBuf,
        destination: PathBuf,
        source: io::Error,
    },
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied { path, source } => {
                write!(f, "Permission denied for {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::MoveFailed {
                source_path,
                destination,
                source,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source_path.display(),
                    destination.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for MoveError {}

/// Plans and applies one relocation at a time under a destination root.
pub struct Mover {
    destination_root: PathBuf,
    dry_run: bool,
}

impl Mover {
    pub fn new(destination_root: PathBuf, dry_run: bool) -> Self {
        Self {
            destination_root,
            dry_run,
        }
    }

    /// Computes a collision-free destination path for `file_name` under
    /// `category`.
    ///
    /// If `root/category/file_name` already exists, tries `stem_1.ext`,
    /// `stem_2.ext`, ... until an unused name is found. Existence is
    /// re-checked for every candidate; nothing is reserved.
    ///
    /// The name is taken as an `OsStr` so that filenames which are not valid
    /// UTF-8 plan to their real byte name rather than a lossy rendering.
    pub fn plan(&self, file_name: &OsStr, category: &str) -> PathBuf {
        let category_dir = self.destination_root.join(category);
        let candidate = category_dir.join(file_name);
        if !candidate.exists() {
            return candidate;
        }

        let (stem, extension) = split_name(file_name);
        let mut counter = 1usize;
        loop {
            let mut renamed = stem.clone();
            renamed.push(format!("_{}", counter));
            if let Some(ext) = &extension {
                renamed.push(".");
                renamed.push(ext);
            }
            let candidate = category_dir.join(&renamed);
            if !candidate.exists() {
                warn!("Duplicate found, renaming to: {}", renamed.to_string_lossy());
                return candidate;
            }
            counter += 1;
        }
    }

    /// Moves `source` to the planned `destination`.
    ///
    /// In dry-run mode nothing is touched; the category directory is not
    /// created and the file stays in place. In live mode the category
    /// directory is created if absent (parents included) and the file is
    /// relocated with a single rename.
    pub fn apply(&self, source: &Path, destination: &Path) -> Result<(), MoveError> {
        if self.dry_run {
            debug!(
                "Dry run, leaving {} in place (planned {})",
                source.display(),
                destination.display()
            );
            return Ok(());
        }

        if let Some(category_dir) = destination.parent() {
            fs::create_dir_all(category_dir).map_err(|e| match e.kind() {
                io::ErrorKind::PermissionDenied => MoveError::PermissionDenied {
                    path: category_dir.to_path_buf(),
                    source: e,
                },
                _ => MoveError::DirectoryCreationFailed {
                    path: category_dir.to_path_buf(),
                    source: e,
                },
            })?;
        }

        fs::rename(source, destination).map_err(|e| match e.kind() {
            io::ErrorKind::PermissionDenied => MoveError::PermissionDenied {
                path: source.to_path_buf(),
                source: e,
            },
            _ => MoveError::MoveFailed {
                source_path: source.to_path_buf(),
                destination: destination.to_path_buf(),
                source: e,
            },
        })
    }
}

/// Splits a file name into stem and extension for collision renaming.
///
/// `archive.tar.gz` splits as (`archive.tar`, `gz`), matching how the
/// extension was taken for classification.
fn split_name(name: &OsStr) -> (OsString, Option<OsString>) {
    let path = Path::new(name);
    match path.file_stem() {
        Some(stem) => (
            stem.to_os_string(),
            path.extension().map(OsStr::to_os_string),
        ),
        None => (name.to_os_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_plan_uses_plain_name_when_free() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mover = Mover::new(temp_dir.path().to_path_buf(), false);

        let planned = mover.plan(OsStr::new("photo.jpg"), "Images");
        assert_eq!(planned, temp_dir.path().join("Images").join("photo.jpg"));
    }

    #[test]
    fn test_plan_increments_on_collision() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let images = temp_dir.path().join("Images");
        fs::create_dir(&images).expect("Failed to create category dir");
        fs::write(images.join("photo.jpg"), "existing").expect("Failed to write file");

        let mover = Mover::new(temp_dir.path().to_path_buf(), false);
        let planned = mover.plan(OsStr::new("photo.jpg"), "Images");
        assert_eq!(planned, images.join("photo_1.jpg"));

        fs::write(images.join("photo_1.jpg"), "also existing").expect("Failed to write file");
        let planned = mover.plan(OsStr::new("photo.jpg"), "Images");
        assert_eq!(planned, images.join("photo_2.jpg"));
    }

    #[test]
    fn test_plan_collision_without_extension() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let other = temp_dir.path().join("Other");
        fs::create_dir(&other).expect("Failed to create category dir");
        fs::write(other.join("README"), "existing").expect("Failed to write file");

        let mover = Mover::new(temp_dir.path().to_path_buf(), false);
        let planned = mover.plan(OsStr::new("README"), "Other");
        assert_eq!(planned, other.join("README_1"));
    }

    #[test]
    fn test_apply_creates_category_directory_and_moves() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source_dir = temp_dir.path().join("source");
        let dest_root = temp_dir.path().join("dest");
        fs::create_dir(&source_dir).expect("Failed to create source dir");
        let source = source_dir.join("report.pdf");
        fs::write(&source, "contents").expect("Failed to write file");

        let mover = Mover::new(dest_root.clone(), false);
        let planned = mover.plan(OsStr::new("report.pdf"), "Documents");
        mover.apply(&source, &planned).expect("Move failed");

        assert!(!source.exists());
        assert!(dest_root.join("Documents").join("report.pdf").exists());
    }

    #[test]
    fn test_apply_uses_existing_category_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dest_root = temp_dir.path().join("dest");
        fs::create_dir_all(dest_root.join("Images")).expect("Failed to create category dir");
        let source = temp_dir.path().join("photo.png");
        fs::write(&source, "contents").expect("Failed to write file");

        let mover = Mover::new(dest_root.clone(), false);
        let planned = mover.plan(OsStr::new("photo.png"), "Images");
        mover.apply(&source, &planned).expect("Move failed");

        assert!(dest_root.join("Images").join("photo.png").exists());
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dest_root = temp_dir.path().join("dest");
        fs::create_dir(&dest_root).expect("Failed to create dest root");
        let source = temp_dir.path().join("photo.jpg");
        fs::write(&source, "contents").expect("Failed to write file");

        let mover = Mover::new(dest_root.clone(), true);
        let planned = mover.plan(OsStr::new("photo.jpg"), "Images");
        mover.apply(&source, &planned).expect("Dry run failed");

        assert!(source.exists());
        assert!(!dest_root.join("Images").exists());
    }

    #[test]
    fn test_apply_missing_source_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mover = Mover::new(temp_dir.path().to_path_buf(), false);

        let planned = mover.plan(OsStr::new("ghost.txt"), "Documents");
        let result = mover.apply(&temp_dir.path().join("ghost.txt"), &planned);
        assert!(matches!(result, Err(MoveError::MoveFailed { .. })));
    }

    #[test]
    fn test_split_name_multi_dot() {
        assert_eq!(
            split_name(OsStr::new("archive.tar.gz")),
            (OsString::from("archive.tar"), Some(OsString::from("gz")))
        );
        assert_eq!(
            split_name(OsStr::new("README")),
            (OsString::from("README"), None)
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_plan_preserves_non_utf8_names() {
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let docs = temp_dir.path().join("Documents");
        fs::create_dir(&docs).expect("Failed to create category dir");
        let raw = OsStr::from_bytes(b"caf\xe9.txt");

        let mover = Mover::new(temp_dir.path().to_path_buf(), false);
        assert_eq!(mover.plan(raw, "Documents"), docs.join(raw));

        fs::write(docs.join(raw), "existing").expect("Failed to write file");
        let renamed = OsStr::from_bytes(b"caf\xe9_1.txt");
        assert_eq!(mover.plan(raw, "Documents"), docs.join(renamed));
    }
}
