//! The classification chain.
//!
//! Category decisions follow a strict priority order per file:
//!
//! 1. The AI adapter, when enabled for the run and available
//! 2. The keyword/pattern rules, in declaration order
//! 3. The extension table, defaulting to `Other` on a miss
//!
//! Each step short-circuits the ones below it. AI failures degrade to
//! no-decision; they never abort classification.

use crate::ai::{AiClassifier, UnavailableClassifier};
use crate::category::{CategoryTable, OTHER_CATEGORY};
use crate::rules::RuleSet;
use std::ffi::{OsStr, OsString};
use std::fs::DirEntry;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A directory entry observed at scan time.
///
/// The filesystem remains the source of truth; the entry may change between
/// scan and move. The real file name is carried as an `OsString` so that
/// names which are not valid UTF-8 survive the move byte-for-byte; the
/// lossy `name` is only for rule matching and logging.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// The file name as the filesystem reports it.
    pub file_name: OsString,
    /// Lossy UTF-8 rendering of the file name, for matching and logging.
    pub name: String,
    /// The extension with a leading dot, or empty if the name has none.
    pub extension: String,
    /// The full path to the file.
    pub path: PathBuf,
}

impl FileEntry {
    pub fn from_dir_entry(entry: &DirEntry) -> Self {
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy().into_owned();
        let extension = extension_of(&file_name);
        Self {
            file_name,
            name,
            extension,
            path: entry.path(),
        }
    }

    pub fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(OsStr::to_os_string)
            .unwrap_or_default();
        let name = file_name.to_string_lossy().into_owned();
        let extension = extension_of(&file_name);
        Self {
            file_name,
            name,
            extension,
            path: path.to_path_buf(),
        }
    }
}

/// The extension of `name` with a leading dot, or empty.
fn extension_of(name: &OsStr) -> String {
    Path::new(name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

/// Which step of the chain decided a file's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// The AI adapter returned a category.
    Ai,
    /// A keyword/pattern rule matched the filename.
    Rule,
    /// The extension table contained the extension.
    Extension,
    /// Nothing matched; the file fell through to `Other`.
    Default,
}

/// A category decision for one file. Used for observability only.
#[derive(Debug, Clone)]
pub struct Classification {
    pub category: String,
    pub source: Provenance,
}

/// Runs the AI → rules → extension decision chain.
pub struct Classifier {
    table: CategoryTable,
    rules: RuleSet,
    ai: Box<dyn AiClassifier>,
}

impl Classifier {
    /// Creates a classifier with no AI backend configured.
    pub fn new(table: CategoryTable, rules: RuleSet) -> Self {
        Self {
            table,
            rules,
            ai: Box::new(UnavailableClassifier),
        }
    }

    /// Replaces the AI adapter behind the chain.
    pub fn with_ai(mut self, ai: Box<dyn AiClassifier>) -> Self {
        self.ai = ai;
        self
    }

    /// Whether the configured AI adapter reports itself available.
    pub fn ai_available(&self) -> bool {
        self.ai.is_available()
    }

    /// Decides the category for one file.
    ///
    /// With `use_ai` set and an available adapter, an AI decision wins
    /// outright; rules are not consulted. Otherwise the first matching rule
    /// wins over the extension table, and an unmapped extension lands in
    /// [`OTHER_CATEGORY`].
    pub fn classify(&self, entry: &FileEntry, use_ai: bool) -> Classification {
        if use_ai && self.ai.is_available() {
            match self.ai.classify(&entry.name, &entry.extension, &entry.path) {
                Ok(Some(category)) => {
                    debug!("AI classified {} as {}", entry.name, category);
                    return Classification {
                        category,
                        source: Provenance::Ai,
                    };
                }
                Ok(None) => {}
                Err(e) => {
                    // Best-effort: degrade to the rule/extension fallback.
                    warn!("{} for {}", e, entry.name);
                }
            }
        }

        if let Some(category) = self.rules.matches(&entry.name) {
            debug!("Rule matched {} -> {}", entry.name, category);
            return Classification {
                category: category.to_string(),
                source: Provenance::Rule,
            };
        }

        match self.table.lookup(&entry.extension) {
            Some(category) => {
                debug!("Extension matched {} -> {}", entry.name, category);
                Classification {
                    category: category.to_string(),
                    source: Provenance::Extension,
                }
            }
            None => {
                debug!("No mapping for {}, defaulting to {}", entry.name, OTHER_CATEGORY);
                Classification {
                    category: OTHER_CATEGORY.to_string(),
                    source: Provenance::Default,
                }
            }
        }
    }
}
