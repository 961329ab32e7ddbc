//! Category and rule configuration.
//!
//! This module provides support for loading the classification configuration
//! via TOML files: the category table (category name to extension list),
//! the ordered keyword/pattern rules, and the default source and destination
//! directories. The built-in defaults organize a Downloads folder without any
//! configuration file present.
//!
//! # Configuration File Format
//!
//! ```toml
//! source_dir = "/home/user/Downloads"
//! dest_dir = "/home/user/Downloads/Organized"
//!
//! [categories]
//! Images = [".jpg", ".png"]
//! Documents = [".pdf", ".docx"]
//!
//! [[rules]]
//! keywords = ["invoice", "receipt"]
//! category = "Documents"
//!
//! [[rules]]
//! patterns = ["^IMG_\\d{4}"]
//! category = "Images"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur during configuration loading and compilation.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// Invalid regex pattern provided with the actual error reason.
    InvalidRegexPattern {
        /// The regex pattern that failed to compile.
        pattern: String,
        /// The reason why the pattern is invalid.
        reason: String,
    },
    /// The same extension is registered under two different categories.
    DuplicateExtension {
        /// The extension (normalized) that appears twice.
        extension: String,
        /// The category that registered the extension first.
        first: String,
        /// The category that tried to register it again.
        second: String,
    },
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Invalid rule pattern '{}': {}", pattern, reason)
            }
            ConfigError::DuplicateExtension {
                extension,
                first,
                second,
            } => {
                write!(
                    f,
                    "Extension '{}' is registered under both '{}' and '{}'",
                    extension, first, second
                )
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A single keyword/pattern rule bound to a category.
///
/// A rule matches a filename when any of its keywords occurs in the name
/// (case-insensitive substring) or any of its regex patterns matches.
/// Rules are evaluated in declaration order; the first match wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Keywords matched as case-insensitive substrings of the filename.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Regex patterns matched against the filename as-is.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// The category a matching file is assigned to.
    pub category: String,
}

/// Top-level organizer configuration, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizerConfig {
    /// Default source directory when none is given on the command line.
    #[serde(default)]
    pub source_dir: Option<PathBuf>,

    /// Default destination directory when none is given on the command line.
    #[serde(default)]
    pub dest_dir: Option<PathBuf>,

    /// Category table: category name to list of extensions.
    #[serde(default = "default_categories")]
    pub categories: BTreeMap<String, Vec<String>>,

    /// Ordered keyword/pattern rules, checked before the extension table.
    #[serde(default = "default_rules")]
    pub rules: Vec<RuleConfig>,
}

impl OrganizerConfig {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.sortwise.toml` in the current directory
    /// 3. Look for `~/.config/sortwise/config.toml` in home directory
    /// 4. Fall back to the built-in default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but
    /// cannot be read or parsed.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        // If explicitly specified, load from that path
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        // Try current directory
        let local_config = PathBuf::from(".sortwise.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        // Try home directory
        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sortwise")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        // Fall back to defaults
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if file does not exist.
    /// Returns `ConfigError::ConfigInvalid` if TOML parsing fails.
    /// Returns `ConfigError::IoError` if file cannot be read.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// The source directory to organize when none is given per-invocation.
    pub fn default_source_dir(&self) -> PathBuf {
        self.source_dir
            .clone()
            .unwrap_or_else(|| home_dir().join("Downloads"))
    }

    /// The destination root when none is given per-invocation.
    pub fn default_dest_dir(&self) -> PathBuf {
        self.dest_dir
            .clone()
            .unwrap_or_else(|| home_dir().join("Downloads").join("Organized"))
    }
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            source_dir: None,
            dest_dir: None,
            categories: default_categories(),
            rules: default_rules(),
        }
    }
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// The built-in category table.
fn default_categories() -> BTreeMap<String, Vec<String>> {
    let table: &[(&str, &[&str])] = &[
        (
            "Images",
            &[
                ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".webp", ".ico", ".tiff",
            ],
        ),
        (
            "Documents",
            &[
                ".pdf", ".doc", ".docx", ".txt", ".rtf", ".odt", ".xls", ".xlsx", ".ppt", ".pptx",
            ],
        ),
        (
            "Videos",
            &[".mp4", ".mkv", ".avi", ".mov", ".wmv", ".flv", ".webm"],
        ),
        (
            "Audio",
            &[".mp3", ".wav", ".flac", ".aac", ".ogg", ".wma", ".m4a"],
        ),
        ("Archives", &[".zip", ".rar", ".7z", ".tar", ".gz", ".bz2"]),
        (
            "Code",
            &[
                ".py", ".js", ".html", ".css", ".java", ".cpp", ".c", ".h", ".json", ".xml",
            ],
        ),
        (
            "Executables",
            &[".exe", ".msi", ".bat", ".sh", ".app", ".dmg"],
        ),
        ("Fonts", &[".ttf", ".otf", ".woff", ".woff2"]),
    ];

    table
        .iter()
        .map(|(category, extensions)| {
            (
                (*category).to_string(),
                extensions.iter().map(|e| (*e).to_string()).collect(),
            )
        })
        .collect()
}

/// The built-in keyword rules, checked in order before the extension table.
fn default_rules() -> Vec<RuleConfig> {
    vec![
        RuleConfig {
            keywords: vec![
                "invoice".to_string(),
                "receipt".to_string(),
                "contract".to_string(),
            ],
            patterns: Vec::new(),
            category: "Documents".to_string(),
        },
        RuleConfig {
            keywords: vec!["screenshot".to_string()],
            patterns: Vec::new(),
            category: "Images".to_string(),
        },
        RuleConfig {
            keywords: vec!["setup".to_string(), "installer".to_string()],
            patterns: Vec::new(),
            category: "Executables".to_string(),
        },
    ]
}
