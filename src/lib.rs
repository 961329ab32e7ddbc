//! sortwise - classify files by type and move them into category folders
//!
//! This library classifies the immediate entries of a source directory and
//! relocates regular files into category subdirectories of a destination.
//! Category decisions follow a priority chain (AI adapter, then keyword and
//! pattern rules, then the extension table), filename collisions are renamed
//! deterministically, and every run reports moved/skipped/error counts.
//! A dry-run mode previews the outcome without touching the filesystem.

pub mod ai;
pub mod category;
pub mod classify;
pub mod cli;
pub mod config;
pub mod mover;
pub mod organizer;
pub mod output;
pub mod rules;

pub use ai::{AiClassifier, AiError, UnavailableClassifier};
pub use category::{CategoryTable, OTHER_CATEGORY};
pub use classify::{Classification, Classifier, FileEntry, Provenance};
pub use config::{ConfigError, OrganizerConfig, RuleConfig};
pub use mover::{MoveError, Mover};
pub use organizer::{OrganizeError, OrganizeOptions, Organizer, RunStats};
pub use rules::RuleSet;
