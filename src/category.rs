//! Extension-based file categorization.
//!
//! This module maps file extensions to category names. The table is built
//! once from configuration and never mutated afterwards; lookups are
//! case-insensitive and accept extensions with or without a leading dot.
//!
//! # Examples
//!
//! ```
//! use sortwise::category::CategoryTable;
//! use sortwise::config::OrganizerConfig;
//!
//! let config = OrganizerConfig::default();
//! let table = CategoryTable::from_config(&config.categories).unwrap();
//! assert_eq!(table.lookup(".pdf"), Some("Documents"));
//! assert_eq!(table.category_for(".xyz"), "Other");
//! ```

use crate::config::ConfigError;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

/// The category assigned to files no table entry or rule covers.
pub const OTHER_CATEGORY: &str = "Other";

/// Immutable mapping from normalized extension to category name.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    by_extension: HashMap<String, String>,
}

impl CategoryTable {
    /// Builds a table from the configured `category -> extensions` map.
    ///
    /// Extensions are normalized to lowercase with a leading dot before
    /// insertion.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateExtension` if the same extension is
    /// registered under two different categories. Listing an extension twice
    /// under the same category is harmless and ignored.
    pub fn from_config(categories: &BTreeMap<String, Vec<String>>) -> Result<Self, ConfigError> {
        let mut by_extension = HashMap::new();

        for (category, extensions) in categories {
            for extension in extensions {
                let normalized = normalize_extension(extension);
                match by_extension.entry(normalized) {
                    Entry::Vacant(slot) => {
                        slot.insert(category.clone());
                    }
                    Entry::Occupied(existing) if existing.get() != category => {
                        return Err(ConfigError::DuplicateExtension {
                            extension: existing.key().clone(),
                            first: existing.get().clone(),
                            second: category.clone(),
                        });
                    }
                    Entry::Occupied(_) => {}
                }
            }
        }

        Ok(Self { by_extension })
    }

    /// Looks up the category for an extension, if one is configured.
    ///
    /// Total over all string inputs, including the empty string.
    pub fn lookup(&self, extension: &str) -> Option<&str> {
        self.by_extension
            .get(&normalize_extension(extension))
            .map(String::as_str)
    }

    /// Like [`lookup`](Self::lookup), falling back to [`OTHER_CATEGORY`].
    pub fn category_for(&self, extension: &str) -> &str {
        self.lookup(extension).unwrap_or(OTHER_CATEGORY)
    }
}

/// Lowercases an extension and ensures a leading dot. `""` stays `""`.
fn normalize_extension(extension: &str) -> String {
    let lowered = extension.trim().to_lowercase();
    if lowered.is_empty() || lowered.starts_with('.') {
        lowered
    } else {
        format!(".{}", lowered)
    }
}
