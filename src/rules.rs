//! Keyword and pattern rules over filenames.
//!
//! Rules are checked before the extension table and independently of the
//! extension: a rule binding the keyword "invoice" to `Documents` sends
//! `invoice_scan.png` to `Documents`, not `Images`. Rule order is a
//! correctness invariant, not an optimization; the first matching rule in
//! declaration order always wins.

use crate::config::{ConfigError, RuleConfig};
use regex::Regex;

/// A single rule with pre-compiled matchers.
#[derive(Debug, Clone)]
struct CompiledRule {
    /// Lowercased keywords, matched as substrings of the lowercased filename.
    keywords: Vec<String>,
    /// Compiled regex patterns, matched against the filename as-is.
    patterns: Vec<Regex>,
    category: String,
}

impl CompiledRule {
    fn matches(&self, lowered_name: &str, name: &str) -> bool {
        self.keywords.iter().any(|k| lowered_name.contains(k))
            || self.patterns.iter().any(|p| p.is_match(name))
    }
}

/// An ordered list of compiled rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compiles configured rules, validating their regex patterns up front.
    ///
    /// Empty keywords are discarded; they would otherwise match every name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRegexPattern` if any pattern fails to
    /// compile.
    pub fn compile(rules: &[RuleConfig]) -> Result<Self, ConfigError> {
        let rules = rules
            .iter()
            .map(|rule| {
                let patterns = rule
                    .patterns
                    .iter()
                    .map(|pattern| {
                        Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                            pattern: pattern.clone(),
                            reason: e.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(CompiledRule {
                    keywords: rule
                        .keywords
                        .iter()
                        .filter(|k| !k.is_empty())
                        .map(|k| k.to_lowercase())
                        .collect(),
                    patterns,
                    category: rule.category.clone(),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self { rules })
    }

    /// Returns the category of the first rule matching `filename`, if any.
    ///
    /// Keyword matching is case-insensitive; regex patterns see the name
    /// verbatim. Deterministic: the same filename and rule list always yield
    /// the same answer.
    pub fn matches(&self, filename: &str) -> Option<&str> {
        let lowered = filename.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered, filename))
            .map(|rule| rule.category.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(keywords: &[&str], patterns: &[&str], category: &str) -> RuleConfig {
        RuleConfig {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_keyword_match() {
        let rules = RuleSet::compile(&[rule(&["invoice"], &[], "Documents")]).unwrap();
        assert_eq!(rules.matches("invoice_jan.pdf"), Some("Documents"));
        assert_eq!(rules.matches("photo.jpg"), None);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let rules = RuleSet::compile(&[rule(&["Invoice"], &[], "Documents")]).unwrap();
        assert_eq!(rules.matches("INVOICE_2024.PDF"), Some("Documents"));
        assert_eq!(rules.matches("my-invoice.png"), Some("Documents"));
    }

    #[test]
    fn test_first_rule_wins_in_declaration_order() {
        let rules = RuleSet::compile(&[
            rule(&["invoice"], &[], "Documents"),
            rule(&["in"], &[], "Other"),
        ])
        .unwrap();

        // Both rules could match; the first one declared must win.
        assert_eq!(rules.matches("invoice_in_jan.pdf"), Some("Documents"));
        // Only the second rule matches here.
        assert_eq!(rules.matches("checkin.txt"), Some("Other"));
    }

    #[test]
    fn test_regex_pattern_match() {
        let rules = RuleSet::compile(&[rule(&[], &[r"^IMG_\d{4}"], "Images")]).unwrap();
        assert_eq!(rules.matches("IMG_2041.heic"), Some("Images"));
        assert_eq!(rules.matches("IMG_12.heic"), None);
    }

    #[test]
    fn test_keyword_and_pattern_in_one_rule() {
        let rules =
            RuleSet::compile(&[rule(&["screenshot"], &[r"^Screen Shot \d{4}"], "Images")]).unwrap();
        assert_eq!(rules.matches("screenshot-tuesday.png"), Some("Images"));
        assert_eq!(rules.matches("Screen Shot 2024-01-02.png"), Some("Images"));
        assert_eq!(rules.matches("diagram.png"), None);
    }

    #[test]
    fn test_empty_rule_set_never_matches() {
        let rules = RuleSet::compile(&[]).unwrap();
        assert_eq!(rules.matches("anything.txt"), None);
    }

    #[test]
    fn test_empty_keywords_are_discarded() {
        let rules = RuleSet::compile(&[rule(&[""], &[], "Documents")]).unwrap();
        assert_eq!(rules.matches("anything.txt"), None);
    }

    #[test]
    fn test_invalid_regex_is_an_error() {
        let result = RuleSet::compile(&[rule(&[], &["[invalid("], "Documents")]);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidRegexPattern { .. })
        ));
    }

    #[test]
    fn test_same_input_is_deterministic() {
        let rules = RuleSet::compile(&[
            rule(&["report"], &[], "Documents"),
            rule(&["photo"], &[], "Images"),
        ])
        .unwrap();

        for _ in 0..3 {
            assert_eq!(rules.matches("photo_report.pdf"), Some("Documents"));
        }
    }
}
