//! AI classification boundary.
//!
//! Classification backends live behind the [`AiClassifier`] trait. The core
//! never depends on a concrete service: `is_available` gates use of the
//! adapter, and any `classify` failure is degraded to no-decision by the
//! classification chain so a flaky backend can never block organizing.

use std::fmt;
use std::path::Path;

/// A failure inside an AI backend.
///
/// These never propagate past the classification chain; they are logged and
/// treated as no-decision.
#[derive(Debug, Clone)]
pub struct AiError {
    reason: String,
}

impl AiError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AI classification failed: {}", self.reason)
    }
}

impl std::error::Error for AiError {}

/// An optional external classification capability.
pub trait AiClassifier {
    /// Capability probe. Must not fail; missing credentials or configuration
    /// mean `false`, not an error.
    fn is_available(&self) -> bool;

    /// Best-effort classification of one file. `Ok(None)` means the backend
    /// made no decision. Implementations should bound their own latency;
    /// a backend that blocks indefinitely blocks the whole run.
    fn classify(
        &self,
        name: &str,
        extension: &str,
        path: &Path,
    ) -> Result<Option<String>, AiError>;
}

/// The adapter used when no AI backend is configured.
pub struct UnavailableClassifier;

impl AiClassifier for UnavailableClassifier {
    fn is_available(&self) -> bool {
        false
    }

    fn classify(&self, _: &str, _: &str, _: &Path) -> Result<Option<String>, AiError> {
        Ok(None)
    }
}
