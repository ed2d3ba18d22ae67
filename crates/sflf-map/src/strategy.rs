//! The strategy seam shared by every matching step.

use serde::{Deserialize, Serialize};
use sflf_model::{MatchMethod, Vocabulary};

/// Outcome of matching one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Canonical name, or the original label when unmapped.
    pub name: String,
    /// Confidence score (0.0 to 1.0).
    pub confidence: f32,
    pub method: MatchMethod,
}

impl MatchResult {
    pub fn new(name: impl Into<String>, confidence: f32, method: MatchMethod) -> Self {
        Self {
            name: name.into(),
            confidence,
            method,
        }
    }

    pub fn unmapped(original: &str) -> Self {
        Self::new(original, 0.0, MatchMethod::Unmapped)
    }

    pub fn is_mapped(&self) -> bool {
        self.method != MatchMethod::Unmapped
    }
}

/// A label prepared for matching.
#[derive(Debug, Clone)]
pub struct Query<'a> {
    /// Label exactly as it appeared in the source.
    pub original: &'a str,
    /// Trimmed, lowercased label.
    pub normalized: String,
    pub vocabulary: Vocabulary,
}

impl<'a> Query<'a> {
    pub fn new(original: &'a str, vocabulary: Vocabulary) -> Self {
        Self {
            original,
            normalized: original.trim().to_lowercase(),
            vocabulary,
        }
    }
}

/// One step of the resolution chain. Returns `None` to defer to the next.
pub trait NameMatchStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn resolve(&self, query: &Query<'_>) -> Option<MatchResult>;
}
