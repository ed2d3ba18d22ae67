//! The resolution chain and whole-table mapping.

use std::sync::Arc;

use sflf_model::{
    AuditLog, ColumnMappings, Mapping, RawTable, Stage, StatusMappings, Vocabulary, vocabulary,
};
use sflf_standards::SynonymDictionary;
use tracing::debug;

use crate::fuzzy::FuzzyStrategy;
use crate::keyword::KeywordStrategy;
use crate::strategy::{MatchResult, NameMatchStrategy, Query};
use crate::synonym::SynonymStrategy;

/// Resolves labels by trying each strategy in order.
///
/// The default chain is synonym, keyword, fuzzy. Extra strategies are
/// inserted ahead of the fuzzy step so that similarity scoring remains the
/// last resort.
pub struct Matcher {
    strategies: Vec<Box<dyn NameMatchStrategy>>,
}

impl Matcher {
    pub fn new(dictionary: Arc<SynonymDictionary>) -> Self {
        Self {
            strategies: vec![
                Box::new(SynonymStrategy::new(dictionary)),
                Box::new(KeywordStrategy),
                Box::new(FuzzyStrategy),
            ],
        }
    }

    /// Adds a strategy just before the fuzzy step.
    pub fn with_strategy(mut self, strategy: Box<dyn NameMatchStrategy>) -> Self {
        let at = self
            .strategies
            .iter()
            .position(|s| s.name() == "fuzzy")
            .unwrap_or(self.strategies.len());
        self.strategies.insert(at, strategy);
        self
    }

    #[cfg(feature = "remote")]
    pub fn with_remote(self, remote: crate::remote::RemoteStrategy) -> Self {
        self.with_strategy(Box::new(remote))
    }

    /// Names of the strategies in the order they run.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    fn resolve(&self, label: &str, vocabulary: Vocabulary) -> MatchResult {
        let query = Query::new(label, vocabulary);
        if query.normalized.is_empty() {
            return MatchResult::unmapped(label);
        }
        for strategy in &self.strategies {
            if let Some(result) = strategy.resolve(&query) {
                debug!(
                    label,
                    vocabulary = vocabulary.as_str(),
                    strategy = strategy.name(),
                    mapped = %result.name,
                    confidence = result.confidence,
                    "label matched"
                );
                return result;
            }
        }
        MatchResult::unmapped(label)
    }

    pub fn match_column(&self, label: &str) -> MatchResult {
        self.resolve(label, Vocabulary::Column)
    }

    pub fn match_status(&self, label: &str) -> MatchResult {
        self.resolve(label, Vocabulary::Status)
    }

    /// One mapping per column label of `raw`, in column order.
    pub fn map_columns(&self, raw: &RawTable, audit: &mut AuditLog) -> ColumnMappings {
        let mut mappings = ColumnMappings::new();
        for label in raw.labels() {
            let result = self.match_column(label);
            record(audit, "Column", label, &result);
            mappings.upsert(to_mapping(label, result));
        }
        mappings
    }

    /// One mapping per distinct non-blank value of `column`, in first-seen
    /// order. Values are trimmed before matching.
    pub fn map_statuses(&self, raw: &RawTable, column: &str, audit: &mut AuditLog) -> StatusMappings {
        let mut mappings = StatusMappings::new();
        let Some(source) = raw.column(column) else {
            audit.warning(
                Stage::Match,
                format!("Status column '{column}' not found; statuses left unmapped"),
            );
            return mappings;
        };
        for cell in source.cells.iter().filter(|cell| !cell.is_blank()) {
            let display = cell.display();
            let value = display.trim();
            if mappings.get(value).is_some() {
                continue;
            }
            let result = self.match_status(value);
            record(audit, "Status", value, &result);
            mappings.upsert(to_mapping(value, result));
        }
        mappings
    }
}

/// Column holding status values: the confirmed one if any, otherwise the
/// first mapped in table order.
pub fn status_column(columns: &ColumnMappings) -> Option<&str> {
    columns.sources_for(vocabulary::STATUS).next()
}

fn to_mapping(original: &str, result: MatchResult) -> Mapping {
    Mapping {
        original: original.to_string(),
        mapped: result.name,
        confidence: result.confidence,
        method: result.method,
        user_confirmed: false,
    }
}

fn record(audit: &mut AuditLog, kind: &str, original: &str, result: &MatchResult) {
    if result.is_mapped() {
        audit.info(
            Stage::Match,
            format!(
                "{kind} '{original}' mapped to '{}' via {} (confidence: {:.2})",
                result.name, result.method, result.confidence
            ),
        );
    } else {
        audit.warning(
            Stage::Match,
            format!("No mapping found for {} '{original}'", kind.to_lowercase()),
        );
    }
}
