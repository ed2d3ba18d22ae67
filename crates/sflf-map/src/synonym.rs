use std::sync::Arc;

use sflf_model::MatchMethod;
use sflf_standards::SynonymDictionary;

use crate::strategy::{MatchResult, NameMatchStrategy, Query};

/// Exact, case-insensitive dictionary lookup.
#[derive(Debug, Clone)]
pub struct SynonymStrategy {
    dictionary: Arc<SynonymDictionary>,
}

impl SynonymStrategy {
    pub fn new(dictionary: Arc<SynonymDictionary>) -> Self {
        Self { dictionary }
    }
}

impl NameMatchStrategy for SynonymStrategy {
    fn name(&self) -> &'static str {
        "synonym"
    }

    fn resolve(&self, query: &Query<'_>) -> Option<MatchResult> {
        self.dictionary
            .lookup(query.vocabulary, &query.normalized)
            .map(|canonical| MatchResult::new(canonical, 1.0, MatchMethod::Synonym))
    }
}
