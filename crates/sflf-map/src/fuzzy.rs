use rapidfuzz::fuzz;
use sflf_model::MatchMethod;

use crate::strategy::{MatchResult, NameMatchStrategy, Query};

/// Similarity a candidate must exceed.
pub const FUZZY_THRESHOLD: f64 = 0.6;
/// Fuzzy matches are scaled down by this factor.
pub const FUZZY_CONFIDENCE_SCALE: f64 = 0.8;

/// Normalized Indel similarity against every canonical name.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyStrategy;

impl NameMatchStrategy for FuzzyStrategy {
    fn name(&self) -> &'static str {
        "fuzzy"
    }

    fn resolve(&self, query: &Query<'_>) -> Option<MatchResult> {
        let label = query.normalized.as_str();
        if label.is_empty() {
            return None;
        }
        let mut best: Option<(&str, f64)> = None;
        for &candidate in query.vocabulary.canonical_names() {
            if candidate.is_empty() {
                continue;
            }
            let ratio = fuzz::ratio(label.chars(), candidate.chars());
            if ratio > FUZZY_THRESHOLD && best.is_none_or(|(_, score)| ratio > score) {
                best = Some((candidate, ratio));
            }
        }
        best.map(|(canonical, ratio)| {
            tracing::trace!(label, canonical, ratio, "fuzzy candidate accepted");
            MatchResult::new(
                canonical,
                (ratio * FUZZY_CONFIDENCE_SCALE) as f32,
                MatchMethod::Fuzzy,
            )
        })
    }
}
