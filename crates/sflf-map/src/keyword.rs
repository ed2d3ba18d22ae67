//! Substring keyword tables for columns and statuses.

use sflf_model::{MatchMethod, Vocabulary};

use crate::strategy::{MatchResult, NameMatchStrategy, Query};

/// Confidence when the label is exactly the keyword.
pub const WHOLE_KEYWORD_CONFIDENCE: f32 = 0.9;
/// Confidence when the keyword is only part of the label.
pub const PARTIAL_KEYWORD_CONFIDENCE: f32 = 0.7;

type KeywordTable = &'static [(&'static str, &'static [&'static str])];

const COLUMN_KEYWORDS: KeywordTable = &[
    (
        "request id",
        &["id", "number", "tracking", "control", "case", "ref"],
    ),
    ("requester", &["name", "requester", "requestor", "from", "who"]),
    (
        "requester organization",
        &["org", "company", "affiliation", "entity"],
    ),
    (
        "subject",
        &["subject", "description", "request", "topic", "about"],
    ),
    (
        "date requested",
        &["requested", "received", "submitted", "date_req", "rec'd", "rcvd"],
    ),
    ("date perfected", &["perfected", "complete", "perfection"]),
    (
        "date completed",
        &["completed", "closed", "resolved", "finished"],
    ),
    ("status", &["status", "state", "disposition", "outcome"]),
    (
        "exemptions cited",
        &["exemption", "withhold", "redact", "b("],
    ),
    ("fee category", &["fee_cat", "category", "fee_type"]),
    ("fee waiver", &["waiver", "fee_waiv", "discount"]),
    ("fees charged", &["fee", "cost", "charge", "amount", "paid"]),
    ("processed under privacy act", &["privacy", "privacy_act"]),
];

const STATUS_KEYWORDS: KeywordTable = &[
    (
        "processed",
        &["processing", "in process", "pending", "open", "active"],
    ),
    ("appealing", &["appeal", "appealed", "under appeal"]),
    ("fix", &["fix", "clarification", "need info", "incomplete"]),
    ("payment", &["payment", "fee", "invoice", "billing"]),
    ("lawsuit", &["lawsuit", "litigation", "court", "legal"]),
    ("rejected", &["rejected", "denied", "reject", "denial"]),
    (
        "no_docs",
        &["no docs", "no records", "no responsive", "nothing found"],
    ),
    ("done", &["done", "complete", "closed", "fulfilled"]),
    ("partial", &["partial", "partially", "some records"]),
    (
        "abandoned",
        &["abandoned", "withdrawn", "cancelled", "closed by requester"],
    ),
];

/// First keyword contained in the label wins, in table order. Status values
/// also match a keyword that contains them.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordStrategy;

impl KeywordStrategy {
    fn table(vocabulary: Vocabulary) -> KeywordTable {
        match vocabulary {
            Vocabulary::Column => COLUMN_KEYWORDS,
            Vocabulary::Status => STATUS_KEYWORDS,
        }
    }
}

impl NameMatchStrategy for KeywordStrategy {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn resolve(&self, query: &Query<'_>) -> Option<MatchResult> {
        let label = query.normalized.as_str();
        if label.is_empty() {
            return None;
        }
        let either_way = query.vocabulary == Vocabulary::Status;
        Self::table(query.vocabulary)
            .iter()
            .find_map(|(canonical, keywords)| {
                keywords
                    .iter()
                    .find(|keyword| {
                        label.contains(**keyword) || (either_way && keyword.contains(label))
                    })
                    .map(|keyword| (*canonical, *keyword))
            })
            .map(|(canonical, keyword)| {
                let confidence = if keyword == label {
                    WHOLE_KEYWORD_CONFIDENCE
                } else {
                    PARTIAL_KEYWORD_CONFIDENCE
                };
                MatchResult::new(canonical, confidence, MatchMethod::Keyword)
            })
    }
}
