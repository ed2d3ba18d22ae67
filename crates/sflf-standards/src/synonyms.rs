//! Synonym tables and the `standard: syn1, syn2` text format.

use std::collections::BTreeMap;

use sflf_model::Vocabulary;
use tracing::{debug, warn};

/// Lowercase synonym to canonical name, for one vocabulary.
#[derive(Debug, Clone)]
pub struct SynonymTable {
    vocabulary: Vocabulary,
    entries: BTreeMap<String, String>,
}

/// Why a synonym was not added to a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The target is not a name in the table's vocabulary.
    UnknownCanonical,
    /// The synonym is the canonical name itself.
    SelfMapping,
    /// The synonym already maps to another canonical name.
    Conflict { existing: String },
    /// Exact repeat of an existing entry.
    Duplicate,
}

impl SynonymTable {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            entries: BTreeMap::new(),
        }
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.vocabulary
    }

    /// Adds `synonym` for `canonical`. The first entry for a synonym wins.
    pub fn insert(&mut self, canonical: &str, synonym: &str) -> Result<(), Rejection> {
        let canonical = canonical.trim().to_lowercase();
        let key = synonym.trim().to_lowercase();
        if !self.vocabulary.contains(&canonical) {
            return Err(Rejection::UnknownCanonical);
        }
        if key == canonical {
            return Err(Rejection::SelfMapping);
        }
        match self.entries.get(&key) {
            Some(existing) if *existing == canonical => Err(Rejection::Duplicate),
            Some(existing) => Err(Rejection::Conflict {
                existing: existing.clone(),
            }),
            None => {
                self.entries.insert(key, canonical);
                Ok(())
            }
        }
    }

    /// Case-insensitive lookup of a trimmed label.
    pub fn lookup(&self, label: &str) -> Option<&str> {
        self.entries
            .get(&label.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(synonym, canonical)| (synonym.as_str(), canonical.as_str()))
    }

    /// Number of synonyms per canonical name, in vocabulary order.
    pub fn counts(&self) -> Vec<(&'static str, usize)> {
        self.vocabulary
            .canonical_names()
            .iter()
            .map(|name| {
                let count = self
                    .entries
                    .values()
                    .filter(|canonical| canonical.as_str() == *name)
                    .count();
                (*name, count)
            })
            .collect()
    }

    /// Merges entries parsed from `text` into this table.
    ///
    /// Lines look like `standard_name: synonym1, "synonym2", 'synonym3'`.
    /// Blank lines and lines without a colon are ignored. Returns the number
    /// of synonyms added.
    pub fn extend_from_str(&mut self, text: &str) -> usize {
        let mut added = 0;
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            let Some((canonical, synonyms)) = line.split_once(':') else {
                continue;
            };
            for synonym in synonyms.split(',').map(strip_quotes) {
                if synonym.is_empty() {
                    continue;
                }
                match self.insert(canonical, synonym) {
                    Ok(()) => added += 1,
                    Err(Rejection::UnknownCanonical) => warn!(
                        line = line_no + 1,
                        canonical = canonical.trim(),
                        vocabulary = self.vocabulary.as_str(),
                        "skipping synonym for unknown canonical name"
                    ),
                    Err(Rejection::Conflict { existing }) => warn!(
                        line = line_no + 1,
                        synonym,
                        existing = %existing,
                        "synonym already maps elsewhere, keeping first entry"
                    ),
                    Err(Rejection::SelfMapping | Rejection::Duplicate) => {
                        debug!(line = line_no + 1, synonym, "ignoring redundant synonym");
                    }
                }
            }
        }
        added
    }
}

/// Parses synonym text into a new table for `vocabulary`.
pub fn parse_synonyms(text: &str, vocabulary: Vocabulary) -> SynonymTable {
    let mut table = SynonymTable::new(vocabulary);
    table.extend_from_str(text);
    table
}

fn strip_quotes(raw: &str) -> &str {
    raw.trim().trim_matches('"').trim_matches('\'')
}

/// Column and status synonym tables, shared read-only during matching.
#[derive(Debug, Clone)]
pub struct SynonymDictionary {
    pub columns: SynonymTable,
    pub statuses: SynonymTable,
}

impl Default for SynonymDictionary {
    fn default() -> Self {
        Self {
            columns: SynonymTable::new(Vocabulary::Column),
            statuses: SynonymTable::new(Vocabulary::Status),
        }
    }
}

impl SynonymDictionary {
    pub fn new(columns: SynonymTable, statuses: SynonymTable) -> Self {
        Self { columns, statuses }
    }

    pub fn table(&self, vocabulary: Vocabulary) -> &SynonymTable {
        match vocabulary {
            Vocabulary::Column => &self.columns,
            Vocabulary::Status => &self.statuses,
        }
    }

    pub fn lookup(&self, vocabulary: Vocabulary, label: &str) -> Option<&str> {
        self.table(vocabulary).lookup(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_quotes_and_whitespace() {
        assert_eq!(strip_quotes(r#"  "Case No"  "#), "Case No");
        assert_eq!(strip_quotes(" 'ref' "), "ref");
        assert_eq!(strip_quotes("  "), "");
    }

    #[test]
    fn empty_status_is_a_valid_target() {
        let table = parse_synonyms(": n/a, unknown", Vocabulary::Status);
        assert_eq!(table.lookup("N/A"), Some(""));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn empty_column_name_is_rejected() {
        let table = parse_synonyms(": whatever", Vocabulary::Column);
        assert!(table.is_empty());
    }
}
