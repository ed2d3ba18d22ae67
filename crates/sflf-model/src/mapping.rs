//! Mapping types from source labels to canonical SFLF names.
//!
//! A [`MappingTable`] holds one [`Mapping`] per original label, in the order
//! the labels were first mapped. Column and status mappings share the same
//! representation.

use serde::{Deserialize, Serialize};

/// How a mapping was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    /// Exact hit in the synonym dictionary.
    Synonym,
    /// Substring hit in the keyword table.
    Keyword,
    /// Answer from the remote language-model mapper.
    Remote,
    /// String similarity against the canonical names.
    Fuzzy,
    /// Nothing matched; the original label is kept.
    Unmapped,
    /// Set by a human override.
    Manual,
}

impl MatchMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Synonym => "synonym",
            Self::Keyword => "keyword",
            Self::Remote => "remote",
            Self::Fuzzy => "fuzzy",
            Self::Unmapped => "unmapped",
            Self::Manual => "manual",
        }
    }
}

impl std::fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mapping from an original label to a canonical name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mapping {
    /// Label as it appears in the source.
    pub original: String,
    /// Canonical name, or the original label when unmapped.
    pub mapped: String,
    /// Confidence score (0.0 to 1.0).
    pub confidence: f32,
    pub method: MatchMethod,
    pub user_confirmed: bool,
}

impl Mapping {
    pub fn is_mapped(&self) -> bool {
        self.method != MatchMethod::Unmapped
    }
}

/// Ordered mappings, unique per original label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingTable {
    entries: Vec<Mapping>,
}

/// Mappings from source column labels to canonical SFLF columns.
pub type ColumnMappings = MappingTable;
/// Mappings from source status values to canonical SFLF statuses.
pub type StatusMappings = MappingTable;

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a mapping, overwriting any existing entry for the same label
    /// while keeping its position.
    pub fn upsert(&mut self, mapping: Mapping) {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.original == mapping.original)
        {
            Some(existing) => *existing = mapping,
            None => self.entries.push(mapping),
        }
    }

    /// Records a human decision for `original`.
    pub fn confirm(&mut self, original: &str, mapped: &str) {
        self.upsert(Mapping {
            original: original.to_string(),
            mapped: mapped.to_string(),
            confidence: 1.0,
            method: MatchMethod::Manual,
            user_confirmed: true,
        });
    }

    pub fn get(&self, original: &str) -> Option<&Mapping> {
        self.entries.iter().find(|entry| entry.original == original)
    }

    /// Canonical target for `original`, if it is mapped.
    pub fn target(&self, original: &str) -> Option<&str> {
        self.get(original)
            .filter(|entry| entry.is_mapped())
            .map(|entry| entry.mapped.as_str())
    }

    /// Original labels mapped to `canonical`: user-confirmed labels first,
    /// then the rest, each group in table order.
    pub fn sources_for<'a>(&'a self, canonical: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let group = move |confirmed: bool| {
            self.entries
                .iter()
                .filter(move |entry| {
                    entry.is_mapped()
                        && entry.mapped == canonical
                        && entry.user_confirmed == confirmed
                })
                .map(|entry| entry.original.as_str())
        };
        group(true).chain(group(false))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mapping> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn mapped_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_mapped()).count()
    }
}

impl<'a> IntoIterator for &'a MappingTable {
    type Item = &'a Mapping;
    type IntoIter = std::slice::Iter<'a, Mapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Mapping> for MappingTable {
    fn from_iter<I: IntoIterator<Item = Mapping>>(iter: I) -> Self {
        let mut table = Self::new();
        for mapping in iter {
            table.upsert(mapping);
        }
        table
    }
}
