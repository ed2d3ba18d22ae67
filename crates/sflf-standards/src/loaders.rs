use std::path::{Path, PathBuf};

use sflf_model::Vocabulary;
use tracing::{info, warn};

use crate::error::{Result, StandardsError};
use crate::synonyms::{SynonymDictionary, SynonymTable, parse_synonyms};

const STANDARDS_ENV_VAR: &str = "SFLF_STANDARDS_DIR";

pub const COLUMN_SYNONYMS_FILE: &str = "synonyms.txt";
pub const STATUS_SYNONYMS_FILE: &str = "status_synonyms.txt";

pub fn default_standards_root() -> PathBuf {
    if let Ok(root) = std::env::var(STANDARDS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

pub fn load_synonym_table(path: &Path, vocabulary: Vocabulary) -> Result<SynonymTable> {
    let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let table = parse_synonyms(&text, vocabulary);
    info!(
        path = %path.display(),
        vocabulary = vocabulary.as_str(),
        synonyms = table.len(),
        "loaded synonyms"
    );
    Ok(table)
}

/// Like [`load_synonym_table`], but a missing file yields an empty table.
pub fn load_synonym_table_or_empty(path: &Path, vocabulary: Vocabulary) -> Result<SynonymTable> {
    match load_synonym_table(path, vocabulary) {
        Err(StandardsError::NotFound { path }) => {
            warn!(path = %path.display(), "synonym file not found, continuing without it");
            Ok(SynonymTable::new(vocabulary))
        }
        other => other,
    }
}

pub fn load_dictionary(columns: &Path, statuses: &Path) -> Result<SynonymDictionary> {
    Ok(SynonymDictionary::new(
        load_synonym_table_or_empty(columns, Vocabulary::Column)?,
        load_synonym_table_or_empty(statuses, Vocabulary::Status)?,
    ))
}

pub fn load_dictionary_from(root: &Path) -> Result<SynonymDictionary> {
    load_dictionary(
        &root.join(COLUMN_SYNONYMS_FILE),
        &root.join(STATUS_SYNONYMS_FILE),
    )
}

pub fn load_default_dictionary() -> Result<SynonymDictionary> {
    load_dictionary_from(&default_standards_root())
}
