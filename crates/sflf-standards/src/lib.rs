#![deny(unsafe_code)]

pub mod error;
pub mod loaders;
pub mod synonyms;

pub use crate::error::StandardsError;
pub use crate::loaders::{
    COLUMN_SYNONYMS_FILE, STATUS_SYNONYMS_FILE, default_standards_root, load_default_dictionary,
    load_dictionary, load_dictionary_from, load_synonym_table, load_synonym_table_or_empty,
};
pub use crate::synonyms::{Rejection, SynonymDictionary, SynonymTable, parse_synonyms};
