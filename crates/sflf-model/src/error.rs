use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("column '{column}' has {actual} cells but the table has {expected} rows")]
    RaggedColumn {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("duplicate column label: {0}")]
    DuplicateColumn(String),
    #[error("'{0}' is not a canonical SFLF column")]
    UnknownColumn(String),
    #[error("'{0}' is not a canonical SFLF status")]
    UnknownStatus(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
