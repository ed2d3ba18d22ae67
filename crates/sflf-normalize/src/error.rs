//! Normalization and output error types.

use std::path::PathBuf;

use sflf_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizationError {
    /// Columns of the raw table disagree on height, or an output column was
    /// rejected by the table model.
    #[error("Malformed table: {0}")]
    MalformedTable(#[from] ModelError),

    #[error("Failed to {operation} file: {path}")]
    Output {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode CSV for {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to encode audit log for {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Nothing mapped to an SFLF column, so there is no header to write.
    #[error("No columns to write to {path}")]
    NoColumns { path: PathBuf },

    /// The temporary file was written but could not replace the target.
    #[error("Failed to move {temp_path} over {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl NormalizationError {
    /// A hint for resolving the error, when one applies.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::MalformedTable(_) => Some("Re-export the log so every row has the same columns."),
            Self::Output { .. } | Self::AtomicWriteFailed { .. } => {
                Some("Check disk space and write permissions for the output directory.")
            }
            Self::NoColumns { .. } => {
                Some("Map at least one column with --map-column, or check the header row.")
            }
            Self::Csv { .. } | Self::Json { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizationError>;
