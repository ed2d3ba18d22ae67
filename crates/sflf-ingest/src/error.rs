//! Error types for loading FOIA log files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that make an upload unreadable.
///
/// Header problems are not errors; they are repaired and recorded in the
/// [`RecoveryLog`](crate::RecoveryLog).
#[derive(Debug, Error)]
pub enum LoadError {
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the upload size limit.
    #[error("file {path} is {size} bytes, larger than the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Extension is neither CSV nor a spreadsheet format.
    #[error("unsupported file format '{extension}': {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Text encoding we cannot read.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// Malformed CSV content.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Spreadsheet could not be opened or decoded.
    #[error("failed to read spreadsheet {path}: {message}")]
    Spreadsheet { path: PathBuf, message: String },

    /// File contains no rows at all.
    #[error("file is empty: {path}")]
    Empty { path: PathBuf },

    /// The recovered table violated a table invariant.
    #[error("invalid table from {path}: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: sflf_model::ModelError,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoadError::FileNotFound {
            path: PathBuf::from("/path/to/log.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/log.csv");
    }

    #[test]
    fn test_not_found_io_error_maps_to_file_not_found() {
        let err = LoadError::io(
            "missing.csv",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(matches!(err, LoadError::FileNotFound { .. }));
    }
}
