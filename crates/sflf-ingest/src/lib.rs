//! FOIA log ingestion.
//!
//! Reads CSV files and spreadsheets into a [`sflf_model::RawTable`],
//! recovering from the usual export defects along the way:
//!
//! - **Header recovery**: placeholder headers, headers on a later row, or no
//!   header at all (labels are then inferred from the data)
//! - **Leading-row skip**: report banners and blank rows above the data
//! - **Label cleanup**: trimming, positional names for blanks, deduplication
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use sflf_ingest::{SourceFormat, load};
//!
//! let path = Path::new("uploads/doj_2023.xlsx");
//! let (table, recovery) = load(path, SourceFormat::from_path(path)?)?;
//! for action in recovery.iter() {
//!     println!("{action}");
//! }
//! ```

mod cleanup;
mod error;
mod format;
mod header;
mod infer;
mod loader;
mod reader;
mod recovery;

// === Error Types ===
pub use error::{LoadError, Result};

// === Loading ===
pub use format::SourceFormat;
pub use loader::{load, load_path};
pub use reader::{
    Grid, MAX_UPLOAD_SIZE, check_file_size, check_file_size_with_limit, read_grid,
    validate_encoding,
};

// === Recovery ===
pub use cleanup::{LEADING_ROW_WINDOW, leading_rows_to_skip};
pub use header::{HeaderLayout, finalize_labels, is_placeholder, recover_header};
pub use infer::{ColumnGuess, INFERENCE_SAMPLE_ROWS, infer_labels};
pub use recovery::{RecoveryAction, RecoveryLog};
