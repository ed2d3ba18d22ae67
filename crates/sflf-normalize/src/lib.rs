//! Standard FOIA Log Format table construction and output.
//!
//! [`normalize`] turns a loaded table plus its column and status mappings
//! into a [`sflf_model::NormalizedTable`]; [`write_normalized_csv`] persists
//! it with a temp-file-and-rename write.

mod error;
mod normalize;
mod output;

pub use error::{NormalizationError, Result};
pub use normalize::normalize;
pub use output::{
    audit_file_name, output_file_name, render_csv, write_atomic, write_audit_json,
    write_normalized_csv,
};
