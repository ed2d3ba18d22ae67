//! Persisting normalized tables and audit logs.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use sflf_model::{AuditLog, NormalizedTable};

use crate::error::{NormalizationError, Result};

/// `normalized_{stem}.csv` for an uploaded file.
pub fn output_file_name(input: &Path) -> String {
    format!("normalized_{}.csv", file_stem(input))
}

/// `normalized_{stem}.audit.json` for an uploaded file.
pub fn audit_file_name(input: &Path) -> String {
    format!("normalized_{}.audit.json", file_stem(input))
}

fn file_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}

/// Encodes the table as CSV: a header of canonical names, then one record per
/// row. A table without columns has no header and is rejected.
pub fn render_csv(table: &NormalizedTable, path: &Path) -> Result<Vec<u8>> {
    if table.width() == 0 {
        return Err(NormalizationError::NoColumns {
            path: path.to_path_buf(),
        });
    }
    let csv_error = |source| NormalizationError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(table.column_names())
        .map_err(csv_error)?;
    for row in 0..table.height() {
        writer
            .write_record(table.row_strings(row))
            .map_err(csv_error)?;
    }
    writer
        .into_inner()
        .map_err(|e| NormalizationError::Output {
            operation: "encode",
            path: path.to_path_buf(),
            source: e.into_error(),
        })
}

/// Writes the table to `path` atomically.
pub fn write_normalized_csv(table: &NormalizedTable, path: &Path) -> Result<()> {
    let bytes = render_csv(table, path)?;
    write_atomic(path, &bytes)?;
    tracing::info!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "normalized CSV written"
    );
    Ok(())
}

/// Writes the audit log to `path` as pretty-printed JSON, atomically.
pub fn write_audit_json(audit: &AuditLog, path: &Path) -> Result<()> {
    let mut bytes = serde_json::to_vec_pretty(audit).map_err(|source| NormalizationError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    bytes.push(b'\n');
    write_atomic(path, &bytes)?;
    tracing::debug!(path = %path.display(), entries = audit.len(), "audit log written");
    Ok(())
}

/// Writes `bytes` to `<path>.tmp`, syncs it, then renames it over `path`.
///
/// On failure the temporary file is removed and `path` is left untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| NormalizationError::Output {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = temp_path_for(path);
    let result = write_temp(&temp_path, bytes).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| NormalizationError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source: e,
        })
    });
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp(temp_path: &Path, bytes: &[u8]) -> Result<()> {
    let io_error = |operation| {
        move |e| NormalizationError::Output {
            operation,
            path: temp_path.to_path_buf(),
            source: e,
        }
    };
    let mut file = File::create(temp_path).map_err(io_error("create"))?;
    file.write_all(bytes).map_err(io_error("write"))?;
    file.sync_all().map_err(io_error("sync"))?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_upload_stem() {
        let input = Path::new("uploads/doj_2023.xlsx");
        assert_eq!(output_file_name(input), "normalized_doj_2023.csv");
        assert_eq!(audit_file_name(input), "normalized_doj_2023.audit.json");
    }

    #[test]
    fn temp_file_sits_next_to_target() {
        assert_eq!(
            temp_path_for(Path::new("out/normalized_a.csv")),
            PathBuf::from("out/normalized_a.csv.tmp")
        );
    }
}
