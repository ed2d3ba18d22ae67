//! The per-file pipeline: Load, Match, Override, Normalize, Persist.
//!
//! Each stage takes the previous stage's output by reference and returns a
//! new value. The [`AuditLog`] is threaded through every stage and written
//! next to the output.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use sflf_ingest::{RecoveryLog, SourceFormat, load};
use sflf_map::{Matcher, status_column};
use sflf_model::{
    AuditLog, ColumnMappings, NormalizedTable, RawTable, Stage, StatusMappings, UploadMetadata,
    is_sflf_column, is_sflf_status, vocabulary,
};
use sflf_normalize::{
    audit_file_name, normalize, output_file_name, write_audit_json, write_normalized_csv,
};
use tracing::{info, info_span};

use crate::types::{FileOutcome, FileReport};

/// Human decisions applied between matching and normalization.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `(original column label, canonical column)`.
    pub columns: Vec<(String, String)>,
    /// Column holding status values, instead of the matched one.
    pub status_column: Option<String>,
    /// `(original status value, canonical status)`.
    pub statuses: Vec<(String, String)>,
}

impl Overrides {
    /// Rejects targets outside the SFLF vocabulary before any file is read.
    pub fn validate(&self) -> Result<()> {
        for (original, canonical) in &self.columns {
            if !is_sflf_column(canonical) {
                bail!("'{canonical}' (for column '{original}') is not an SFLF column");
            }
        }
        for (original, canonical) in &self.statuses {
            if !is_sflf_status(canonical) {
                bail!("'{canonical}' (for status '{original}') is not an SFLF status");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Overrides detection from the file extension.
    pub format: Option<SourceFormat>,
    pub output_dir: PathBuf,
    pub metadata: UploadMetadata,
    pub overrides: Overrides,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct Matched {
    pub columns: ColumnMappings,
    pub statuses: StatusMappings,
}

pub fn load_stage(
    path: &Path,
    format: Option<SourceFormat>,
    audit: &mut AuditLog,
) -> Result<(RawTable, RecoveryLog)> {
    let format = match format {
        Some(format) => format,
        None => SourceFormat::from_path(path)?,
    };
    let (table, recovery) = load(path, format)?;
    for action in recovery.iter() {
        if action.is_warning() {
            audit.warning(Stage::Load, action.to_string());
        } else {
            audit.info(Stage::Load, action.to_string());
        }
    }
    audit.info(
        Stage::Load,
        format!(
            "Loaded {} rows and {} columns from {}",
            table.height(),
            table.width(),
            path.display()
        ),
    );
    Ok((table, recovery))
}

/// Column matching only; statuses depend on which column overrides pick.
pub fn match_stage(matcher: &Matcher, table: &RawTable, audit: &mut AuditLog) -> ColumnMappings {
    matcher.map_columns(table, audit)
}

/// Applies column overrides, settles the status column, maps its values and
/// applies status overrides.
pub fn override_stage(
    matcher: &Matcher,
    table: &RawTable,
    mut columns: ColumnMappings,
    overrides: &Overrides,
    audit: &mut AuditLog,
) -> Matched {
    for (original, canonical) in &overrides.columns {
        confirm_column(table, &mut columns, original, canonical, audit);
    }
    if let Some(label) = &overrides.status_column {
        confirm_column(table, &mut columns, label, vocabulary::STATUS, audit);
    }

    let statuses = match status_column(&columns) {
        Some(label) => {
            let mut statuses = matcher.map_statuses(table, label, audit);
            for (original, canonical) in &overrides.statuses {
                statuses.confirm(original, canonical);
                audit.info(
                    Stage::Match,
                    format!("Status '{original}' manually mapped to '{canonical}'"),
                );
            }
            statuses
        }
        None => {
            audit.warning(
                Stage::Match,
                "No status column identified; status values left as-is",
            );
            StatusMappings::new()
        }
    };
    Matched { columns, statuses }
}

fn confirm_column(
    table: &RawTable,
    columns: &mut ColumnMappings,
    original: &str,
    canonical: &str,
    audit: &mut AuditLog,
) {
    if table.column(original).is_none() {
        audit.warning(
            Stage::Match,
            format!("Override for unknown column '{original}' ignored"),
        );
        return;
    }
    columns.confirm(original, canonical);
    audit.info(
        Stage::Match,
        format!("Column '{original}' manually mapped to '{canonical}'"),
    );
}

pub fn normalize_stage(
    table: &RawTable,
    matched: &Matched,
    metadata: &UploadMetadata,
    audit: &mut AuditLog,
) -> Result<NormalizedTable> {
    normalize(
        table,
        &matched.columns,
        &matched.statuses,
        metadata,
        audit,
    )
    .context("normalize table")
}

/// Writes the CSV and then the audit log, returning the CSV path (absent
/// when no column mapped) and the audit path. A failed audit write removes
/// the CSV so a file is never left half-persisted.
pub fn persist_stage(
    input: &Path,
    normalized: &NormalizedTable,
    output_dir: &Path,
    audit: &mut AuditLog,
) -> Result<(Option<PathBuf>, PathBuf)> {
    let audit_path = output_dir.join(audit_file_name(input));
    let output = if normalized.width() == 0 {
        audit.warning(
            Stage::Persist,
            "No columns mapped to SFLF; normalized CSV not written",
        );
        None
    } else {
        let output = output_dir.join(output_file_name(input));
        write_normalized_csv(normalized, &output)
            .with_context(|| format!("write {}", output.display()))?;
        audit.info(
            Stage::Persist,
            format!("Wrote normalized log to {}", output.display()),
        );
        Some(output)
    };
    if let Err(error) = write_audit_json(audit, &audit_path) {
        if let Some(output) = &output {
            let _ = fs::remove_file(output);
        }
        return Err(error).with_context(|| format!("write {}", audit_path.display()));
    }
    Ok((output, audit_path))
}

/// Runs every stage for one file.
pub fn process_file(path: &Path, matcher: &Matcher, options: &PipelineOptions) -> Result<FileOutcome> {
    let span = info_span!("file", path = %path.display());
    let _guard = span.enter();
    let started = Instant::now();
    let mut audit = AuditLog::new();

    let (table, _) = load_stage(path, options.format, &mut audit)
        .with_context(|| format!("load {}", path.display()))?;
    let columns = match_stage(matcher, &table, &mut audit);
    let matched = override_stage(matcher, &table, columns, &options.overrides, &mut audit);
    let normalized = normalize_stage(&table, &matched, &options.metadata, &mut audit)?;

    let (output, audit_path) = if options.dry_run {
        (None, None)
    } else {
        let (output, audit_path) =
            persist_stage(path, &normalized, &options.output_dir, &mut audit)?;
        (output, Some(audit_path))
    };

    info!(
        rows = normalized.height(),
        columns = normalized.width(),
        warnings = audit.warning_count(),
        duration_ms = started.elapsed().as_millis(),
        "file processed"
    );
    Ok(FileOutcome {
        rows: normalized.height(),
        source_columns: table.width(),
        mapped_columns: matched.columns.mapped_count(),
        output_columns: normalized.width(),
        status_values: matched.statuses.len(),
        mapped_statuses: matched.statuses.mapped_count(),
        warnings: audit.warning_count(),
        output,
        audit: audit_path,
    })
}

/// Processes every file; one failure is recorded and the rest still run.
pub fn process_files(
    inputs: &[PathBuf],
    matcher: &Matcher,
    options: &PipelineOptions,
) -> Vec<FileReport> {
    inputs
        .iter()
        .map(|input| {
            let outcome = process_file(input, matcher, options).map_err(|error| {
                let message = format!("{error:#}");
                tracing::error!(path = %input.display(), error = %message, "file failed");
                message
            });
            FileReport {
                input: input.clone(),
                outcome,
            }
        })
        .collect()
}
