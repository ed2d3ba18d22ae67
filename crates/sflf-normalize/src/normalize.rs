//! Builds the canonical output table from a loaded table and its mappings.

use sflf_model::{
    AuditLog, CellValue, ColumnMappings, NormalizedTable, RawColumn, RawTable, SFLF_COLUMNS,
    Stage, StatusMappings, UploadMetadata, vocabulary,
};
use tracing::{debug, info, info_span};

use crate::error::Result;

/// Produces a [`NormalizedTable`] with one column per canonical SFLF column
/// that has a mapped, non-empty source, followed by the upload metadata.
///
/// When several source columns map to the same canonical column a
/// user-confirmed one wins, otherwise the first in table order. Row count
/// always equals `raw.height()`.
pub fn normalize(
    raw: &RawTable,
    columns: &ColumnMappings,
    statuses: &StatusMappings,
    metadata: &UploadMetadata,
    audit: &mut AuditLog,
) -> Result<NormalizedTable> {
    let span = info_span!("normalize", rows = raw.height(), columns = raw.width());
    let _guard = span.enter();

    raw.validate()?;
    report_missing_sources(raw, columns, audit);

    let mut table = NormalizedTable::new(raw.height());
    for &canonical in SFLF_COLUMNS {
        let mut sources = columns
            .sources_for(canonical)
            .filter_map(|label| raw.column(label));
        let Some(source) = sources.next() else {
            continue;
        };
        for duplicate in sources {
            audit.warning(
                Stage::Normalize,
                format!(
                    "Column '{}' also maps to '{canonical}'; keeping '{}'",
                    duplicate.label, source.label
                ),
            );
        }
        if !source.has_content() {
            audit.info(
                Stage::Normalize,
                format!(
                    "Skipped column '{}' ({canonical}): no values",
                    source.label
                ),
            );
            continue;
        }
        let values = if canonical == vocabulary::STATUS {
            rewrite_statuses(source, statuses, audit)
        } else {
            source.cells.clone()
        };
        table.set_column(canonical, values)?;
        audit.info(
            Stage::Normalize,
            format!("Included column '{}' as '{canonical}'", source.label),
        );
    }

    apply_metadata(&mut table, metadata, audit)?;

    info!(
        rows = table.height(),
        columns = table.width(),
        "normalized table built"
    );
    audit.info(
        Stage::Normalize,
        format!(
            "Normalized {} rows into {} columns",
            table.height(),
            table.width()
        ),
    );
    Ok(table)
}

fn report_missing_sources(raw: &RawTable, columns: &ColumnMappings, audit: &mut AuditLog) {
    for mapping in columns.iter().filter(|mapping| mapping.is_mapped()) {
        if raw.column(&mapping.original).is_none() {
            audit.warning(
                Stage::Normalize,
                format!(
                    "Mapped column '{}' not found in the table; ignored",
                    mapping.original
                ),
            );
        }
    }
}

/// Missing cells and values without a mapping pass through unchanged.
fn rewrite_statuses(
    source: &RawColumn,
    statuses: &StatusMappings,
    audit: &mut AuditLog,
) -> Vec<CellValue> {
    let mut rewritten = 0usize;
    let values = source
        .cells
        .iter()
        .map(|cell| {
            if cell.is_missing() {
                return cell.clone();
            }
            let shown = cell.display();
            match statuses.target(shown.trim()) {
                Some(canonical) => {
                    rewritten += 1;
                    tracing::trace!(from = %shown, to = canonical, "status rewritten");
                    CellValue::text(canonical)
                }
                None => cell.clone(),
            }
        })
        .collect();
    debug!(rewritten, "status values rewritten");
    audit.info(
        Stage::Normalize,
        format!("Rewrote {rewritten} status values through status mappings"),
    );
    values
}

fn apply_metadata(
    table: &mut NormalizedTable,
    metadata: &UploadMetadata,
    audit: &mut AuditLog,
) -> Result<()> {
    let period = metadata.time_period();
    let stamps = [
        (vocabulary::SOURCE, metadata.source()),
        (vocabulary::AGENCY, metadata.agency()),
        (vocabulary::TIME_PERIOD, period.as_deref()),
    ];
    for (name, value) in stamps {
        let Some(value) = value else {
            continue;
        };
        if table.column(name).is_some() {
            audit.warning(
                Stage::Normalize,
                format!("Metadata '{name}' replaces the mapped column of the same name"),
            );
        }
        table.set_column(name, vec![CellValue::text(value); table.height()])?;
        audit.info(Stage::Normalize, format!("Added metadata column '{name}'"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_status_cells_pass_through() {
        let source = RawColumn::new(
            "Status",
            vec![
                CellValue::text(" Open "),
                CellValue::Missing,
                CellValue::text("Weird"),
            ],
        );
        let mut statuses = StatusMappings::new();
        statuses.confirm("Open", "processed");
        let mut audit = AuditLog::new();
        let values = rewrite_statuses(&source, &statuses, &mut audit);
        assert_eq!(
            values,
            vec![
                CellValue::text("processed"),
                CellValue::Missing,
                CellValue::text("Weird"),
            ]
        );
    }
}
