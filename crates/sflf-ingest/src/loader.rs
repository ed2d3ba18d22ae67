use std::path::Path;

use sflf_model::{CellValue, RawColumn, RawTable};
use tracing::{debug, info, info_span};

use crate::cleanup::leading_rows_to_skip;
use crate::error::{LoadError, Result};
use crate::format::SourceFormat;
use crate::header::recover_header;
use crate::reader::{check_file_size, read_grid};
use crate::recovery::{RecoveryAction, RecoveryLog};

/// Loads a FOIA log into a [`RawTable`], repairing its header on the way.
///
/// Fails only when the file cannot be read. Every repair is returned in the
/// [`RecoveryLog`].
pub fn load(path: &Path, format: SourceFormat) -> Result<(RawTable, RecoveryLog)> {
    let span = info_span!("load", path = %path.display(), format = format.as_str());
    let _guard = span.enter();

    check_file_size(path)?;
    let grid = read_grid(path, format)?;
    if grid.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let mut log = RecoveryLog::new();
    let layout = recover_header(&grid, &mut log);
    let data = grid.get(layout.data_start..).unwrap_or_default();

    let skip = leading_rows_to_skip(data, layout.labels.len());
    if skip > 0 {
        log.push(RecoveryAction::LeadingRowsSkipped { count: skip });
    } else {
        log.push(RecoveryAction::NoLeadingRowsSkipped);
    }
    let rows = &data[skip..];

    let columns = layout
        .labels
        .into_iter()
        .enumerate()
        .map(|(index, label)| {
            let cells = rows
                .iter()
                .map(|row| row.get(index).cloned().unwrap_or(CellValue::Missing))
                .collect();
            RawColumn::new(label, cells)
        })
        .collect();
    let table = RawTable::new(columns).map_err(|source| LoadError::Table {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        rows = table.height(),
        columns = table.width(),
        repairs = log.actions().len(),
        "loaded table"
    );
    debug!(labels = ?table.labels().collect::<Vec<_>>(), "column labels");
    Ok((table, log))
}

/// Loads a file, inferring its format from the extension.
pub fn load_path(path: &Path) -> Result<(RawTable, RecoveryLog)> {
    let format = SourceFormat::from_path(path)?;
    load(path, format)
}
