//! Header row recovery.
//!
//! Logs exported from case-management systems often start with a title
//! block, leave header cells empty, or omit the header entirely. This module
//! picks the row that holds the labels (or invents labels) and reports every
//! repair in the [`RecoveryLog`].

use sflf_model::CellValue;

use crate::infer::{MIN_INFERENCE_COLUMNS, generic_labels, infer_labels};
use crate::reader::Grid;
use crate::recovery::{RecoveryAction, RecoveryLog};

/// Later rows tried as the header when the first one is unusable.
const HEADER_RETRY_ROWS: [usize; 3] = [1, 2, 3];

/// Spreadsheet tools write this for header cells that were empty.
const PLACEHOLDER_PREFIX: &str = "Unnamed:";

/// Labels for the grid and the index of the first data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    pub labels: Vec<String>,
    pub data_start: usize,
}

pub fn is_placeholder(cell: &CellValue) -> bool {
    match cell {
        CellValue::Missing => true,
        CellValue::Text(text) => {
            let text = text.trim();
            text.is_empty() || text.starts_with(PLACEHOLDER_PREFIX)
        }
        CellValue::Number(_) | CellValue::Date(_) => false,
    }
}

fn placeholder_count(row: &[CellValue]) -> usize {
    row.iter().filter(|cell| is_placeholder(cell)).count()
}

fn raw_labels(row: &[CellValue]) -> Vec<String> {
    row.iter().map(CellValue::display).collect()
}

/// Chooses the header for a non-empty grid.
pub fn recover_header(grid: &Grid, log: &mut RecoveryLog) -> HeaderLayout {
    let Some(first) = grid.first() else {
        return HeaderLayout {
            labels: Vec::new(),
            data_start: 0,
        };
    };
    let width = first.len();
    let placeholders = placeholder_count(first);
    let mut layout = HeaderLayout {
        labels: raw_labels(first),
        data_start: 1,
    };
    if placeholders * 2 > width {
        log.push(RecoveryAction::PlaceholderHeader {
            placeholders,
            width,
        });
        layout = match retry_header_rows(grid) {
            Some(found) => {
                log.push(RecoveryAction::HeaderRowSelected {
                    row: found.data_start - 1,
                });
                found
            }
            None => recover_from_first_data_row(grid, layout, log),
        };
    }
    layout.labels = finalize_labels(layout.labels, log);
    layout
}

fn retry_header_rows(grid: &Grid) -> Option<HeaderLayout> {
    HEADER_RETRY_ROWS.iter().find_map(|&row| {
        let candidate = grid.get(row)?;
        (placeholder_count(candidate) == 0).then(|| HeaderLayout {
            labels: raw_labels(candidate),
            data_start: row + 1,
        })
    })
}

fn recover_from_first_data_row(
    grid: &Grid,
    fallback: HeaderLayout,
    log: &mut RecoveryLog,
) -> HeaderLayout {
    let Some(first_data) = grid.get(1) else {
        return fallback;
    };
    if first_data
        .iter()
        .all(|cell| cell.is_text() || cell.is_missing())
    {
        log.push(RecoveryAction::FirstRowPromoted);
        return HeaderLayout {
            labels: raw_labels(first_data),
            data_start: 2,
        };
    }

    let width = first_data.len();
    let labels = if width >= MIN_INFERENCE_COLUMNS {
        let guesses = infer_labels(&grid[1..], width);
        for guess in guesses.iter().filter(|guess| guess.is_conflict()) {
            log.push(RecoveryAction::GuessConflict {
                column: guess.column,
                candidates: guess.candidates.iter().map(ToString::to_string).collect(),
                chosen: guess.label.clone(),
            });
        }
        let labels: Vec<String> = guesses.into_iter().map(|guess| guess.label).collect();
        log.push(RecoveryAction::ColumnsInferred {
            labels: labels.clone(),
        });
        labels
    } else {
        log.push(RecoveryAction::GenericLabels {
            reason: format!("only {width} columns, too few to infer purposes"),
        });
        generic_labels(width)
    };
    HeaderLayout {
        labels,
        data_start: 1,
    }
}

/// Trims labels, names blank ones by position and makes them unique.
pub fn finalize_labels(labels: Vec<String>, log: &mut RecoveryLog) -> Vec<String> {
    let mut finished: Vec<String> = Vec::with_capacity(labels.len());
    for (index, label) in labels.into_iter().enumerate() {
        let mut label = label.trim().to_string();
        if label.is_empty() {
            label = format!("Column_{}", index + 1);
            log.push(RecoveryAction::LabelFilled {
                index,
                label: label.clone(),
            });
        }
        if finished.contains(&label) {
            let unique = (1..)
                .map(|n| format!("{label}.{n}"))
                .find(|candidate| !finished.contains(candidate))
                .unwrap_or_default();
            log.push(RecoveryAction::LabelDeduplicated {
                from: label,
                to: unique.clone(),
            });
            label = unique;
        }
        finished.push(label);
    }
    finished
}
