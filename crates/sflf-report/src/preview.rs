//! What normalization will do with an upload, computed without doing it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sflf_ingest::{RecoveryAction, RecoveryLog};
use sflf_model::{CellValue, ColumnMappings, MatchMethod, RawColumn, RawTable};

/// Sample values shown per column.
pub const SAMPLE_VALUES: usize = 3;
/// Sample values are cut to this many characters.
pub const SAMPLE_VALUE_CHARS: usize = 50;
/// Row cells are cut to this many characters.
pub const ROW_VALUE_CHARS: usize = 100;
/// Rendering of a missing cell in row samples.
pub const EMPTY_CELL: &str = "(empty)";

/// Why a source column will not appear in the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// No non-blank values.
    EmptyColumn,
    /// No canonical column was found.
    Unmapped,
    /// Another column maps to the same canonical column and is kept: it was
    /// confirmed by the user or comes first.
    DuplicateTarget { kept: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyColumn => f.write_str("column has no values"),
            Self::Unmapped => f.write_str("no matching SFLF column"),
            Self::DuplicateTarget { kept } => write!(f, "'{kept}' maps to the same column"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnPreview {
    pub original: String,
    /// Canonical column, when mapped.
    pub mapped: Option<String>,
    pub confidence: f32,
    pub method: MatchMethod,
    pub samples: Vec<String>,
    pub non_missing: usize,
    pub will_include: bool,
    pub skip_reason: Option<SkipReason>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewStatistics {
    pub total_rows: usize,
    pub total_columns: usize,
    pub mapped_columns: usize,
    pub unmapped_columns: usize,
    pub will_include: usize,
    pub will_skip: usize,
    /// Rows in which every cell is blank.
    pub empty_rows: usize,
    /// Banner or blank rows removed above the data while loading.
    pub leading_rows_skipped: usize,
    /// Columns whose inferred purpose matched more than one heuristic.
    pub guess_conflicts: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPreview {
    pub column: String,
    pub mapped: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowPreview {
    pub index: usize,
    pub cells: Vec<CellPreview>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewSummary {
    pub columns: Vec<ColumnPreview>,
    pub statistics: PreviewStatistics,
    pub rows: Vec<RowPreview>,
    /// Repairs made while loading, in the order they were applied.
    pub recovery: Vec<RecoveryAction>,
}

impl PreviewSummary {
    pub fn included(&self) -> impl Iterator<Item = &ColumnPreview> {
        self.columns.iter().filter(|column| column.will_include)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &ColumnPreview> {
        self.columns.iter().filter(|column| !column.will_include)
    }

    /// Column-purpose conflicts found while inferring labels.
    pub fn conflicts(&self) -> impl Iterator<Item = &RecoveryAction> {
        self.recovery
            .iter()
            .filter(|action| matches!(action, RecoveryAction::GuessConflict { .. }))
    }
}

/// Builds the preview for `raw` under `columns`, sampling the first
/// `max_rows` rows. `recovery` is the log produced when `raw` was loaded.
///
/// Inclusion follows normalization: each canonical name keeps one source
/// column (a user-confirmed one, otherwise the first in table order), and it
/// is included only if it has content.
pub fn build_preview(
    raw: &RawTable,
    recovery: &RecoveryLog,
    columns: &ColumnMappings,
    max_rows: usize,
) -> PreviewSummary {
    let mut kept_sources: BTreeMap<&str, Option<&str>> = BTreeMap::new();
    let column_previews: Vec<ColumnPreview> = raw
        .columns()
        .iter()
        .map(|column| {
            let mapping = columns.get(&column.label);
            let mapped = columns.target(&column.label);
            let skip_reason = match mapped {
                None => Some(SkipReason::Unmapped),
                Some(canonical) => {
                    let kept = *kept_sources.entry(canonical).or_insert_with(|| {
                        columns
                            .sources_for(canonical)
                            .find(|label| raw.column(label).is_some())
                    });
                    match kept {
                        Some(kept) if kept != column.label => {
                            Some(SkipReason::DuplicateTarget {
                                kept: kept.to_string(),
                            })
                        }
                        _ => (!column.has_content()).then_some(SkipReason::EmptyColumn),
                    }
                }
            };
            ColumnPreview {
                original: column.label.clone(),
                mapped: mapped.map(str::to_string),
                confidence: mapping.map_or(0.0, |m| m.confidence),
                method: mapping.map_or(MatchMethod::Unmapped, |m| m.method),
                samples: samples(column),
                non_missing: column.present_count(),
                will_include: skip_reason.is_none(),
                skip_reason,
            }
        })
        .collect();

    let mapped_columns = column_previews.iter().filter(|c| c.mapped.is_some()).count();
    let will_include = column_previews.iter().filter(|c| c.will_include).count();
    let statistics = PreviewStatistics {
        total_rows: raw.height(),
        total_columns: raw.width(),
        mapped_columns,
        unmapped_columns: raw.width() - mapped_columns,
        will_include,
        will_skip: raw.width() - will_include,
        empty_rows: count_empty_rows(raw),
        leading_rows_skipped: recovery.skipped_rows(),
        guess_conflicts: recovery.conflicts().count(),
    };
    tracing::debug!(
        columns = statistics.total_columns,
        include = statistics.will_include,
        skip = statistics.will_skip,
        conflicts = statistics.guess_conflicts,
        "preview built"
    );

    PreviewSummary {
        rows: sample_rows(raw, columns, max_rows),
        columns: column_previews,
        statistics,
        recovery: recovery.actions().to_vec(),
    }
}

fn samples(column: &RawColumn) -> Vec<String> {
    column
        .cells
        .iter()
        .filter(|cell| !cell.is_missing())
        .take(SAMPLE_VALUES)
        .map(|cell| truncate(&cell.display(), SAMPLE_VALUE_CHARS))
        .collect()
}

fn sample_rows(raw: &RawTable, columns: &ColumnMappings, max_rows: usize) -> Vec<RowPreview> {
    (0..raw.height().min(max_rows))
        .map(|index| RowPreview {
            index,
            cells: raw
                .columns()
                .iter()
                .map(|column| CellPreview {
                    column: column.label.clone(),
                    mapped: columns.target(&column.label).map(str::to_string),
                    value: match column.cells.get(index) {
                        None | Some(CellValue::Missing) => EMPTY_CELL.to_string(),
                        Some(cell) => truncate(&cell.display(), ROW_VALUE_CHARS),
                    },
                })
                .collect(),
        })
        .collect()
}

fn count_empty_rows(raw: &RawTable) -> usize {
    (0..raw.height())
        .filter(|&index| {
            raw.columns()
                .iter()
                .all(|column| column.cells.get(index).is_none_or(CellValue::is_blank))
        })
        .count()
}

/// Cuts `value` to `limit` characters, marking the cut with `...`.
pub fn truncate(value: &str, limit: usize) -> String {
    match value.char_indices().nth(limit) {
        Some((end, _)) => format!("{}...", &value[..end]),
        None => value.to_string(),
    }
}
