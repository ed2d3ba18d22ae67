use std::fmt;

use serde::{Deserialize, Serialize};

/// A repair applied while turning a grid into a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RecoveryAction {
    /// Most labels in the first row were placeholders.
    PlaceholderHeader { placeholders: usize, width: usize },
    /// A later row was used as the header; rows above it were dropped.
    HeaderRowSelected { row: usize },
    /// The first data row was promoted to labels.
    FirstRowPromoted,
    /// Labels were inferred from the data.
    ColumnsInferred { labels: Vec<String> },
    /// Positional labels were assigned.
    GenericLabels { reason: String },
    /// More than one inference heuristic matched a column.
    GuessConflict {
        column: usize,
        candidates: Vec<String>,
        chosen: String,
    },
    /// A blank label was given a positional name.
    LabelFilled { index: usize, label: String },
    /// A repeated label was renamed.
    LabelDeduplicated { from: String, to: String },
    LeadingRowsSkipped { count: usize },
    NoLeadingRowsSkipped,
}

impl RecoveryAction {
    /// True for actions that point at questionable input.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::PlaceholderHeader { .. }
                | Self::GenericLabels { .. }
                | Self::GuessConflict { .. }
                | Self::LabelDeduplicated { .. }
        )
    }
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlaceholderHeader {
                placeholders,
                width,
            } => write!(
                f,
                "detected missing headers ({placeholders} of {width} labels are placeholders)"
            ),
            Self::HeaderRowSelected { row } => write!(f, "found headers in row {row}"),
            Self::FirstRowPromoted => f.write_str("used first data row as column headers"),
            Self::ColumnsInferred { labels } => {
                write!(f, "inferred column names: {}", labels.join(", "))
            }
            Self::GenericLabels { reason } => write!(f, "used generic column names: {reason}"),
            Self::GuessConflict {
                column,
                candidates,
                chosen,
            } => write!(
                f,
                "column {} matched several heuristics ({}); chose '{chosen}'",
                column + 1,
                candidates.join(", ")
            ),
            Self::LabelFilled { index, label } => {
                write!(f, "blank label at position {} named '{label}'", index + 1)
            }
            Self::LabelDeduplicated { from, to } => {
                write!(f, "duplicate label '{from}' renamed to '{to}'")
            }
            Self::LeadingRowsSkipped { count } => {
                write!(f, "removed {count} non-data rows from the top")
            }
            Self::NoLeadingRowsSkipped => f.write_str("no problematic leading rows detected"),
        }
    }
}

/// Ordered record of every repair made while loading one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecoveryLog {
    actions: Vec<RecoveryAction>,
}

impl RecoveryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: RecoveryAction) {
        if action.is_warning() {
            tracing::warn!("{action}");
        } else {
            tracing::debug!("{action}");
        }
        self.actions.push(action);
    }

    pub fn actions(&self) -> &[RecoveryAction] {
        &self.actions
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecoveryAction> {
        self.actions.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &RecoveryAction> {
        self.actions
            .iter()
            .filter(|action| matches!(action, RecoveryAction::GuessConflict { .. }))
    }

    /// Rows removed by the leading-row skip.
    pub fn skipped_rows(&self) -> usize {
        self.actions
            .iter()
            .find_map(|action| match action {
                RecoveryAction::LeadingRowsSkipped { count } => Some(*count),
                _ => None,
            })
            .unwrap_or(0)
    }
}
