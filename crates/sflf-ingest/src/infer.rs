//! Column-purpose inference for files that carry no header row.

use serde::Serialize;
use sflf_model::CellValue;

/// Data rows sampled per column.
pub const INFERENCE_SAMPLE_ROWS: usize = 10;

/// Narrower tables get positional labels instead of inferred ones.
pub const MIN_INFERENCE_COLUMNS: usize = 3;

/// Inferred labels in priority order.
const HEURISTICS: &[(&str, fn(usize, &[&CellValue]) -> bool)] = &[
    ("index", looks_like_index),
    ("request_id", looks_like_request_id),
    ("requester", looks_like_requester),
    ("organization", looks_like_organization),
    ("subject", looks_like_subject),
    ("date_requested", looks_like_date),
    ("status_code", looks_like_status_code),
];

const SUBJECT_TERMS: &[&str] = &["RECORD", "DOCUMENT", "REQUEST"];

/// Every heuristic that matched one column, and the label it ended up with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnGuess {
    pub column: usize,
    pub candidates: Vec<&'static str>,
    pub label: String,
}

impl ColumnGuess {
    pub fn is_conflict(&self) -> bool {
        self.candidates.len() > 1
    }
}

/// Infers one label per column from up to [`INFERENCE_SAMPLE_ROWS`] rows.
///
/// The first candidate not already used by an earlier column wins; columns
/// without a usable candidate are named `column_{n}`.
pub fn infer_labels(rows: &[Vec<CellValue>], width: usize) -> Vec<ColumnGuess> {
    let sample = &rows[..rows.len().min(INFERENCE_SAMPLE_ROWS)];
    let mut used: Vec<String> = Vec::with_capacity(width);
    let mut guesses = Vec::with_capacity(width);
    for column in 0..width {
        let values: Vec<&CellValue> = sample
            .iter()
            .filter_map(|row| row.get(column))
            .filter(|cell| !cell.is_missing())
            .collect();
        let candidates: Vec<&'static str> = HEURISTICS
            .iter()
            .filter(|(_, test)| test(column, &values))
            .map(|(label, _)| *label)
            .collect();
        let label = candidates
            .iter()
            .find(|label| !used.iter().any(|u| u == *label))
            .map_or_else(|| format!("column_{}", column + 1), |label| (*label).to_string());
        used.push(label.clone());
        guesses.push(ColumnGuess {
            column,
            candidates,
            label,
        });
    }
    guesses
}

/// Positional labels `column_1`, `column_2`, ...
pub fn generic_labels(width: usize) -> Vec<String> {
    (1..=width).map(|n| format!("column_{n}")).collect()
}

fn looks_like_index(column: usize, values: &[&CellValue]) -> bool {
    column == 0 && values.iter().all(|cell| cell.is_blank())
}

/// Short alphanumeric tokens once `-` and `_` are ignored. Dates render with
/// dashes but are not identifiers.
fn looks_like_request_id(_: usize, values: &[&CellValue]) -> bool {
    values.iter().any(|cell| match cell {
        CellValue::Text(_) | CellValue::Number(_) => {
            let text = cell.display();
            let stripped: String = text.chars().filter(|c| *c != '-' && *c != '_').collect();
            !stripped.is_empty()
                && stripped.chars().all(char::is_alphanumeric)
                && text.chars().count() < 20
        }
        CellValue::Date(_) | CellValue::Missing => false,
    })
}

fn looks_like_requester(_: usize, values: &[&CellValue]) -> bool {
    texts(values).any(|text| text.contains('(') && text.contains(')'))
}

fn looks_like_organization(_: usize, values: &[&CellValue]) -> bool {
    texts(values).any(|text| text.to_uppercase() == text && text.chars().count() > 10)
}

fn looks_like_subject(_: usize, values: &[&CellValue]) -> bool {
    texts(values).any(|text| {
        let upper = text.to_uppercase();
        SUBJECT_TERMS.iter().any(|term| upper.contains(term))
    })
}

fn looks_like_date(_: usize, values: &[&CellValue]) -> bool {
    values.iter().any(|cell| cell.is_date())
}

/// Every value is a short alphabetic code. Holds for an empty sample.
fn looks_like_status_code(_: usize, values: &[&CellValue]) -> bool {
    values.iter().all(|cell| {
        let text = cell.display();
        let count = text.chars().count();
        count > 0 && count <= 3 && text.chars().all(char::is_alphabetic)
    })
}

fn texts<'a>(values: &'a [&'a CellValue]) -> impl Iterator<Item = String> + 'a {
    values
        .iter()
        .filter(|cell| !cell.is_date())
        .map(|cell| cell.display())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn row(cells: &[CellValue]) -> Vec<CellValue> {
        cells.to_vec()
    }

    fn date(y: i32, m: u32, d: u32) -> CellValue {
        CellValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn infers_typical_foia_columns() {
        let rows = vec![
            row(&[
                CellValue::Missing,
                CellValue::text("2024-0001"),
                CellValue::text("Smith (redacted)"),
                CellValue::text("ACME CORPORATION"),
                CellValue::text("All records about contracts"),
                date(2024, 1, 5),
                CellValue::text("OP"),
            ]),
            row(&[
                CellValue::Missing,
                CellValue::text("2024-0002"),
                CellValue::text("Doe (b)(6)"),
                CellValue::text("GLOBAL NEWS NETWORK"),
                CellValue::text("Emails between offices"),
                date(2024, 2, 1),
                CellValue::text("CL"),
            ]),
        ];
        let labels: Vec<_> = infer_labels(&rows, 7)
            .into_iter()
            .map(|guess| guess.label)
            .collect();
        assert_eq!(
            labels,
            [
                "index",
                "request_id",
                "requester",
                "organization",
                "subject",
                "date_requested",
                "status_code"
            ]
        );
    }

    #[test]
    fn used_labels_fall_through_to_next_candidate() {
        let rows = vec![row(&[
            CellValue::text("A1"),
            CellValue::text("B2"),
            CellValue::text("x y z"),
        ])];
        let guesses = infer_labels(&rows, 3);
        assert_eq!(guesses[0].label, "request_id");
        // "B2" is an id too, but the label is taken.
        assert_eq!(guesses[1].label, "column_2");
        assert_eq!(guesses[2].label, "column_3");
    }

    #[test]
    fn conflicts_are_reported_not_hidden() {
        let rows = vec![row(&[
            CellValue::text("id"),
            CellValue::text("REQUEST"),
            CellValue::text("zz"),
        ])];
        let guesses = infer_labels(&rows, 3);
        // "REQUEST" is alphanumeric, and also a subject keyword.
        assert!(guesses[1].is_conflict());
        assert_eq!(guesses[1].candidates, ["request_id", "subject"]);
        assert_eq!(guesses[1].label, "subject");
    }

    #[test]
    fn empty_sample_is_vacuously_a_status_code() {
        let rows = vec![row(&[
            CellValue::text("A-1"),
            CellValue::Missing,
            CellValue::text("hello world"),
        ])];
        let guesses = infer_labels(&rows, 3);
        assert_eq!(guesses[1].label, "status_code");
    }
}
