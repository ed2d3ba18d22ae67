//! Detection of report banners and blank rows above the real data.

use std::sync::LazyLock;

use regex::Regex;
use sflf_model::CellValue;

/// Only this many leading data rows are examined.
pub const LEADING_ROW_WINDOW: usize = 10;

const METADATA_TERMS: &[&str] = &[
    "generated on",
    "report",
    "page",
    "total",
    "summary",
    "header",
    "title",
    "department",
    "agency name",
];

const FOIA_TERMS: &[&str] = &["request", "foia", "record"];

static DATE_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}").expect("Invalid date-like regex")
});

static LONG_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4,}\b").expect("Invalid number regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    /// Blank, a single stray cell, or banner text.
    Noise,
    /// Dates, long numbers, FOIA vocabulary, or a lone request identifier.
    Data,
    Unknown,
}

/// A first cell with a digit in it reads as a request identifier.
fn has_identifier(row: &[CellValue]) -> bool {
    row.first().is_some_and(|cell| {
        !cell.is_blank() && cell.display().chars().any(|c| c.is_ascii_digit())
    })
}

fn classify(row: &[CellValue], width: usize) -> RowKind {
    let filled = row.iter().filter(|cell| !cell.is_blank()).count();
    if filled == 0 {
        return RowKind::Noise;
    }
    // In a one-column table every data row has a single cell.
    if filled == 1 && width > 1 {
        return if has_identifier(row) {
            RowKind::Data
        } else {
            RowKind::Noise
        };
    }
    let text = row
        .iter()
        .filter(|cell| !cell.is_missing())
        .map(CellValue::display)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    if METADATA_TERMS.iter().any(|term| text.contains(term)) {
        return RowKind::Noise;
    }
    if DATE_LIKE.is_match(&text)
        || LONG_NUMBER.is_match(&text)
        || FOIA_TERMS.iter().any(|term| text.contains(term))
        || has_identifier(row)
    {
        return RowKind::Data;
    }
    RowKind::Unknown
}

/// Number of leading rows to drop from a table `width` columns wide: one past
/// the last noise row seen before the first row that looks like data.
///
/// Never drops every row; a table that is all noise is kept whole.
pub fn leading_rows_to_skip(rows: &[Vec<CellValue>], width: usize) -> usize {
    let mut skip = 0;
    for (index, row) in rows.iter().take(LEADING_ROW_WINDOW).enumerate() {
        match classify(row, width) {
            RowKind::Noise => skip = index + 1,
            RowKind::Data => break,
            RowKind::Unknown => {}
        }
    }
    if skip >= rows.len() { 0 } else { skip }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<CellValue> {
        fields.iter().map(|f| CellValue::from_field(f)).collect()
    }

    #[test]
    fn skips_sparse_rows_until_data() {
        let rows = vec![
            row(&["", "", ""]),
            row(&["Monthly", "", ""]),
            row(&["", "", "x"]),
            row(&["A-1", "J. Smith", "1/5/2024"]),
            row(&["", "", ""]),
        ];
        assert_eq!(leading_rows_to_skip(&rows, 3), 3);
    }

    #[test]
    fn banner_rows_are_skipped_even_with_many_cells() {
        let rows = vec![
            row(&["Report generated on", "Jan 5", "by staff"]),
            row(&["Alpha", "Beta", "Gamma"]),
            row(&["Page 1 of 3", "", "x"]),
            row(&["A-1", "FOIA", "open"]),
        ];
        // The unknown row in the middle does not stop the scan.
        assert_eq!(leading_rows_to_skip(&rows, 3), 3);
    }

    #[test]
    fn first_row_of_data_means_no_skip() {
        let rows = vec![row(&["2024-0001", "Smith", "open"]), row(&["", "", ""])];
        assert_eq!(leading_rows_to_skip(&rows, 3), 0);
    }

    #[test]
    fn only_the_first_ten_rows_are_examined() {
        let mut rows: Vec<_> = (0..12).map(|_| row(&["Alpha", "Beta"])).collect();
        rows[11] = row(&["", ""]);
        assert_eq!(leading_rows_to_skip(&rows, 3), 0);
    }
}
