//! Typed cell values for loosely-typed tabular input.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used when rendering [`CellValue::Date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single cell of a source or normalized table.
///
/// Spreadsheet cells arrive as text, numbers, dates or nothing at all; the
/// heuristics in the loader and normalizer branch on the variant rather than
/// probing values ad hoc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Missing,
}

impl CellValue {
    /// Parses a raw CSV field into the most specific variant that renders back
    /// to the same text.
    ///
    /// Only canonical renderings are promoted so that writing the value out
    /// again reproduces the input (`"00123"` stays text, `"123"` becomes a
    /// number).
    pub fn from_field(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::Missing;
        }
        if let Ok(number) = raw.parse::<f64>()
            && number.is_finite()
            && format_number(number) == raw
        {
            return Self::Number(number);
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT)
            && date.format(DATE_FORMAT).to_string() == raw
        {
            return Self::Date(date);
        }
        Self::Text(raw.to_string())
    }

    /// Wraps text, mapping the empty string to [`CellValue::Missing`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Missing
        } else {
            Self::Text(value)
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// True for missing cells and for text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) | Self::Date(_) => false,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Renders the value the way it is written to CSV output.
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => f.write_str(&format_number(*number)),
            Self::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Self::Missing => Ok(()),
        }
    }
}

/// Formats a number without a trailing `.0` for integral values.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
