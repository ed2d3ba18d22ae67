use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cell::DATE_FORMAT;

/// Information supplied alongside an upload and stamped onto every output row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadMetadata {
    pub source: Option<String>,
    pub agency: Option<String>,
    pub time_period_start: Option<NaiveDate>,
    pub time_period_end: Option<NaiveDate>,
}

impl UploadMetadata {
    /// `"{start} to {end}"`, only when both ends of the period are known.
    pub fn time_period(&self) -> Option<String> {
        match (self.time_period_start, self.time_period_end) {
            (Some(start), Some(end)) => Some(format!(
                "{} to {}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            )),
            _ => None,
        }
    }

    pub fn source(&self) -> Option<&str> {
        non_blank(self.source.as_deref())
    }

    pub fn agency(&self) -> Option<&str> {
        non_blank(self.agency.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
