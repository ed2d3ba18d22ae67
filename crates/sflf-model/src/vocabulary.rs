//! The fixed Standard FOIA Log Format vocabulary.

pub const REQUEST_ID: &str = "request id";
pub const STATUS: &str = "status";
pub const SOURCE: &str = "source";
pub const AGENCY: &str = "agency";
pub const TIME_PERIOD: &str = "time period of log";

/// Canonical SFLF columns in output order.
pub const SFLF_COLUMNS: &[&str] = &[
    REQUEST_ID,
    "requester",
    "requester organization",
    "subject",
    "date requested",
    "date perfected",
    "date completed",
    STATUS,
    "exemptions cited",
    "fee category",
    "fee waiver",
    "fees charged",
    "processed under privacy act",
    SOURCE,
    AGENCY,
    TIME_PERIOD,
];

/// Canonical SFLF statuses. The trailing empty status means "no status".
pub const SFLF_STATUSES: &[&str] = &[
    "processed",
    "appealing",
    "fix",
    "payment",
    "lawsuit",
    "rejected",
    "no_docs",
    "done",
    "partial",
    "abandoned",
    "",
];

pub fn is_sflf_column(name: &str) -> bool {
    SFLF_COLUMNS.contains(&name)
}

pub fn is_sflf_status(name: &str) -> bool {
    SFLF_STATUSES.contains(&name)
}

/// Position of a canonical column in output order.
pub fn column_position(name: &str) -> Option<usize> {
    SFLF_COLUMNS.iter().position(|column| *column == name)
}

/// Which vocabulary a label is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vocabulary {
    Column,
    Status,
}

impl Vocabulary {
    pub fn canonical_names(self) -> &'static [&'static str] {
        match self {
            Self::Column => SFLF_COLUMNS,
            Self::Status => SFLF_STATUSES,
        }
    }

    pub fn contains(self, name: &str) -> bool {
        self.canonical_names().contains(&name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Column => "column",
            Self::Status => "status",
        }
    }
}
