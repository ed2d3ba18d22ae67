pub mod audit;
pub mod cell;
pub mod error;
pub mod mapping;
pub mod metadata;
pub mod table;
pub mod vocabulary;

pub use audit::{AuditEntry, AuditLevel, AuditLog, Stage};
pub use cell::{CellValue, DATE_FORMAT, format_number};
pub use error::{ModelError, Result};
pub use mapping::{ColumnMappings, Mapping, MappingTable, MatchMethod, StatusMappings};
pub use metadata::UploadMetadata;
pub use table::{NormalizedColumn, NormalizedTable, RawColumn, RawTable};
pub use vocabulary::{SFLF_COLUMNS, SFLF_STATUSES, Vocabulary, is_sflf_column, is_sflf_status};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_log_serializes_as_list() {
        let mut log = AuditLog::new();
        log.info(Stage::Load, "loaded 3 rows");
        log.warning(Stage::Normalize, "skipped 'subject': no values");
        assert_eq!(log.warning_count(), 1);
        let json = serde_json::to_value(&log).expect("serialize audit log");
        assert_eq!(json[0]["stage"], "load");
        assert_eq!(json[1]["level"], "warning");
    }
}
