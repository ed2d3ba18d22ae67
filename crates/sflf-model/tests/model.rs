//! Tests for sflf-model types.

use chrono::NaiveDate;
use sflf_model::{
    CellValue, Mapping, MappingTable, MatchMethod, RawColumn, RawTable, SFLF_COLUMNS,
    SFLF_STATUSES, UploadMetadata, Vocabulary, is_sflf_column, is_sflf_status,
};

fn mapping(original: &str, mapped: &str, confidence: f32, method: MatchMethod) -> Mapping {
    Mapping {
        original: original.to_string(),
        mapped: mapped.to_string(),
        confidence,
        method,
        user_confirmed: false,
    }
}

#[test]
fn vocabulary_is_fixed() {
    assert_eq!(SFLF_COLUMNS.len(), 16);
    assert_eq!(SFLF_COLUMNS[0], "request id");
    assert_eq!(SFLF_COLUMNS[15], "time period of log");
    assert_eq!(SFLF_STATUSES.len(), 11);
    assert!(is_sflf_status(""));
    assert!(is_sflf_column("processed under privacy act"));
    assert!(!is_sflf_column("Request ID"));
    assert!(Vocabulary::Status.contains("no_docs"));
}

#[test]
fn confirm_overrides_existing_mapping() {
    let mut table = MappingTable::new();
    table.upsert(mapping("Ref", "request id", 0.7, MatchMethod::Keyword));
    table.upsert(mapping("Who", "requester", 0.7, MatchMethod::Keyword));
    table.confirm("Ref", "subject");

    let entry = table.get("Ref").expect("mapping for Ref");
    assert_eq!(entry.mapped, "subject");
    assert_eq!(entry.confidence, 1.0);
    assert_eq!(entry.method, MatchMethod::Manual);
    assert!(entry.user_confirmed);
    let order: Vec<_> = table.iter().map(|m| m.original.as_str()).collect();
    assert_eq!(order, ["Ref", "Who"]);
}

#[test]
fn unmapped_entries_have_no_target() {
    let table: MappingTable = [
        mapping("Tracking", "request id", 0.7, MatchMethod::Keyword),
        mapping("Notes", "Notes", 0.0, MatchMethod::Unmapped),
        mapping("Case", "request id", 0.7, MatchMethod::Keyword),
    ]
    .into_iter()
    .collect();

    assert_eq!(table.target("Notes"), None);
    assert_eq!(table.mapped_count(), 2);
    let sources: Vec<_> = table.sources_for("request id").collect();
    assert_eq!(sources, ["Tracking", "Case"]);
}

#[test]
fn confirmed_sources_come_first() {
    let mut table: MappingTable = [
        mapping("Status", "status", 1.0, MatchMethod::Synonym),
        mapping("Disposition", "Disposition", 0.0, MatchMethod::Unmapped),
        mapping("Outcome", "status", 0.9, MatchMethod::Keyword),
    ]
    .into_iter()
    .collect();
    table.confirm("Disposition", "status");

    let sources: Vec<_> = table.sources_for("status").collect();
    assert_eq!(sources, ["Disposition", "Status", "Outcome"]);
}

#[test]
fn raw_table_rows_follow_column_order() {
    let table = RawTable::new(vec![
        RawColumn::new("id", vec![CellValue::text("A-1"), CellValue::text("A-2")]),
        RawColumn::new("n", vec![CellValue::Number(3.0), CellValue::Missing]),
    ])
    .expect("valid table");

    assert_eq!(table.height(), 2);
    assert_eq!(table.width(), 2);
    let row = table.row(1).expect("second row");
    assert_eq!(row, [&CellValue::text("A-2"), &CellValue::Missing]);
    assert!(table.row(2).is_none());
    assert_eq!(table.column("n").map(RawColumn::present_count), Some(1));
}

#[test]
fn time_period_requires_both_dates() {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1);
    let end = NaiveDate::from_ymd_opt(2023, 12, 31);
    let mut metadata = UploadMetadata {
        time_period_start: start,
        ..UploadMetadata::default()
    };
    assert_eq!(metadata.time_period(), None);

    metadata.time_period_end = end;
    assert_eq!(
        metadata.time_period().as_deref(),
        Some("2023-01-01 to 2023-12-31")
    );
}

#[test]
fn blank_metadata_values_are_ignored() {
    let metadata = UploadMetadata {
        source: Some("   ".to_string()),
        agency: Some(" DOJ ".to_string()),
        ..UploadMetadata::default()
    };
    assert_eq!(metadata.source(), None);
    assert_eq!(metadata.agency(), Some("DOJ"));
}

#[test]
fn mapping_serializes_method_in_lowercase() {
    let json = serde_json::to_value(mapping("Status", "status", 1.0, MatchMethod::Synonym))
        .expect("serialize mapping");
    assert_eq!(json["method"], "synonym");
}
