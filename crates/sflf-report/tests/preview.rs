//! Tests for upload previews.

use sflf_ingest::{RecoveryAction, RecoveryLog};
use sflf_model::{CellValue, ColumnMappings, Mapping, MatchMethod, RawColumn, RawTable};
use sflf_report::{EMPTY_CELL, SkipReason, build_preview};

fn column(label: &str, values: &[&str]) -> RawColumn {
    RawColumn::new(
        label,
        values.iter().map(|value| CellValue::from_field(value)).collect(),
    )
}

fn mapped(original: &str, canonical: &str, confidence: f32, method: MatchMethod) -> Mapping {
    Mapping {
        original: original.to_string(),
        mapped: canonical.to_string(),
        confidence,
        method,
        user_confirmed: false,
    }
}

fn unmapped(original: &str) -> Mapping {
    mapped(original, original, 0.0, MatchMethod::Unmapped)
}

fn fixture() -> (RawTable, ColumnMappings) {
    let long_subject = "x".repeat(120);
    let table = RawTable::new(vec![
        column("Tracking #", &["A-1", "", "A-3", "A-4"]),
        column("Control", &["C-1", "", "C-3", "C-4"]),
        column("Topic", &["", "", " ", ""]),
        column("Subject", &[long_subject.as_str(), "", "Budget", "Travel"]),
        column("Notes", &["n1", "", "", ""]),
    ])
    .expect("valid table");
    let columns: ColumnMappings = [
        mapped("Tracking #", "request id", 0.7, MatchMethod::Keyword),
        mapped("Control", "request id", 0.7, MatchMethod::Keyword),
        mapped("Topic", "subject", 0.9, MatchMethod::Keyword),
        mapped("Subject", "subject", 1.0, MatchMethod::Synonym),
        unmapped("Notes"),
    ]
    .into_iter()
    .collect();
    (table, columns)
}

#[test]
fn skip_reasons_mirror_normalization() {
    let (table, columns) = fixture();
    let preview = build_preview(&table, &RecoveryLog::new(), &columns, 2);

    let reasons: Vec<_> = preview
        .columns
        .iter()
        .map(|column| column.skip_reason.clone())
        .collect();
    assert_eq!(
        reasons,
        [
            None,
            Some(SkipReason::DuplicateTarget {
                kept: "Tracking #".to_string()
            }),
            Some(SkipReason::EmptyColumn),
            Some(SkipReason::DuplicateTarget {
                kept: "Topic".to_string()
            }),
            Some(SkipReason::Unmapped),
        ]
    );
    assert_eq!(
        preview
            .included()
            .map(|c| c.original.as_str())
            .collect::<Vec<_>>(),
        ["Tracking #"]
    );
}

#[test]
fn statistics_count_columns_and_empty_rows() {
    let (table, columns) = fixture();
    let stats = build_preview(&table, &RecoveryLog::new(), &columns, 10).statistics;
    assert_eq!(stats.total_rows, 4);
    assert_eq!(stats.total_columns, 5);
    assert_eq!(stats.mapped_columns, 4);
    assert_eq!(stats.unmapped_columns, 1);
    assert_eq!(stats.will_include, 1);
    assert_eq!(stats.will_skip, 4);
    assert_eq!(stats.empty_rows, 1);
}

#[test]
fn samples_and_rows_are_truncated() {
    let (table, columns) = fixture();
    let preview = build_preview(&table, &RecoveryLog::new(), &columns, 2);

    let subject = &preview.columns[3];
    assert_eq!(subject.non_missing, 3);
    assert_eq!(subject.samples.len(), 3);
    assert_eq!(subject.samples[0], format!("{}...", "x".repeat(50)));
    assert_eq!(subject.samples[1], "Budget");
    assert_eq!(subject.confidence, 1.0);

    // Blank text is present but not content.
    let topic = &preview.columns[2];
    assert_eq!(topic.samples, [" "]);

    assert_eq!(preview.rows.len(), 2);
    let first = &preview.rows[0];
    assert_eq!(first.cells[3].value, format!("{}...", "x".repeat(100)));
    assert_eq!(first.cells[0].mapped.as_deref(), Some("request id"));
    assert_eq!(first.cells[4].mapped, None);
    assert!(preview.rows[1].cells.iter().all(|cell| cell.value == EMPTY_CELL));
}

#[test]
fn columns_without_mappings_are_unmapped() {
    let table = RawTable::new(vec![column("Status", &["Open"])]).expect("valid table");
    let preview = build_preview(&table, &RecoveryLog::new(), &ColumnMappings::new(), 5);
    let status = &preview.columns[0];
    assert_eq!(status.method, MatchMethod::Unmapped);
    assert_eq!(status.confidence, 0.0);
    assert_eq!(status.skip_reason, Some(SkipReason::Unmapped));
}

#[test]
fn summary_serializes_to_json() {
    let (table, columns) = fixture();
    let preview = build_preview(&table, &RecoveryLog::new(), &columns, 1);
    let json = serde_json::to_value(&preview).expect("serialize");
    assert_eq!(json["statistics"]["will_include"], 1);
    assert_eq!(json["columns"][1]["skip_reason"]["reason"], "duplicate_target");
    assert_eq!(json["columns"][1]["skip_reason"]["kept"], "Tracking #");
    assert_eq!(json["columns"][4]["method"], "unmapped");
    assert_eq!(json["rows"][0]["cells"][0]["value"], "A-1");
}

#[test]
fn confirmed_column_is_kept_over_earlier_match() {
    let table = RawTable::new(vec![
        column("Status", &["Open", "Open"]),
        column("Disposition", &["Granted", "Denied"]),
    ])
    .expect("valid table");
    let mut columns: ColumnMappings = [
        mapped("Status", "status", 1.0, MatchMethod::Synonym),
        unmapped("Disposition"),
    ]
    .into_iter()
    .collect();
    columns.confirm("Disposition", "status");

    let preview = build_preview(&table, &RecoveryLog::new(), &columns, 1);
    assert_eq!(
        preview.columns[0].skip_reason,
        Some(SkipReason::DuplicateTarget {
            kept: "Disposition".to_string()
        })
    );
    assert!(preview.columns[1].will_include);
    assert_eq!(preview.columns[1].method, MatchMethod::Manual);
}

#[test]
fn recovery_actions_are_reported() {
    let table = RawTable::new(vec![
        column("request id", &["2023-001", "2023-002"]),
        column("requester", &["Jane Roe", "Acme Corp"]),
        column("status", &["Closed", "Open"]),
    ])
    .expect("valid table");
    let mut recovery = RecoveryLog::new();
    recovery.push(RecoveryAction::PlaceholderHeader {
        placeholders: 3,
        width: 3,
    });
    recovery.push(RecoveryAction::ColumnsInferred {
        labels: vec![
            "request id".to_string(),
            "requester".to_string(),
            "status".to_string(),
        ],
    });
    recovery.push(RecoveryAction::GuessConflict {
        column: 1,
        candidates: vec!["requester".to_string(), "organization".to_string()],
        chosen: "requester".to_string(),
    });
    recovery.push(RecoveryAction::LeadingRowsSkipped { count: 2 });

    let preview = build_preview(&table, &recovery, &ColumnMappings::new(), 0);
    assert_eq!(preview.statistics.leading_rows_skipped, 2);
    assert_eq!(preview.statistics.guess_conflicts, 1);
    assert_eq!(preview.conflicts().count(), 1);

    let lines: Vec<String> = preview.recovery.iter().map(ToString::to_string).collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    detected missing headers (3 of 3 labels are placeholders)
    inferred column names: request id, requester, status
    column 2 matched several heuristics (requester, organization); chose 'requester'
    removed 2 non-data rows from the top
    ");

    let json = serde_json::to_value(&preview).expect("serialize");
    assert_eq!(json["recovery"][2]["action"], "guess_conflict");
    assert_eq!(json["recovery"][2]["chosen"], "requester");
}
