//! Integration tests for the per-file pipeline.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use sflf_cli::pipeline::{
    Overrides, PipelineOptions, load_stage, match_stage, override_stage, process_files,
};
use sflf_map::Matcher;
use sflf_model::{AuditLevel, AuditLog, Stage, UploadMetadata};
use sflf_standards::SynonymDictionary;

fn matcher() -> Matcher {
    Matcher::new(Arc::new(SynonymDictionary::default()))
}

fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn options(output_dir: PathBuf) -> PipelineOptions {
    PipelineOptions {
        output_dir,
        ..PipelineOptions::default()
    }
}

#[test]
fn one_bad_file_does_not_stop_the_others() {
    let dir = tempfile::tempdir().expect("tempdir");
    let good = write(
        &dir,
        "agency.csv",
        "Tracking #,Requester Name,Status,Date Rec'd\nA-123,J. Smith,In Process,2024-01-05\n",
    );
    let bad = write(&dir, "notes.txt", "not a log");
    let missing = dir.path().join("missing.csv");
    let out = dir.path().join("out");

    let reports = process_files(&[bad, good, missing], &matcher(), &options(out.clone()));

    assert_eq!(reports.len(), 3);
    assert!(reports[0].is_failure());
    assert!(reports[2].is_failure());
    let outcome = reports[1].outcome.as_ref().expect("good file");
    assert_eq!(outcome.rows, 1);
    assert_eq!(outcome.output_columns, 4);
    assert_eq!(outcome.mapped_statuses, 1);

    let csv = fs::read_to_string(out.join("normalized_agency.csv")).expect("output");
    assert_eq!(
        csv,
        "request id,requester,date requested,status\nA-123,J. Smith,2024-01-05,processed\n"
    );
    let audit: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(out.join("normalized_agency.audit.json")).expect("audit"),
    )
    .expect("audit json");
    let stages: Vec<_> = audit
        .as_array()
        .expect("list")
        .iter()
        .map(|entry| entry["stage"].as_str().unwrap_or_default().to_string())
        .collect();
    for stage in ["load", "match", "normalize", "persist"] {
        assert!(stages.iter().any(|s| s == stage), "missing {stage}");
    }
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(&dir, "log.csv", "Case Number,Status\n1,Closed\n2,Open\n");
    let out = dir.path().join("out");
    let mut options = options(out.clone());
    options.dry_run = true;

    let reports = process_files(&[input], &matcher(), &options);

    let outcome = reports[0].outcome.as_ref().expect("dry run");
    assert_eq!(outcome.rows, 2);
    assert!(outcome.output.is_none());
    assert!(!out.exists());
}

#[test]
fn overrides_replace_matches() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(
        &dir,
        "log.csv",
        "Ref,Outcome,Notes\nR-1,Granted,x\nR-2,Nada,y\n",
    );
    let mut audit = AuditLog::new();
    let (table, _) = load_stage(&input, None, &mut audit).expect("load");
    let matcher = matcher();
    let columns = match_stage(&matcher, &table, &mut audit);
    assert_eq!(columns.target("Notes"), None);

    let overrides = Overrides {
        columns: vec![
            ("Notes".to_string(), "subject".to_string()),
            ("Nope".to_string(), "subject".to_string()),
        ],
        status_column: Some("Outcome".to_string()),
        statuses: vec![("Nada".to_string(), "no_docs".to_string())],
    };
    overrides.validate().expect("valid overrides");
    let matched = override_stage(&matcher, &table, columns, &overrides, &mut audit);

    assert_eq!(matched.columns.target("Notes"), Some("subject"));
    assert!(matched.columns.get("Notes").expect("notes").user_confirmed);
    assert_eq!(matched.columns.target("Outcome"), Some("status"));
    assert_eq!(matched.statuses.target("Nada"), Some("no_docs"));
    assert!(audit.entries().iter().any(|entry| {
        entry.level == AuditLevel::Warning
            && entry.stage == Stage::Match
            && entry.message.contains("'Nope'")
    }));
}

#[test]
fn overrides_outside_vocabulary_are_rejected() {
    let bad_column = Overrides {
        columns: vec![("Ref".to_string(), "reference".to_string())],
        ..Overrides::default()
    };
    assert!(bad_column.validate().is_err());

    let bad_status = Overrides {
        statuses: vec![("Nada".to_string(), "nothing".to_string())],
        ..Overrides::default()
    };
    assert!(bad_status.validate().is_err());

    let empty_status = Overrides {
        statuses: vec![("N/A".to_string(), String::new())],
        ..Overrides::default()
    };
    assert!(empty_status.validate().is_ok());
}

#[test]
fn metadata_is_stamped_on_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(&dir, "log.csv", "Case Number,Status\n1,Closed\n");
    let out = dir.path().join("out");
    let mut options = options(out.clone());
    options.metadata = UploadMetadata {
        agency: Some("EPA".to_string()),
        ..UploadMetadata::default()
    };

    let reports = process_files(&[input], &matcher(), &options);
    assert!(!reports[0].is_failure());
    let csv = fs::read_to_string(out.join("normalized_log.csv")).expect("output");
    assert_eq!(csv, "request id,status,agency\n1,done,EPA\n");
}

#[test]
fn status_column_override_beats_earlier_match() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(
        &dir,
        "log.csv",
        "Status,Disposition\nOpen,Granted\nOpen,Denied\n",
    );
    let out = dir.path().join("out");
    let mut options = options(out.clone());
    options.overrides.status_column = Some("Disposition".to_string());

    let reports = process_files(&[input], &matcher(), &options);
    assert!(!reports[0].is_failure());
    let csv = fs::read_to_string(out.join("normalized_log.csv")).expect("output");
    assert_eq!(csv, "status\nGranted\nrejected\n");
}

#[test]
fn column_override_beats_earlier_match() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(
        &dir,
        "log.csv",
        "Case Number,Control,Status\n17,C-1,Closed\n18,C-2,Closed\n",
    );
    let out = dir.path().join("out");
    let mut options = options(out.clone());
    options.overrides.columns = vec![("Control".to_string(), "request id".to_string())];

    let reports = process_files(&[input], &matcher(), &options);
    assert!(!reports[0].is_failure());
    let csv = fs::read_to_string(out.join("normalized_log.csv")).expect("output");
    assert_eq!(csv, "request id,status\nC-1,done\nC-2,done\n");
}

#[test]
fn failed_audit_write_removes_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(&dir, "log.csv", "Case Number,Status\n1,Closed\n");
    let out = dir.path().join("out");
    fs::create_dir_all(out.join("normalized_log.audit.json")).expect("block audit path");

    let reports = process_files(&[input], &matcher(), &options(out.clone()));

    assert!(reports[0].is_failure());
    assert!(!out.join("normalized_log.csv").exists());
    assert!(!out.join("normalized_log.csv.tmp").exists());
}

#[test]
fn unmapped_log_writes_audit_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(&dir, "log.csv", "Xyzzy,Qwv\nfoo,bar\n");
    let out = dir.path().join("out");

    let reports = process_files(&[input], &matcher(), &options(out.clone()));

    let outcome = reports[0].outcome.as_ref().expect("processed");
    assert_eq!(outcome.output_columns, 0);
    assert!(outcome.output.is_none());
    assert!(!out.join("normalized_log.csv").exists());
    let audit = fs::read_to_string(out.join("normalized_log.audit.json")).expect("audit");
    assert!(audit.contains("normalized CSV not written"));
}
