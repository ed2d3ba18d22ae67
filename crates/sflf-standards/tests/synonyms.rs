use std::fs;

use sflf_model::Vocabulary;
use sflf_standards::{
    Rejection, StandardsError, SynonymTable, default_standards_root, load_dictionary,
    load_dictionary_from, load_synonym_table, parse_synonyms,
};

const SAMPLE: &str = r#"
request id: Tracking Number, "Case No", 'ref #'
this line has no colon
requester:   Submitter ,, "Name of Requester"

date completed: date closed
"#;

#[test]
fn parses_quoted_and_spaced_synonyms() {
    let table = parse_synonyms(SAMPLE, Vocabulary::Column);
    assert_eq!(table.len(), 6);
    assert_eq!(table.lookup("tracking number"), Some("request id"));
    assert_eq!(table.lookup("CASE NO"), Some("request id"));
    assert_eq!(table.lookup("Ref #"), Some("request id"));
    assert_eq!(table.lookup("  submitter  "), Some("requester"));
    assert_eq!(table.lookup("name of requester"), Some("requester"));
    assert_eq!(table.lookup("Date Closed"), Some("date completed"));
    assert_eq!(table.lookup("this line has no colon"), None);
}

#[test]
fn canonical_name_is_never_its_own_synonym() {
    let mut table = SynonymTable::new(Vocabulary::Column);
    assert_eq!(table.insert("status", "Status"), Err(Rejection::SelfMapping));
    assert!(table.is_empty());
}

#[test]
fn first_conflicting_entry_wins() {
    let table = parse_synonyms(
        "date completed: closed\ndate perfected: closed\n",
        Vocabulary::Column,
    );
    assert_eq!(table.lookup("closed"), Some("date completed"));

    let mut table = table;
    assert_eq!(
        table.insert("date perfected", "closed"),
        Err(Rejection::Conflict {
            existing: "date completed".to_string()
        })
    );
}

#[test]
fn unknown_canonical_names_are_skipped() {
    let table = parse_synonyms("tracking: foo, bar\nstatus: state code", Vocabulary::Column);
    assert_eq!(table.len(), 1);
    assert_eq!(table.lookup("foo"), None);
}

#[test]
fn counts_follow_vocabulary_order() {
    let table = parse_synonyms("done: closed, granted\nfix: unclear", Vocabulary::Status);
    let counts = table.counts();
    assert_eq!(counts.len(), 11);
    assert_eq!(counts[0], ("processed", 0));
    assert_eq!(counts[2], ("fix", 1));
    assert_eq!(counts[7], ("done", 2));
}

#[test]
fn loads_tables_from_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let columns = dir.path().join("synonyms.txt");
    let statuses = dir.path().join("status_synonyms.txt");
    fs::write(&columns, "request id: foia number\n").expect("write columns");
    fs::write(&statuses, "done: granted\n").expect("write statuses");

    let dictionary = load_dictionary(&columns, &statuses).expect("load dictionary");
    assert_eq!(
        dictionary.lookup(Vocabulary::Column, "FOIA Number"),
        Some("request id")
    );
    assert_eq!(dictionary.lookup(Vocabulary::Status, "Granted"), Some("done"));
}

#[test]
fn missing_file_is_an_error_for_single_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.txt");
    let err = load_synonym_table(&path, Vocabulary::Column).unwrap_err();
    assert!(matches!(err, StandardsError::NotFound { .. }));
}

#[test]
fn missing_files_yield_empty_dictionary() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dictionary = load_dictionary_from(dir.path()).expect("load dictionary");
    assert!(dictionary.columns.is_empty());
    assert!(dictionary.statuses.is_empty());
}

#[test]
fn bundled_standards_load() {
    let dictionary = load_dictionary_from(&default_standards_root()).expect("load standards");
    assert!(!dictionary.columns.is_empty());
    assert!(!dictionary.statuses.is_empty());
    assert_eq!(
        dictionary.lookup(Vocabulary::Column, "Request Number"),
        Some("request id")
    );
}
