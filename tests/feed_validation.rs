//! Library-level tests validating complete feed files.

mod common;

use common::{record, write_feed, write_gz_feed};
use feedcheck::validation::{validate_feed, ValidationConfig, ValidationWarning, Violation};
use feedcheck::SourceUnavailable;
use tempfile::TempDir;

#[test]
fn test_clean_feed_passes_every_check() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_feed(
        dir.path(),
        "rt-feed-record",
        &[
            record("D2", "0A1B2C", 2, 2),
            record("D1", "ABC123", 3, 3),
            record("D1", "ABC124", 3, 1),
            record("D2", "0A1B2C", 2, 1),
            record("D1", "ABC125", 3, 2),
            record("D1", "ABC125", 3, 2),
        ],
    );

    let report = validate_feed(&path, &ValidationConfig::default()).unwrap();
    assert!(
        report.passed(),
        "clean feed failed:\n{}",
        report.render_text(true)
    );
    assert_eq!(report.document_count, 2);
    assert_eq!(report.stats.records, 6);
}

#[test]
fn test_every_violation_is_reported() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_feed(
        dir.path(),
        "rt-feed-record",
        &[
            record("D1", "ABC123", 5, 1),
            record("D1", "ABC123", 5, 2),
            "{\"RP_DOCUMENT_ID\": \"D1\", truncated".to_string(),
            record("D1", "abc123", 5, 4),
            record("D1", "ABC123", 5, 5),
            record("D2", "ABC-12", 3, 1),
            record("D2", "ABC123", 3, 2),
            record("D2", "ABC123", 3, 3),
            record("D2", "ABC12", 3, 4),
        ],
    );

    let report = validate_feed(&path, &ValidationConfig::default()).unwrap();
    assert!(!report.passed());
    assert!(report.unique_documents.passed);
    assert_eq!(report.stats.skipped.len(), 1);
    assert_eq!(report.stats.skipped[0].line, 3);

    assert_eq!(
        report.completeness.violations,
        vec![
            Violation::IncompleteDocument {
                document_id: "D1".to_string(),
                expected_count: 5,
                missing: vec![3],
                extra: vec![],
                omitted: 0,
            },
            Violation::IncompleteDocument {
                document_id: "D2".to_string(),
                expected_count: 3,
                missing: vec![],
                extra: vec![4],
                omitted: 0,
            },
        ]
    );

    let lines: Vec<usize> = report
        .entity_format
        .violations
        .iter()
        .map(|v| match v {
            Violation::InvalidEntityId { line, .. } => *line,
            other => panic!("unexpected violation {other}"),
        })
        .collect();
    assert_eq!(lines, vec![4, 6, 9]);
}

#[test]
fn test_conflicting_record_counts_warn_without_failing() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_feed(
        dir.path(),
        "rt-feed-record",
        &[record("D1", "ABC123", 2, 1), record("D1", "ABC123", 9, 2)],
    );

    let report = validate_feed(&path, &ValidationConfig::default()).unwrap();
    assert!(report.completeness.passed);
    assert_eq!(
        report.completeness.warnings,
        vec![ValidationWarning::InconsistentRecordCount {
            document_id: "D1".to_string(),
            kept: 2,
            conflicting: vec![9],
        }]
    );
}

#[test]
fn test_gzip_feed() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_gz_feed(
        dir.path(),
        "rt-feed-record.gz",
        &[record("D1", "ABC123", 1, 1)],
    );

    let report = validate_feed(&path, &ValidationConfig::default()).unwrap();
    assert!(report.passed());
    assert_eq!(report.document_count, 1);
}

#[test]
fn test_missing_feed_is_source_unavailable() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = validate_feed(&dir.path().join("rt-feed-record"), &ValidationConfig::default())
        .expect_err("missing feed must not produce a report");
    let source = err
        .downcast_ref::<SourceUnavailable>()
        .expect("error should be SourceUnavailable");
    assert!(source.path.ends_with("rt-feed-record"));
}
