//! Aggregated feed report.

use serde::Serialize;
use std::fmt::Write;

use super::result::{CheckKind, CheckReport};

/// A line that was skipped because it could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: String,
}

/// Counters collected while scanning a feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Physical lines read.
    pub lines: usize,
    /// Blank or whitespace-only lines.
    pub blank_lines: usize,
    /// Lines decoded into records.
    pub records: usize,
    /// Lines that failed to decode, in line order.
    pub skipped: Vec<SkippedLine>,
}

impl ScanStats {
    pub fn decode_errors(&self) -> usize {
        self.skipped.len()
    }
}

/// Outcome of all feed checks over one scan.
#[derive(Debug, Clone, Serialize)]
pub struct FeedReport {
    pub stats: ScanStats,
    /// Number of distinct document ids.
    pub document_count: usize,
    pub unique_documents: CheckReport,
    pub completeness: CheckReport,
    pub entity_format: CheckReport,
}

impl FeedReport {
    /// The three check reports in display order.
    pub fn checks(&self) -> [&CheckReport; 3] {
        [&self.unique_documents, &self.completeness, &self.entity_format]
    }

    /// True iff every check passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.checks().iter().all(|c| c.passed)
    }

    /// Render the report as text. Failing checks always list every violation;
    /// `verbose` also lists skipped lines.
    pub fn render_text(&self, verbose: bool) -> String {
        let mut out = String::new();
        let stats = &self.stats;
        let _ = writeln!(
            out,
            "scanned {} lines: {} records, {} blank, {} skipped",
            stats.lines,
            stats.records,
            stats.blank_lines,
            stats.decode_errors()
        );
        if verbose {
            for skipped in &stats.skipped {
                let _ = writeln!(out, "  skipped line {}: {}", skipped.line, skipped.reason);
            }
        }

        for check in self.checks() {
            let status = if check.passed { "PASS" } else { "FAIL" };
            let _ = writeln!(out, "{status} {}", check.check);
            if check.check == CheckKind::UniqueDocuments {
                let _ = writeln!(out, "  unique documents: {}", self.document_count);
            }
            for violation in &check.violations {
                let _ = writeln!(out, "  {violation}");
            }
            for warning in &check.warnings {
                let _ = writeln!(out, "  warning: {warning}");
            }
        }

        let verdict = if self.passed() { "all checks passed" } else { "validation failed" };
        let _ = writeln!(out, "{verdict}");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::result::{ValidationWarning, Violation};

    fn report(entity_violations: Vec<Violation>) -> FeedReport {
        FeedReport {
            stats: ScanStats {
                lines: 4,
                blank_lines: 1,
                records: 2,
                skipped: vec![SkippedLine {
                    line: 3,
                    reason: "invalid JSON: EOF".to_string(),
                }],
            },
            document_count: 1,
            unique_documents: CheckReport::new(CheckKind::UniqueDocuments, vec![], vec![]),
            completeness: CheckReport::new(
                CheckKind::Completeness,
                vec![],
                vec![ValidationWarning::InconsistentRecordCount {
                    document_id: "D1".to_string(),
                    kept: 2,
                    conflicting: vec![3],
                }],
            ),
            entity_format: CheckReport::new(CheckKind::EntityFormat, entity_violations, vec![]),
        }
    }

    #[test]
    fn test_render_failing_report() {
        let report = report(vec![Violation::InvalidEntityId {
            line: 2,
            value: serde_json::json!("abc123"),
        }]);
        assert!(!report.passed());
        assert_eq!(
            report.render_text(false),
            "scanned 4 lines: 2 records, 1 blank, 1 skipped\n\
             PASS unique documents\n\
             \x20 unique documents: 1\n\
             PASS document completeness\n\
             \x20 warning: document D1: record count 2 kept, later records declared [3]\n\
             FAIL entity id format\n\
             \x20 line 2: invalid entity id \"abc123\"\n\
             validation failed\n"
        );
    }

    #[test]
    fn test_verbose_lists_skipped_lines() {
        let report = report(vec![]);
        assert!(report.passed());
        let text = report.render_text(true);
        assert!(text.contains("  skipped line 3: invalid JSON: EOF\n"));
        assert!(text.ends_with("all checks passed\n"));
        assert!(!report.render_text(false).contains("skipped line"));
    }
}
