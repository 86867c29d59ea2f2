//! Validation result types.
//!
//! This module defines the core types produced by the feed checks:
//! - `CheckReport` - outcome of one check, with its violations and warnings
//! - `Violation` - a data condition that fails a check
//! - `ValidationWarning` - a condition worth surfacing that never fails a check

use serde::Serialize;
use std::fmt;

/// Identifies one of the feed checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// At least one distinct document id is present.
    UniqueDocuments,
    /// Every document carries exactly the records it declares.
    Completeness,
    /// Every entity id matches the fixed lexical format.
    EntityFormat,
}

impl CheckKind {
    /// Human readable title used in text reports.
    pub fn title(&self) -> &'static str {
        match self {
            CheckKind::UniqueDocuments => "unique documents",
            CheckKind::Completeness => "document completeness",
            CheckKind::EntityFormat => "entity id format",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Outcome of a single check over one scan.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub check: CheckKind,
    pub passed: bool,
    pub violations: Vec<Violation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ValidationWarning>,
}

impl CheckReport {
    /// Build a report; the check passes iff there are no violations.
    pub fn new(
        check: CheckKind,
        violations: Vec<Violation>,
        warnings: Vec<ValidationWarning>,
    ) -> Self {
        Self {
            check,
            passed: violations.is_empty(),
            violations,
            warnings,
        }
    }

    /// Returns true if the check produced any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A data condition that fails a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// No record in the feed carried a document id.
    NoDocuments { records: usize },
    /// A document's observed record indices differ from `1..=expected_count`.
    IncompleteDocument {
        document_id: String,
        expected_count: i128,
        missing: Vec<i128>,
        extra: Vec<i128>,
        /// Missing and extra indices past the listing cap.
        #[serde(skip_serializing_if = "is_zero")]
        omitted: u128,
    },
    /// An entity id does not match the required format.
    InvalidEntityId {
        line: usize,
        value: serde_json::Value,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NoDocuments { records } => {
                write!(f, "no document ids found in {records} records")
            }
            Violation::IncompleteDocument {
                document_id,
                missing,
                extra,
                omitted,
                ..
            } => {
                write!(f, "document {document_id}: missing {missing:?}, extra {extra:?}")?;
                if *omitted > 0 {
                    write!(f, ", {omitted} more indices not listed")?;
                }
                Ok(())
            }
            Violation::InvalidEntityId { line, value } => {
                write!(f, "line {line}: invalid entity id {value}")
            }
        }
    }
}

fn is_zero(n: &u128) -> bool {
    *n == 0
}

/// Validation warning types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    /// Later records of a document declared a record count different from the first one.
    InconsistentRecordCount {
        document_id: String,
        kept: i128,
        conflicting: Vec<i128>,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::InconsistentRecordCount {
                document_id,
                kept,
                conflicting,
            } => {
                write!(
                    f,
                    "document {document_id}: record count {kept} kept, \
                     later records declared {conflicting:?}"
                )
            }
        }
    }
}
