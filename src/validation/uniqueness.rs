//! Distinct document counting.

use std::collections::BTreeSet;

use super::check::RecordCheck;
use super::config::FieldNames;
use super::record::Record;
use super::result::{CheckKind, CheckReport, Violation};

/// Collects the distinct document ids of a feed. Fails when there are none.
#[derive(Debug, Default)]
pub struct UniqueDocuments {
    fields: FieldNames,
    document_ids: BTreeSet<String>,
    records: usize,
}

impl UniqueDocuments {
    pub fn new(fields: FieldNames) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Number of distinct document ids seen.
    pub fn count(&self) -> usize {
        self.document_ids.len()
    }

    /// Distinct document ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = &str> {
        self.document_ids.iter().map(String::as_str)
    }
}

impl RecordCheck for UniqueDocuments {
    fn kind(&self) -> CheckKind {
        CheckKind::UniqueDocuments
    }

    fn observe(&mut self, _line: usize, record: &Record) {
        self.records += 1;
        if let Some(id) = record.document_id(&self.fields) {
            if !self.document_ids.contains(id) {
                self.document_ids.insert(id.to_string());
            }
        }
    }

    fn report(&self) -> CheckReport {
        let mut violations = Vec::new();
        if self.document_ids.is_empty() {
            violations.push(Violation::NoDocuments {
                records: self.records,
            });
        }
        CheckReport::new(CheckKind::UniqueDocuments, violations, Vec::new())
    }
}
