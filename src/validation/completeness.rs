//! Document completeness reconciliation.
//!
//! Records are grouped by document id. The first record seen for a document
//! fixes its expected record count; every record contributes its index to the
//! document's observed set. Once the stream ends, each document's observed
//! indices are compared against `1..=expected_count`:
//! - `missing` = expected indices never observed
//! - `extra` = observed indices outside the expected range
//!
//! Duplicate fragments collapse into the same index and are not a violation by
//! themselves. A non-positive expected count makes every observed index extra.

use std::collections::{BTreeMap, BTreeSet};

use super::check::RecordCheck;
use super::config::{FieldNames, DEFAULT_MAX_LISTED_INDICES};
use super::record::Record;
use super::result::{CheckKind, CheckReport, ValidationWarning, Violation};

/// Per-document accumulation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentAggregate {
    /// Record count declared by the first record of the document.
    pub expected_count: i128,
    /// Indices seen so far.
    pub observed_indices: BTreeSet<i128>,
    /// Record counts declared by later records that disagree with `expected_count`.
    pub conflicting_counts: BTreeSet<i128>,
}

impl DocumentAggregate {
    fn new(expected_count: i128) -> Self {
        Self {
            expected_count,
            observed_indices: BTreeSet::new(),
            conflicting_counts: BTreeSet::new(),
        }
    }

    fn observe(&mut self, record_count: i128, record_index: i128) {
        if record_count != self.expected_count {
            self.conflicting_counts.insert(record_count);
        }
        self.observed_indices.insert(record_index);
    }

    /// Observed indices inside `1..=expected_count`.
    fn covered(&self) -> usize {
        if self.expected_count < 1 {
            return 0;
        }
        self.observed_indices.range(1..=self.expected_count).count()
    }

    /// Number of expected indices not observed.
    pub fn missing_count(&self) -> u128 {
        self.expected_count.max(0).unsigned_abs() - self.covered() as u128
    }

    /// Number of observed indices outside `1..=expected_count`.
    pub fn extra_count(&self) -> usize {
        self.observed_indices.len() - self.covered()
    }

    /// The first `limit` expected indices not observed, ascending.
    pub fn missing(&self, limit: usize) -> Vec<i128> {
        (1..=self.expected_count)
            .filter(|index| !self.observed_indices.contains(index))
            .take(limit)
            .collect()
    }

    /// The first `limit` observed indices outside `1..=expected_count`, ascending.
    pub fn extra(&self, limit: usize) -> Vec<i128> {
        self.observed_indices
            .iter()
            .copied()
            .filter(|&index| index < 1 || index > self.expected_count)
            .take(limit)
            .collect()
    }

    /// True iff the observed indices are exactly `1..=expected_count`.
    pub fn is_complete(&self) -> bool {
        self.missing_count() == 0 && self.extra_count() == 0
    }
}

/// Groups records by document and reports documents whose fragments don't
/// cover their declared record count exactly.
#[derive(Debug)]
pub struct CompletenessReconciler {
    fields: FieldNames,
    documents: BTreeMap<String, DocumentAggregate>,
    max_listed_indices: usize,
}

impl CompletenessReconciler {
    pub fn new(fields: FieldNames) -> Self {
        Self {
            fields,
            documents: BTreeMap::new(),
            max_listed_indices: DEFAULT_MAX_LISTED_INDICES,
        }
    }

    /// Cap the missing and extra indices listed per document. Indices past the
    /// cap are only counted.
    pub fn with_max_listed_indices(mut self, max: usize) -> Self {
        self.max_listed_indices = max;
        self
    }

    /// Add one fragment. The first fragment of a document fixes its expected count.
    pub fn add_fragment(&mut self, document_id: &str, record_count: i128, record_index: i128) {
        if let Some(aggregate) = self.documents.get_mut(document_id) {
            aggregate.observe(record_count, record_index);
        } else {
            let mut aggregate = DocumentAggregate::new(record_count);
            aggregate.observe(record_count, record_index);
            self.documents.insert(document_id.to_string(), aggregate);
        }
    }

    /// Aggregates keyed by document id.
    pub fn documents(&self) -> &BTreeMap<String, DocumentAggregate> {
        &self.documents
    }
}

impl RecordCheck for CompletenessReconciler {
    fn kind(&self) -> CheckKind {
        CheckKind::Completeness
    }

    fn observe(&mut self, _line: usize, record: &Record) {
        if let Some(fragment) = record.fragment(&self.fields) {
            self.add_fragment(
                fragment.document_id,
                fragment.record_count,
                fragment.record_index,
            );
        }
    }

    fn report(&self) -> CheckReport {
        let mut violations = Vec::new();
        let mut warnings = Vec::new();

        for (document_id, aggregate) in &self.documents {
            if !aggregate.is_complete() {
                let missing = aggregate.missing(self.max_listed_indices);
                let extra = aggregate.extra(self.max_listed_indices);
                let omitted = (aggregate.missing_count() - missing.len() as u128)
                    + (aggregate.extra_count() - extra.len()) as u128;
                violations.push(Violation::IncompleteDocument {
                    document_id: document_id.clone(),
                    expected_count: aggregate.expected_count,
                    missing,
                    extra,
                    omitted,
                });
            }
            if !aggregate.conflicting_counts.is_empty() {
                warnings.push(ValidationWarning::InconsistentRecordCount {
                    document_id: document_id.clone(),
                    kept: aggregate.expected_count,
                    conflicting: aggregate.conflicting_counts.iter().copied().collect(),
                });
            }
        }

        CheckReport::new(CheckKind::Completeness, violations, warnings)
    }
}
