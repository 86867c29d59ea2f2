//! Entity id format validation.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use super::check::RecordCheck;
use super::config::FieldNames;
use super::record::Record;
use super::result::{CheckKind, CheckReport, Violation};

/// Six characters, each an uppercase ASCII letter or a decimal digit.
pub static ENTITY_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{6}$").expect("Invalid entity id regex pattern"));

/// Returns true if `value` is a well-formed entity id.
pub fn is_valid_entity_id(value: &str) -> bool {
    ENTITY_ID_RE.is_match(value)
}

/// Records every entity id that does not match [`ENTITY_ID_RE`], with its line number.
#[derive(Debug, Default)]
pub struct EntityIdFormat {
    fields: FieldNames,
    violations: Vec<Violation>,
    checked: usize,
}

impl EntityIdFormat {
    pub fn new(fields: FieldNames) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Number of entity ids checked.
    pub fn checked(&self) -> usize {
        self.checked
    }
}

impl RecordCheck for EntityIdFormat {
    fn kind(&self) -> CheckKind {
        CheckKind::EntityFormat
    }

    fn observe(&mut self, line: usize, record: &Record) {
        let Some(value) = record.entity_id(&self.fields) else {
            return;
        };
        self.checked += 1;

        let valid = match value {
            Value::String(id) => is_valid_entity_id(id),
            _ => false,
        };
        if !valid {
            self.violations.push(Violation::InvalidEntityId {
                line,
                value: value.clone(),
            });
        }
    }

    fn report(&self) -> CheckReport {
        let mut violations = self.violations.clone();
        // Stable: repeated observations of one line keep their order.
        violations.sort_by_key(|v| match v {
            Violation::InvalidEntityId { line, .. } => *line,
            _ => 0,
        });
        CheckReport::new(CheckKind::EntityFormat, violations, Vec::new())
    }
}
