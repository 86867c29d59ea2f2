//! Record check trait.
//!
//! Every feed check is an accumulator fed one decoded record at a time during
//! a scan and asked for its report once the stream ends. Checks own their
//! state and never see each other, so any number of them can share one pass.

use super::record::Record;
use super::result::{CheckKind, CheckReport};

/// A check that consumes decoded records and produces a report.
pub trait RecordCheck {
    /// Which check this is.
    fn kind(&self) -> CheckKind;

    /// Consume one decoded record found on the given 1-based line.
    fn observe(&mut self, line: usize, record: &Record);

    /// Build the report for everything observed so far.
    fn report(&self) -> CheckReport;
}
