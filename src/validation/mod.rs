//! Feed validation.
//!
//! A feed is a newline-delimited JSON stream in which every line is one
//! analytic record belonging to a document. Three independent checks run over
//! the decoded records in a single pass:
//! - **Unique documents**: the feed names at least one document id
//! - **Completeness**: each document's record indices are exactly `1..=count`
//! - **Entity format**: every entity id is six uppercase letters or digits
//!
//! Each check is a [`RecordCheck`] accumulator created fresh for every scan.
//!
//! # Entry Points
//!
//! - [`validate_feed`] - Validate a feed file (plain or `.gz`, `-` for stdin)
//! - [`validate_reader`] - Validate an already opened reader
//! - [`scan_lines`] - Drive arbitrary checks over a line stream

mod check;
mod completeness;
mod config;
mod entity_format;
mod record;
mod report;
mod result;
mod runner;
mod source;
mod uniqueness;

pub use check::RecordCheck;
pub use completeness::{CompletenessReconciler, DocumentAggregate};
pub use config::{
    FieldNames, ValidationConfig, DOCUMENT_ID_FIELD, ENTITY_ID_FIELD, RECORD_COUNT_FIELD,
    RECORD_INDEX_FIELD,
};
pub use entity_format::{is_valid_entity_id, EntityIdFormat, ENTITY_ID_RE};
pub use record::{json_type_name, parse_line, DecodeError, DocumentFragment, Record};
pub use report::{FeedReport, ScanStats, SkippedLine};
pub use result::{CheckKind, CheckReport, ValidationWarning, Violation};
pub use runner::{scan_lines, scan_records, validate_feed, validate_reader};
pub use source::{open_feed, FeedLine, FeedLines, SourceUnavailable, STDIN_PATH};
pub use uniqueness::UniqueDocuments;
