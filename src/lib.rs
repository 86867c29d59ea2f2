//! feedcheck library - validation of real-time entity analytics feeds.
//!
//! A feed is newline-delimited JSON, one analytic record per line. Each record
//! belongs to a document (`RP_DOCUMENT_ID`), names an entity (`RP_ENTITY_ID`)
//! and states its position within the document (`DOCUMENT_RECORD_INDEX` out of
//! `DOCUMENT_RECORD_COUNT`).
//!
//! # Modules
//!
//! - [`validation`] - The three feed checks and the single-pass runner
//! - [`profile`] - Field, entity id and document statistics for a feed
//!
//! # Example
//!
//! ```no_run
//! use feedcheck::{validate_feed, ValidationConfig};
//! use std::path::Path;
//!
//! let report = validate_feed(Path::new("data/rt-feed-record"), &ValidationConfig::default())
//!     .expect("feed not readable");
//! if !report.passed() {
//!     eprint!("{}", report.render_text(true));
//! }
//! ```

pub mod profile;
pub mod validation;

// Re-export for convenience
pub use profile::{profile_feed, FeedProfile};
pub use validation::{
    validate_feed, validate_reader, CheckKind, CheckReport, FeedReport, FieldNames,
    SourceUnavailable, ValidationConfig, ValidationWarning, Violation,
};
