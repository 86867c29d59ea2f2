//! Validation configuration.

/// Default key carrying the document identifier.
pub const DOCUMENT_ID_FIELD: &str = "RP_DOCUMENT_ID";
/// Default key carrying the entity identifier.
pub const ENTITY_ID_FIELD: &str = "RP_ENTITY_ID";
/// Default key carrying the declared number of records in a document.
pub const RECORD_COUNT_FIELD: &str = "DOCUMENT_RECORD_COUNT";
/// Default key carrying the 1-based position of a record within its document.
pub const RECORD_INDEX_FIELD: &str = "DOCUMENT_RECORD_INDEX";

/// Default cap on the missing or extra indices listed for one document.
pub const DEFAULT_MAX_LISTED_INDICES: usize = 1000;

/// Names of the record keys the checks read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub document_id: String,
    pub entity_id: String,
    pub record_count: String,
    pub record_index: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            document_id: DOCUMENT_ID_FIELD.to_string(),
            entity_id: ENTITY_ID_FIELD.to_string(),
            record_count: RECORD_COUNT_FIELD.to_string(),
            record_index: RECORD_INDEX_FIELD.to_string(),
        }
    }
}

/// Configuration for a validation scan.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Keys used to extract identities from each record.
    pub fields: FieldNames,

    /// Emit a progress message every this many lines. Zero disables progress logging.
    pub progress_interval: usize,

    /// Maximum missing (and extra) indices listed per incomplete document.
    pub max_listed_indices: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            fields: FieldNames::default(),
            progress_interval: 1000,
            max_listed_indices: DEFAULT_MAX_LISTED_INDICES,
        }
    }
}
