//! Feed profiling.
//!
//! Summarises what a feed actually contains: the JSON types and sample values
//! of every field, the shape of entity ids, and how records spread over
//! documents. Used by `feedcheck describe` to investigate a feed that fails
//! validation.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;
use std::io::BufRead;
use std::path::Path;

use crate::validation::{
    json_type_name, open_feed, scan_records, FeedLines, FieldNames, Record, ScanStats,
    ValidationConfig,
};

/// Number of sample values kept per field.
pub const MAX_SAMPLES: usize = 5;

/// Types and sample values seen for one field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldProfile {
    /// JSON type names seen, including `null`.
    pub types: BTreeSet<&'static str>,
    /// Records in which the field is present.
    pub present: usize,
    /// Records in which the field is `null`.
    pub nulls: usize,
    /// First non-null values seen.
    pub samples: Vec<Value>,
}

impl FieldProfile {
    fn observe(&mut self, value: &Value) {
        self.present += 1;
        self.types.insert(json_type_name(value));
        if value.is_null() {
            self.nulls += 1;
        } else if self.samples.len() < MAX_SAMPLES {
            self.samples.push(value.clone());
        }
    }
}

/// Shape of the entity ids in a feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntityIdProfile {
    /// String entity ids seen, counting repeats.
    pub total: usize,
    pub distinct: usize,
    /// Length in characters -> number of ids.
    pub lengths: BTreeMap<usize, usize>,
    /// Every character used by any id, sorted.
    pub characters: String,
    /// True if there is at least one id and every id consists of upper-case
    /// hexadecimal digits only.
    pub all_hex: bool,
}

/// How records spread over documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentProfile {
    pub distinct: usize,
    /// Records that carry a document id.
    pub records: usize,
    pub records_per_document: f64,
}

/// Profile of a whole feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedProfile {
    pub stats: ScanStats,
    pub fields: BTreeMap<String, FieldProfile>,
    pub entity_ids: EntityIdProfile,
    pub documents: DocumentProfile,
}

/// Accumulates a [`FeedProfile`] one record at a time.
#[derive(Debug, Default)]
pub struct FeedProfiler {
    names: FieldNames,
    fields: BTreeMap<String, FieldProfile>,
    entity_ids: BTreeSet<String>,
    entity_total: usize,
    entity_lengths: BTreeMap<usize, usize>,
    entity_chars: BTreeSet<char>,
    document_ids: BTreeSet<String>,
    document_records: usize,
}

impl FeedProfiler {
    pub fn new(names: FieldNames) -> Self {
        Self {
            names,
            ..Self::default()
        }
    }

    pub fn observe(&mut self, record: &Record) {
        for (key, value) in record.fields() {
            self.fields.entry(key.clone()).or_default().observe(value);
        }

        if let Some(Value::String(id)) = record.entity_id(&self.names) {
            self.entity_total += 1;
            *self.entity_lengths.entry(id.chars().count()).or_default() += 1;
            self.entity_chars.extend(id.chars());
            if !self.entity_ids.contains(id) {
                self.entity_ids.insert(id.clone());
            }
        }

        if let Some(id) = record.document_id(&self.names) {
            self.document_records += 1;
            if !self.document_ids.contains(id) {
                self.document_ids.insert(id.to_string());
            }
        }
    }

    pub fn finish(self, stats: ScanStats) -> FeedProfile {
        let all_hex = self.entity_total > 0
            && self
                .entity_chars
                .iter()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(c));
        let records_per_document = if self.document_ids.is_empty() {
            0.0
        } else {
            self.document_records as f64 / self.document_ids.len() as f64
        };

        FeedProfile {
            stats,
            fields: self.fields,
            entity_ids: EntityIdProfile {
                total: self.entity_total,
                distinct: self.entity_ids.len(),
                lengths: self.entity_lengths,
                characters: self.entity_chars.into_iter().collect(),
                all_hex,
            },
            documents: DocumentProfile {
                distinct: self.document_ids.len(),
                records: self.document_records,
                records_per_document,
            },
        }
    }
}

/// Profile an already opened feed reader.
pub fn profile_reader<R: BufRead>(reader: R, config: &ValidationConfig) -> Result<FeedProfile> {
    let mut profiler = FeedProfiler::new(config.fields.clone());
    let stats = scan_records(FeedLines::new(reader), config, |_, record| {
        profiler.observe(record)
    })?;
    Ok(profiler.finish(stats))
}

/// Profile the feed at `path`.
pub fn profile_feed(path: &Path, config: &ValidationConfig) -> Result<FeedProfile> {
    let reader = open_feed(path)?;
    profile_reader(reader, config)
}

impl FeedProfile {
    pub fn render_text(&self) -> String {
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

        let _ = writeln!(out, "fields:");
        for (name, field) in &self.fields {
            let types: Vec<&str> = field.types.iter().copied().collect();
            let samples: Vec<String> = field.samples.iter().map(Value::to_string).collect();
            let _ = writeln!(
                out,
                "  {name}: {} (present {}, null {}) e.g. {}",
                types.join("|"),
                field.present,
                field.nulls,
                samples.join(", ")
            );
        }

        let ids = &self.entity_ids;
        let _ = writeln!(out, "entity ids: {} total, {} distinct", ids.total, ids.distinct);
        for (length, count) in &ids.lengths {
            let _ = writeln!(out, "  length {length}: {count}");
        }
        let _ = writeln!(out, "  characters: {}", ids.characters);
        let _ = writeln!(out, "  upper-case hexadecimal: {}", ids.all_hex);

        let docs = &self.documents;
        let _ = writeln!(
            out,
            "documents: {} distinct, {} records, {:.2} records per document",
            docs.distinct, docs.records, docs.records_per_document
        );
        out
    }
}
