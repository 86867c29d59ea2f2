//! Record decoding and identity extraction.

use serde_json::{Map, Value};
use std::fmt;

use super::config::FieldNames;

/// Reason a line could not be decoded into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The line is not valid UTF-8.
    InvalidUtf8,
    /// The line is not valid JSON.
    InvalidJson(String),
    /// The line is valid JSON but not an object.
    NotAnObject(&'static str),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidUtf8 => write!(f, "line is not valid UTF-8"),
            DecodeError::InvalidJson(message) => write!(f, "invalid JSON: {message}"),
            DecodeError::NotAnObject(kind) => write!(f, "expected a JSON object, got {kind}"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// One decoded feed line.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Map<String, Value>,
}

/// Fields of a record that place it within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentFragment<'a> {
    pub document_id: &'a str,
    pub record_count: i128,
    pub record_index: i128,
}

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Raw access to any field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Document id, if present as a string.
    pub fn document_id(&self, names: &FieldNames) -> Option<&str> {
        self.fields.get(&names.document_id).and_then(Value::as_str)
    }

    /// Entity id value, if present and not null. Non-string values are returned as-is.
    pub fn entity_id(&self, names: &FieldNames) -> Option<&Value> {
        self.fields.get(&names.entity_id).filter(|v| !v.is_null())
    }

    pub fn record_count(&self, names: &FieldNames) -> Option<i128> {
        self.fields.get(&names.record_count).and_then(as_integer)
    }

    pub fn record_index(&self, names: &FieldNames) -> Option<i128> {
        self.fields.get(&names.record_index).and_then(as_integer)
    }

    /// Document placement, present only when id, count and index are all usable.
    pub fn fragment(&self, names: &FieldNames) -> Option<DocumentFragment<'_>> {
        Some(DocumentFragment {
            document_id: self.document_id(names)?,
            record_count: self.record_count(names)?,
            record_index: self.record_index(names)?,
        })
    }
}

/// Any JSON integer, signed or unsigned 64-bit. Floats yield `None`.
fn as_integer(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
}

/// Name of a JSON value's type, as reported in diagnostics and profiles.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode one line. Blank lines yield `Ok(None)`.
pub fn parse_line(bytes: &[u8]) -> Result<Option<Record>, DecodeError> {
    let text = std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(fields)) => Ok(Some(Record::new(fields))),
        Ok(other) => Err(DecodeError::NotAnObject(json_type_name(&other))),
        Err(e) => Err(DecodeError::InvalidJson(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(line: &str) -> Record {
        parse_line(line.as_bytes()).unwrap().unwrap()
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        assert_eq!(parse_line(b""), Ok(None));
        assert_eq!(parse_line(b"  \t "), Ok(None));
    }

    #[test]
    fn test_decode_failures() {
        assert!(matches!(
            parse_line(b"{\"RP_DOCUMENT_ID\":"),
            Err(DecodeError::InvalidJson(_))
        ));
        assert_eq!(parse_line(b"[1, 2]"), Err(DecodeError::NotAnObject("array")));
        assert_eq!(parse_line(b"\xff\xfe{}"), Err(DecodeError::InvalidUtf8));
    }

    #[test]
    fn test_fragment_extraction() {
        let names = FieldNames::default();
        let r = record(
            r#"{"RP_DOCUMENT_ID":"D1","RP_ENTITY_ID":"ABC123","DOCUMENT_RECORD_COUNT":2,"DOCUMENT_RECORD_INDEX":1,"OTHER":true}"#,
        );
        assert_eq!(
            r.fragment(&names),
            Some(DocumentFragment {
                document_id: "D1",
                record_count: 2,
                record_index: 1,
            })
        );
        assert_eq!(r.entity_id(&names), Some(&Value::from("ABC123")));
    }

    #[test]
    fn test_missing_or_mistyped_fields_are_absent() {
        let names = FieldNames::default();
        let r = record(r#"{"RP_DOCUMENT_ID":"D1","DOCUMENT_RECORD_COUNT":2}"#);
        assert_eq!(r.document_id(&names), Some("D1"));
        assert_eq!(r.fragment(&names), None);

        let r = record(r#"{"RP_DOCUMENT_ID":null,"RP_ENTITY_ID":null,"DOCUMENT_RECORD_COUNT":"2"}"#);
        assert_eq!(r.document_id(&names), None);
        assert_eq!(r.entity_id(&names), None);
        assert_eq!(r.record_count(&names), None);

        let r = record(r#"{"DOCUMENT_RECORD_INDEX":1.5}"#);
        assert_eq!(r.record_index(&names), None);
    }

    #[test]
    fn test_unsigned_integers_above_i64_are_kept() {
        let names = FieldNames::default();
        let r = record(
            r#"{"RP_DOCUMENT_ID":"D1","DOCUMENT_RECORD_COUNT":1,"DOCUMENT_RECORD_INDEX":18446744073709551615}"#,
        );
        assert_eq!(r.record_index(&names), Some(18_446_744_073_709_551_615));
        assert_eq!(r.fragment(&names).map(|f| f.record_index), Some(u64::MAX as i128));

        let r = record(r#"{"DOCUMENT_RECORD_COUNT":-3,"DOCUMENT_RECORD_INDEX":1e3}"#);
        assert_eq!(r.record_count(&names), Some(-3));
        assert_eq!(r.record_index(&names), None);
    }

    #[test]
    fn test_custom_field_names() {
        let names = FieldNames {
            document_id: "doc".into(),
            entity_id: "ent".into(),
            record_count: "n".into(),
            record_index: "i".into(),
        };
        let r = record(r#"{"doc":"X","ent":"ZZZ999","n":1,"i":1}"#);
        assert_eq!(r.fragment(&names).map(|f| f.document_id), Some("X"));
        assert_eq!(r.fragment(&FieldNames::default()), None);
    }

    #[test]
    fn test_json_type_names() {
        assert_eq!(json_type_name(&serde_json::json!(1)), "int");
        assert_eq!(json_type_name(&serde_json::json!(1.5)), "float");
        assert_eq!(json_type_name(&serde_json::json!({})), "object");
    }
}
