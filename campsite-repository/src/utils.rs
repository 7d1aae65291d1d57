//! Shaping of stored documents into plain JSON.

use bson::{Bson, Document};
use serde_json::{Map, Value};

use crate::types::INTERNAL_ID_FIELD;

/// Remove the store-internal `_id` field, if present.
pub fn strip_internal_id(document: &mut Document) {
    document.remove(INTERNAL_ID_FIELD);
}

/// Convert a stored document to JSON with its `_id` removed.
///
/// Every other field is kept as stored, including fields the models do not
/// know about.
pub fn document_to_json(mut document: Document) -> Value {
    strip_internal_id(&mut document);
    Value::Object(document_to_map(document))
}

fn document_to_map(document: Document) -> Map<String, Value> {
    document
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect()
}

/// Convert a single BSON value to plain JSON.
///
/// Datetimes become RFC 3339 strings and object ids become hex strings.
/// Types with no natural JSON form fall back to relaxed extended JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::from(i),
        Bson::Int64(i) => Value::from(i),
        Bson::Double(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Bson::String(s) => Value::String(s),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => Value::Object(document_to_map(doc)),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Value::from(dt.timestamp_millis()),
        },
        other => other.into_relaxed_extjson(),
    }
}
