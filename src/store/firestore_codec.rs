// src/store/firestore_codec.rs
//
// Firestore REST wire shapes: structuredQuery encoding and typed-value decoding.

use serde::Deserialize;
use serde_json::{json, Map, Number, Value};

use crate::domain::ListingDoc;
use crate::store::{Direction, FieldValue, ListingQuery, StoreError};

pub fn encode_query(query: &ListingQuery) -> Value {
    let mut structured = Map::new();
    structured.insert(
        "from".into(),
        json!([{ "collectionId": query.collection }]),
    );

    let mut filters: Vec<Value> = query
        .filters
        .iter()
        .map(|(field, value)| {
            json!({
                "fieldFilter": {
                    "field": { "fieldPath": field },
                    "op": "EQUAL",
                    "value": encode_value(value),
                }
            })
        })
        .collect();

    match filters.len() {
        0 => {}
        1 => {
            structured.insert("where".into(), filters.remove(0));
        }
        _ => {
            structured.insert(
                "where".into(),
                json!({ "compositeFilter": { "op": "AND", "filters": filters } }),
            );
        }
    }

    if let Some((field, direction)) = &query.order_by {
        let direction = match direction {
            Direction::Ascending => "ASCENDING",
            Direction::Descending => "DESCENDING",
        };
        structured.insert(
            "orderBy".into(),
            json!([{ "field": { "fieldPath": field }, "direction": direction }]),
        );
    }

    if let Some(limit) = query.limit {
        structured.insert("limit".into(), json!(limit));
    }

    json!({ "structuredQuery": structured })
}

fn encode_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Bool(b) => json!({ "booleanValue": b }),
        // int64 travels as a decimal string
        FieldValue::Int(i) => json!({ "integerValue": i.to_string() }),
        FieldValue::Float(f) => json!({ "doubleValue": f }),
        FieldValue::Text(s) => json!({ "stringValue": s }),
    }
}

#[derive(Debug, Deserialize)]
struct RunQueryItem {
    document: Option<RawDocument>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

/// Decode a `runQuery` response body into documents, keeping result order.
///
/// Items without a `document` (the trailing read-time marker) are skipped.
pub fn decode_run_query(body: &str) -> Result<Vec<ListingDoc>, StoreError> {
    let items: Vec<RunQueryItem> =
        serde_json::from_str(body).map_err(|e| StoreError::Decode(e.to_string()))?;

    items
        .into_iter()
        .filter_map(|item| item.document)
        .map(|doc| {
            let id = document_id(&doc.name)
                .ok_or_else(|| StoreError::Decode(format!("bad document name {:?}", doc.name)))?;
            let fields = doc
                .fields
                .iter()
                .map(|(k, v)| (k.clone(), decode_value(v)))
                .collect::<Map<_, _>>();
            Ok(ListingDoc::from_raw(id, Value::Object(fields)))
        })
        .collect()
}

/// `projects/p/databases/(default)/documents/listings/abc` -> `abc`
fn document_id(name: &str) -> Option<&str> {
    name.rsplit('/').next().filter(|id| !id.is_empty())
}

/// Turn a typed Firestore value (`{"stringValue": "x"}`) into plain JSON.
pub fn decode_value(value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return Value::Null;
    };
    let Some((kind, inner)) = obj.iter().next() else {
        return Value::Null;
    };

    match kind.as_str() {
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "booleanValue" => inner.clone(),
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(|n| Value::Number(n.into()))
                .unwrap_or(Value::Null),
            Value::Number(_) => inner.clone(),
            _ => Value::Null,
        },
        "doubleValue" => match inner {
            Value::Number(_) => inner.clone(),
            // NaN / Infinity arrive as strings and have no JSON form
            Value::String(s) => s
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            _ => Value::Null,
        },
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|vs| vs.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => Value::Object(
            inner
                .get("fields")
                .and_then(Value::as_object)
                .map(|fs| fs.iter().map(|(k, v)| (k.clone(), decode_value(v))).collect())
                .unwrap_or_default(),
        ),
        "geoPointValue" => json!({
            "lat": inner.get("latitude").cloned().unwrap_or(Value::Null),
            "lng": inner.get("longitude").cloned().unwrap_or(Value::Null),
        }),
        _ => Value::Null,
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

/// Firestore reports errors either as an object or inside a one-element array.
pub fn decode_error(body: &str) -> Option<ErrorBody> {
    if let Ok(env) = serde_json::from_str::<ErrorEnvelope>(body) {
        return Some(env.error);
    }
    serde_json::from_str::<Vec<ErrorEnvelope>>(body)
        .ok()
        .and_then(|v| v.into_iter().next())
        .map(|env| env.error)
}
