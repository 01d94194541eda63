//! Query and body serialization
//!
//! Turns call params into a form-urlencoded query string for read-style
//! verbs or a JSON body for write-style verbs.

use serde_json::{Map, Value};
use url::form_urlencoded;

/// Call parameters, kept in insertion order
pub type Params = Map<String, Value>;

/// Flatten params into ordered `(key, value)` pairs
///
/// Arrays become repeated `key[]` entries and nested objects contribute
/// their own keys unchanged.
pub fn to_query_pairs(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    push_object(&mut pairs, params);
    pairs
}

/// Serialize params as an urlencoded query string (without the leading `?`)
pub fn to_query_string(params: &Params) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in to_query_pairs(params) {
        serializer.append_pair(&key, &value);
    }
    serializer.finish()
}

/// JSON body for write-style requests
pub fn to_body(params: &Params) -> Value {
    Value::Object(params.clone())
}

fn push_object(pairs: &mut Vec<(String, String)>, map: &Map<String, Value>) {
    for (key, value) in map {
        push_value(pairs, key, value);
    }
}

fn push_value(pairs: &mut Vec<(String, String)>, key: &str, value: &Value) {
    match value {
        Value::Array(items) => {
            let key = format!("{}[]", key);
            for item in items {
                push_array_item(pairs, &key, item);
            }
        },
        Value::Object(map) => push_object(pairs, map),
        scalar => pairs.push((key.to_string(), scalar_to_string(scalar))),
    }
}

fn push_array_item(pairs: &mut Vec<(String, String)>, key: &str, item: &Value) {
    match item {
        Value::Array(items) => {
            for inner in items {
                push_array_item(pairs, key, inner);
            }
        },
        Value::Object(map) => push_object(pairs, map),
        scalar => pairs.push((key.to_string(), scalar_to_string(scalar))),
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
