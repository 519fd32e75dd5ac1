//! snake_case to camelCase key conversion for caller-supplied nested data.

use crate::payload::{Payload, Value};

/// Convert `snake_case` to `camelCase`. Values without `_` are returned as-is.
pub fn to_camel_case(value: &str) -> String {
    let mut words = value.split('_');
    let first = words.next().unwrap_or_default();
    let rest: Vec<&str> = words.collect();
    if rest.is_empty() {
        return first.to_string();
    }

    let mut out = first.to_lowercase();
    for word in rest {
        let mut chars = word.chars();
        if let Some(head) = chars.next() {
            out.extend(head.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

/// Recursively camel-case every object key inside `data`.
///
/// Lists are walked element by element; scalars are returned unchanged.
/// Keys that collapse onto the same camelCase name are reported and the
/// later value wins.
pub fn convert_keys_to_camel_case(data: &Value) -> Value {
    match data {
        Value::Object(payload) => Value::Object(convert_payload(payload)),
        Value::List(items) => Value::List(items.iter().map(convert_keys_to_camel_case).collect()),
        other => other.clone(),
    }
}

fn convert_payload(payload: &Payload) -> Payload {
    let mut converted = Payload::new();
    for (key, value) in payload.iter() {
        let camel = to_camel_case(key);
        if converted.contains_key(&camel) {
            tracing::warn!(key, converted = %camel, "duplicate key after camelCase conversion");
        }
        converted.insert(camel, convert_keys_to_camel_case(value));
    }
    converted
}
