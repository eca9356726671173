//! Payload extraction
//!
//! The two backends answer in different shapes; both are reduced to
//! `Option<Number>` per field. A missing attribute, category, or key is
//! absent, never an error - servers legitimately omit metrics.

use serde_json::{Number, Value};

/// Look up a named entry in an attribute-list payload.
///
/// The payload is an array of `{"name": ..., "value": {"value": N}}`
/// entries; the scan takes the first entry whose `name` matches and
/// returns its nested value. Unknown entries and extra fields are
/// ignored; ordering does not matter.
pub fn attribute_value(payload: &Value, name: &str) -> Option<Number> {
    payload
        .as_array()?
        .iter()
        .find(|entry| entry.get("name").and_then(Value::as_str) == Some(name))
        .and_then(|entry| entry.get("value"))
        .and_then(|value| value.get("value"))
        .and_then(coerce_number)
}

/// Look up `payload[category][key]` in a metrics-map payload.
pub fn metric_value(payload: &Value, category: &str, key: &str) -> Option<Number> {
    payload.get(category)?.get(key).and_then(coerce_number)
}

/// Accept numbers as-is; some JMX REST servers report numeric values as
/// strings, so those are parsed too. Anything else is absent.
fn coerce_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => {
            if let Ok(i) = s.parse::<i64>() {
                Some(Number::from(i))
            } else {
                s.parse::<f64>().ok().and_then(Number::from_f64)
            }
        }
        _ => None,
    }
}
