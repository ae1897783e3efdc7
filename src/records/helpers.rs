use serde_json::{Map, Value};

pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let items: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}={}", key, format_value(value)))
                .collect();
            format!("{{{}}}", items.join(", "))
        }
    }
}

/// The string form a pattern constraint matches against: the raw text for
/// strings, the compact JSON rendering for everything else.
pub(crate) fn text_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Joins a record's keys for the "Existed fields" diagnostic, keeping the
/// stored order.
pub(crate) fn join_keys(item: &Map<String, Value>) -> String {
    item.keys().cloned().collect::<Vec<_>>().join(", ")
}
