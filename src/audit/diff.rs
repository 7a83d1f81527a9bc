//! Diff generation for audit logging
//!
//! Summarises which top-level fields changed between two record snapshots.

use serde_json::Value;

/// Longest string value shown in a diff before truncation
const MAX_SHOWN_CHARS: usize = 50;

/// Generate a human-readable diff between two snapshots of the same record
///
/// Only top-level fields whose values differ are listed, in the order they
/// appear in `before`. Snapshots that are not JSON objects have no diff.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return None;
    };

    let changes: Vec<String> = before_obj
        .iter()
        .filter_map(|(key, before_val)| {
            let after_val = after_obj.get(key)?;
            (before_val != after_val).then(|| {
                format!(
                    "{}: {} -> {}",
                    key,
                    format_value(before_val),
                    format_value(after_val)
                )
            })
        })
        .collect();

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

/// Format a JSON value for human-readable display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > MAX_SHOWN_CHARS {
                let head: String = s.chars().take(MAX_SHOWN_CHARS - 3).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
