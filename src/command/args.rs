// src/command/args.rs

//! Formatting of ad-hoc module arguments into the single string passed after
//! `-a`. The external program re-parses that string itself.

use serde_json::{Map, Value};

/// Join the freeform argument and the structured `key=value` pairs into one
/// space-separated string.
///
/// The freeform argument always comes first; structured pairs follow in
/// insertion order. Returns `None` when there is nothing to pass, so the
/// caller can leave out `-a` entirely.
pub fn format_module_args(args: &Map<String, Value>, freeform: Option<&str>) -> Option<String> {
    let mut segments: Vec<String> = Vec::with_capacity(args.len() + 1);

    if let Some(freeform) = freeform.filter(|f| !f.is_empty()) {
        segments.push(freeform.to_string());
    }

    for (key, value) in args {
        segments.push(format!("{key}={}", plain_value(value)));
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments.join(" "))
    }
}

/// Strings are emitted unquoted; everything else uses its compact JSON form.
fn plain_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
