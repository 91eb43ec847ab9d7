use serde_json::{Number, Value};

/// Infer the most plausible value for user-typed text. Total: anything that
/// is not a recognized boolean, null, number or `{...}`/`[...]` literal comes
/// back as the original string.
///
/// Attempt order matters: `42` must become an integer before the float parse
/// sees it, and `3.5` a float before the JSON fallback would reject it.
pub fn smart_cast(raw: &str) -> Value {
    let text = raw.trim();

    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => return Value::Bool(true),
        "false" | "no" | "off" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }

    if let Ok(n) = text.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(f) = text.parse::<f64>()
        && let Some(n) = Number::from_f64(f)
    {
        return Value::Number(n);
    }

    if text.starts_with('{') || text.starts_with('[') {
        if let Ok(v @ (Value::Object(_) | Value::Array(_))) = serde_json::from_str(text) {
            return v;
        }
    }

    Value::String(raw.to_string())
}
