// Utility helpers for coercing loosely-typed JSON fields.
//
// The extraction pipeline emits JSON whose field types are not always
// reliable; this module centralizes the "dirty" value handling so the rest
// of the code can assume clean, typed values.
use crate::types::KpiValue;
use num_format::{Locale, ToFormattedString};
use serde_json::Value;

/// Coerce an optional JSON value into display text.
///
/// - Accepts `Option<&Value>` so callers can pass through optional fields.
/// - Strings are trimmed; an empty string counts as absent.
/// - Numbers and booleans are rendered as text.
/// - Arrays, objects and null are treated as absent.
pub fn string_from_value(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a reporting year from either a JSON integer or an
/// integer-formatted string.
pub fn year_from_value(v: Option<&Value>) -> Option<i32> {
    match v? {
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}

/// Coerce the required `value` field into its number-or-text scalar form.
pub fn kpi_value_from_value(v: Option<&Value>) -> Option<KpiValue> {
    match v? {
        Value::Number(n) => n.as_f64().map(KpiValue::Number),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(KpiValue::Text(s.to_string()))
            }
        }
        Value::Bool(b) => Some(KpiValue::Text(b.to_string())),
        _ => None,
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values. This is used
    // for counts in console messages (e.g., `1,204 records loaded`).
    n.to_formatted_string(&Locale::en)
}
