//! Tolerant accessors over loosely-shaped JSON.
//!
//! Every helper returns `Option` and never panics; callers decide the default.

use serde_json::Value;

/// Parse an integer-like JSON value.
///
/// Accepts JSON integers, finite floats (truncated toward zero) and strings
/// holding a base-10 integer with optional surrounding whitespace. Everything
/// else, including `null`, booleans and `"12.5"`, yields `None`.
pub fn parse_int_or_none(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Parse-or-default: missing or malformed values become 0, negatives are kept
pub fn int_or_zero(value: Option<&Value>) -> i64 {
    value.and_then(parse_int_or_none).unwrap_or(0)
}

/// Parse a strictly positive integer, `None` for anything else
pub fn positive_int(value: Option<&Value>) -> Option<u64> {
    value
        .and_then(parse_int_or_none)
        .filter(|n| *n > 0)
        .map(|n| n as u64)
}

/// Return the first field of `fields` on `object` that holds a positive integer
pub fn first_positive_field(object: &Value, fields: &[&str]) -> Option<u64> {
    fields
        .iter()
        .find_map(|field| positive_int(object.get(*field)))
}

/// Walk nested object keys; `None` as soon as a step is missing or not an object
pub fn lookup_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, key| node.get(*key))
}

/// First non-empty string among `languages` on a localized mapping
pub fn localized_text<'a>(map: Option<&'a Value>, languages: &[&str]) -> Option<&'a str> {
    let map = map?;
    languages
        .iter()
        .filter_map(|lang| map.get(*lang).and_then(Value::as_str))
        .find(|text| !text.is_empty())
}

/// Character-based substring; short input is truncated instead of failing
pub fn char_slice(text: &str, start: usize, len: usize) -> String {
    text.chars().skip(start).take(len).collect()
}
