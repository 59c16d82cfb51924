use serde_json::Value;

use crate::segment::{Segment, divide_path};

/// Truthiness in the engine's sense: `null`, `false`, `0` and the empty
/// string are falsy; every array and object is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Number of entries in a container: object key count, array length,
/// zero for anything else.
pub fn size(value: &Value) -> usize {
    match value {
        Value::Object(map) => map.len(),
        Value::Array(items) => items.len(),
        _ => 0,
    }
}

fn step<'a>(current: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match (current, segment) {
        (Value::Object(map), Segment::Key(key)) => map.get(key),
        (Value::Object(map), Segment::Index(index)) => map.get(&index.to_string()),
        (Value::Array(items), Segment::Index(index)) => items.get(*index),
        (Value::Array(items), Segment::Key(key)) => {
            key.parse::<usize>().ok().and_then(|index| items.get(index))
        }
        _ => None,
    }
}

/// Resolves a dotted path against a document, `.`-delimited.
///
/// Returns `None` when the document or path is empty, or when a segment
/// is missing. A falsy intermediate (`null`, `false`, `0`, `""`) stops
/// the walk early and is returned as-is, so a caller cannot tell
/// "absent" apart from "present but falsy" partway down a path. That
/// ambiguity is part of the contract; see the crate docs.
pub fn resolve<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    resolve_with(doc, path, ".")
}

/// [`resolve`] with an explicit delimiter.
pub fn resolve_with<'a>(doc: &'a Value, path: &str, delimiter: &str) -> Option<&'a Value> {
    let path = path.trim();
    if !is_truthy(doc) || path.is_empty() {
        return None;
    }

    let mut current = doc;
    for segment in &divide_path(path, delimiter) {
        current = step(current, segment)?;
        if !is_truthy(current) {
            return Some(current);
        }
    }

    Some(current)
}

/// Whether a dotted path fully resolves to a truthy value.
///
/// `false` the moment any step is missing or falsy, `true` once the
/// walk completes.
pub fn resolves(doc: &Value, path: &str) -> bool {
    resolves_with(doc, path, ".")
}

/// [`resolves`] with an explicit delimiter.
pub fn resolves_with(doc: &Value, path: &str, delimiter: &str) -> bool {
    let path = path.trim();
    if !is_truthy(doc) || path.is_empty() {
        return false;
    }

    let mut current = doc;
    for segment in &divide_path(path, delimiter) {
        match step(current, segment) {
            Some(next) if is_truthy(next) => current = next,
            _ => return false,
        }
    }

    true
}
