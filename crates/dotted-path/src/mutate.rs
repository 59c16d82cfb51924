use serde_json::{Map, Value};

use crate::resolve::{is_truthy, size};
use crate::segment::{Segment, divide_path};

fn empty_container(next_is_index: bool) -> Value {
    if next_is_index {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

fn step_mut<'a>(current: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match current {
        Value::Object(map) => match segment {
            Segment::Key(key) => map.get_mut(key),
            Segment::Index(index) => map.get_mut(&index.to_string()),
        },
        Value::Array(items) => {
            let index = match segment {
                Segment::Index(index) => *index,
                Segment::Key(key) => key.parse::<usize>().ok()?,
            };
            items.get_mut(index)
        }
        _ => None,
    }
}

fn step_or_create<'a>(
    current: &'a mut Value,
    segment: &Segment,
    next_is_index: bool,
) -> Option<&'a mut Value> {
    let slot = match current {
        Value::Object(map) => {
            let key = match segment {
                Segment::Key(key) => key.clone(),
                Segment::Index(index) => index.to_string(),
            };
            map.entry(key).or_insert(Value::Null)
        }
        Value::Array(items) => {
            let index = match segment {
                Segment::Index(index) => *index,
                Segment::Key(key) => key.parse::<usize>().ok()?,
            };
            if index >= items.len() {
                items.resize(index + 1, Value::Null);
            }
            &mut items[index]
        }
        _ => return None,
    };

    if slot.is_null() {
        *slot = empty_container(next_is_index);
    }

    if slot.is_object() || slot.is_array() {
        Some(slot)
    } else {
        None
    }
}

fn place(container: &mut Value, segment: &Segment, value: Value) -> bool {
    match container {
        Value::Object(map) => {
            let key = match segment {
                Segment::Key(key) => key.clone(),
                Segment::Index(index) => index.to_string(),
            };
            map.insert(key, value);
            true
        }
        Value::Array(items) => {
            let index = match segment {
                Segment::Index(index) => *index,
                Segment::Key(key) => match key.parse::<usize>() {
                    Ok(index) => index,
                    Err(_) => return false,
                },
            };
            if index >= items.len() {
                items.resize(index + 1, Value::Null);
            }
            items[index] = value;
            true
        }
        _ => false,
    }
}

/// Assigns `value` at a dotted path, `.`-delimited, creating missing
/// intermediate containers along the way.
///
/// A missing (or null) position gets an empty object, or an empty array
/// when the following segment is an index. Returns `false` for an empty
/// path, a non-container document, or a scalar sitting where a
/// container is needed; the document is left as far along as the walk
/// got.
pub fn set(doc: &mut Value, path: &str, value: Value) -> bool {
    set_with(doc, path, value, ".")
}

/// [`set`] with an explicit delimiter.
pub fn set_with(doc: &mut Value, path: &str, value: Value, delimiter: &str) -> bool {
    let path = path.trim();
    if path.is_empty() || !(doc.is_object() || doc.is_array()) {
        return false;
    }

    let segments = divide_path(path, delimiter);
    let Some((last, walk)) = segments.split_last() else {
        return false;
    };

    let mut current = doc;
    for (position, segment) in walk.iter().enumerate() {
        let next = walk.get(position + 1).unwrap_or(last);
        current = match step_or_create(current, segment, next.is_index()) {
            Some(next) => next,
            None => return false,
        };
    }

    place(current, last, value)
}

fn descend_mut<'a>(mut current: &'a mut Value, segments: &[Segment]) -> Option<&'a mut Value> {
    for segment in segments {
        let next = step_mut(current, segment)?;
        if !is_truthy(next) {
            return None;
        }
        current = next;
    }
    Some(current)
}

fn remove_at(container: &mut Value, segment: &Segment) {
    match container {
        Value::Object(map) => {
            match segment {
                Segment::Key(key) => map.shift_remove(key),
                Segment::Index(index) => map.shift_remove(&index.to_string()),
            };
        }
        Value::Array(items) => {
            let index = match segment {
                Segment::Index(index) => Some(*index),
                Segment::Key(key) => key.parse::<usize>().ok(),
            };
            if let Some(index) = index {
                if index < items.len() {
                    items.remove(index);
                }
            }
        }
        _ => {}
    }
}

/// Removes the value at a dotted path, `.`-delimited.
///
/// Returns `false` when any intermediate segment is missing or falsy.
/// Removing an array position shifts the elements after it. When
/// `prune_empty` is set and the immediate parent container ends up
/// empty, the parent itself is removed from its own parent; pruning is
/// a single level, not the whole chain.
pub fn remove(doc: &mut Value, path: &str, prune_empty: bool) -> bool {
    let segments = divide_path(path, ".");
    let Some((last, walk)) = segments.split_last() else {
        return false;
    };

    if walk.is_empty() {
        // Top-level key: nothing above it to prune.
        remove_at(doc, last);
        return true;
    }

    let Some((parent_segment, grand_walk)) = walk.split_last() else {
        return false;
    };

    let Some(grandparent) = descend_mut(doc, grand_walk) else {
        return false;
    };
    let parent = match step_mut(grandparent, parent_segment) {
        Some(parent) if is_truthy(parent) => parent,
        _ => return false,
    };

    remove_at(parent, last);

    if prune_empty && size(parent) == 0 {
        remove_at(grandparent, parent_segment);
    }

    true
}

/// Applies [`remove`] to every path in turn. Individual results are
/// not collected; the call reports `true` once the loop completes.
pub fn remove_paths<S: AsRef<str>>(doc: &mut Value, paths: &[S], prune_empty: bool) -> bool {
    for path in paths {
        let _ = remove(doc, path.as_ref(), prune_empty);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;
    use serde_json::json;

    #[test]
    fn test_set_nested_path() {
        let mut doc = json!({});
        assert!(set(&mut doc, "a.b.c", json!(1)));
        assert_eq!(doc, json!({ "a": { "b": { "c": 1 } } }));
    }

    #[test]
    fn test_set_creates_array_for_index_segment() {
        let mut doc = json!({});
        assert!(set(&mut doc, "a[0].b", json!("x")));
        assert_eq!(doc, json!({ "a": [ { "b": "x" } ] }));
    }

    #[test]
    fn test_set_pads_array_with_nulls() {
        let mut doc = json!({ "a": [1] });
        assert!(set(&mut doc, "a[3]", json!(4)));
        assert_eq!(doc, json!({ "a": [1, null, null, 4] }));
    }

    #[test]
    fn test_set_rejects_scalar_in_the_way() {
        let mut doc = json!({ "a": 5 });
        assert!(!set(&mut doc, "a.b", json!(1)));
        assert_eq!(doc, json!({ "a": 5 }));
    }

    #[test]
    fn test_set_then_resolve() {
        let mut doc = json!({});
        assert!(set(&mut doc, "x.y", json!(42)));
        assert_eq!(resolve(&doc, "x.y"), Some(&json!(42)));
    }

    #[test]
    fn test_remove_leaf() {
        let mut doc = json!({ "a": 1, "b": 2 });
        assert!(remove(&mut doc, "a", false));
        assert_eq!(doc, json!({ "b": 2 }));
    }

    #[test]
    fn test_remove_prunes_emptied_parent() {
        let mut doc = json!({ "a": 1, "d": { "e": 20 } });
        assert!(remove(&mut doc, "d.e", true));
        assert_eq!(doc, json!({ "a": 1 }));
    }

    #[test]
    fn test_remove_without_prune_keeps_empty_parent() {
        let mut doc = json!({ "d": { "e": 20 } });
        assert!(remove(&mut doc, "d.e", false));
        assert_eq!(doc, json!({ "d": {} }));
    }

    #[test]
    fn test_remove_prune_is_single_level() {
        let mut doc = json!({ "a": { "b": { "c": 1 } } });
        assert!(remove(&mut doc, "a.b.c", true));
        // b is pruned from a, but the now-empty a stays.
        assert_eq!(doc, json!({ "a": {} }));
    }

    #[test]
    fn test_remove_missing_intermediate() {
        let mut doc = json!({ "a": 1 });
        assert!(!remove(&mut doc, "x.y", false));
    }

    #[test]
    fn test_remove_array_index_shifts() {
        let mut doc = json!({ "c": [1, 2, 3] });
        assert!(remove(&mut doc, "c[1]", false));
        assert_eq!(doc, json!({ "c": [1, 3] }));
    }

    #[test]
    fn test_remove_paths() {
        let mut doc = json!({ "a": 1, "b": 2, "c": 3 });
        assert!(remove_paths(&mut doc, &["a", "c", "missing.path"], false));
        assert_eq!(doc, json!({ "b": 2 }));
    }
}
