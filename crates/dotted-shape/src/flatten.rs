use serde_json::{Map, Value};

/// Options for [`flatten`].
#[derive(Debug, Clone)]
pub struct FlattenOptions {
    /// Separator between path segments.
    pub delimiter: String,
    /// Prepended to every produced key; the root scalar of a scalar
    /// document is stored under the bare prefix.
    pub prefix: String,
    /// Whether to record `<path>$type` sentinels for containers. With
    /// this off the output cannot be expanded back losslessly.
    pub types: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            delimiter: ".".to_string(),
            prefix: String::new(),
            types: true,
        }
    }
}

fn join(path: &str, key: &str, delimiter: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}{delimiter}{key}")
    }
}

/// Flattens a nested document into a single-level map from dotted path
/// to scalar.
///
/// Every container writes a `<path>$type` sentinel (`"Object"` or
/// `"Array"`) before its children, so [`expand`] can rebuild the right
/// container kind even when it is empty. An object root needs no
/// sentinel; an array root records one under the bare `$type` key.
pub fn flatten(doc: &Value, options: &FlattenOptions) -> Map<String, Value> {
    let mut container = Map::new();
    flatten_into(doc, &options.prefix, options, &mut container);
    container
}

fn flatten_into(value: &Value, path: &str, options: &FlattenOptions, out: &mut Map<String, Value>) {
    match value {
        Value::Object(map) => {
            if options.types && !path.is_empty() {
                out.insert(format!("{path}$type"), Value::String("Object".to_string()));
            }
            for (key, child) in map {
                flatten_into(child, &join(path, key, &options.delimiter), options, out);
            }
        }
        Value::Array(items) => {
            if options.types {
                out.insert(format!("{path}$type"), Value::String("Array".to_string()));
            }
            for (index, child) in items.iter().enumerate() {
                flatten_into(
                    child,
                    &join(path, &index.to_string(), &options.delimiter),
                    options,
                    out,
                );
            }
        }
        scalar => {
            out.insert(path.to_string(), scalar.clone());
        }
    }
}

#[derive(Clone, Copy)]
enum Kind {
    Object,
    Array,
}

fn empty_of(kind: Kind) -> Value {
    match kind {
        Kind::Object => Value::Object(Map::new()),
        Kind::Array => Value::Array(Vec::new()),
    }
}

fn matches_kind(value: &Value, kind: Kind) -> bool {
    match kind {
        Kind::Object => value.is_object(),
        Kind::Array => value.is_array(),
    }
}

/// Rebuilds a nested document from a flattened map.
///
/// Keys are consumed in map order: `<path>$type` keys materialize an
/// empty container of the recorded kind at their path (an existing
/// container of the right kind is left alone), ordinary keys walk and
/// create intermediate containers along the dotted path and place the
/// scalar at the leaf. The bare `""` key is a scalar root and is
/// returned directly; an unrecognized sentinel value is ignored.
pub fn expand(flat: &Map<String, Value>) -> Value {
    if let Some(scalar) = flat.get("") {
        return scalar.clone();
    }

    let mut root = match flat.get("$type").and_then(Value::as_str) {
        Some("Array") => Value::Array(Vec::new()),
        _ => Value::Object(Map::new()),
    };

    for (key, value) in flat {
        if key == "$type" {
            continue;
        }
        if let Some(path) = key.strip_suffix("$type") {
            match value.as_str() {
                Some("Object") => place_container(&mut root, path, Kind::Object),
                Some("Array") => place_container(&mut root, path, Kind::Array),
                _ => {} // unknown sentinel
            }
        } else {
            place_leaf(&mut root, key, value.clone());
        }
    }

    root
}

/// Steps into `part`, creating an empty object when the slot is missing
/// or null. Returns `None` when a scalar stands in the way.
fn step_into<'a>(current: &'a mut Value, part: &str) -> Option<&'a mut Value> {
    let slot = match current {
        Value::Object(map) => map
            .entry(part.to_string())
            .or_insert(Value::Null),
        Value::Array(items) => {
            let index = part.parse::<usize>().ok()?;
            if index >= items.len() {
                items.resize(index + 1, Value::Null);
            }
            &mut items[index]
        }
        _ => return None,
    };

    if slot.is_null() {
        *slot = Value::Object(Map::new());
    }

    if slot.is_object() || slot.is_array() {
        Some(slot)
    } else {
        None
    }
}

fn descend<'a>(mut current: &'a mut Value, parts: &[&str]) -> Option<&'a mut Value> {
    for part in parts {
        current = step_into(current, part)?;
    }
    Some(current)
}

fn place_container(root: &mut Value, path: &str, kind: Kind) {
    let parts: Vec<&str> = path.split('.').collect();
    let Some((last, walk)) = parts.split_last() else {
        return;
    };
    let Some(parent) = descend(root, walk) else {
        return;
    };

    match parent {
        Value::Object(map) => {
            let keep = map.get(*last).map(|v| matches_kind(v, kind)).unwrap_or(false);
            if !keep {
                map.insert((*last).to_string(), empty_of(kind));
            }
        }
        Value::Array(items) => {
            if let Ok(index) = last.parse::<usize>() {
                if index >= items.len() {
                    items.resize(index + 1, Value::Null);
                }
                if !matches_kind(&items[index], kind) {
                    items[index] = empty_of(kind);
                }
            }
        }
        _ => {}
    }
}

fn place_leaf(root: &mut Value, path: &str, value: Value) {
    let parts: Vec<&str> = path.split('.').collect();
    let Some((last, walk)) = parts.split_last() else {
        return;
    };
    let Some(parent) = descend(root, walk) else {
        return;
    };

    match parent {
        Value::Object(map) => {
            map.insert((*last).to_string(), value);
        }
        Value::Array(items) => {
            if let Ok(index) = last.parse::<usize>() {
                if index >= items.len() {
                    items.resize(index + 1, Value::Null);
                }
                items[index] = value;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flat(doc: &Value) -> Map<String, Value> {
        flatten(doc, &FlattenOptions::default())
    }

    #[test]
    fn test_flatten_writes_sentinels_before_leaves() {
        let doc = json!({ "d": { "e": 20 } });
        let out = flat(&doc);
        let keys: Vec<&String> = out.keys().collect();
        assert_eq!(keys, ["d$type", "d.e"]);
        assert_eq!(out["d$type"], json!("Object"));
        assert_eq!(out["d.e"], json!(20));
    }

    #[test]
    fn test_flatten_array() {
        let doc = json!({ "c": [1, 2] });
        let out = flat(&doc);
        assert_eq!(out["c$type"], json!("Array"));
        assert_eq!(out["c.0"], json!(1));
        assert_eq!(out["c.1"], json!(2));
    }

    #[test]
    fn test_flatten_custom_delimiter_and_prefix() {
        let doc = json!({ "a": { "b": 1 } });
        let options = FlattenOptions {
            delimiter: "/".to_string(),
            prefix: "root".to_string(),
            types: false,
        };
        let out = flatten(&doc, &options);
        assert_eq!(out.len(), 1);
        assert_eq!(out["root/a/b"], json!(1));
    }

    #[test]
    fn test_expand_empty_containers() {
        let doc = json!({ "empty_map": {}, "empty_list": [] });
        assert_eq!(expand(&flat(&doc)), doc);
    }

    #[test]
    fn test_expand_scalar_root() {
        assert_eq!(expand(&flat(&json!(5))), json!(5));
    }

    #[test]
    fn test_expand_array_root() {
        assert_eq!(expand(&flat(&json!([1, { "a": 2 }]))), json!([1, { "a": 2 }]));
    }

    #[test]
    fn test_expand_ignores_unknown_sentinel() {
        let mut out = Map::new();
        out.insert("a$type".to_string(), json!("Blob"));
        out.insert("b".to_string(), json!(1));
        assert_eq!(expand(&out), json!({ "b": 1 }));
    }
}
