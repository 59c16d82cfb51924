use serde_json::Value;

/// Recursively merges `source` into `target`, in place.
///
/// Object values merge key by key; arrays and scalars from `source`
/// overwrite whatever `target` holds. Mismatched shapes resolve in
/// favor of `source`.
pub fn merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, value) in source_map {
                match target_map.get_mut(key) {
                    Some(slot) if slot.is_object() && value.is_object() => merge(slot, value),
                    _ => {
                        target_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, source) => {
            *target = source.clone();
        }
    }
}

/// Non-mutating [`merge`]: clones `base` and merges `overlay` into the
/// clone.
pub fn merged(base: &Value, overlay: &Value) -> Value {
    let mut result = base.clone();
    merge(&mut result, overlay);
    result
}

/// Shallow type coercion over an object's string values: strings that
/// round-trip as integers become integers, as floats become floats,
/// and the words `"true"`/`"false"` become booleans. Everything else
/// is left alone.
pub fn set_types(doc: &mut Value) {
    let Value::Object(map) = doc else {
        return;
    };

    for value in map.values_mut() {
        let Value::String(text) = value else {
            continue;
        };

        if let Ok(number) = text.parse::<i64>() {
            if number.to_string() == *text {
                *value = Value::from(number);
                continue;
            }
        }
        if let Ok(number) = text.parse::<f64>() {
            if number.is_finite() && number.to_string() == *text {
                *value = Value::from(number);
                continue;
            }
        }
        if text == "true" {
            *value = Value::Bool(true);
        } else if text == "false" {
            *value = Value::Bool(false);
        }
    }
}
