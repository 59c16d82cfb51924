use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use dotted_path::{is_truthy, resolve, size};

/// A caller-supplied test over a full dotted path.
#[derive(Clone)]
pub struct PathPredicate(Arc<dyn Fn(&str) -> bool + Send + Sync>);

impl PathPredicate {
    pub fn new(test: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(test))
    }

    pub fn test(&self, path: &str) -> bool {
        (self.0)(path)
    }
}

impl fmt::Debug for PathPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PathPredicate(..)")
    }
}

/// How [`filter`] decides whether a full dotted path is "named" by the
/// check.
#[derive(Debug, Clone)]
pub enum PathCheck {
    /// Exact-path list.
    Paths(Vec<String>),
    /// Exact-path set, for large checks.
    Set(HashSet<String>),
    /// Regex tested against the full path.
    Pattern(Regex),
    /// Predicate over the full path.
    Predicate(PathPredicate),
    /// A mask document: the path is named when it resolves to a truthy
    /// value inside the mask.
    Mask(Value),
}

impl PathCheck {
    pub fn paths<S: Into<String>>(paths: impl IntoIterator<Item = S>) -> Self {
        PathCheck::Paths(paths.into_iter().map(Into::into).collect())
    }

    pub fn pattern(regex: Regex) -> Self {
        PathCheck::Pattern(regex)
    }

    pub fn predicate(test: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        PathCheck::Predicate(PathPredicate::new(test))
    }

    fn names(&self, path: &str) -> bool {
        match self {
            PathCheck::Paths(paths) => paths.iter().any(|p| p == path),
            PathCheck::Set(paths) => paths.contains(path),
            PathCheck::Pattern(regex) => regex.is_match(path),
            PathCheck::Predicate(test) => test.test(path),
            PathCheck::Mask(mask) => resolve(mask, path).map(is_truthy).unwrap_or(false),
        }
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Builds a copy of `doc` keeping only the subtrees whose paths pass
/// the check (or, with `include` false, only those that do not).
///
/// Every own property is tested by its full dotted path. A property
/// that fails the test is dropped along with its whole subtree; a
/// container that passes is recursed into and kept only if something
/// inside survives. Non-container documents come back unchanged.
pub fn filter(doc: &Value, check: &PathCheck, include: bool) -> Value {
    filter_at(doc, check, include, "")
}

fn filter_at(doc: &Value, check: &PathCheck, include: bool, path: &str) -> Value {
    match doc {
        Value::Object(map) => {
            let mut clone = Map::new();
            for (key, value) in map {
                let full = join(path, key);
                if check.names(&full) != include {
                    continue;
                }
                if let Some(kept) = keep(value, check, include, &full) {
                    clone.insert(key.clone(), kept);
                }
            }
            Value::Object(clone)
        }
        Value::Array(items) => {
            let mut clone = Vec::new();
            for (index, value) in items.iter().enumerate() {
                let full = join(path, &index.to_string());
                if check.names(&full) != include {
                    continue;
                }
                if let Some(kept) = keep(value, check, include, &full) {
                    clone.push(kept);
                }
            }
            Value::Array(clone)
        }
        scalar => scalar.clone(),
    }
}

fn keep(value: &Value, check: &PathCheck, include: bool, path: &str) -> Option<Value> {
    match value {
        Value::Object(_) | Value::Array(_) => {
            let kept = filter_at(value, check, include, path);
            if size(&kept) == 0 { None } else { Some(kept) }
        }
        scalar => Some(scalar.clone()),
    }
}
