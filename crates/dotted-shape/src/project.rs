use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use dotted_path::{is_truthy, remove, resolve, set};

/// A value transform attached to a projection entry. Receives the
/// resolved value, or `None` when the path does not resolve.
#[derive(Clone)]
pub struct Transform(Arc<dyn Fn(Option<&Value>) -> Value + Send + Sync>);

impl Transform {
    pub fn new(apply: impl Fn(Option<&Value>) -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(apply))
    }

    pub fn apply(&self, value: Option<&Value>) -> Value {
        (self.0)(value)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}

/// What a projection entry does with its path.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Keep the resolved value at the same path.
    Include,
    /// Drop the path. Only meaningful when every entry is an exclusion,
    /// which flips the whole projection into exclusion mode.
    Exclude,
    /// Keep the resolved value under a different path.
    Rename(String),
    /// Keep the transformed value at the same path.
    Map(Transform),
}

/// An ordered projection spec.
///
/// The mode is global: a projection with no truthy entry (nothing but
/// `Exclude`) is an exclusion list applied to a deep clone; any truthy
/// entry makes it an inclusion spec built from an empty document, and
/// `Exclude` entries are then ignored.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    entries: Vec<(String, Rule)>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include(mut self, path: impl Into<String>) -> Self {
        self.entries.push((path.into(), Rule::Include));
        self
    }

    pub fn exclude(mut self, path: impl Into<String>) -> Self {
        self.entries.push((path.into(), Rule::Exclude));
        self
    }

    pub fn rename(mut self, path: impl Into<String>, to: impl Into<String>) -> Self {
        self.entries.push((path.into(), Rule::Rename(to.into())));
        self
    }

    pub fn map(
        mut self,
        path: impl Into<String>,
        apply: impl Fn(Option<&Value>) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.entries
            .push((path.into(), Rule::Map(Transform::new(apply))));
        self
    }

    /// Builds a projection from a JSON-shaped spec: a falsy entry
    /// value excludes, a string renames, anything else truthy includes.
    pub fn parse(spec: &Value) -> Projection {
        let mut projection = Projection::new();
        let Value::Object(map) = spec else {
            return projection;
        };

        for (path, rule) in map {
            projection = match rule {
                value if !is_truthy(value) => projection.exclude(path.clone()),
                Value::String(to) => projection.rename(path.clone(), to.clone()),
                _ => projection.include(path.clone()),
            };
        }

        projection
    }

    /// Whether this projection is an exclusion list (no truthy entry).
    pub fn is_exclusion(&self) -> bool {
        self.entries
            .iter()
            .all(|(_, rule)| matches!(rule, Rule::Exclude))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds a new document from `doc` according to the projection.
///
/// Non-object documents are returned unchanged. In exclusion mode the
/// result is a deep clone with every listed path removed (pruning
/// containers the removal empties). In inclusion mode paths that do not
/// resolve are skipped, except for `Map` entries, whose transform
/// always runs and always places its result.
pub fn project(doc: &Value, spec: &Projection) -> Value {
    if !doc.is_object() {
        return doc.clone();
    }

    if spec.is_exclusion() {
        let mut clone = doc.clone();
        for (path, _) in &spec.entries {
            let _ = remove(&mut clone, path, true);
        }
        return clone;
    }

    let mut result = Value::Object(Map::new());
    for (path, rule) in &spec.entries {
        match rule {
            Rule::Exclude => {}
            Rule::Include => {
                if let Some(value) = resolve(doc, path).cloned() {
                    set(&mut result, path, value);
                }
            }
            Rule::Rename(to) => {
                if let Some(value) = resolve(doc, path).cloned() {
                    set(&mut result, to, value);
                }
            }
            Rule::Map(transform) => {
                let value = transform.apply(resolve(doc, path));
                set(&mut result, path, value);
            }
        }
    }
    result
}
