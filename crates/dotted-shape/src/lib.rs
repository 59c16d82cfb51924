//! # dotted-shape
//!
//! Document reshaping for the `dotted` engine: projections that build a
//! derived document from dotted-path rules, structural filters that
//! keep or drop whole subtrees by path, the flatten/expand pair that
//! turns a nested document into a single-level path map and back, and
//! the merge helpers.
//!
//! Functions that build a new document (`project`, `filter`, `flatten`,
//! `expand`, `merged`) never touch their input. Functions that mutate
//! (`merge`, `set_types`, and the re-exported `set`/`remove`) say so in
//! their signatures by taking `&mut Value`.
//!
//! ```rust
//! use dotted_shape::{project, Projection};
//! use serde_json::json;
//!
//! let doc = json!({ "a": 10, "b": "fooo", "d": { "e": 20 } });
//!
//! let picked = project(&doc, &Projection::new().include("a").rename("d.e", "foo"));
//! assert_eq!(picked, json!({ "a": 10, "foo": 20 }));
//! ```

mod flatten;
mod merge;
mod project;
mod structural;

pub use flatten::{expand, flatten, FlattenOptions};
pub use merge::{merge, merged, set_types};
pub use project::{project, Projection, Rule, Transform};
pub use structural::{filter, PathCheck, PathPredicate};

// The path-mutation primitives belong to the same toolbox.
pub use dotted_path::{remove, remove_paths, set, set_with};
