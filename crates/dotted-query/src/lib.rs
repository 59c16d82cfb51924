//! # dotted-query
//!
//! A declarative, Mongo-flavored predicate language over nested
//! documents.
//!
//! A [`Filter`] is an in-memory tree, not a parsed text format: clauses
//! keyed by `$`-operators apply to the value under test, plain keys are
//! dotted paths resolved through `dotted-path`, and nested objects
//! recurse as sub-filters. [`query`] walks the tree and reports whether
//! a document satisfies every clause.
//!
//! ```rust
//! use dotted_query::{query, Filter};
//! use serde_json::json;
//!
//! let doc = json!({ "a": 10, "d": { "e": 20 } });
//!
//! let filter = Filter::parse(&json!({ "a": { "$gt": 5, "$lt": 25 } }));
//! assert!(query(&doc, &filter));
//!
//! let filter = Filter::parse(&json!({ "d.e": 20 }));
//! assert!(query(&doc, &filter));
//! ```
//!
//! Evaluation never fails: malformed operands simply do not match, and
//! missing paths behave as an absent value rather than an error.

mod eval;
mod filter;
mod parse;

pub use eval::query;
pub use filter::{Clause, Expect, Filter, Match, Operator, Predicate};
