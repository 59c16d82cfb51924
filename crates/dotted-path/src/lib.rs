//! # dotted-path
//!
//! Dotted-path addressing for nested in-memory documents.
//!
//! ## Overview
//!
//! This crate provides the foundational path layer of the `dotted` engine:
//!
//! - **Segments**: a path string is divided into an ordered list of
//!   [`Segment`]s, with `name[index]` array syntax recognized
//! - **Resolution**: [`resolve`] and [`resolves`] walk a
//!   [`serde_json::Value`] along a divided path
//! - **Mutation**: [`set`] and [`remove`] write into a document,
//!   creating or pruning intermediate containers
//!
//! ## Architecture
//!
//! ```text
//! "users[0].address.city"
//!     ↓
//! divide_path
//!     ↓
//! [Key("users"), Index(0), Key("address"), Key("city")]
//!     ↓
//! resolve / resolves / set / remove
//! ```
//!
//! ## Example
//!
//! ```rust
//! use dotted_path::{resolve, resolves, set};
//! use serde_json::json;
//!
//! let mut doc = json!({ "c": [1, 2, 3] });
//!
//! assert_eq!(resolve(&doc, "c[1]"), Some(&json!(2)));
//! assert!(resolves(&doc, "c[0]"));
//!
//! set(&mut doc, "d.e", json!(20));
//! assert_eq!(resolve(&doc, "d.e"), Some(&json!(20)));
//! ```
//!
//! ## Missing versus falsy
//!
//! Resolution reports a missing location as `None` and stops early on a
//! falsy intermediate (`null`, `false`, `0`, `""`), returning that falsy
//! value. A caller therefore cannot distinguish "absent" from "present
//! but falsy" through [`resolves`] alone. This is a documented property
//! of the engine, not an accident; see the function-level docs.

pub mod segment;

mod mutate;
mod resolve;

pub use mutate::{remove, remove_paths, set, set_with};
pub use resolve::{is_truthy, resolve, resolve_with, resolves, resolves_with, size};
pub use segment::{Segment, Segments, divide_path};
