//! JSON encoding of query documents and trees.
//!
//! Thin wrappers over `serde_json` so every caller encodes the same way.
//! Struct fields come out in declaration order and absent clauses are
//! omitted, so output is deterministic for a given tree.
//!
//! # Examples
//!
//! ```
//! use lucene_dsl::output::{to_json, to_json_pretty};
//! use lucene_dsl::{JoinFields, ast::eq, render};
//!
//! let doc = render(&eq("a", 5), &JoinFields::new()).unwrap();
//!
//! assert_eq!(
//!     to_json(&doc).unwrap(),
//!     r#"{"query":{"query_string":{"fields":["a"],"lenient":true,"query":"5"}}}"#
//! );
//! assert!(to_json_pretty(&doc).unwrap().starts_with("{\n  \"query\": {"));
//! ```

use serde::Serialize;

/// Compact JSON with no extra whitespace.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Pretty JSON with 2-space indentation, one member per line.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
