//! Lowering of query trees into the Elasticsearch query DSL.
//!
//! - **[document]** - Serializable model of the emitted JSON document
//! - **[elastic]** - The renderer, with parent/child join rewriting

pub mod document;
pub mod elastic;

pub use document::{BoolQuery, Document, HasChild, Query, QueryString, RangeBounds};
pub use elastic::{ALL_FIELDS, ElasticDsl, RenderError, render};
