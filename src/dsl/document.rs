//! Query document model of the Elasticsearch query DSL subset we emit.
//!
//! Serializes to the engine's JSON shape: every [`Query`] is a single-key
//! object naming the query type, absent clauses and bounds are omitted.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::value::Value;

/// Top-level search body: `{"query": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub query: Query,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Query {
    /// `{"query_string": {"fields": [...], "lenient": true, "query": "..."}}`
    QueryString(QueryString),
    /// `{"bool": {"must": [...], ...}}`
    Bool(BoolQuery),
    /// `{"range": {"field": {"gte": ..., "lt": ...}}}`
    Range(BTreeMap<String, RangeBounds>),
    /// `{"has_child": {"query": ..., "type": "..."}}`
    HasChild(HasChild),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryString {
    pub fields: Vec<String>,
    pub lenient: bool,
    pub query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoolQuery {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<Query>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<Query>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<Query>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must_not: Vec<Query>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RangeBounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HasChild {
    pub query: Box<Query>,
    #[serde(rename = "type")]
    pub relationship: String,
}

impl Query {
    /// Lenient free-text query over a single field.
    pub fn query_string(field: impl Into<String>, query: impl Into<String>) -> Self {
        Query::QueryString(QueryString {
            fields: vec![field.into()],
            lenient: true,
            query: query.into(),
        })
    }

    pub fn must(clauses: Vec<Query>) -> Self {
        Query::Bool(BoolQuery {
            must: clauses,
            ..Default::default()
        })
    }

    pub fn should(clauses: Vec<Query>) -> Self {
        Query::Bool(BoolQuery {
            should: clauses,
            ..Default::default()
        })
    }

    pub fn must_not(clauses: Vec<Query>) -> Self {
        Query::Bool(BoolQuery {
            must_not: clauses,
            ..Default::default()
        })
    }

    pub fn range(field: impl Into<String>, bounds: RangeBounds) -> Self {
        Query::Range(BTreeMap::from([(field.into(), bounds)]))
    }

    pub fn has_child(query: Query, relationship: impl Into<String>) -> Self {
        Query::HasChild(HasChild {
            query: Box::new(query),
            relationship: relationship.into(),
        })
    }
}
