//! Parent/child join configuration.
//!
//! Maps a child-document field to the relationship type it belongs to, e.g.
//! `answer.author -> answer`. Clauses on mapped fields are wrapped in a
//! `has_child` query by the renderer. An empty map disables the rewrite.

use std::{collections::HashMap, fs, io, path::Path};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoinFields(HashMap<String, String>);

/// Errors loading a join mapping.
#[derive(Debug)]
pub enum JoinsError {
    /// Mapping is not a JSON object of strings
    Json(serde_json::Error),
    /// Mapping file could not be read
    Io(io::Error),
}

impl std::fmt::Display for JoinsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinsError::Json(e) => write!(
                f,
                "Invalid join fields JSON: {}\nexample: {{\"answer.author\": \"answer\"}}",
                e
            ),
            JoinsError::Io(e) => write!(f, "Cannot read join fields: {}", e),
        }
    }
}

impl std::error::Error for JoinsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JoinsError::Json(e) => Some(e),
            JoinsError::Io(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for JoinsError {
    fn from(e: serde_json::Error) -> Self {
        JoinsError::Json(e)
    }
}

impl From<io::Error> for JoinsError {
    fn from(e: io::Error) -> Self {
        JoinsError::Io(e)
    }
}

impl JoinFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `{"field": "relationship", ...}`.
    ///
    /// ```
    /// use lucene_dsl::JoinFields;
    ///
    /// let joins = JoinFields::from_json(r#"{"answer.author": "answer"}"#).unwrap();
    /// assert_eq!(joins.relationship("answer.author"), Some("answer"));
    /// assert_eq!(joins.relationship("question.text"), None);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, JoinsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, JoinsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Relationship type of a child field, if it is mapped.
    pub fn relationship(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for JoinFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        JoinFields(
            iter.into_iter()
                .map(|(field, relationship)| (field.into(), relationship.into()))
                .collect(),
        )
    }
}
