//! CLI support for lucene-dsl
//!
//! Provides programmatic access to the compile command so other tools can
//! embed it without shelling out.

mod compile;

pub use compile::{CompileOptions, CompileOutput, execute_compile};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Query did not parse
    Parse(crate::ParseError),
    /// Parsed tree could not be rendered
    Render(crate::RenderError),
    /// Join mapping could not be loaded
    Joins(crate::JoinsError),
    /// IO error
    Io(io::Error),
    /// No query provided
    NoInput,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse(e) => write!(f, "Parse error: {}", e),
            CliError::Render(e) => write!(f, "Render error: {}", e),
            CliError::Joins(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No query provided. Pass it as an argument or pipe it to stdin."),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Parse(e) => Some(e),
            CliError::Render(e) => Some(e),
            CliError::Joins(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::NoInput => None,
        }
    }
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Parse(e)
    }
}

impl From<crate::RenderError> for CliError {
    fn from(e: crate::RenderError) -> Self {
        CliError::Render(e)
    }
}

impl From<crate::JoinsError> for CliError {
    fn from(e: crate::JoinsError) -> Self {
        CliError::Joins(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
