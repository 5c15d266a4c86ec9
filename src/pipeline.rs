//! One-call compilation from query string to query document.

use log::debug;

use crate::{
    ast::Token,
    dsl::{Document, RenderError, render},
    joins::JoinFields,
    lexer::{LexError, Lexer, Position},
    parser::{ParseError, parse},
};

/// Failure anywhere between the query string and the finished document.
#[derive(Debug)]
pub enum CompileError {
    Parse(ParseError),
    Render(RenderError),
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Parse(e) => write!(f, "Parse error: {}", e),
            CompileError::Render(e) => write!(f, "Render error: {}", e),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Parse(e) => Some(e),
            CompileError::Render(e) => Some(e),
        }
    }
}

impl From<ParseError> for CompileError {
    fn from(e: ParseError) -> Self {
        CompileError::Parse(e)
    }
}

impl From<RenderError> for CompileError {
    fn from(e: RenderError) -> Self {
        CompileError::Render(e)
    }
}

/// Parses `query` and renders it against `joins`.
///
/// ```
/// use lucene_dsl::{JoinFields, compile};
///
/// let doc = compile("a:[1 TO 5}", &JoinFields::new()).unwrap();
/// let json = serde_json::to_value(&doc).unwrap();
/// assert_eq!(json["query"]["range"]["a"]["gte"], 1);
/// ```
pub fn compile(query: &str, joins: &JoinFields) -> Result<Document, CompileError> {
    let expr = parse(query)?;
    debug!("parsed query: {}", expr);
    Ok(render(&expr, joins)?)
}

/// Splits `query` into tokens with their starting offsets, `Eof` last.
pub fn tokenize(query: &str) -> Result<Vec<(Token, Position)>, LexError> {
    Lexer::new(query).tokenize()
}
