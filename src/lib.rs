pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod dsl;
pub mod joins;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod value;

pub use ast::{ExprError, Expression, Operator, Token};
pub use dsl::{Document, ElasticDsl, Query, RenderError, render};
pub use joins::{JoinFields, JoinsError};
pub use lexer::{LexError, Lexer, Position};
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseError, Parser, parse};
pub use pipeline::{CompileError, compile, tokenize};
pub use value::Value;
