//! Compile a query string into a query document

use log::debug;

use super::CliError;
use crate::{Document, ElasticDsl, JoinFields, output, parse};

/// Options for the compile command
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// The Lucene query
    pub query: String,
    /// Join mapping as a JSON object
    pub joins: Option<String>,
    /// Path to a file holding the join mapping; wins over `joins`
    pub joins_file: Option<String>,
    /// Pretty-print the document
    pub pretty: bool,
}

/// Rendered document plus the intermediate forms shown as a trace
#[derive(Debug)]
pub struct CompileOutput {
    pub document: Document,
    /// The document encoded as requested
    pub json: String,
    /// Tree rendered back into query syntax
    pub parsed: String,
    /// Debug dump of the tree
    pub verbose: String,
    /// Tree as JSON
    pub ast_json: String,
}

impl CompileOptions {
    fn join_fields(&self) -> Result<JoinFields, CliError> {
        let joins = match (&self.joins_file, &self.joins) {
            (Some(path), _) => JoinFields::from_file(path)?,
            (None, Some(json)) if !json.trim().is_empty() => JoinFields::from_json(json)?,
            _ => JoinFields::new(),
        };
        if joins.is_empty() {
            debug!("no join fields, has_child rewrite disabled");
        } else {
            debug!("loaded {} join field(s)", joins.len());
        }
        Ok(joins)
    }
}

/// Execute a compile operation
pub fn execute_compile(options: &CompileOptions) -> Result<CompileOutput, CliError> {
    if options.query.trim().is_empty() {
        return Err(CliError::NoInput);
    }

    let joins = options.join_fields()?;
    let expr = parse(&options.query)?;
    let document = ElasticDsl::new(&joins).render(&expr)?;

    let encoded = if options.pretty {
        output::to_json_pretty(&document)
    } else {
        output::to_json(&document)
    };
    let json = encoded.map_err(crate::RenderError::Json)?;
    let ast_json = output::to_json_pretty(&expr).map_err(crate::RenderError::Json)?;

    Ok(CompileOutput {
        document,
        json,
        parsed: expr.to_string(),
        verbose: format!("{:#?}", expr),
        ast_json,
    })
}
