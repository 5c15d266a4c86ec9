use log::debug;

use crate::{
    ast::{
        Column, Expression, MAX_DEPTH, Operand, Operator, RangeBoundary,
        expressions::is_modifiable_clause,
    },
    dsl::document::{Document, Query, RangeBounds},
    joins::JoinFields,
    output,
    value::Value,
};

/// Errors that can occur while lowering an expression to the query DSL.
#[derive(Debug)]
pub enum RenderError {
    /// Operator whose operands have a shape the DSL cannot express
    Unrenderable { op: Operator, reason: String },

    /// Document could not be encoded as JSON
    Json(serde_json::Error),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Unrenderable { op, reason } => write!(f, "Cannot render {}: {}", op, reason),
            RenderError::Json(e) => write!(f, "Cannot encode query document: {}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(e: serde_json::Error) -> Self {
        RenderError::Json(e)
    }
}

fn unrenderable(op: Operator, reason: impl Into<String>) -> RenderError {
    RenderError::Unrenderable {
        op,
        reason: reason.into(),
    }
}

/// Field every bare term is searched in.
pub const ALL_FIELDS: &str = "*";

/// Renders expressions into the Elasticsearch query DSL.
///
/// Children are rendered before their parents. Terms directly under a field
/// clause render as plain text for that clause, bare terms anywhere else
/// become a `query_string` over all fields.
///
/// # Examples
///
/// ```
/// use lucene_dsl::{ElasticDsl, JoinFields};
/// use lucene_dsl::ast::eq;
///
/// let joins = JoinFields::from_iter([("answer.author", "answer")]);
/// let doc = ElasticDsl::new(&joins).render(&eq("answer.author", "sudo")).unwrap();
///
/// let json = serde_json::to_value(&doc).unwrap();
/// assert_eq!(json["query"]["has_child"]["type"], "answer");
/// ```
pub struct ElasticDsl<'a> {
    joins: &'a JoinFields,
}

impl<'a> ElasticDsl<'a> {
    pub fn new(joins: &'a JoinFields) -> Self {
        ElasticDsl { joins }
    }

    /// Lowers `expr` into a document. Trees deeper than [`MAX_DEPTH`] are rejected before lowering starts.
    pub fn render(&self, expr: &Expression) -> Result<Document, RenderError> {
        if expr.depth() > MAX_DEPTH {
            return Err(unrenderable(expr.op, "query nested too deeply"));
        }
        Ok(Document {
            query: self.render_node(expr)?,
        })
    }

    /// Renders to pretty-printed JSON.
    pub fn render_to_string(&self, expr: &Expression) -> Result<String, RenderError> {
        let document = self.render(expr)?;
        Ok(output::to_json_pretty(&document)?)
    }

    fn render_node(&self, expr: &Expression) -> Result<Query, RenderError> {
        match expr.op {
            Operator::And => {
                let (left, right) = binary_operands(expr)?;
                Ok(Query::must(vec![self.render_node(left)?, self.render_node(right)?]))
            }
            Operator::Or => {
                let (left, right) = binary_operands(expr)?;
                Ok(Query::should(vec![self.render_node(left)?, self.render_node(right)?]))
            }
            Operator::Not | Operator::MustNot => {
                let operand = unary_operand(expr)?;
                Ok(Query::must_not(vec![self.render_node(operand)?]))
            }
            Operator::Must => {
                let operand = unary_operand(expr)?;
                Ok(Query::must(vec![self.render_node(operand)?]))
            }
            Operator::Equals => {
                let column = column(expr)?;
                let query = Query::query_string(column.escaped(), self.field_term(expr)?);
                Ok(self.wrap_in_has_child(column, query))
            }
            Operator::Like => {
                let column = column(expr)?;
                Ok(Query::query_string(column.escaped(), self.field_term(expr)?))
            }
            Operator::Range => {
                let column = column(expr)?;
                let Some(Operand::Range(boundary)) = &expr.right else {
                    return Err(unrenderable(expr.op, "right operand is not a range boundary"));
                };
                Ok(Query::range(column.escaped(), range_bounds(boundary)))
            }
            Operator::Greater | Operator::GreaterEq | Operator::Less | Operator::LessEq => {
                let column = column(expr)?;
                // Single-sided bounds always go out as strings, unlike Range.
                let bound = Some(Value::String(self.field_term(expr)?));
                let bounds = match expr.op {
                    Operator::Greater => RangeBounds {
                        gt: bound,
                        ..Default::default()
                    },
                    Operator::GreaterEq => RangeBounds {
                        gte: bound,
                        ..Default::default()
                    },
                    Operator::Less => RangeBounds {
                        lt: bound,
                        ..Default::default()
                    },
                    _ => RangeBounds {
                        lte: bound,
                        ..Default::default()
                    },
                };
                Ok(Query::range(column.escaped(), bounds))
            }
            Operator::In => {
                let column = column(expr)?;
                let items = match expr.right.as_ref().and_then(Operand::as_expr) {
                    Some(Expression {
                        op: Operator::List,
                        left: Operand::List(items),
                        ..
                    }) => items,
                    _ => return Err(unrenderable(expr.op, "right operand is not a list")),
                };
                let field = column.escaped();
                let queries = items
                    .iter()
                    .map(|item| Ok(Query::query_string(field.clone(), self.render_term(item)?)))
                    .collect::<Result<Vec<_>, RenderError>>()?;
                Ok(Query::should(queries))
            }
            Operator::List => Err(unrenderable(expr.op, "a list can only appear inside IN")),
            Operator::Literal | Operator::Wild | Operator::Regexp => {
                Ok(Query::query_string(ALL_FIELDS, self.render_term(expr)?))
            }
            // The suffix is already part of the wrapped term.
            Operator::Boost(_) | Operator::Fuzzy(_) => {
                let operand = unary_operand(expr)?;
                if !operand.is_term() && !is_modifiable_clause(operand) {
                    return Err(unrenderable(
                        expr.op,
                        format!("expected a term or field clause, got {}", operand.op),
                    ));
                }
                self.render_node(operand)
            }
        }
    }

    /// Plain text of a term below a field clause.
    fn render_term(&self, expr: &Expression) -> Result<String, RenderError> {
        match (&expr.op, &expr.left) {
            (op, Operand::Value(value)) if op.is_term() => Ok(value.as_string()),
            (Operator::Boost(_) | Operator::Fuzzy(_), Operand::Expr(inner)) => self.render_term(inner),
            (op, _) => Err(unrenderable(*op, "expected a term")),
        }
    }

    fn field_term(&self, expr: &Expression) -> Result<String, RenderError> {
        match expr.right.as_ref().and_then(Operand::as_expr) {
            Some(term) => self.render_term(term),
            None => Err(unrenderable(expr.op, "missing term on the right")),
        }
    }

    fn wrap_in_has_child(&self, column: &Column, query: Query) -> Query {
        match self.joins.relationship(column.name()) {
            Some(relationship) => {
                debug!("wrapping '{}' in has_child of type '{}'", column.name(), relationship);
                Query::has_child(query, relationship)
            }
            None => query,
        }
    }
}

/// Renders `expr` into a query document, wrapping clauses on joined fields in
/// `has_child`.
pub fn render(expr: &Expression, joins: &JoinFields) -> Result<Document, RenderError> {
    ElasticDsl::new(joins).render(expr)
}

fn range_bounds(boundary: &RangeBoundary) -> RangeBounds {
    let lower = boundary.min.value().cloned();
    let upper = boundary.max.value().cloned();
    if boundary.inclusive {
        RangeBounds {
            gte: lower,
            lte: upper,
            ..Default::default()
        }
    } else {
        RangeBounds {
            gt: lower,
            lt: upper,
            ..Default::default()
        }
    }
}

fn column(expr: &Expression) -> Result<&Column, RenderError> {
    expr.column()
        .ok_or_else(|| unrenderable(expr.op, "left operand is not a column"))
}

fn unary_operand(expr: &Expression) -> Result<&Expression, RenderError> {
    expr.left
        .as_expr()
        .ok_or_else(|| unrenderable(expr.op, "operand is not an expression"))
}

fn binary_operands(expr: &Expression) -> Result<(&Expression, &Expression), RenderError> {
    let left = unary_operand(expr)?;
    let right = expr
        .right
        .as_ref()
        .and_then(Operand::as_expr)
        .ok_or_else(|| unrenderable(expr.op, "right operand is not an expression"))?;
    Ok((left, right))
}
