//! Construction helpers for hand-built query trees.
//!
//! The helpers whose signatures only admit well-formed shapes return an
//! [`Expression`] directly. The ones that take arbitrary sub-expressions
//! (`list`, `in_list`, `boost`, `fuzzy`) validate them and return
//! [`ExprError`] instead of building a node the renderer cannot lower.
//!
//! ```
//! use lucene_dsl::ast::{boost, eq, in_list, list, lit, or};
//!
//! let tags = in_list("tag", list(vec![lit("rust"), lit("go")])?)?;
//! let title = boost(eq("title", "elastic"), 2.0)?;
//! assert_eq!(or(tags, title).to_string(), "tag:(rust OR go) OR title:elastic^2.000000");
//! # Ok::<(), lucene_dsl::ast::ExprError>(())
//! ```

use crate::{
    ast::{
        Bound, Column, ExprError, Expression, Operand, Operator, RangeBoundary,
        expressions::is_modifiable_clause,
    },
    value::Value,
};

pub const DEFAULT_BOOST: f32 = 1.0;
pub const DEFAULT_FUZZY_DISTANCE: u32 = 1;

fn field_clause(op: Operator, field: impl Into<Column>, term: Expression) -> Expression {
    Expression::binary(op, Operand::Column(field.into()), term.into())
}

/// `field:value`
pub fn eq(field: impl Into<Column>, value: impl Into<Value>) -> Expression {
    field_clause(Operator::Equals, field, lit(value))
}

/// Free-text match of `value` on `field`, never join-wrapped.
pub fn like(field: impl Into<Column>, value: impl Into<Value>) -> Expression {
    field_clause(Operator::Like, field, lit(value))
}

/// `field:[min TO max]` when inclusive, `field:{min TO max}` otherwise.
pub fn range(
    field: impl Into<Column>,
    min: impl Into<Bound>,
    max: impl Into<Bound>,
    inclusive: bool,
) -> Expression {
    Expression::binary(
        Operator::Range,
        Operand::Column(field.into()),
        Operand::Range(RangeBoundary {
            min: min.into(),
            max: max.into(),
            inclusive,
        }),
    )
}

/// `field:>value`
pub fn greater(field: impl Into<Column>, value: impl Into<Value>) -> Expression {
    field_clause(Operator::Greater, field, lit(value))
}

/// `field:>=value`
pub fn greater_eq(field: impl Into<Column>, value: impl Into<Value>) -> Expression {
    field_clause(Operator::GreaterEq, field, lit(value))
}

/// `field:<value`
pub fn less(field: impl Into<Column>, value: impl Into<Value>) -> Expression {
    field_clause(Operator::Less, field, lit(value))
}

/// `field:<=value`
pub fn less_eq(field: impl Into<Column>, value: impl Into<Value>) -> Expression {
    field_clause(Operator::LessEq, field, lit(value))
}

pub fn and(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    Expression::binary(Operator::And, left.into().into(), right.into().into())
}

pub fn or(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    Expression::binary(Operator::Or, left.into().into(), right.into().into())
}

pub fn not(operand: impl Into<Expression>) -> Expression {
    Expression::unary(Operator::Not, operand.into())
}

/// `+clause`
pub fn must(operand: impl Into<Expression>) -> Expression {
    Expression::unary(Operator::Must, operand.into())
}

/// `-clause`
pub fn must_not(operand: impl Into<Expression>) -> Expression {
    Expression::unary(Operator::MustNot, operand.into())
}

/// Bare term or phrase.
pub fn lit(value: impl Into<Value>) -> Expression {
    Expression::term(Operator::Literal, value.into())
}

/// Wildcard term such as `elas*`.
pub fn wild(pattern: impl Into<String>) -> Expression {
    Expression::term(Operator::Wild, Value::String(pattern.into()))
}

/// Regular expression term, slashes included: `regexp("/b*ar/")`.
pub fn regexp(pattern: impl Into<String>) -> Expression {
    Expression::term(Operator::Regexp, Value::String(pattern.into()))
}

/// Ordered term sequence for [`in_list`].
pub fn list(items: Vec<Expression>) -> Result<Expression, ExprError> {
    Expression::new(Operator::List, Operand::List(items), None)
}

/// `field:(a OR b OR c)` as a single membership clause.
pub fn in_list(field: impl Into<Column>, items: Expression) -> Result<Expression, ExprError> {
    Expression::new(
        Operator::In,
        Operand::Column(field.into()),
        Some(items.into()),
    )
}

/// Boosts a term or field clause.
///
/// The suffix is written into a copy of the wrapped term, so the boosted
/// node renders the same way every time: `boost(eq("a", "b"), 2.0)` holds
/// the term `b^2.000000`. A factor of 1.0 adds no suffix.
pub fn boost(operand: Expression, power: f32) -> Result<Expression, ExprError> {
    let op = Operator::Boost(power);
    let suffix = if power == DEFAULT_BOOST {
        String::new()
    } else {
        format!("^{:.6}", power)
    };
    let inner = append_suffix(operand, &suffix, op)?;
    Ok(Expression::unary(op, inner))
}

/// Makes a term or field clause fuzzy; distance 1 adds no suffix.
pub fn fuzzy(operand: Expression, distance: u32) -> Result<Expression, ExprError> {
    let op = Operator::Fuzzy(distance);
    let suffix = if distance == DEFAULT_FUZZY_DISTANCE {
        String::new()
    } else {
        format!("~{}", distance)
    };
    let inner = append_suffix(operand, &suffix, op)?;
    Ok(Expression::unary(op, inner))
}

fn append_suffix(expr: Expression, suffix: &str, modifier: Operator) -> Result<Expression, ExprError> {
    let not_modifiable = |target: Operator| ExprError::NotModifiable { modifier, target };

    if expr.op.is_term() {
        let Operand::Value(value) = expr.left else {
            return Err(not_modifiable(expr.op));
        };
        if suffix.is_empty() {
            return Ok(Expression::term(expr.op, value));
        }
        let text = format!("{}{}", value.as_string(), suffix);
        return Ok(Expression::term(expr.op, Value::String(text)));
    }

    match expr.op {
        Operator::Equals | Operator::Like => {
            let Some(Operand::Expr(term)) = expr.right else {
                return Err(not_modifiable(expr.op));
            };
            let term = append_suffix(*term, suffix, modifier)?;
            Ok(Expression::binary(expr.op, expr.left, term.into()))
        }
        Operator::Boost(_) | Operator::Fuzzy(_) if expr.is_term() || is_modifiable_clause(&expr) => {
            let Operand::Expr(inner) = expr.left else {
                return Err(not_modifiable(expr.op));
            };
            let inner = append_suffix(*inner, suffix, modifier)?;
            Ok(Expression::unary(expr.op, inner))
        }
        op => Err(not_modifiable(op)),
    }
}
