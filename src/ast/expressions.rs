use serde::Serialize;

use crate::{ast::Operator, value::Value};

/// Field name of a field clause.
///
/// Kept apart from term values because the two are escaped differently:
/// field names only need their spaces escaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Column(pub String);

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Column(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Field name with internal spaces escaped (`a b` -> `a\ b`).
    pub fn escaped(&self) -> String {
        self.0.replace(' ', "\\ ")
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column(name.to_string())
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Column(name)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.escaped())
    }
}

/// One side of a range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Bound {
    Value(Value),
    /// `*`: no limit on this side
    Unbounded,
}

impl Bound {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Bound::Unbounded)
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Bound::Value(v) => Some(v),
            Bound::Unbounded => None,
        }
    }
}

impl From<Value> for Bound {
    fn from(v: Value) -> Self {
        Bound::Value(v)
    }
}

impl From<i64> for Bound {
    fn from(n: i64) -> Self {
        Bound::Value(Value::Integer(n))
    }
}

impl From<i32> for Bound {
    fn from(n: i32) -> Self {
        Bound::Value(Value::Integer(n.into()))
    }
}

impl From<f64> for Bound {
    fn from(n: f64) -> Self {
        Bound::Value(Value::Float(n))
    }
}

impl From<&str> for Bound {
    fn from(s: &str) -> Self {
        if s == "*" {
            Bound::Unbounded
        } else {
            Bound::Value(Value::from(s))
        }
    }
}

impl From<String> for Bound {
    fn from(s: String) -> Self {
        Bound::from(s.as_str())
    }
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Value(v) => write!(f, "{}", v),
            Bound::Unbounded => f.write_str("*"),
        }
    }
}

/// Limits of a `Range` clause. Inclusivity applies to both sides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeBoundary {
    pub min: Bound,
    pub max: Bound,
    pub inclusive: bool,
}

/// Deepest expression tree the parser builds and the renderer accepts.
pub const MAX_DEPTH: usize = 256;

/// Operand slot of an [`Expression`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Operand {
    Expr(Box<Expression>),
    Column(Column),
    Value(Value),
    Range(RangeBoundary),
    List(Vec<Expression>),
}

impl Operand {
    pub fn as_expr(&self) -> Option<&Expression> {
        match self {
            Operand::Expr(e) => Some(e),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Operand::Expr(_) => "expression",
            Operand::Column(_) => "column",
            Operand::Value(_) => "value",
            Operand::Range(_) => "range boundary",
            Operand::List(_) => "list",
        }
    }
}

impl From<Expression> for Operand {
    fn from(e: Expression) -> Self {
        Operand::Expr(Box::new(e))
    }
}

/// Node of a parsed Lucene query.
///
/// Every node is an operator over a left operand and, for binary operators,
/// a right operand. See [`Operator`] for the shapes each operator accepts;
/// [`Expression::new`] enforces them.
///
/// ```
/// use lucene_dsl::ast::{and, eq};
///
/// let query = and(eq("a", 5), eq("b", "foo"));
/// assert_eq!(query.to_string(), "a:5 AND b:foo");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expression {
    pub op: Operator,
    pub left: Operand,
    pub right: Option<Operand>,
}

/// Construction of an expression whose operands do not fit its operator.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprError {
    /// Operand of the wrong kind, e.g. a Range without a range boundary
    InvalidOperand {
        op: Operator,
        expected: &'static str,
        found: &'static str,
    },

    /// Binary operator built without a right operand
    MissingOperand(Operator),

    /// Unary operator given a right operand
    UnexpectedOperand(Operator),

    /// List member that is not a plain term
    NotATerm(Operator),

    /// Boost or fuzzy applied to something other than a term or field clause
    NotModifiable { modifier: Operator, target: Operator },
}

impl std::fmt::Display for ExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprError::InvalidOperand { op, expected, found } => {
                write!(f, "{} expects {}, got {}", op, expected, found)
            }
            ExprError::MissingOperand(op) => write!(f, "{} requires a right operand", op),
            ExprError::UnexpectedOperand(op) => write!(f, "{} takes a single operand", op),
            ExprError::NotATerm(op) => write!(f, "list members must be terms, got {}", op),
            ExprError::NotModifiable { modifier, target } => write!(
                f,
                "{} can only follow a term or a field clause, not {}",
                modifier, target
            ),
        }
    }
}

impl std::error::Error for ExprError {}

impl Expression {
    /// Builds a node after checking that the operands fit the operator.
    pub fn new(op: Operator, left: Operand, right: Option<Operand>) -> Result<Self, ExprError> {
        check_operands(op, &left, right.as_ref())?;
        Ok(Expression { op, left, right })
    }

    pub(crate) fn unary(op: Operator, operand: Expression) -> Self {
        Expression {
            op,
            left: operand.into(),
            right: None,
        }
    }

    pub(crate) fn binary(op: Operator, left: Operand, right: Operand) -> Self {
        Expression {
            op,
            left,
            right: Some(right),
        }
    }

    pub(crate) fn term(op: Operator, value: Value) -> Self {
        Expression {
            op,
            left: Operand::Value(value),
            right: None,
        }
    }

    /// Factor carried by a Boost node.
    pub fn boost_power(&self) -> Option<f32> {
        match self.op {
            Operator::Boost(power) => Some(power),
            _ => None,
        }
    }

    /// Edit distance carried by a Fuzzy node.
    pub fn fuzzy_distance(&self) -> Option<u32> {
        match self.op {
            Operator::Fuzzy(distance) => Some(distance),
            _ => None,
        }
    }

    /// Field of a field clause.
    pub fn column(&self) -> Option<&Column> {
        match &self.left {
            Operand::Column(c) => Some(c),
            _ => None,
        }
    }

    /// True for Literal, Wild and Regexp nodes, and modifiers over them.
    pub fn is_term(&self) -> bool {
        if self.op.is_term() {
            return true;
        }
        self.op.is_modifier() && self.left.as_expr().is_some_and(Expression::is_term)
    }

    /// Text of a term, modifier suffixes included.
    pub fn term_text(&self) -> Option<String> {
        match (&self.op, &self.left) {
            (op, Operand::Value(v)) if op.is_term() => Some(v.as_string()),
            (op, Operand::Expr(inner)) if op.is_modifier() => inner.term_text(),
            _ => None,
        }
    }

    /// Number of nodes on the longest path from this node down to a term.
    ///
    /// Walks the tree with an explicit stack, so it is safe on trees deeper
    /// than [`MAX_DEPTH`].
    pub fn depth(&self) -> usize {
        let mut deepest: usize = 0;
        let mut pending = vec![(self, 1)];

        while let Some((expr, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            for operand in std::iter::once(&expr.left).chain(expr.right.as_ref()) {
                match operand {
                    Operand::Expr(inner) => pending.push((inner.as_ref(), depth + 1)),
                    Operand::List(items) => pending.extend(items.iter().map(|e| (e, depth + 1))),
                    _ => {}
                }
            }
        }
        deepest
    }
}

fn check_operands(op: Operator, left: &Operand, right: Option<&Operand>) -> Result<(), ExprError> {
    let invalid = |expected: &'static str, found: &Operand| ExprError::InvalidOperand {
        op,
        expected,
        found: found.kind(),
    };

    match op {
        Operator::And | Operator::Or => {
            let right = right.ok_or(ExprError::MissingOperand(op))?;
            for operand in [left, right] {
                if operand.as_expr().is_none() {
                    return Err(invalid("expression operands", operand));
                }
            }
        }
        Operator::Not | Operator::Must | Operator::MustNot => {
            if right.is_some() {
                return Err(ExprError::UnexpectedOperand(op));
            }
            if left.as_expr().is_none() {
                return Err(invalid("an expression operand", left));
            }
        }
        Operator::Equals
        | Operator::Like
        | Operator::Greater
        | Operator::GreaterEq
        | Operator::Less
        | Operator::LessEq => {
            if !matches!(left, Operand::Column(_)) {
                return Err(invalid("a column on the left", left));
            }
            let right = right.ok_or(ExprError::MissingOperand(op))?;
            match right.as_expr() {
                Some(e) if e.is_term() => {}
                _ => return Err(invalid("a term on the right", right)),
            }
        }
        Operator::Range => {
            if !matches!(left, Operand::Column(_)) {
                return Err(invalid("a column on the left", left));
            }
            let right = right.ok_or(ExprError::MissingOperand(op))?;
            if !matches!(right, Operand::Range(_)) {
                return Err(invalid("a range boundary on the right", right));
            }
        }
        Operator::In => {
            if !matches!(left, Operand::Column(_)) {
                return Err(invalid("a column on the left", left));
            }
            let right = right.ok_or(ExprError::MissingOperand(op))?;
            match right.as_expr() {
                Some(e) if e.op == Operator::List => {}
                _ => return Err(invalid("a list on the right", right)),
            }
        }
        Operator::List => {
            if right.is_some() {
                return Err(ExprError::UnexpectedOperand(op));
            }
            let Operand::List(items) = left else {
                return Err(invalid("a list of terms", left));
            };
            if let Some(item) = items.iter().find(|item| !item.is_term()) {
                return Err(ExprError::NotATerm(item.op));
            }
        }
        Operator::Literal | Operator::Wild | Operator::Regexp => {
            if right.is_some() {
                return Err(ExprError::UnexpectedOperand(op));
            }
            if !matches!(left, Operand::Value(_)) {
                return Err(invalid("a value", left));
            }
        }
        Operator::Boost(_) | Operator::Fuzzy(_) => {
            if right.is_some() {
                return Err(ExprError::UnexpectedOperand(op));
            }
            let inner = left.as_expr().ok_or_else(|| invalid("an expression operand", left))?;
            if !inner.is_term() && !is_modifiable_clause(inner) {
                return Err(ExprError::NotModifiable {
                    modifier: op,
                    target: inner.op,
                });
            }
        }
    }
    Ok(())
}

/// Field clauses whose term can carry a boost or fuzzy suffix.
pub(crate) fn is_modifiable_clause(expr: &Expression) -> bool {
    match expr.op {
        Operator::Equals | Operator::Like => true,
        Operator::Boost(_) | Operator::Fuzzy(_) => {
            expr.left.as_expr().is_some_and(is_modifiable_clause)
        }
        _ => false,
    }
}

impl From<Value> for Expression {
    fn from(v: Value) -> Self {
        Expression::term(Operator::Literal, v)
    }
}

impl From<&str> for Expression {
    fn from(s: &str) -> Self {
        Expression::from(Value::from(s))
    }
}

impl From<String> for Expression {
    fn from(s: String) -> Self {
        Expression::from(Value::from(s))
    }
}

impl From<i64> for Expression {
    fn from(n: i64) -> Self {
        Expression::from(Value::Integer(n))
    }
}

impl From<i32> for Expression {
    fn from(n: i32) -> Self {
        Expression::from(Value::from(n))
    }
}

impl From<f64> for Expression {
    fn from(n: f64) -> Self {
        Expression::from(Value::Float(n))
    }
}

// Lucene syntax, close enough to feed back into the parser.
impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prec = self.op.precedence();
        match self.op {
            Operator::And | Operator::Or => {
                fmt_operand(f, &self.left, prec)?;
                write!(f, " {} ", self.op)?;
                match &self.right {
                    Some(right) => fmt_operand(f, right, prec),
                    None => Ok(()),
                }
            }
            Operator::Not => {
                f.write_str("NOT ")?;
                fmt_operand(f, &self.left, prec)
            }
            Operator::Must => {
                f.write_str("+")?;
                fmt_operand(f, &self.left, prec)
            }
            Operator::MustNot => {
                f.write_str("-")?;
                fmt_operand(f, &self.left, prec)
            }
            Operator::Equals | Operator::Like | Operator::In => {
                fmt_operand(f, &self.left, prec)?;
                f.write_str(":")?;
                match &self.right {
                    Some(right) => fmt_operand(f, right, 0),
                    None => Ok(()),
                }
            }
            Operator::Greater | Operator::GreaterEq | Operator::Less | Operator::LessEq => {
                let sign = match self.op {
                    Operator::Greater => ">",
                    Operator::GreaterEq => ">=",
                    Operator::Less => "<",
                    _ => "<=",
                };
                fmt_operand(f, &self.left, prec)?;
                write!(f, ":{}", sign)?;
                match &self.right {
                    Some(right) => fmt_operand(f, right, 0),
                    None => Ok(()),
                }
            }
            Operator::Range => {
                fmt_operand(f, &self.left, prec)?;
                f.write_str(":")?;
                match &self.right {
                    Some(right) => fmt_operand(f, right, 0),
                    None => Ok(()),
                }
            }
            // The suffix already lives in the wrapped term.
            Operator::Boost(_) | Operator::Fuzzy(_) => fmt_operand(f, &self.left, 0),
            Operator::List | Operator::Literal | Operator::Wild | Operator::Regexp => {
                fmt_operand(f, &self.left, 0)
            }
        }
    }
}

fn fmt_operand(f: &mut std::fmt::Formatter<'_>, operand: &Operand, min_prec: u8) -> std::fmt::Result {
    match operand {
        Operand::Expr(e) if e.op.precedence() < min_prec => write!(f, "({})", e),
        Operand::Expr(e) => write!(f, "{}", e),
        Operand::Column(c) => write!(f, "{}", c),
        Operand::Value(v) => write!(f, "{}", v),
        Operand::Range(r) => {
            let (open, close) = if r.inclusive { ('[', ']') } else { ('{', '}') };
            write!(f, "{}{} TO {}{}", open, r.min, r.max, close)
        }
        Operand::List(items) => {
            let items: Vec<String> = items.iter().map(|i| i.to_string()).collect();
            write!(f, "({})", items.join(" OR "))
        }
    }
}
