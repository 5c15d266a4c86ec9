//! Recursive descent parser for Lucene query strings.
//!
//! # Grammar
//!
//! ```text
//! query       := or_expr EOF
//! or_expr     := and_expr (OR and_expr)*
//! and_expr    := adjacent (AND adjacent)*
//! adjacent    := unary unary*
//! unary       := (NOT | '+' | '-')* postfix
//! postfix     := clause ('^' factor? | '~' distance?)*
//! clause      := FIELD ':' field_value | '(' or_expr ')' | term
//! field_value := range | compare | '(' or_expr ')' | term
//! range       := ('[' | '{') bound TO bound (']' | '}')
//! compare     := ('>' | '>=' | '<' | '<=') value
//! ```
//!
//! Chains nest to the right: `a AND b AND c` is `AND(a, AND(b, c))`.
//! They are read in a loop and folded afterwards. Parentheses may nest at
//! most [`MAX_NESTING`] levels and the finished tree may be at most
//! [`MAX_DEPTH`] levels deep.

use crate::{
    ast::{
        Bound, Column, Expression, MAX_DEPTH, Operand, Operator, Token, and,
        builders::{DEFAULT_BOOST, DEFAULT_FUZZY_DISTANCE},
        boost, fuzzy, in_list, list, lit, or, range, regexp, wild,
    },
    lexer::{LexError, Lexer, Position},
    value::Value,
};
use log::debug;

/// Errors raised while turning a query string into an [`Expression`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The lexer rejected the input
    Lex(LexError),

    /// Token that does not fit the grammar at this point
    Unexpected {
        expected: String,
        found: Token,
        position: Position,
    },

    /// Well-formed tokens describing a clause that cannot be built
    Invalid { message: String, position: Position },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(e) => e.position(),
            ParseError::Unexpected { position, .. } | ParseError::Invalid { position, .. } => {
                *position
            }
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Lex(e) => write!(f, "{}", e),
            ParseError::Unexpected {
                expected,
                found,
                position,
            } => write!(f, "Expected {}, found {} at {}", expected, found, position),
            ParseError::Invalid { message, position } => write!(f, "{} at {}", message, position),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Lex(e)
    }
}

/// Parses a complete query string.
///
/// ```
/// use lucene_dsl::parser::parse;
///
/// let expr = parse("a:5 AND (b:foo OR c:bar)").unwrap();
/// assert_eq!(expr.to_string(), "a:5 AND (b:foo OR c:bar)");
/// ```
pub fn parse(input: &str) -> Result<Expression, ParseError> {
    Parser::new(Lexer::new(input))?.parse()
}

/// Deepest parenthesis nesting accepted; each level costs a few stack frames.
pub const MAX_NESTING: usize = 64;

const TOO_DEEP: &str = "query nested too deeply";

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    current_position: Position,
    /// Open parentheses around the current token.
    nesting: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        let current_position = lexer.token_start();
        Ok(Parser {
            lexer,
            current_token,
            current_position,
            nesting: 0,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        self.current_position = self.lexer.token_start();
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(&self.current_token) == std::mem::discriminant(token)
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.unexpected(&expected.to_string()));
        }
        self.advance()
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::Unexpected {
            expected: expected.to_string(),
            found: self.current_token.clone(),
            position: self.current_position,
        }
    }

    fn invalid(message: impl Into<String>, position: Position) -> ParseError {
        ParseError::Invalid {
            message: message.into(),
            position,
        }
    }

    /// Consumes an opening parenthesis.
    fn open_group(&mut self) -> Result<(), ParseError> {
        if self.nesting >= MAX_NESTING {
            return Err(Self::invalid(TOO_DEEP, self.current_position));
        }
        self.nesting += 1;
        self.advance()
    }

    /// Consumes the matching closing parenthesis.
    fn close_group(&mut self) -> Result<(), ParseError> {
        self.expect(Token::RParen)?;
        self.nesting -= 1;
        Ok(())
    }

    /// Parses the whole input into one expression.
    pub fn parse(&mut self) -> Result<Expression, ParseError> {
        if self.check(&Token::Eof) {
            return Err(self.unexpected("a query"));
        }
        let expr = self.parse_expression()?;
        if !self.check(&Token::Eof) {
            return Err(self.unexpected("an operator or end of input"));
        }
        Ok(expr)
    }

    pub fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expression, ParseError> {
        let mut operands = vec![self.parse_and()?];
        while self.check(&Token::Or) {
            self.advance()?;
            operands.push(self.parse_and()?);
        }
        self.fold_right(operands, |left, right| or(left, right))
    }

    fn parse_and(&mut self) -> Result<Expression, ParseError> {
        let mut operands = vec![self.parse_adjacent()?];
        while self.check(&Token::And) {
            self.advance()?;
            operands.push(self.parse_adjacent()?);
        }
        self.fold_right(operands, |left, right| and(left, right))
    }

    /// Clauses written next to each other are conjoined.
    fn parse_adjacent(&mut self) -> Result<Expression, ParseError> {
        let mut operands = vec![self.parse_unary()?];
        while self.current_token.starts_clause() {
            operands.push(self.parse_unary()?);
        }
        self.fold_right(operands, |left, right| and(left, right))
    }

    /// `[a, b, c]` becomes `combine(a, combine(b, c))`.
    fn fold_right(
        &self,
        mut operands: Vec<Expression>,
        combine: fn(Expression, Expression) -> Expression,
    ) -> Result<Expression, ParseError> {
        let Some(mut expr) = operands.pop() else {
            return Err(self.unexpected("a clause"));
        };
        let mut depth = expr.depth();

        while let Some(left) = operands.pop() {
            depth = depth.max(left.depth()) + 1;
            if depth > MAX_DEPTH {
                return Err(Self::invalid(TOO_DEEP, self.current_position));
            }
            expr = combine(left, expr);
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expression, ParseError> {
        let mut prefixes = Vec::new();
        loop {
            let op = match self.current_token {
                Token::Not => Operator::Not,
                Token::Plus => Operator::Must,
                Token::Minus => Operator::MustNot,
                _ => break,
            };
            prefixes.push(op);
            self.advance()?;
        }

        let mut expr = self.parse_postfix()?;
        if expr.depth() + prefixes.len() > MAX_DEPTH {
            return Err(Self::invalid(TOO_DEEP, self.current_position));
        }
        while let Some(op) = prefixes.pop() {
            expr = Expression::unary(op, expr);
        }
        Ok(expr)
    }

    fn parse_postfix(&mut self) -> Result<Expression, ParseError> {
        let mut expr = self.parse_clause()?;

        loop {
            let position = self.current_position;
            if matches!(self.current_token, Token::Caret(_) | Token::Tilde(_))
                && expr.depth() >= MAX_DEPTH
            {
                return Err(Self::invalid(TOO_DEEP, position));
            }
            expr = match self.current_token {
                Token::Caret(factor) => {
                    self.advance()?;
                    boost(expr, factor.unwrap_or(DEFAULT_BOOST))
                }
                Token::Tilde(distance) => {
                    self.advance()?;
                    fuzzy(expr, distance.unwrap_or(DEFAULT_FUZZY_DISTANCE))
                }
                _ => break,
            }
            .map_err(|e| Self::invalid(e.to_string(), position))?;
        }
        Ok(expr)
    }

    fn parse_clause(&mut self) -> Result<Expression, ParseError> {
        match &self.current_token {
            Token::Field(name) => {
                let column = Column::new(name.clone());
                self.advance()?;
                self.expect(Token::Colon)?;
                self.parse_field_value(column)
            }
            Token::LParen => {
                self.open_group()?;
                let expr = self.parse_expression()?;
                self.close_group()?;
                Ok(expr)
            }
            // Outside a range TO is an ordinary word.
            Token::To => {
                self.advance()?;
                Ok(lit("TO"))
            }
            Token::Term(_)
            | Token::Phrase(_)
            | Token::Integer { .. }
            | Token::Float { .. }
            | Token::Wildcard(_)
            | Token::Regexp(_) => self.parse_term("a term"),
            _ => Err(self.unexpected("a term, a field clause or '('")),
        }
    }

    /// Term of a clause: plain value, wildcard or regexp.
    fn parse_term(&mut self, expected: &str) -> Result<Expression, ParseError> {
        let term = match &self.current_token {
            Token::Wildcard(pattern) => wild(pattern.clone()),
            Token::Regexp(pattern) => regexp(pattern.clone()),
            _ => return Ok(lit(self.parse_text(expected)?)),
        };
        self.advance()?;
        Ok(term)
    }

    /// Plain value as the user wrote it, for query text and comparisons.
    fn parse_text(&mut self, expected: &str) -> Result<String, ParseError> {
        Ok(self.parse_value(expected)?.1)
    }

    /// Plain value: term, phrase or (possibly negative) number, along with
    /// its source text. Numbers keep their native type for range bounds.
    fn parse_value(&mut self, expected: &str) -> Result<(Value, String), ParseError> {
        if self.check(&Token::Minus) {
            let position = self.current_position;
            self.advance()?;
            let (number, raw) = match &self.current_token {
                Token::Integer { value, raw } => (Value::Integer(*value), raw.clone()),
                Token::Float { value, raw } => (Value::Float(*value), raw.clone()),
                _ => return Err(self.unexpected("a number after '-'")),
            };
            self.advance()?;
            let number = number
                .negate()
                .ok_or_else(|| Self::invalid("number out of range", position))?;
            return Ok((number, format!("-{}", raw)));
        }

        let value = match &self.current_token {
            Token::Term(text) | Token::Phrase(text) => (Value::String(text.clone()), text.clone()),
            Token::Integer { value, raw } => (Value::Integer(*value), raw.clone()),
            Token::Float { value, raw } => (Value::Float(*value), raw.clone()),
            _ => return Err(self.unexpected(expected)),
        };
        self.advance()?;
        Ok(value)
    }

    fn parse_field_value(&mut self, column: Column) -> Result<Expression, ParseError> {
        let expected = format!("a value after '{}:'", column);
        let comparison = match self.current_token {
            Token::LBracket | Token::LBrace => return self.parse_range(column),
            Token::LParen => return self.parse_field_group(column),
            Token::Gt => Some(Operator::Greater),
            Token::GtEq => Some(Operator::GreaterEq),
            Token::Lt => Some(Operator::Less),
            Token::LtEq => Some(Operator::LessEq),
            _ => None,
        };

        if let Some(op) = comparison {
            self.advance()?;
            let text = self.parse_text(&expected)?;
            return Ok(Expression::binary(
                op,
                Operand::Column(column),
                lit(text).into(),
            ));
        }

        let term = self.parse_term(&expected)?;
        Ok(Expression::binary(
            Operator::Equals,
            Operand::Column(column),
            term.into(),
        ))
    }

    /// `[min TO max]` or `{min TO max}`; the opening bracket decides inclusivity.
    fn parse_range(&mut self, column: Column) -> Result<Expression, ParseError> {
        let inclusive = self.check(&Token::LBracket);
        self.advance()?; // Consume '[' or '{'

        let min = self.parse_bound()?;
        self.expect(Token::To)?;
        let max = self.parse_bound()?;

        match self.current_token {
            Token::RBracket | Token::RBrace => {
                if self.check(&Token::RBracket) != inclusive {
                    debug!(
                        "range on '{}' mixes bracket styles, using {} bounds",
                        column,
                        if inclusive { "inclusive" } else { "exclusive" }
                    );
                }
                self.advance()?;
            }
            _ => return Err(self.unexpected("']' or '}' to close the range")),
        }

        Ok(range(column, min, max, inclusive))
    }

    fn parse_bound(&mut self) -> Result<Bound, ParseError> {
        if let Token::Wildcard(pattern) = &self.current_token {
            if pattern != "*" {
                return Err(Self::invalid(
                    format!("wildcard '{}' is not allowed as a range bound", pattern),
                    self.current_position,
                ));
            }
            self.advance()?;
            return Ok(Bound::Unbounded);
        }
        Ok(Bound::Value(self.parse_value("a range bound or '*'")?.0))
    }

    /// `field:( ... )`: an OR of plain terms becomes one membership clause,
    /// anything else gets the field applied to each bare term.
    fn parse_field_group(&mut self, column: Column) -> Result<Expression, ParseError> {
        let position = self.current_position;
        self.open_group()?;
        let inner = self.parse_expression()?;
        self.close_group()?;

        if let Some(terms) = or_chain_terms(&inner) {
            if terms.len() > 1 {
                debug!("collapsing {} terms on '{}' into IN", terms.len(), column);
                let members = list(terms).map_err(|e| Self::invalid(e.to_string(), position))?;
                return in_list(column, members).map_err(|e| Self::invalid(e.to_string(), position));
            }
        }

        debug!("applying field '{}' to group {}", column, inner);
        let scoped = scope_to_field(inner, &column);
        if scoped.depth() > MAX_DEPTH {
            return Err(Self::invalid(TOO_DEEP, position));
        }
        Ok(scoped)
    }
}

/// Members of an OR chain made only of terms.
fn or_chain_terms(expr: &Expression) -> Option<Vec<Expression>> {
    if expr.is_term() {
        return Some(vec![expr.clone()]);
    }
    if expr.op != Operator::Or {
        return None;
    }
    let mut terms = or_chain_terms(expr.left.as_expr()?)?;
    terms.extend(or_chain_terms(expr.right.as_ref()?.as_expr()?)?);
    Some(terms)
}

/// Turns every bare term under boolean operators into `column:term`.
fn scope_to_field(expr: Expression, column: &Column) -> Expression {
    if expr.op.is_term() {
        return Expression::binary(
            Operator::Equals,
            Operand::Column(column.clone()),
            expr.into(),
        );
    }

    let scope = |operand: Operand| match operand {
        Operand::Expr(inner) => Operand::Expr(Box::new(scope_to_field(*inner, column))),
        other => other,
    };

    match expr.op {
        Operator::And
        | Operator::Or
        | Operator::Not
        | Operator::Must
        | Operator::MustNot
        | Operator::Boost(_)
        | Operator::Fuzzy(_) => Expression {
            op: expr.op,
            left: scope(expr.left),
            right: expr.right.map(|right| scope(right)),
        },
        // Already scoped to a field of its own.
        _ => expr,
    }
}
