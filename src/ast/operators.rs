use serde::Serialize;

/// Operator tag of an [`Expression`](crate::ast::Expression) node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Operator {
    // Logical
    /// Conjunction (`AND`, `&&`, or two adjacent clauses)
    And,
    /// Disjunction (`OR`, `||`)
    Or,
    /// Negation (`NOT`, `!`)
    Not,
    /// Required clause (`+`)
    Must,
    /// Prohibited clause (`-`)
    MustNot,

    // Field clauses
    /// `field:term`
    Equals,
    /// Free-text match on a field, never join-wrapped
    Like,
    /// `field:[min TO max]` / `field:{min TO max}`
    Range,
    /// `field:>v`
    Greater,
    /// `field:>=v`
    GreaterEq,
    /// `field:<v`
    Less,
    /// `field:<=v`
    LessEq,
    /// `field:(a OR b OR c)`
    In,

    // Terms
    /// Ordered sequence of terms, the right operand of `In`
    List,
    /// Bare term or phrase
    Literal,
    /// Term containing `*` or `?`
    Wild,
    /// `/pattern/`
    Regexp,

    // Postfix modifiers
    /// `^factor`
    Boost(f32),
    /// `~distance`
    Fuzzy(u32),
}

impl Operator {
    /// True for Literal, Wild and Regexp.
    pub fn is_term(&self) -> bool {
        matches!(self, Operator::Literal | Operator::Wild | Operator::Regexp)
    }

    /// True for Boost and Fuzzy.
    pub fn is_modifier(&self) -> bool {
        matches!(self, Operator::Boost(_) | Operator::Fuzzy(_))
    }

    /// Binding strength used when printing an expression back as Lucene text.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Or => 1,
            Operator::And => 2,
            Operator::Not | Operator::Must | Operator::MustNot => 3,
            Operator::Boost(_) | Operator::Fuzzy(_) => 5,
            Operator::List | Operator::Literal | Operator::Wild | Operator::Regexp => 6,
            _ => 4,
        }
    }

    /// Upper-case operator name, as shown in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
            Operator::Must => "MUST",
            Operator::MustNot => "MUST_NOT",
            Operator::Equals => "EQUALS",
            Operator::Like => "LIKE",
            Operator::Range => "RANGE",
            Operator::Greater => "GREATER",
            Operator::GreaterEq => "GREATER_EQ",
            Operator::Less => "LESS",
            Operator::LessEq => "LESS_EQ",
            Operator::In => "IN",
            Operator::List => "LIST",
            Operator::Literal => "LITERAL",
            Operator::Wild => "WILD",
            Operator::Regexp => "REGEXP",
            Operator::Boost(_) => "BOOST",
            Operator::Fuzzy(_) => "FUZZY",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
