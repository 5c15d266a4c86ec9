#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Terms
    /// Field name, i.e. a term or phrase immediately followed by `:`
    ///
    /// Escapes are resolved, quotes of a quoted field name are kept.
    ///
    /// # Examples
    /// ```text
    /// title:elastic      // Field("title")
    /// a\ b:1             // Field("a b")
    /// ```
    Field(String),

    /// Plain search term, escapes kept verbatim
    ///
    /// # Examples
    /// ```text
    /// elastic
    /// 2024-01-15
    /// foo\:bar
    /// ```
    Term(String),

    /// Integer term, with the digits as written
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 007
    /// ```
    Integer { value: i64, raw: String },

    /// Floating-point term, with the digits as written
    ///
    /// # Examples
    /// ```text
    /// 1.5
    /// 1.10
    /// ```
    Float { value: f64, raw: String },

    /// Quoted phrase, quotes preserved
    ///
    /// # Examples
    /// ```text
    /// "quick brown fox"
    /// ```
    Phrase(String),

    /// Term containing `*` or `?`
    ///
    /// # Examples
    /// ```text
    /// elas*
    /// te?t
    /// *
    /// ```
    Wildcard(String),

    /// Regular expression, slashes preserved
    ///
    /// # Examples
    /// ```text
    /// /joh?n(ath[oa]n)/
    /// ```
    Regexp(String),

    // Boolean operators
    /// `AND` or `&&`
    And,

    /// `OR` or `||`
    Or,

    /// `NOT` or `!`
    Not,

    /// `+` prefix (required clause)
    Plus,

    /// `-` prefix (prohibited clause)
    Minus,

    // Ranges
    /// Range bound separator
    ///
    /// # Examples
    /// ```text
    /// [1 TO 10]
    /// ```
    To,

    /// Inclusive range start
    LBracket,

    /// Inclusive range end
    RBracket,

    /// Exclusive range start
    LBrace,

    /// Exclusive range end
    RBrace,

    // Comparison
    /// `>`
    Gt,

    /// `>=`
    GtEq,

    /// `<`
    Lt,

    /// `<=`
    LtEq,

    // Modifiers
    /// Boost suffix with its optional factor
    ///
    /// # Examples
    /// ```text
    /// elastic^2
    /// elastic^1.5
    /// elastic^
    /// ```
    Caret(Option<f32>),

    /// Fuzzy suffix with its optional edit distance
    ///
    /// # Examples
    /// ```text
    /// elastic~2
    /// elastic~
    /// ```
    Tilde(Option<u32>),

    // Delimiters
    /// Field separator
    Colon,

    /// Left parenthesis for grouping
    LParen,

    /// Right parenthesis
    RParen,

    /// End of input
    Eof,
}

impl Token {
    /// Tokens that may begin a clause, used for implicit conjunction.
    pub fn starts_clause(&self) -> bool {
        matches!(
            self,
            Token::Field(_)
                | Token::Term(_)
                | Token::Integer { .. }
                | Token::Float { .. }
                | Token::Phrase(_)
                | Token::Wildcard(_)
                | Token::Regexp(_)
                | Token::To
                | Token::Not
                | Token::Plus
                | Token::Minus
                | Token::LParen
        )
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Field(name) => write!(f, "field '{}'", name),
            Token::Term(t) => write!(f, "term '{}'", t),
            Token::Integer { raw, .. } | Token::Float { raw, .. } => write!(f, "number {}", raw),
            Token::Phrase(p) => write!(f, "phrase {}", p),
            Token::Wildcard(w) => write!(f, "wildcard '{}'", w),
            Token::Regexp(r) => write!(f, "regexp {}", r),
            Token::And => f.write_str("'AND'"),
            Token::Or => f.write_str("'OR'"),
            Token::Not => f.write_str("'NOT'"),
            Token::Plus => f.write_str("'+'"),
            Token::Minus => f.write_str("'-'"),
            Token::To => f.write_str("'TO'"),
            Token::LBracket => f.write_str("'['"),
            Token::RBracket => f.write_str("']'"),
            Token::LBrace => f.write_str("'{'"),
            Token::RBrace => f.write_str("'}'"),
            Token::Gt => f.write_str("'>'"),
            Token::GtEq => f.write_str("'>='"),
            Token::Lt => f.write_str("'<'"),
            Token::LtEq => f.write_str("'<='"),
            Token::Caret(_) => f.write_str("'^'"),
            Token::Tilde(_) => f.write_str("'~'"),
            Token::Colon => f.write_str("':'"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
            Token::Eof => f.write_str("end of input"),
        }
    }
}
