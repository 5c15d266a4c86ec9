use crate::ast::Token;
use log::trace;

/// Byte offset into the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "offset {}", self.offset)
    }
}

/// Errors raised while splitting a query string into tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// Character that cannot start a token
    UnexpectedCharacter {
        character: char,
        position: Position,
        hint: Option<&'static str>,
    },

    /// `"` without its closing quote
    UnterminatedPhrase { position: Position },

    /// `/` without its closing slash
    UnterminatedRegexp { position: Position },

    /// Backslash at the very end of the input
    DanglingEscape { position: Position },

    /// Malformed number after `^` or `~`
    InvalidModifier {
        character: char,
        text: String,
        position: Position,
    },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnterminatedPhrase { position }
            | LexError::UnterminatedRegexp { position }
            | LexError::DanglingEscape { position }
            | LexError::InvalidModifier { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexError::UnexpectedCharacter {
                character,
                position,
                hint,
            } => {
                write!(f, "Unexpected character '{}' at {}", character, position)?;
                if let Some(hint) = hint {
                    write!(f, " ({})", hint)?;
                }
                Ok(())
            }
            LexError::UnterminatedPhrase { position } => {
                write!(f, "Unterminated phrase starting at {}: missing closing quote", position)
            }
            LexError::UnterminatedRegexp { position } => {
                write!(f, "Unterminated regexp starting at {}: missing closing '/'", position)
            }
            LexError::DanglingEscape { position } => {
                write!(f, "Dangling '\\' at {}: nothing to escape", position)
            }
            LexError::InvalidModifier {
                character,
                text,
                position,
            } => match character {
                '~' => write!(
                    f,
                    "Invalid fuzzy distance '{}' at {}: expected a whole number",
                    text, position
                ),
                _ => write!(f, "Invalid boost factor '{}' at {}", text, position),
            },
        }
    }
}

impl std::error::Error for LexError {}

pub struct Lexer {
    input: Vec<(usize, char)>,
    byte_len: usize,
    position: usize,
    token_start: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.char_indices().collect(),
            byte_len: input.len(),
            position: 0,
            token_start: 0,
        }
    }

    /// Splits the whole input, `Eof` included.
    pub fn tokenize(mut self) -> Result<Vec<(Token, Position)>, LexError> {
        let mut tokens = vec![];
        loop {
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push((token, self.token_start()));
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Where the most recently returned token starts.
    pub fn token_start(&self) -> Position {
        self.offset_of(self.token_start)
    }

    fn offset_of(&self, index: usize) -> Position {
        Position {
            offset: self
                .input
                .get(index)
                .map(|(offset, _)| *offset)
                .unwrap_or(self.byte_len),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).map(|(_, c)| *c)
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).map(|(_, c)| *c)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn is_special(ch: char) -> bool {
        ch.is_whitespace()
            || matches!(
                ch,
                '(' | ')' | '[' | ']' | '{' | '}' | ':' | '^' | '~' | '"' | '<' | '>'
            )
    }

    /// Reads `"..."`, quotes and escapes kept verbatim.
    fn read_phrase(&mut self) -> Result<String, LexError> {
        let start = self.offset_of(self.position);
        let mut result = String::from('"');
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    result.push(ch);
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    result.push(ch);
                    self.advance();
                    match self.current_char() {
                        Some(escaped) => {
                            result.push(escaped);
                            self.advance();
                        }
                        None => return Err(LexError::UnterminatedPhrase { position: start }),
                    }
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedPhrase { position: start })
    }

    /// Reads `/.../`, slashes and escapes kept verbatim.
    fn read_regexp(&mut self) -> Result<String, LexError> {
        let start = self.offset_of(self.position);
        let mut result = String::from('/');
        self.advance(); // Consume opening slash

        while let Some(ch) = self.current_char() {
            result.push(ch);
            self.advance();
            match ch {
                '/' => return Ok(result),
                '\\' => match self.current_char() {
                    Some(escaped) => {
                        result.push(escaped);
                        self.advance();
                    }
                    None => return Err(LexError::UnterminatedRegexp { position: start }),
                },
                _ => {}
            }
        }

        Err(LexError::UnterminatedRegexp { position: start })
    }

    /// Reads a bare term and classifies it.
    fn read_term(&mut self) -> Result<Token, LexError> {
        let mut raw = String::new();
        let mut unescaped = String::new();
        let mut escaped = false;
        let mut wildcard = false;

        while let Some(ch) = self.current_char() {
            if Self::is_special(ch) {
                break;
            }
            if ch == '\\' {
                let position = self.offset_of(self.position);
                self.advance();
                let Some(next) = self.current_char() else {
                    return Err(LexError::DanglingEscape { position });
                };
                raw.push('\\');
                raw.push(next);
                unescaped.push(next);
                escaped = true;
                self.advance();
                continue;
            }
            if ch == '*' || ch == '?' {
                wildcard = true;
            }
            raw.push(ch);
            unescaped.push(ch);
            self.advance();
        }

        if self.current_char() == Some(':') {
            return Ok(Token::Field(unescaped));
        }
        if wildcard {
            return Ok(Token::Wildcard(raw));
        }
        if escaped {
            return Ok(Token::Term(raw));
        }

        Ok(match raw.as_str() {
            "AND" => Token::And,
            "OR" => Token::Or,
            "NOT" => Token::Not,
            "TO" => Token::To,
            _ => classify_number(&raw).unwrap_or(Token::Term(raw)),
        })
    }

    /// Reads the number glued to a `^` or `~`.
    fn read_modifier_number(&mut self) -> String {
        let mut number = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() || ch == '.' {
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        number
    }

    fn read_boost(&mut self) -> Result<Token, LexError> {
        let position = self.offset_of(self.position);
        self.advance(); // Consume '^'
        let number = self.read_modifier_number();
        if number.is_empty() {
            return Ok(Token::Caret(None));
        }
        match number.parse::<f32>() {
            Ok(factor) => Ok(Token::Caret(Some(factor))),
            Err(_) => Err(LexError::InvalidModifier {
                character: '^',
                text: number,
                position,
            }),
        }
    }

    fn read_fuzzy(&mut self) -> Result<Token, LexError> {
        let position = self.offset_of(self.position);
        self.advance(); // Consume '~'
        let number = self.read_modifier_number();
        if number.is_empty() {
            return Ok(Token::Tilde(None));
        }
        match number.parse::<u32>() {
            Ok(distance) => Ok(Token::Tilde(Some(distance))),
            Err(_) => Err(LexError::InvalidModifier {
                character: '~',
                text: number,
                position,
            }),
        }
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    fn double(&mut self, token: Token) -> Token {
        self.advance();
        self.advance();
        token
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.token_start = self.position;

        let token = match self.current_char() {
            None => Token::Eof,
            Some('(') => self.single(Token::LParen),
            Some(')') => self.single(Token::RParen),
            Some('[') => self.single(Token::LBracket),
            Some(']') => self.single(Token::RBracket),
            Some('{') => self.single(Token::LBrace),
            Some('}') => self.single(Token::RBrace),
            Some(':') => self.single(Token::Colon),
            Some('+') => self.single(Token::Plus),
            Some('-') => self.single(Token::Minus),
            Some('^') => self.read_boost()?,
            Some('~') => self.read_fuzzy()?,
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.double(Token::GtEq)
                } else {
                    self.single(Token::Gt)
                }
            }
            Some('<') => {
                if self.peek_char(1) == Some('=') {
                    self.double(Token::LtEq)
                } else {
                    self.single(Token::Lt)
                }
            }
            Some('!') => self.single(Token::Not),
            Some('&') => {
                if self.peek_char(1) == Some('&') {
                    self.double(Token::And)
                } else {
                    return Err(LexError::UnexpectedCharacter {
                        character: '&',
                        position: self.token_start(),
                        hint: Some("did you mean '&&'?"),
                    });
                }
            }
            Some('|') => {
                if self.peek_char(1) == Some('|') {
                    self.double(Token::Or)
                } else {
                    return Err(LexError::UnexpectedCharacter {
                        character: '|',
                        position: self.token_start(),
                        hint: Some("did you mean '||'?"),
                    });
                }
            }
            Some('"') => {
                let phrase = self.read_phrase()?;
                if self.current_char() == Some(':') {
                    Token::Field(phrase)
                } else {
                    Token::Phrase(phrase)
                }
            }
            Some('/') => Token::Regexp(self.read_regexp()?),
            Some(ch) if ch.is_control() => {
                return Err(LexError::UnexpectedCharacter {
                    character: ch,
                    position: self.token_start(),
                    hint: None,
                });
            }
            Some(_) => self.read_term()?,
        };

        trace!("token {:?} at {}", token, self.token_start());
        Ok(token)
    }
}

/// Number token keeping the digits as written; `None` for anything that is
/// not a plain decimal or does not fit `i64`/a finite `f64`.
fn classify_number(text: &str) -> Option<Token> {
    if !text.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let raw = text.to_string();
    if text.chars().all(|c| c.is_ascii_digit()) {
        return text.parse::<i64>().ok().map(|value| Token::Integer { value, raw });
    }
    let (whole, fraction) = text.split_once('.')?;
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if digits(whole) && digits(fraction) {
        return text
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(|value| Token::Float { value, raw });
    }
    None
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("AND OR NOT TO and");
    assert_eq!(lexer.next_token().unwrap(), Token::And);
    assert_eq!(lexer.next_token().unwrap(), Token::Or);
    assert_eq!(lexer.next_token().unwrap(), Token::Not);
    assert_eq!(lexer.next_token().unwrap(), Token::To);
    assert_eq!(lexer.next_token().unwrap(), Token::Term("and".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_field_clause() {
    let mut lexer = Lexer::new("title:elastic~2^1.5");
    assert_eq!(lexer.next_token().unwrap(), Token::Field("title".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Colon);
    assert_eq!(lexer.next_token().unwrap(), Token::Term("elastic".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Tilde(Some(2)));
    assert_eq!(lexer.next_token().unwrap(), Token::Caret(Some(1.5)));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}
