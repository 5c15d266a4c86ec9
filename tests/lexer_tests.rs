// tests/lexer_tests.rs

use lucene_dsl::ast::Token;
use lucene_dsl::lexer::{LexError, Lexer, Position};

fn tokens(input: &str) -> Vec<Token> {
    Lexer::new(input)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

fn integer(raw: &str) -> Token {
    Token::Integer {
        value: raw.parse().unwrap(),
        raw: raw.to_string(),
    }
}

fn float(raw: &str) -> Token {
    Token::Float {
        value: raw.parse().unwrap(),
        raw: raw.to_string(),
    }
}

// ============================================================================
// Punctuation
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("(", Token::LParen),
        (")", Token::RParen),
        ("[", Token::LBracket),
        ("]", Token::RBracket),
        ("{", Token::LBrace),
        ("}", Token::RBrace),
        (":", Token::Colon),
        ("+", Token::Plus),
        ("-", Token::Minus),
        ("!", Token::Not),
        (">", Token::Gt),
        ("<", Token::Lt),
        ("^", Token::Caret(None)),
        ("~", Token::Tilde(None)),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_two_char_tokens() {
    let test_cases = vec![
        (">=", Token::GtEq),
        ("<=", Token::LtEq),
        ("&&", Token::And),
        ("||", Token::Or),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_empty_input() {
    assert_eq!(tokens(""), vec![Token::Eof]);
    assert_eq!(tokens("   \t\n"), vec![Token::Eof]);
}

// ============================================================================
// Keywords and terms
// ============================================================================

#[test]
fn test_keywords() {
    let test_cases = vec![
        ("AND", Token::And),
        ("OR", Token::Or),
        ("NOT", Token::Not),
        ("TO", Token::To),
    ];

    for (input, expected) in test_cases {
        assert_eq!(tokens(input), vec![expected, Token::Eof], "Failed for input: {}", input);
    }
}

#[test]
fn test_keywords_are_case_sensitive() {
    for input in ["and", "Or", "not", "to", "ANDROID"] {
        assert_eq!(
            tokens(input),
            vec![Token::Term(input.to_string()), Token::Eof],
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_terms() {
    for input in ["foo", "foo-bar", "a/b", "user@example.com", "über"] {
        assert_eq!(
            tokens(input),
            vec![Token::Term(input.to_string()), Token::Eof],
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_numbers() {
    assert_eq!(tokens("42"), vec![integer("42"), Token::Eof]);
    assert_eq!(tokens("3.14"), vec![float("3.14"), Token::Eof]);
}

#[test]
fn test_numbers_keep_their_digits() {
    assert_eq!(
        tokens("007"),
        vec![Token::Integer { value: 7, raw: "007".into() }, Token::Eof]
    );
    assert_eq!(
        tokens("1.10"),
        vec![Token::Float { value: 1.1, raw: "1.10".into() }, Token::Eof]
    );
    assert_eq!(tokens("1.0").first().map(Token::to_string).as_deref(), Some("number 1.0"));
}

#[test]
fn test_oversized_numbers_are_terms() {
    let huge_integer = "9".repeat(30);
    let huge_float = format!("{}.0", "9".repeat(400));
    for input in [huge_integer, huge_float] {
        assert_eq!(
            tokens(&input),
            vec![Token::Term(input.clone()), Token::Eof],
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_number_like_terms() {
    for input in ["1.2.3", "10a", "1.", "2024-01-01"] {
        assert_eq!(
            tokens(input),
            vec![Token::Term(input.to_string()), Token::Eof],
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_wildcards() {
    assert_eq!(tokens("elas*"), vec![Token::Wildcard("elas*".into()), Token::Eof]);
    assert_eq!(tokens("te?t"), vec![Token::Wildcard("te?t".into()), Token::Eof]);
    assert_eq!(tokens("*"), vec![Token::Wildcard("*".into()), Token::Eof]);
}

#[test]
fn test_escaped_wildcard_is_a_term() {
    assert_eq!(tokens(r"a\*b"), vec![Token::Term(r"a\*b".into()), Token::Eof]);
}

#[test]
fn test_phrase_kept_verbatim() {
    assert_eq!(
        tokens(r#""quick brown fox""#),
        vec![Token::Phrase(r#""quick brown fox""#.into()), Token::Eof]
    );
    assert_eq!(
        tokens(r#""say \"hi\"""#),
        vec![Token::Phrase(r#""say \"hi\"""#.into()), Token::Eof]
    );
}

#[test]
fn test_regexp_kept_verbatim() {
    assert_eq!(tokens("/b*ar/"), vec![Token::Regexp("/b*ar/".into()), Token::Eof]);
    assert_eq!(tokens(r"/a\/b/"), vec![Token::Regexp(r"/a\/b/".into()), Token::Eof]);
}

// ============================================================================
// Field clauses
// ============================================================================

#[test]
fn test_field_name() {
    assert_eq!(
        tokens("title:elastic"),
        vec![
            Token::Field("title".into()),
            Token::Colon,
            Token::Term("elastic".into()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_field_name_with_escaped_space() {
    assert_eq!(
        tokens(r"a\ b:1"),
        vec![Token::Field("a b".into()), Token::Colon, integer("1"), Token::Eof]
    );
}

#[test]
fn test_quoted_field_name() {
    assert_eq!(
        tokens(r#""foo bar":x"#),
        vec![
            Token::Field(r#""foo bar""#.into()),
            Token::Colon,
            Token::Term("x".into()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_number_before_colon_is_a_field() {
    assert_eq!(
        tokens("2024:x"),
        vec![Token::Field("2024".into()), Token::Colon, Token::Term("x".into()), Token::Eof]
    );
}

#[test]
fn test_range_tokens() {
    assert_eq!(
        tokens("a:[1 TO *}"),
        vec![
            Token::Field("a".into()),
            Token::Colon,
            Token::LBracket,
            integer("1"),
            Token::To,
            Token::Wildcard("*".into()),
            Token::RBrace,
            Token::Eof,
        ]
    );
}

#[test]
fn test_comparison_tokens() {
    assert_eq!(
        tokens("a:>=10"),
        vec![Token::Field("a".into()), Token::Colon, Token::GtEq, integer("10"), Token::Eof]
    );
}

// ============================================================================
// Modifiers
// ============================================================================

#[test]
fn test_boost_and_fuzzy() {
    assert_eq!(
        tokens("foo^2 bar^1.5 baz~ qux~3"),
        vec![
            Token::Term("foo".into()),
            Token::Caret(Some(2.0)),
            Token::Term("bar".into()),
            Token::Caret(Some(1.5)),
            Token::Term("baz".into()),
            Token::Tilde(None),
            Token::Term("qux".into()),
            Token::Tilde(Some(3)),
            Token::Eof,
        ]
    );
}

#[test]
fn test_fractional_fuzzy_distance_is_invalid() {
    let err = Lexer::new("foo~1.5").tokenize().unwrap_err();
    assert_eq!(
        err,
        LexError::InvalidModifier {
            character: '~',
            text: "1.5".into(),
            position: Position { offset: 3 },
        }
    );
    assert!(err.to_string().contains("expected a whole number"));
}

#[test]
fn test_malformed_boost_is_invalid() {
    let err = Lexer::new("foo^1.2.3").tokenize().unwrap_err();
    assert!(matches!(err, LexError::InvalidModifier { character: '^', .. }));
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn test_token_positions() {
    let positions: Vec<usize> = Lexer::new("a:b AND c")
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|(_, position)| position.offset)
        .collect();
    assert_eq!(positions, vec![0, 1, 2, 4, 8, 9]);
}

#[test]
fn test_positions_are_byte_offsets() {
    let positions: Vec<usize> = Lexer::new("é:x")
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|(_, position)| position.offset)
        .collect();
    assert_eq!(positions, vec![0, 2, 3, 4]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_single_ampersand() {
    let result = Lexer::new("a & b").tokenize();
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert_eq!(err.position(), Position { offset: 2 });
    assert!(err.to_string().contains("did you mean '&&'?"));
}

#[test]
fn test_single_pipe() {
    let err = Lexer::new("a | b").tokenize().unwrap_err();
    assert!(matches!(err, LexError::UnexpectedCharacter { character: '|', .. }));
}

#[test]
fn test_unterminated_phrase() {
    let err = Lexer::new(r#"a:"open"#).tokenize().unwrap_err();
    assert_eq!(err, LexError::UnterminatedPhrase { position: Position { offset: 2 } });
    assert!(err.to_string().contains("missing closing quote"));
}

#[test]
fn test_unterminated_regexp() {
    let err = Lexer::new("/abc").tokenize().unwrap_err();
    assert_eq!(err, LexError::UnterminatedRegexp { position: Position { offset: 0 } });
}

#[test]
fn test_dangling_escape() {
    let err = Lexer::new(r"abc\").tokenize().unwrap_err();
    assert_eq!(err, LexError::DanglingEscape { position: Position { offset: 3 } });
}

#[test]
fn test_control_character() {
    let err = Lexer::new("a \u{7}").tokenize().unwrap_err();
    assert!(matches!(err, LexError::UnexpectedCharacter { character: '\u{7}', hint: None, .. }));
}
