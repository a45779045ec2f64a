#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).unwrap().into_iter().map(|t| t.kind).collect()
}

fn op(s: &str) -> TokenKind {
    TokenKind::Op(s.into())
}

fn ident(s: &str) -> TokenKind {
    TokenKind::Ident(s.into())
}

#[test]
fn test_lex_pipeline() {
    assert_eq!(
        kinds("1 +2 *3"),
        vec![
            TokenKind::Num(1.0),
            op("+"),
            TokenKind::Num(2.0),
            op("*"),
            TokenKind::Num(3.0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_definition() {
    assert_eq!(
        kinds("for Num def fac Num as ==0 ok"),
        vec![
            TokenKind::For,
            ident("Num"),
            TokenKind::Def,
            ident("fac"),
            ident("Num"),
            TokenKind::As,
            op("=="),
            TokenKind::Num(0.0),
            TokenKind::Ok,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_type_syntax_stays_in_op_runs() {
    assert_eq!(
        kinds("Arr<<A>...>"),
        vec![ident("Arr"), op("<<"), ident("A"), op(">...>"), TokenKind::Eof]
    );
}

#[test]
fn test_lex_punctuation_and_comments() {
    assert_eq!(
        kinds("[1; x] # trailing\n{a: @b}"),
        vec![
            TokenKind::LBracket,
            TokenKind::Num(1.0),
            TokenKind::Semicolon,
            ident("x"),
            TokenKind::RBracket,
            TokenKind::LBrace,
            ident("a"),
            TokenKind::Colon,
            TokenKind::At,
            ident("b"),
            TokenKind::RBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_numbers() {
    assert_eq!(
        kinds("0.5 12 1e3"),
        vec![TokenKind::Num(0.5), TokenKind::Num(12.0), TokenKind::Num(1000.0), TokenKind::Eof]
    );
    let err = lex("2x").unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidNumber);
}

#[test]
fn test_lex_keywords_need_word_boundary() {
    assert_eq!(kinds("isx is"), vec![ident("isx"), TokenKind::Is, TokenKind::Eof]);
}

#[test]
fn test_lex_string_token() {
    let tokens = lex(r#"x "a{1}b""#).unwrap();
    assert_eq!(tokens[1].span, Span::new(2, 9));
    assert_eq!(
        tokens[1].kind,
        TokenKind::Str(vec![
            StrPart::Lit("a".into()),
            StrPart::Expr(Span::new(5, 6)),
            StrPart::Lit("b".into()),
        ])
    );
}

#[test]
fn test_lex_span_keeps_absolute_positions() {
    let source = r#""{1 +2}""#;
    let tokens = lex_span(source, Span::new(2, 6)).unwrap();
    let spans: Vec<Span> = tokens.iter().map(|t| t.span).collect();
    assert_eq!(spans, vec![Span::new(2, 3), Span::new(4, 5), Span::new(5, 6), Span::point(6)]);
}

#[test]
fn test_lex_errors() {
    let err = lex("1 ` 2").unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidCharacter);
    assert_eq!(err.span, Some(Span::new(2, 3)));

    assert_eq!(lex(r#""abc"#).unwrap_err().code, ErrorCode::UnterminatedString);
    assert_eq!(lex(r#""\x""#).unwrap_err().code, ErrorCode::InvalidEscape);
    assert_eq!(lex(r#""}""#).unwrap_err().code, ErrorCode::InvalidTemplate);
}
