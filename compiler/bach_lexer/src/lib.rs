//! Lexer for Bach using logos.
//!
//! Produces a token vector terminated by `Eof`. String literals arrive
//! pre-split into literal text and interpolation spans.

mod raw_token;
mod template;
mod token;

use bach_diagnostic::{Diagnostic, ErrorCode};
use bach_ir::Span;
use logos::Logos;

use raw_token::{LexError, RawToken};

pub use template::StrPart;
pub use token::{Token, TokenKind};

/// Lex a whole program.
pub fn lex(source: &str) -> Result<Vec<Token>, Diagnostic> {
    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    lex_span(source, Span::new(0, end))
}

/// Lex the part of `source` covered by `span`. Token spans stay relative to
/// the whole of `source`.
pub fn lex_span(source: &str, span: Span) -> Result<Vec<Token>, Diagnostic> {
    let range = span.to_range();
    let text = source.get(range.clone()).unwrap_or_default();
    let offset = range.start;
    let mut tokens = Vec::new();
    let mut logos = RawToken::lexer(text);

    while let Some(result) = logos.next() {
        let local = logos.span();
        let span = Span::from_range(offset + local.start..offset + local.end);
        let slice = logos.slice();
        let raw = result.map_err(|err| lex_error(err, span))?;
        let kind = match raw {
            RawToken::As => TokenKind::As,
            RawToken::Def => TokenKind::Def,
            RawToken::Elif => TokenKind::Elif,
            RawToken::Elis => TokenKind::Elis,
            RawToken::Else => TokenKind::Else,
            RawToken::False => TokenKind::False,
            RawToken::For => TokenKind::For,
            RawToken::If => TokenKind::If,
            RawToken::Is => TokenKind::Is,
            RawToken::Null => TokenKind::Null,
            RawToken::Ok => TokenKind::Ok,
            RawToken::Then => TokenKind::Then,
            RawToken::True => TokenKind::True,
            RawToken::With => TokenKind::With,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Colon => TokenKind::Colon,
            RawToken::At => TokenKind::At,
            RawToken::Op => TokenKind::Op(slice.into()),
            RawToken::Ident => TokenKind::Ident(slice.into()),
            RawToken::Num(n) => {
                // `2x` is a malformed number, not a number followed by a call
                if logos
                    .remainder()
                    .starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
                {
                    return Err(lex_error(LexError::InvalidNumber, span));
                }
                TokenKind::Num(n)
            }
            RawToken::Str(parts) => TokenKind::Str(parts),
        };
        tokens.push(Token::new(kind, span));
    }

    tokens.push(Token::new(TokenKind::Eof, Span::point(span.end)));
    Ok(tokens)
}

fn lex_error(err: LexError, span: Span) -> Diagnostic {
    let (code, message) = match err {
        LexError::InvalidCharacter => (ErrorCode::InvalidCharacter, "invalid character"),
        LexError::InvalidNumber => (ErrorCode::InvalidNumber, "malformed number literal"),
        LexError::UnterminatedString => (ErrorCode::UnterminatedString, "unterminated string literal"),
        LexError::InvalidEscape => (
            ErrorCode::InvalidEscape,
            "invalid escape sequence; expected one of \\\" \\\\ \\n \\t",
        ),
        LexError::InvalidTemplate => (
            ErrorCode::InvalidTemplate,
            "unmatched `}` in string; write `}}` for a literal brace",
        ),
    };
    Diagnostic::syntax_error(code).with_message(message).with_span(span)
}

#[cfg(test)]
mod tests;
