//! String literal scanning.
//!
//! A string literal is a sequence of literal text and `{composition}`
//! interpolations. Interpolated compositions are not lexed here; their
//! source spans are recorded so the parser can lex and parse them in place.

use bach_ir::Span;
use logos::Lexer;

use crate::raw_token::{LexError, RawToken};

/// One piece of a string literal.
#[derive(Clone, Debug, PartialEq)]
pub enum StrPart {
    /// Literal text with escapes resolved.
    Lit(String),
    /// An interpolated composition, by its span in the source.
    Expr(Span),
}

/// Logos callback for a string literal, invoked after the opening quote.
pub(crate) fn scan_string(lex: &mut Lexer<'_, RawToken>) -> Result<Vec<StrPart>, LexError> {
    let rest = lex.remainder();
    let base = lex.span().end;
    match scan_parts(rest, base) {
        Ok((parts, len)) => {
            lex.bump(len);
            Ok(parts)
        }
        Err(err) => {
            lex.bump(rest.len());
            Err(err)
        }
    }
}

/// Split a string body into parts. Returns the parts and the number of bytes
/// consumed, including the closing quote.
fn scan_parts(rest: &str, base: usize) -> Result<(Vec<StrPart>, usize), LexError> {
    let bytes = rest.as_bytes();
    let mut parts = Vec::new();
    let mut lit = String::new();
    let mut seg = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                lit.push_str(&rest[seg..i]);
                if !lit.is_empty() || parts.is_empty() {
                    parts.push(StrPart::Lit(lit));
                }
                return Ok((parts, i + 1));
            }
            b'\\' => {
                lit.push_str(&rest[seg..i]);
                lit.push(match bytes.get(i + 1) {
                    Some(b'"') => '"',
                    Some(b'\\') => '\\',
                    Some(b'n') => '\n',
                    Some(b't') => '\t',
                    Some(_) => return Err(LexError::InvalidEscape),
                    None => return Err(LexError::UnterminatedString),
                });
                i += 2;
                seg = i;
            }
            b'{' if bytes.get(i + 1) == Some(&b'{') => {
                lit.push_str(&rest[seg..=i]);
                i += 2;
                seg = i;
            }
            b'}' if bytes.get(i + 1) == Some(&b'}') => {
                lit.push_str(&rest[seg..=i]);
                i += 2;
                seg = i;
            }
            b'}' => return Err(LexError::InvalidTemplate),
            b'{' => {
                lit.push_str(&rest[seg..i]);
                if !lit.is_empty() {
                    parts.push(StrPart::Lit(std::mem::take(&mut lit)));
                }
                let end = skip_braces(bytes, i + 1).ok_or(LexError::UnterminatedString)?;
                parts.push(StrPart::Expr(Span::from_range(base + i + 1..base + end - 1)));
                i = end;
                seg = i;
            }
            _ => i += 1,
        }
    }
    Err(LexError::UnterminatedString)
}

/// Index just past the `"` closing a string whose body starts at `i`.
fn skip_string(s: &[u8], mut i: usize) -> Option<usize> {
    while i < s.len() {
        match s[i] {
            b'\\' => i += 2,
            b'"' => return Some(i + 1),
            b'{' if s.get(i + 1) == Some(&b'{') => i += 2,
            b'}' if s.get(i + 1) == Some(&b'}') => i += 2,
            b'{' => i = skip_braces(s, i + 1)?,
            _ => i += 1,
        }
    }
    None
}

/// Index just past the `}` closing an interpolation that starts at `i`.
fn skip_braces(s: &[u8], mut i: usize) -> Option<usize> {
    let mut depth = 0usize;
    while i < s.len() {
        match s[i] {
            b'"' => i = skip_string(s, i + 1)?,
            b'#' => {
                while i < s.len() && s[i] != b'\n' {
                    i += 1;
                }
            }
            b'{' => {
                depth += 1;
                i += 1;
            }
            b'}' if depth == 0 => return Some(i + 1),
            b'}' => {
                depth -= 1;
                i += 1;
            }
            _ => i += 1,
        }
    }
    None
}
