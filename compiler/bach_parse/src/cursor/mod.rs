//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use bach_diagnostic::{Diagnostic, ErrorCode};
use bach_ir::{Name, Span};
use bach_lexer::{Token, TokenKind};

/// Cursor over a token vector that always ends in `Eof`.
///
/// Operator runs can be consumed piecewise with [`Cursor::eat_op_prefix`],
/// which is how type syntax such as `Arr<<A>...>` is read out of the
/// operator tokens the lexer produces.
pub struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
    previous: Span,
}

impl Cursor {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(Token { kind: TokenKind::Eof, .. })) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::new(TokenKind::Eof, Span::point(end)));
        }
        Cursor {
            tokens,
            pos: 0,
            previous: Span::DUMMY,
        }
    }

    /// Get the current token. Never past the final `Eof`.
    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the last consumed token (or token piece).
    #[inline]
    pub fn previous_span(&self) -> Span {
        self.previous
    }

    /// The kind of the token after the current one.
    pub fn peek_next_kind(&self) -> &TokenKind {
        let next = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[next].kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Whether the current token starts exactly where the previous one
    /// ended.
    pub fn is_adjacent(&self) -> bool {
        self.pos > 0 && self.current_span().start == self.previous.end
    }

    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Check for an operator token with exactly this text.
    pub fn check_op(&self, op: &str) -> bool {
        matches!(self.current_kind(), TokenKind::Op(o) if &**o == op)
    }

    /// Advance past the current token, returning it.
    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        self.previous = token.span;
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail with `UnexpectedToken`.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<Span, Diagnostic> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(&kind.describe()))
        }
    }

    /// Consume `prefix` from the front of the current operator token,
    /// leaving the remainder of the run as the current token.
    pub fn eat_op_prefix(&mut self, prefix: &str) -> bool {
        let rest = match self.current_kind() {
            TokenKind::Op(op) => op.strip_prefix(prefix).map(Name::from),
            _ => None,
        };
        let Some(rest) = rest else {
            return false;
        };
        if rest.is_empty() {
            self.advance();
            return true;
        }
        let span = self.current_span();
        let len = u32::try_from(prefix.len()).unwrap_or(u32::MAX);
        let split = span.start.saturating_add(len);
        self.previous = Span::new(span.start, split);
        self.tokens[self.pos] = Token::new(TokenKind::Op(rest), Span::new(split, span.end));
        true
    }

    /// An `UnexpectedToken` error at the current token.
    pub fn unexpected(&self, expected: &str) -> Diagnostic {
        Diagnostic::syntax_error(ErrorCode::UnexpectedToken)
            .with_message(format!(
                "expected {expected}, found {}",
                self.current_kind().describe()
            ))
            .with_span(self.current_span())
    }
}
