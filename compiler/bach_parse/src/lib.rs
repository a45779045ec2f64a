//! Recursive descent parser for Bach.
//!
//! Turns source text into a `bach_ir::Expr`. A program is a single
//! composition: components written one after another, each consuming the
//! previous one's output.

mod cursor;
mod grammar;

pub use cursor::Cursor;

use bach_diagnostic::{Diagnostic, ErrorCode};
use bach_ir::{Expr, Span};
use bach_types::Type;

/// Parser state.
///
/// The source text is kept so that string interpolations, which the lexer
/// hands over as spans, can be lexed and parsed in place.
pub struct Parser<'a> {
    source: &'a str,
    cursor: Cursor,
}

impl<'a> Parser<'a> {
    /// Lex and prepare to parse `span` of `source`.
    pub fn new(source: &'a str, span: Span) -> Result<Self, Diagnostic> {
        let tokens = bach_lexer::lex_span(source, span)?;
        Ok(Parser {
            source,
            cursor: Cursor::new(tokens),
        })
    }

    /// Parse a composition that must span the whole input.
    pub fn parse_program(&mut self) -> Result<Expr, Diagnostic> {
        let expr = self.parse_composition()?;
        if !self.cursor.is_at_end() {
            return Err(Diagnostic::syntax_error(ErrorCode::ExpectedExpression)
                .with_message(format!(
                    "expected an expression, found {}",
                    self.cursor.current_kind().describe()
                ))
                .with_span(self.cursor.current_span()));
        }
        Ok(expr)
    }
}

fn whole(source: &str) -> Span {
    Span::new(0, u32::try_from(source.len()).unwrap_or(u32::MAX))
}

/// Parse a whole program.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse(source: &str) -> Result<Expr, Diagnostic> {
    Parser::new(source, whole(source))?.parse_program()
}

/// Parse a standalone type, e.g. `Arr<Num, Str...>`.
pub fn parse_type(source: &str) -> Result<Type, Diagnostic> {
    let mut parser = Parser::new(source, whole(source))?;
    let ty = parser.parse_type()?;
    if !parser.cursor.is_at_end() {
        return Err(parser.cursor.unexpected("end of type"));
    }
    Ok(ty)
}

#[cfg(test)]
mod tests;
