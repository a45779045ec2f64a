//! Grammar productions, one file per syntactic category.

mod def;
mod expr;
mod pattern;
mod ty;

use bach_ir::Name;
use bach_lexer::TokenKind;

use crate::Parser;

/// Capitalized names are reserved for types.
fn is_capitalized(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_uppercase())
}

impl Parser<'_> {
    /// Parse a record key: a name, a string without interpolation, or a
    /// number.
    pub(crate) fn parse_key(&mut self) -> Result<Name, bach_diagnostic::Diagnostic> {
        let key = match self.cursor.current_kind() {
            TokenKind::Ident(name) => name.clone(),
            TokenKind::Str(parts) => match plain_string(parts) {
                Some(s) => s.into(),
                None => return Err(self.cursor.unexpected("a record key")),
            },
            TokenKind::Num(n) => format!("{n}").into(),
            _ => return Err(self.cursor.unexpected("a record key")),
        };
        self.cursor.advance();
        Ok(key)
    }

    /// Whether the current token can begin a type.
    pub(crate) fn at_type_start(&self) -> bool {
        match self.cursor.current_kind() {
            TokenKind::Ident(name) => is_capitalized(name),
            TokenKind::Op(op) => op.starts_with('<'),
            _ => false,
        }
    }

    /// Consume a binding name if one follows.
    pub(crate) fn eat_binding_name(&mut self) -> Option<Name> {
        match self.cursor.current_kind() {
            TokenKind::Ident(name) if !is_capitalized(name) => {
                let name = name.clone();
                self.cursor.advance();
                Some(name)
            }
            _ => None,
        }
    }
}

/// The text of a string literal without interpolations.
pub(crate) fn plain_string(parts: &[bach_lexer::StrPart]) -> Option<&str> {
    match parts {
        [bach_lexer::StrPart::Lit(s)] => Some(s),
        _ => None,
    }
}
