//! Pattern parsing for `is` clauses and `=` assignments.

use bach_diagnostic::Diagnostic;
use bach_ir::{Pattern, PatternKind};
use bach_lexer::TokenKind;
use bach_types::Type;

use crate::Parser;

impl Parser<'_> {
    /// ```text
    /// pattern := '[' [pattern (',' pattern)*] [';' pattern] ']' [name]
    ///          | '{' [key ':' pattern (',' key ':' pattern)*] '}' [name]
    ///          | type [name] | name
    /// ```
    pub(crate) fn parse_pattern(&mut self) -> Result<Pattern, Diagnostic> {
        bach_stack::with_stack(|| self.parse_pattern_inner())
    }

    fn parse_pattern_inner(&mut self) -> Result<Pattern, Diagnostic> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::LBracket => {
                self.cursor.advance();
                self.parse_array_pattern()?
            }
            TokenKind::LBrace => {
                self.cursor.advance();
                self.parse_record_pattern()?
            }
            _ if self.at_type_start() => {
                let ty = self.parse_type()?;
                PatternKind::Type {
                    ty,
                    name: self.eat_binding_name(),
                }
            }
            _ => match self.eat_binding_name() {
                Some(name) => PatternKind::Type {
                    ty: Type::Any,
                    name: Some(name),
                },
                None => return Err(self.cursor.unexpected("a pattern")),
            },
        };
        Ok(Pattern::new(kind, start.merge(self.cursor.previous_span())))
    }

    /// After `[`.
    fn parse_array_pattern(&mut self) -> Result<PatternKind, Diagnostic> {
        let mut elems = Vec::new();
        let mut rest = None;
        if !self.cursor.check(&TokenKind::RBracket) {
            if !self.cursor.check(&TokenKind::Semicolon) {
                elems.push(self.parse_pattern()?);
                while self.cursor.eat(&TokenKind::Comma) {
                    elems.push(self.parse_pattern()?);
                }
            }
            if self.cursor.eat(&TokenKind::Semicolon) {
                rest = Some(Box::new(self.parse_pattern()?));
            }
        }
        self.cursor.expect(&TokenKind::RBracket)?;
        Ok(PatternKind::Array {
            elems,
            rest,
            name: self.eat_binding_name(),
        })
    }

    /// After `{`.
    fn parse_record_pattern(&mut self) -> Result<PatternKind, Diagnostic> {
        let mut props = Vec::new();
        if !self.cursor.check(&TokenKind::RBrace) {
            loop {
                let key = self.parse_key()?;
                self.cursor.expect(&TokenKind::Colon)?;
                props.push((key, self.parse_pattern()?));
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.cursor.expect(&TokenKind::RBrace)?;
        Ok(PatternKind::Record {
            props,
            name: self.eat_binding_name(),
        })
    }
}

#[cfg(test)]
mod tests;
