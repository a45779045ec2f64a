//! Type parsing.
//!
//! The lexer does not know about type syntax, so `<`, `>`, `|` and `...`
//! arrive inside operator runs (`Arr<<A>...>` lexes as `Arr`, `<<`, `A`,
//! `>...>`) and are taken apart with `eat_op_prefix`.

use std::collections::BTreeMap;

use bach_diagnostic::{Diagnostic, ErrorCode};
use bach_lexer::TokenKind;
use bach_types::Type;

use crate::Parser;

impl Parser<'_> {
    /// Parse `atom ('|' atom)*`.
    pub(crate) fn parse_type(&mut self) -> Result<Type, Diagnostic> {
        let mut alternatives = vec![self.parse_type_atom()?];
        while self.cursor.eat_op_prefix("|") {
            alternatives.push(self.parse_type_atom()?);
        }
        Ok(Type::union(alternatives))
    }

    fn parse_type_atom(&mut self) -> Result<Type, Diagnostic> {
        if self.cursor.eat_op_prefix("<") {
            return self.parse_type_var();
        }
        let TokenKind::Ident(name) = self.cursor.current_kind() else {
            return Err(self.cursor.unexpected("a type"));
        };
        let name = name.clone();
        let ty = match &*name {
            "Void" => Type::Void,
            "Null" => Type::Null,
            "Bool" => Type::Bool,
            "Num" => Type::Num,
            "Str" => Type::Str,
            "Any" => Type::Any,
            "Arr" => {
                self.cursor.advance();
                return self.parse_arr_type();
            }
            "Obj" => {
                self.cursor.advance();
                return self.parse_obj_type();
            }
            other => {
                return Err(Diagnostic::syntax_error(ErrorCode::UnknownType)
                    .with_message(format!("unknown type `{other}`"))
                    .with_name(other)
                    .with_span(self.cursor.current_span()));
            }
        };
        self.cursor.advance();
        Ok(ty)
    }

    /// `<A>` or `<A bound>`, after the `<`.
    fn parse_type_var(&mut self) -> Result<Type, Diagnostic> {
        let TokenKind::Ident(name) = self.cursor.current_kind() else {
            return Err(self.cursor.unexpected("a type variable name"));
        };
        let name = name.clone();
        self.cursor.advance();
        if self.cursor.eat_op_prefix(">") {
            return Ok(Type::var(name, Type::Any));
        }
        let bound = self.parse_type()?;
        self.expect_close_angle()?;
        Ok(Type::var(name, bound))
    }

    /// `Arr<...>`, after `Arr`.
    fn parse_arr_type(&mut self) -> Result<Type, Diagnostic> {
        self.expect_open_angle()?;
        if self.cursor.eat_op_prefix(">") {
            return Ok(Type::empty_arr());
        }
        let mut elems = vec![self.parse_type()?];
        let mut open = false;
        loop {
            if self.cursor.eat_op_prefix("...") {
                open = true;
                break;
            }
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
            elems.push(self.parse_type()?);
        }
        self.expect_close_angle()?;
        if open {
            let tail = elems.pop().map_or(Type::Void, Type::arr);
            Ok(Type::prefixed(elems, tail))
        } else {
            Ok(Type::tuple(elems))
        }
    }

    /// `Obj<...>`, after `Obj`.
    fn parse_obj_type(&mut self) -> Result<Type, Diagnostic> {
        self.expect_open_angle()?;
        let mut props = BTreeMap::new();
        let mut rest = Type::Void;
        if !self.cursor.eat_op_prefix(">") {
            loop {
                if matches!(self.cursor.peek_next_kind(), TokenKind::Colon) {
                    let key = self.parse_key()?;
                    self.cursor.expect(&TokenKind::Colon)?;
                    props.insert(key, self.parse_type()?);
                } else {
                    rest = self.parse_type()?;
                    break;
                }
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect_close_angle()?;
        }
        Ok(Type::obj(props, rest))
    }

    fn expect_open_angle(&mut self) -> Result<(), Diagnostic> {
        if self.cursor.eat_op_prefix("<") {
            Ok(())
        } else {
            Err(self.cursor.unexpected("`<`"))
        }
    }

    fn expect_close_angle(&mut self) -> Result<(), Diagnostic> {
        if self.cursor.eat_op_prefix(">") {
            Ok(())
        } else {
            Err(self.cursor.unexpected("`>`"))
        }
    }
}

#[cfg(test)]
mod tests;
