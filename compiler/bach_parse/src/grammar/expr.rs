//! Compositions and their components.

use bach_diagnostic::{Diagnostic, ErrorCode};
use bach_ir::{Clause, Expr, ExprKind, Key, Match, Name, Span, TemplatePart};
use bach_lexer::{StrPart, TokenKind};

use super::plain_string;
use crate::{Cursor, Parser};

impl Parser<'_> {
    /// `component*`, stopping at the first token that cannot start one.
    pub(crate) fn parse_composition(&mut self) -> Result<Expr, Diagnostic> {
        let start = Span::point(self.cursor.current_span().start);
        let mut components = Vec::new();
        while self.at_component_start() {
            components.push(self.parse_component()?);
        }
        Ok(Expr::compose_all(components, start))
    }

    fn at_component_start(&self) -> bool {
        matches!(
            self.cursor.current_kind(),
            TokenKind::Num(_)
                | TokenKind::Str(_)
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::LBracket
                | TokenKind::LBrace
                | TokenKind::LParen
                | TokenKind::At
                | TokenKind::For
                | TokenKind::Def
                | TokenKind::If
                | TokenKind::Is
                | TokenKind::Op(_)
                | TokenKind::Ident(_)
        )
    }

    fn parse_component(&mut self) -> Result<Expr, Diagnostic> {
        bach_stack::with_stack(|| self.parse_component_inner())
    }

    fn parse_component_inner(&mut self) -> Result<Expr, Diagnostic> {
        let start = self.cursor.current_span();
        match self.cursor.current_kind() {
            TokenKind::For | TokenKind::Def => self.parse_def(),
            TokenKind::If => self.parse_if(),
            TokenKind::Is => self.parse_match(),
            TokenKind::At => {
                self.cursor.advance();
                let key = self.parse_getter_key()?;
                Ok(Expr::new(ExprKind::Get(key), start.merge(self.cursor.previous_span())))
            }
            TokenKind::Op(op) if &**op == "=" => {
                self.cursor.advance();
                let pattern = self.parse_pattern()?;
                let span = start.merge(pattern.span);
                Ok(Expr::new(ExprKind::Assign(pattern), span))
            }
            TokenKind::Op(op) => {
                let name = op.clone();
                self.cursor.advance();
                let args = if self.cursor.is_adjacent() && self.cursor.check(&TokenKind::LParen) {
                    self.cursor.advance();
                    self.parse_list(&TokenKind::RParen, Self::parse_composition)?
                } else if self.cursor.is_adjacent() && self.at_operand_start() {
                    vec![self.parse_component()?]
                } else {
                    Vec::new()
                };
                let span = start.merge(self.cursor.previous_span());
                Ok(Expr::new(ExprKind::Call { name, args }, span))
            }
            TokenKind::Ident(_) => self.parse_call(),
            _ => self.parse_primary(),
        }
    }

    /// Whether the current token can be the argument written directly after
    /// an operator, as in `+2` or `*n`.
    fn at_operand_start(&self) -> bool {
        matches!(
            self.cursor.current_kind(),
            TokenKind::Num(_)
                | TokenKind::Str(_)
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::LBracket
                | TokenKind::LBrace
                | TokenKind::At
                | TokenKind::Ident(_)
        )
    }

    /// `name ['(' composition (',' composition)* ')']`
    fn parse_call(&mut self) -> Result<Expr, Diagnostic> {
        let token = self.cursor.advance();
        let TokenKind::Ident(name) = token.kind else {
            return Err(Diagnostic::syntax_error(ErrorCode::UnexpectedToken).with_span(token.span));
        };
        let args = if self.cursor.is_adjacent() && self.cursor.eat(&TokenKind::LParen) {
            self.parse_list(&TokenKind::RParen, Self::parse_composition)?
        } else {
            Vec::new()
        };
        let span = token.span.merge(self.cursor.previous_span());
        Ok(Expr::new(ExprKind::Call { name, args }, span))
    }

    /// Literals, array and record constructors, parenthesized compositions.
    fn parse_primary(&mut self) -> Result<Expr, Diagnostic> {
        let token = self.cursor.advance();
        let kind = match token.kind {
            TokenKind::Num(n) => ExprKind::Num(n),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Null => ExprKind::Null,
            TokenKind::Str(parts) => self.parse_string(parts)?,
            TokenKind::LParen => {
                let inner = self.parse_composition()?;
                self.cursor.expect(&TokenKind::RParen)?;
                let span = token.span.merge(self.cursor.previous_span());
                return Ok(Expr::new(inner.kind, span));
            }
            TokenKind::LBracket => self.parse_array()?,
            TokenKind::LBrace => self.parse_record()?,
            other => {
                return Err(Diagnostic::syntax_error(ErrorCode::ExpectedExpression)
                    .with_message(format!("expected an expression, found {}", other.describe()))
                    .with_span(token.span));
            }
        };
        Ok(Expr::new(kind, token.span.merge(self.cursor.previous_span())))
    }

    /// After `[`.
    fn parse_array(&mut self) -> Result<ExprKind, Diagnostic> {
        let mut elems = Vec::new();
        let mut rest = None;
        if !self.cursor.check(&TokenKind::RBracket) {
            if !self.cursor.check(&TokenKind::Semicolon) {
                elems.push(self.parse_composition()?);
                while self.cursor.eat(&TokenKind::Comma) {
                    elems.push(self.parse_composition()?);
                }
            }
            if self.cursor.eat(&TokenKind::Semicolon) {
                rest = Some(Box::new(self.parse_composition()?));
            }
        }
        self.cursor.expect(&TokenKind::RBracket)?;
        Ok(ExprKind::Array { elems, rest })
    }

    /// After `{`.
    fn parse_record(&mut self) -> Result<ExprKind, Diagnostic> {
        let fields = self.parse_list(&TokenKind::RBrace, |p| {
            let key = p.parse_key()?;
            p.cursor.expect(&TokenKind::Colon)?;
            Ok((key, p.parse_composition()?))
        })?;
        Ok(ExprKind::Record(fields))
    }

    /// `name`, string or non-negative integer after `@`.
    fn parse_getter_key(&mut self) -> Result<Key, Diagnostic> {
        let key = match self.cursor.current_kind() {
            TokenKind::Ident(name) => Key::Prop(name.clone()),
            TokenKind::Str(parts) => match plain_string(parts) {
                Some(s) => Key::Prop(s.into()),
                None => return Err(self.cursor.unexpected("a property name")),
            },
            TokenKind::Num(n) if n.fract() == 0.0 && *n >= 0.0 => {
                #[expect(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    reason = "checked to be a non-negative integer"
                )]
                let index = *n as usize;
                Key::Index(index)
            }
            TokenKind::Num(_) => {
                return Err(Diagnostic::syntax_error(ErrorCode::InvalidNumber)
                    .with_message("an index must be a non-negative integer")
                    .with_span(self.cursor.current_span()));
            }
            _ => return Err(self.cursor.unexpected("a property name or index")),
        };
        self.cursor.advance();
        Ok(key)
    }

    /// Resolve a string literal into a plain string or a template,
    /// parsing each interpolation in place.
    fn parse_string(&mut self, parts: Vec<StrPart>) -> Result<ExprKind, Diagnostic> {
        if let Some(s) = plain_string(&parts) {
            return Ok(ExprKind::Str(s.into()));
        }
        let mut template = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                StrPart::Lit(s) => template.push(TemplatePart::Lit(Name::from(s))),
                StrPart::Expr(span) => {
                    let mut inner = Parser {
                        source: self.source,
                        cursor: Cursor::new(bach_lexer::lex_span(self.source, span)?),
                    };
                    let expr = bach_stack::with_stack(|| inner.parse_program())?;
                    template.push(TemplatePart::Expr(expr));
                }
            }
        }
        Ok(ExprKind::Template(template))
    }

    /// `'if' cond 'then' body ('elif' cond 'then' body)* 'else' body 'ok'`
    fn parse_if(&mut self) -> Result<Expr, Diagnostic> {
        let start = self.cursor.expect(&TokenKind::If)?;
        let mut branches = Vec::new();
        loop {
            let cond = self.parse_composition()?;
            self.cursor.expect(&TokenKind::Then)?;
            let body = self.parse_composition()?;
            branches.push((cond, body));
            if !self.cursor.eat(&TokenKind::Elif) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::Else)?;
        let otherwise = Box::new(self.parse_composition()?);
        let end = self.cursor.expect(&TokenKind::Ok)?;
        Ok(Expr::new(
            ExprKind::If { branches, otherwise },
            start.merge(end),
        ))
    }

    /// `'is' clause ('elis' clause)* ['else' composition] 'ok'`
    fn parse_match(&mut self) -> Result<Expr, Diagnostic> {
        let start = self.cursor.expect(&TokenKind::Is)?;
        let mut clauses = vec![self.parse_clause()?];
        while self.cursor.eat(&TokenKind::Elis) {
            clauses.push(self.parse_clause()?);
        }
        let otherwise = if self.cursor.eat(&TokenKind::Else) {
            Some(self.parse_composition()?)
        } else {
            None
        };
        let end = self.cursor.expect(&TokenKind::Ok)?;
        Ok(Expr::new(
            ExprKind::Match(Box::new(Match { clauses, otherwise })),
            start.merge(end),
        ))
    }

    /// `pattern ['with' composition] 'then' composition`
    fn parse_clause(&mut self) -> Result<Clause, Diagnostic> {
        let pattern = self.parse_pattern()?;
        let guard = if self.cursor.eat(&TokenKind::With) {
            Some(self.parse_composition()?)
        } else {
            None
        };
        self.cursor.expect(&TokenKind::Then)?;
        let body = self.parse_composition()?;
        let span = pattern.span.merge(self.cursor.previous_span());
        Ok(Clause {
            pattern,
            guard,
            body,
            span,
        })
    }
}
