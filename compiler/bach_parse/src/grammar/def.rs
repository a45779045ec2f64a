//! Definitions and parameter lists.

use bach_diagnostic::Diagnostic;
use bach_ir::{Def, Expr, ExprKind, Name};
use bach_lexer::TokenKind;
use bach_types::{Parameter, Type};

use crate::Parser;

impl Parser<'_> {
    /// ```text
    /// ['for' type] 'def' callee ['(' param (',' param)* ')'] type 'as' composition 'ok'
    /// ```
    pub(crate) fn parse_def(&mut self) -> Result<Expr, Diagnostic> {
        let start = self.cursor.current_span();
        let input = self.parse_for_clause()?;
        self.cursor.expect(&TokenKind::Def)?;
        let name = self.parse_def_name()?;
        let params = if self.cursor.eat(&TokenKind::LParen) {
            self.parse_list(&TokenKind::RParen, Self::parse_param)?
        } else {
            Vec::new()
        };
        let output = self.parse_type()?;
        self.cursor.expect(&TokenKind::As)?;
        let body = self.parse_composition()?;
        let end = self.cursor.expect(&TokenKind::Ok)?;
        tracing::trace!(%name, params = params.len(), "parsed definition");
        Ok(Expr::new(
            ExprKind::Def(Box::new(Def {
                input,
                name,
                params,
                output,
                body,
            })),
            start.merge(end),
        ))
    }

    /// `'for' type`, defaulting to `Any` when absent.
    fn parse_for_clause(&mut self) -> Result<Type, Diagnostic> {
        if self.cursor.eat(&TokenKind::For) {
            self.parse_type()
        } else {
            Ok(Type::Any)
        }
    }

    fn parse_def_name(&mut self) -> Result<Name, Diagnostic> {
        match self.cursor.current_kind() {
            TokenKind::Ident(name) | TokenKind::Op(name) if &**name != "=" => {
                let name = name.clone();
                self.cursor.advance();
                Ok(name)
            }
            _ => Err(self.cursor.unexpected("a function name")),
        }
    }

    /// `['for' type] name ['(' subparam (',' subparam)* ')'] type`
    fn parse_param(&mut self) -> Result<Parameter, Diagnostic> {
        let input = self.parse_for_clause()?;
        let TokenKind::Ident(name) = self.cursor.current_kind() else {
            return Err(self.cursor.unexpected("a parameter name"));
        };
        let name = name.clone();
        self.cursor.advance();
        let (params, output) = self.parse_param_signature()?;
        Ok(Parameter::with_input(input, output)
            .named(name)
            .with_params(params))
    }

    /// `['for' type] ['(' subparam (',' subparam)* ')'] type`
    fn parse_subparam(&mut self) -> Result<Parameter, Diagnostic> {
        let input = self.parse_for_clause()?;
        let (params, output) = self.parse_param_signature()?;
        Ok(Parameter::with_input(input, output).with_params(params))
    }

    fn parse_param_signature(&mut self) -> Result<(Vec<Parameter>, Type), Diagnostic> {
        let params = if self.cursor.eat(&TokenKind::LParen) {
            self.parse_list(&TokenKind::RParen, Self::parse_subparam)?
        } else {
            Vec::new()
        };
        Ok((params, self.parse_type()?))
    }

    /// Comma-separated items up to and including `close`. The opening
    /// delimiter has been consumed.
    pub(crate) fn parse_list<T>(
        &mut self,
        close: &TokenKind,
        mut item: impl FnMut(&mut Self) -> Result<T, Diagnostic>,
    ) -> Result<Vec<T>, Diagnostic> {
        let mut items = Vec::new();
        if self.cursor.eat(close) {
            return Ok(items);
        }
        loop {
            items.push(item(self)?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(close)?;
        Ok(items)
    }
}
