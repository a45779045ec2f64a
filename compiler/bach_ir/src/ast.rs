//! Expression tree handed from the parser to the typechecker.
//!
//! Every node is an operation on the value flowing through the program.
//! Juxtaposition is composition: `1 +2 *3` is the composition of the
//! literal `1`, the call `+2` and the call `*3`, evaluated left to right.
//! Type annotations are already resolved to [`Type`] by the parser.

use std::fmt;

use bach_types::{Name, Parameter, Type};

use crate::Span;

#[derive(Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// The empty composition: passes its input through unchanged.
    pub fn identity(span: Span) -> Self {
        Expr::new(ExprKind::Identity, span)
    }

    /// Left-to-right composition of `exprs`; identity when empty.
    pub fn compose_all(exprs: Vec<Expr>, span: Span) -> Self {
        let mut iter = exprs.into_iter();
        let Some(first) = iter.next() else {
            return Expr::identity(span);
        };
        iter.fold(first, |left, right| {
            let span = left.span.merge(right.span);
            Expr::new(ExprKind::Compose(Box::new(left), Box::new(right)), span)
        })
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    /// Empty composition.
    Identity,

    /// `left right`: evaluate `left`, feed its output to `right`.
    Compose(Box<Expr>, Box<Expr>),

    // ===== Literals =====
    Null,
    Bool(bool),
    Num(f64),
    Str(Name),

    /// `"a{expr}b"`: each interpolated part is evaluated against the
    /// template's input and rendered.
    Template(Vec<TemplatePart>),

    /// `[a, b; rest]`: elements and an optional spread tail, all evaluated
    /// against the literal's input.
    Array {
        elems: Vec<Expr>,
        rest: Option<Box<Expr>>,
    },

    /// `{a: x, b: y}`.
    Record(Vec<(Name, Expr)>),

    /// `name` or `name(arg, ...)`; operators are calls too (`+2`).
    Call { name: Name, args: Vec<Expr> },

    /// `for I def name(params) O as body ok`.
    Def(Box<Def>),

    /// `if c then a elif c2 then b else d ok`.
    If {
        branches: Vec<(Expr, Expr)>,
        otherwise: Box<Expr>,
    },

    /// `is p then a elis q then b else c ok`.
    Match(Box<Match>),

    /// `=pattern`: bind names, pass the value through.
    Assign(Pattern),

    /// `@key`: element or property access.
    Get(Key),
}

/// A piece of a string template.
#[derive(Clone, PartialEq, Debug)]
pub enum TemplatePart {
    Lit(Name),
    Expr(Expr),
}

#[derive(Clone, PartialEq, Debug)]
pub struct Def {
    pub input: Type,
    pub name: Name,
    pub params: Vec<Parameter>,
    pub output: Type,
    pub body: Expr,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Match {
    pub clauses: Vec<Clause>,
    pub otherwise: Option<Expr>,
}

/// `pattern [with guard] then body`.
#[derive(Clone, PartialEq, Debug)]
pub struct Clause {
    pub pattern: Pattern,
    pub guard: Option<Expr>,
    pub body: Expr,
    pub span: Span,
}

/// Getter key: `@name`, `@"quoted key"`, or `@0`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Key {
    Prop(Name),
    Index(usize),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Prop(name) => bach_types::write_key(f, name),
            Key::Index(i) => write!(f, "{i}"),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

impl Pattern {
    pub fn new(kind: PatternKind, span: Span) -> Self {
        Pattern { kind, span }
    }

    /// The name the whole matched value is bound to, if any.
    pub fn name(&self) -> Option<&Name> {
        match &self.kind {
            PatternKind::Type { name, .. }
            | PatternKind::Array { name, .. }
            | PatternKind::Record { name, .. } => name.as_ref(),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum PatternKind {
    /// `Num n`, `Str`, or a bare name (`n`, matching `Any`).
    Type { ty: Type, name: Option<Name> },

    /// `[p1, p2; rest] name`.
    Array {
        elems: Vec<Pattern>,
        rest: Option<Box<Pattern>>,
        name: Option<Name>,
    },

    /// `{a: p1, b: p2} name`.
    Record {
        props: Vec<(Name, Pattern)>,
        name: Option<Name>,
    },
}
