//! Diagnostic system for Bach programs.
//!
//! Every failure is a [`Diagnostic`]: a kind (syntax, type or value), a
//! closed [`ErrorCode`], a message and the structured facts behind it (the
//! types, name, arity, value or index involved). Tests and tooling match on
//! the code and fields, never on message wording.

pub mod emitter;
pub mod span_utils;

use std::fmt;

use bach_ir::Span;
use bach_types::{Parameter, Type};

/// Which phase rejected the program.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    Syntax,
    Type,
    Value,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Syntax => f.write_str("syntax error"),
            ErrorKind::Type => f.write_str("type error"),
            ErrorKind::Value => f.write_str("value error"),
        }
    }
}

/// Error codes for all diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E1xxx: Syntax errors
/// - E2xxx: Type errors
/// - E3xxx: Value errors raised while evaluating
/// - E9xxx: Internal errors
///
/// Indexing and property errors are raised statically when a getter can
/// never succeed and at run time when it fails on a particular value; the
/// [`ErrorKind`] tells the two apart.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // ===== Syntax Errors (E1xxx) =====
    UnexpectedToken,
    ExpectedExpression,
    UnterminatedString,
    InvalidCharacter,
    UnknownType,
    InvalidNumber,
    InvalidEscape,
    InvalidTemplate,

    // ===== Type Errors (E2xxx) =====
    NoSuchFunction,
    ArgHasWrongOutputType,
    ParamDoesNotMatch,
    FunctionBodyHasWrongOutputType,
    ConditionMustBeBool,
    ImpossibleMatch,
    NonExhaustiveMatch,
    UnreachableElseClause,
    UnreachableElisClause,
    BadIndex,
    NoSuchIndex,
    NoSuchProperty,
    RestRequiresArray,
    ParamsNotAllowed,
    VoidProgram,

    // ===== Value Errors (E3xxx) =====
    UnexpectedValue,
    Rejected,
    UnexpectedDrop,

    // ===== Internal Errors (E9xxx) =====
    Internal,
}

impl ErrorCode {
    /// The numeric code as a string (e.g., "E2001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Syntax
            ErrorCode::UnexpectedToken => "E1001",
            ErrorCode::ExpectedExpression => "E1002",
            ErrorCode::UnterminatedString => "E1003",
            ErrorCode::InvalidCharacter => "E1004",
            ErrorCode::UnknownType => "E1005",
            ErrorCode::InvalidNumber => "E1006",
            ErrorCode::InvalidEscape => "E1007",
            ErrorCode::InvalidTemplate => "E1008",
            // Type
            ErrorCode::NoSuchFunction => "E2001",
            ErrorCode::ArgHasWrongOutputType => "E2002",
            ErrorCode::ParamDoesNotMatch => "E2003",
            ErrorCode::FunctionBodyHasWrongOutputType => "E2004",
            ErrorCode::ConditionMustBeBool => "E2005",
            ErrorCode::ImpossibleMatch => "E2006",
            ErrorCode::NonExhaustiveMatch => "E2007",
            ErrorCode::UnreachableElseClause => "E2008",
            ErrorCode::UnreachableElisClause => "E2009",
            ErrorCode::BadIndex => "E2010",
            ErrorCode::NoSuchIndex => "E2011",
            ErrorCode::NoSuchProperty => "E2012",
            ErrorCode::RestRequiresArray => "E2013",
            ErrorCode::ParamsNotAllowed => "E2014",
            ErrorCode::VoidProgram => "E2015",
            // Value
            ErrorCode::UnexpectedValue => "E3001",
            ErrorCode::Rejected => "E3002",
            ErrorCode::UnexpectedDrop => "E3003",
            // Internal
            ErrorCode::Internal => "E9001",
        }
    }

    /// The symbolic name (e.g., "NoSuchFunction").
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::UnexpectedToken => "UnexpectedToken",
            ErrorCode::ExpectedExpression => "ExpectedExpression",
            ErrorCode::UnterminatedString => "UnterminatedString",
            ErrorCode::InvalidCharacter => "InvalidCharacter",
            ErrorCode::UnknownType => "UnknownType",
            ErrorCode::InvalidNumber => "InvalidNumber",
            ErrorCode::InvalidEscape => "InvalidEscape",
            ErrorCode::InvalidTemplate => "InvalidTemplate",
            ErrorCode::NoSuchFunction => "NoSuchFunction",
            ErrorCode::ArgHasWrongOutputType => "ArgHasWrongOutputType",
            ErrorCode::ParamDoesNotMatch => "ParamDoesNotMatch",
            ErrorCode::FunctionBodyHasWrongOutputType => "FunctionBodyHasWrongOutputType",
            ErrorCode::ConditionMustBeBool => "ConditionMustBeBool",
            ErrorCode::ImpossibleMatch => "ImpossibleMatch",
            ErrorCode::NonExhaustiveMatch => "NonExhaustiveMatch",
            ErrorCode::UnreachableElseClause => "UnreachableElseClause",
            ErrorCode::UnreachableElisClause => "UnreachableElisClause",
            ErrorCode::BadIndex => "BadIndex",
            ErrorCode::NoSuchIndex => "NoSuchIndex",
            ErrorCode::NoSuchProperty => "NoSuchProperty",
            ErrorCode::RestRequiresArray => "RestRequiresArray",
            ErrorCode::ParamsNotAllowed => "ParamsNotAllowed",
            ErrorCode::VoidProgram => "VoidProgram",
            ErrorCode::UnexpectedValue => "UnexpectedValue",
            ErrorCode::Rejected => "Rejected",
            ErrorCode::UnexpectedDrop => "UnexpectedDrop",
            ErrorCode::Internal => "Internal",
        }
    }

    /// Message used when a diagnostic is built without a custom one.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::UnexpectedToken => "unexpected token",
            ErrorCode::ExpectedExpression => "expected an expression",
            ErrorCode::UnterminatedString => "unterminated string literal",
            ErrorCode::InvalidCharacter => "invalid character",
            ErrorCode::UnknownType => "unknown type",
            ErrorCode::InvalidNumber => "invalid number literal",
            ErrorCode::InvalidEscape => "invalid escape sequence",
            ErrorCode::InvalidTemplate => "invalid string template",
            ErrorCode::NoSuchFunction => "no such function",
            ErrorCode::ArgHasWrongOutputType => "argument has the wrong output type",
            ErrorCode::ParamDoesNotMatch => "parameter does not match",
            ErrorCode::FunctionBodyHasWrongOutputType => {
                "function body has the wrong output type"
            }
            ErrorCode::ConditionMustBeBool => "condition must be boolean",
            ErrorCode::ImpossibleMatch => "pattern can never match",
            ErrorCode::NonExhaustiveMatch => "match is not exhaustive",
            ErrorCode::UnreachableElseClause => "else clause is unreachable",
            ErrorCode::UnreachableElisClause => "elis clause is unreachable",
            ErrorCode::BadIndex => "index must be a non-negative integer",
            ErrorCode::NoSuchIndex => "no such index",
            ErrorCode::NoSuchProperty => "no such property",
            ErrorCode::RestRequiresArray => "rest of an array literal must be an array",
            ErrorCode::ParamsNotAllowed => "this expression does not take parameters",
            ErrorCode::VoidProgram => "program produces no value",
            ErrorCode::UnexpectedValue => "unexpected value",
            ErrorCode::Rejected => "value rejected",
            ErrorCode::UnexpectedDrop => "program dropped its value",
            ErrorCode::Internal => "internal interpreter error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed error with the structured facts behind it.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub message: String,
    /// Where the error occurred, when known.
    pub span: Option<Span>,
    pub want_type: Option<Type>,
    pub got_type: Option<Type>,
    /// Offending function or variable name.
    pub name: Option<String>,
    pub arity: Option<usize>,
    /// Rendered offending value.
    pub got_value: Option<String>,
    /// Rendered index or property key.
    pub index: Option<String>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn new(kind: ErrorKind, code: ErrorCode) -> Self {
        Diagnostic {
            kind,
            code,
            message: code.default_message().to_string(),
            span: None,
            want_type: None,
            got_type: None,
            name: None,
            arity: None,
            got_value: None,
            index: None,
            notes: Vec::new(),
        }
    }

    pub fn syntax_error(code: ErrorCode) -> Self {
        Diagnostic::new(ErrorKind::Syntax, code)
    }

    pub fn type_error(code: ErrorCode) -> Self {
        Diagnostic::new(ErrorKind::Type, code)
    }

    pub fn value_error(code: ErrorCode) -> Self {
        Diagnostic::new(ErrorKind::Value, code)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach a span unless one is already set.
    pub fn or_span(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }

    pub fn with_want_type(mut self, ty: Type) -> Self {
        self.want_type = Some(ty);
        self
    }

    pub fn with_got_type(mut self, ty: Type) -> Self {
        self.got_type = Some(ty);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    pub fn with_got_value(mut self, value: impl Into<String>) -> Self {
        self.got_value = Some(value.into());
        self
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl std::error::Error for Diagnostic {}

// ===== Diagnostic Helpers =====

/// No funcer matches a call.
pub fn no_such_function(span: Span, name: &str, input: &Type, arity: usize) -> Diagnostic {
    Diagnostic::type_error(ErrorCode::NoSuchFunction)
        .with_message(format!(
            "no function `{name}` with {arity} argument{} for input type `{input}`",
            if arity == 1 { "" } else { "s" }
        ))
        .with_span(span)
        .with_name(name)
        .with_got_type(input.clone())
        .with_arity(arity)
}

pub fn arg_has_wrong_output_type(span: Span, want: &Type, got: &Type) -> Diagnostic {
    Diagnostic::type_error(ErrorCode::ArgHasWrongOutputType)
        .with_message(format!("argument produces `{got}`, expected `{want}`"))
        .with_span(span)
        .with_want_type(want.clone())
        .with_got_type(got.clone())
}

pub fn param_does_not_match(span: Span, want: &Parameter, got: &Parameter) -> Diagnostic {
    Diagnostic::type_error(ErrorCode::ParamDoesNotMatch)
        .with_message(format!("parameter `{got}` cannot be passed as `{want}`"))
        .with_span(span)
        .with_want_type(want.output.clone())
        .with_got_type(got.output.clone())
}

pub fn function_body_has_wrong_output_type(
    span: Span,
    name: &str,
    want: &Type,
    got: &Type,
) -> Diagnostic {
    Diagnostic::type_error(ErrorCode::FunctionBodyHasWrongOutputType)
        .with_message(format!(
            "body of `{name}` produces `{got}`, declared output is `{want}`"
        ))
        .with_span(span)
        .with_name(name)
        .with_want_type(want.clone())
        .with_got_type(got.clone())
}

pub fn condition_must_be_bool(span: Span, got: &Type) -> Diagnostic {
    Diagnostic::type_error(ErrorCode::ConditionMustBeBool)
        .with_message(format!("condition produces `{got}`, expected `Bool`"))
        .with_span(span)
        .with_want_type(Type::Bool)
        .with_got_type(got.clone())
}

pub fn impossible_match(span: Span, input: &Type, pattern: &Type) -> Diagnostic {
    Diagnostic::type_error(ErrorCode::ImpossibleMatch)
        .with_message(format!("pattern `{pattern}` never matches input of type `{input}`"))
        .with_span(span)
        .with_want_type(pattern.clone())
        .with_got_type(input.clone())
}

pub fn non_exhaustive_match(span: Span, remaining: &Type) -> Diagnostic {
    Diagnostic::type_error(ErrorCode::NonExhaustiveMatch)
        .with_message(format!("values of type `{remaining}` are not matched"))
        .with_span(span)
        .with_got_type(remaining.clone())
}

pub fn unreachable_else(span: Span) -> Diagnostic {
    Diagnostic::type_error(ErrorCode::UnreachableElseClause).with_span(span)
}

pub fn unreachable_elis(span: Span) -> Diagnostic {
    Diagnostic::type_error(ErrorCode::UnreachableElisClause).with_span(span)
}

pub fn no_such_index(span: Span, ty: &Type, index: usize) -> Diagnostic {
    Diagnostic::type_error(ErrorCode::NoSuchIndex)
        .with_message(format!("values of type `{ty}` have no element {index}"))
        .with_span(span)
        .with_got_type(ty.clone())
        .with_index(index.to_string())
}

pub fn no_such_property(span: Span, ty: &Type, key: &str) -> Diagnostic {
    let mut rendered = String::new();
    // Writing into a String cannot fail.
    let _ = bach_types::write_key(&mut rendered, key);
    Diagnostic::type_error(ErrorCode::NoSuchProperty)
        .with_message(format!("values of type `{ty}` have no property {rendered}"))
        .with_span(span)
        .with_got_type(ty.clone())
        .with_index(rendered)
}

pub fn bad_index(span: Span, got: &Type) -> Diagnostic {
    Diagnostic::type_error(ErrorCode::BadIndex)
        .with_message(format!("cannot index values of type `{got}`"))
        .with_span(span)
        .with_got_type(got.clone())
}

pub fn rest_requires_array(span: Span, got: &Type) -> Diagnostic {
    Diagnostic::type_error(ErrorCode::RestRequiresArray)
        .with_message(format!("rest of an array literal has type `{got}`, expected an array"))
        .with_span(span)
        .with_want_type(Type::arr(Type::Any))
        .with_got_type(got.clone())
}

pub fn params_not_allowed(span: Span) -> Diagnostic {
    Diagnostic::type_error(ErrorCode::ParamsNotAllowed).with_span(span)
}

pub fn void_program(span: Span) -> Diagnostic {
    Diagnostic::type_error(ErrorCode::VoidProgram)
        .with_message("program has type `Void` and can never produce a value")
        .with_span(span)
        .with_got_type(Type::Void)
}

/// A value reached a point no clause or kernel accepts.
pub fn unexpected_value(got_value: impl Into<String>) -> Diagnostic {
    let got_value = got_value.into();
    Diagnostic::value_error(ErrorCode::UnexpectedValue)
        .with_message(format!("unexpected value {got_value}"))
        .with_got_value(got_value)
}

pub fn rejected(got_value: impl Into<String>) -> Diagnostic {
    let got_value = got_value.into();
    Diagnostic::value_error(ErrorCode::Rejected)
        .with_message(format!("rejected value {got_value}"))
        .with_got_value(got_value)
}

pub fn unexpected_drop() -> Diagnostic {
    Diagnostic::value_error(ErrorCode::UnexpectedDrop)
}

pub fn internal(message: impl Into<String>) -> Diagnostic {
    Diagnostic::value_error(ErrorCode::Internal).with_message(message)
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.kind,
            self.code,
            self.code.name(),
            self.message
        )?;
        if let Some(span) = self.span {
            write!(f, "\n  --> {span:?}")?;
        }
        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }
        Ok(())
    }
}
