//! Raw Token Definition
//!
//! The logos-derived tokenizer output, before spans are attached.

use logos::Logos;

use crate::template::{scan_string, StrPart};

/// Errors logos can report while scanning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum LexError {
    #[default]
    InvalidCharacter,
    InvalidNumber,
    UnterminatedString,
    InvalidEscape,
    InvalidTemplate,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexError)]
#[logos(skip r"([ \t\r\n]+|#[^\n]*)")] // whitespace and comments
pub(crate) enum RawToken {
    #[token("as")]
    As,
    #[token("def")]
    Def,
    #[token("elif")]
    Elif,
    #[token("elis")]
    Elis,
    #[token("else")]
    Else,
    #[token("false")]
    False,
    #[token("for")]
    For,
    #[token("if")]
    If,
    #[token("is")]
    Is,
    #[token("null")]
    Null,
    #[token("ok")]
    Ok,
    #[token("then")]
    Then,
    #[token("true")]
    True,
    #[token("with")]
    With,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("@")]
    At,

    /// Any run of operator characters. `=` alone is assignment; type syntax
    /// (`<`, `>`, `|`, `...`) is split out of these runs by the parser.
    #[regex(r"[+\-*/%<>=!&|^~?.$]+")]
    Op,

    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", |lex| {
        lex.slice().parse::<f64>().map_err(|_| LexError::InvalidNumber)
    })]
    Num(f64),

    #[token("\"", scan_string)]
    Str(Vec<StrPart>),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}
