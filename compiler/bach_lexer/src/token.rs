use bach_ir::{Name, Span};

use crate::template::StrPart;

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // keywords
    As,
    Def,
    Elif,
    Elis,
    Else,
    False,
    For,
    If,
    Is,
    Null,
    Ok,
    Then,
    True,
    With,

    // punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Colon,
    At,

    Op(Name),
    Ident(Name),
    Num(f64),
    Str(Vec<StrPart>),

    Eof,
}

impl TokenKind {
    /// How the token is named in "expected ..." messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::As => "`as`".into(),
            TokenKind::Def => "`def`".into(),
            TokenKind::Elif => "`elif`".into(),
            TokenKind::Elis => "`elis`".into(),
            TokenKind::Else => "`else`".into(),
            TokenKind::False => "`false`".into(),
            TokenKind::For => "`for`".into(),
            TokenKind::If => "`if`".into(),
            TokenKind::Is => "`is`".into(),
            TokenKind::Null => "`null`".into(),
            TokenKind::Ok => "`ok`".into(),
            TokenKind::Then => "`then`".into(),
            TokenKind::True => "`true`".into(),
            TokenKind::With => "`with`".into(),
            TokenKind::LParen => "`(`".into(),
            TokenKind::RParen => "`)`".into(),
            TokenKind::LBracket => "`[`".into(),
            TokenKind::RBracket => "`]`".into(),
            TokenKind::LBrace => "`{`".into(),
            TokenKind::RBrace => "`}`".into(),
            TokenKind::Comma => "`,`".into(),
            TokenKind::Semicolon => "`;`".into(),
            TokenKind::Colon => "`:`".into(),
            TokenKind::At => "`@`".into(),
            TokenKind::Op(op) => format!("`{op}`"),
            TokenKind::Ident(name) => format!("`{name}`"),
            TokenKind::Num(_) => "number".into(),
            TokenKind::Str(_) => "string".into(),
            TokenKind::Eof => "end of input".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}
