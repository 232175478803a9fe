use std::fmt;
use strum::{Display, EnumString};

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, pos: Pos) -> Self {
        Token { kind, pos }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Kw),
    Symbol(char),
    Int(u16),    // 0..=32767
    Str(String), // without quotes
    Ident(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(kw) => write!(f, "keyword `{}`", kw),
            TokenKind::Symbol(ch) => write!(f, "symbol `{}`", ch),
            TokenKind::Int(num) => write!(f, "integer `{}`", num),
            TokenKind::Str(text) => write!(f, "string \"{}\"", text),
            TokenKind::Ident(name) => write!(f, "identifier `{}`", name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Kw {
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

/// Single character tokens. Every other non-space run is a word.
pub const SYMBOLS: &str = "{}()[].,;+-*/&|<>=~";

/// 0-based line and column (byte offset) in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.col + 1)
    }
}
