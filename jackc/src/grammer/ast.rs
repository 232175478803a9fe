use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub name: String,              // "class" ident "{"
    pub vars: Vec<ClassVarDec>,    // { class-var-dec }
    pub subs: Vec<Subroutine>,     // { subroutine-dec } "}"
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassVarDec(pub ClassVarKind, pub Type, pub Vec<String>); // ( "static" | "field" ) type ident { "," ident } ";"

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassVarKind {
    Static, // "static"
    Field,  // "field"
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,           // "int"
    Char,          // "char"
    Boolean,       // "boolean"
    Class(String), // ident
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Char => write!(f, "char"),
            Type::Boolean => write!(f, "boolean"),
            Type::Class(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubKind {
    Constructor, // "constructor"
    Function,    // "function"
    Method,      // "method"
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subroutine {
    pub kind: SubKind,
    pub ret: Option<Type>,              // "void" is None
    pub name: String,
    pub params: Vec<(Type, String)>,    // "(" [ type ident { "," type ident } ] ")"
    pub locals: Vec<VarDec>,            // "{" { var-dec }
    pub body: Vec<Stmt>,                // { stmt } "}"
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDec(pub Type, pub Vec<String>); // "var" type ident { "," ident } ";"

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(String, Option<Expr>, Expr),          // "let" ident [ "[" expr "]" ] "=" expr ";"
    If(Expr, Vec<Stmt>, Option<Vec<Stmt>>),   // "if" "(" expr ")" "{" { stmt } "}" [ "else" "{" { stmt } "}" ]
    While(Expr, Vec<Stmt>),                   // "while" "(" expr ")" "{" { stmt } "}"
    Do(Call),                                 // "do" call ";"
    Return(Option<Expr>),                     // "return" [ expr ] ";"
}

/// Operators are applied strictly left to right, there is no precedence.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr(pub Term, pub Vec<(BinaryOp, Term)>); // term { op term }

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Int(u16),                   // int-const
    Str(String),                // string-const
    Const(KeywordConst),        // "true" | "false" | "null" | "this"
    Paren(Box<Expr>),           // "(" expr ")"
    Unary(UnaryOp, Box<Term>),  // ( "-" | "~" ) term
    Var(String),                // ident
    Index(String, Box<Expr>),   // ident "[" expr "]"
    Call(Call),                 // call
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordConst {
    True,
    False,
    Null,
    This,
}

/// [ ident "." ] ident "(" [ expr { "," expr } ] ")"
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub receiver: Option<String>,
    pub name: String,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg, // "-"
    Not, // "~"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add, // "+"
    Sub, // "-"
    Mul, // "*"
    Div, // "/"
    And, // "&"
    Or,  // "|"
    Lt,  // "<"
    Gt,  // ">"
    Eq,  // "="
}

impl BinaryOp {
    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(BinaryOp::Add),
            '-' => Some(BinaryOp::Sub),
            '*' => Some(BinaryOp::Mul),
            '/' => Some(BinaryOp::Div),
            '&' => Some(BinaryOp::And),
            '|' => Some(BinaryOp::Or),
            '<' => Some(BinaryOp::Lt),
            '>' => Some(BinaryOp::Gt),
            '=' => Some(BinaryOp::Eq),
            _ => None,
        }
    }
}
