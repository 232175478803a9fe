use crate::{error::InstParseError, op::ArithOp, segment::Segment};
use color_print::cformat;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    Push(Segment, u16),
    Pop(Segment, u16),
    Arith(ArithOp),
    Label(String),
    Goto(String),
    IfGoto(String),
    Call(String, u16),
    Function(String, u16),
    Return,
}

impl Inst {
    pub fn call<S: Into<String>>(name: S, nargs: u16) -> Self {
        Inst::Call(name.into(), nargs)
    }

    /// True for the instructions that open a new subroutine body.
    pub fn is_function(&self) -> bool {
        matches!(self, Inst::Function(..))
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::Push(seg, idx) => write!(f, "push {} {}", seg, idx),
            Inst::Pop(seg, idx) => write!(f, "pop {} {}", seg, idx),
            Inst::Arith(op) => write!(f, "{}", op),
            Inst::Label(name) => write!(f, "label {}", name),
            Inst::Goto(name) => write!(f, "goto {}", name),
            Inst::IfGoto(name) => write!(f, "if-goto {}", name),
            Inst::Call(name, nargs) => write!(f, "call {} {}", name, nargs),
            Inst::Function(name, nlocals) => write!(f, "function {} {}", name, nlocals),
            Inst::Return => write!(f, "return"),
        }
    }
}

fn segment(s: &str) -> Result<Segment, InstParseError> {
    s.parse()
        .map_err(|_| InstParseError::UnknownSegment(s.to_string()))
}

fn index(s: &str) -> Result<u16, InstParseError> {
    s.parse()
        .map_err(|_| InstParseError::InvalidIndex(s.to_string()))
}

impl FromStr for Inst {
    type Err = InstParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s.split_whitespace().collect::<Vec<_>>();
        match fields.as_slice() {
            [] => Err(InstParseError::Empty),
            ["push", seg, idx] => Ok(Inst::Push(segment(seg)?, index(idx)?)),
            ["pop", seg, idx] => Ok(Inst::Pop(segment(seg)?, index(idx)?)),
            ["label", name] => Ok(Inst::Label(name.to_string())),
            ["goto", name] => Ok(Inst::Goto(name.to_string())),
            ["if-goto", name] => Ok(Inst::IfGoto(name.to_string())),
            ["call", name, nargs] => Ok(Inst::Call(name.to_string(), index(nargs)?)),
            ["function", name, nlocals] => Ok(Inst::Function(name.to_string(), index(nlocals)?)),
            ["return"] => Ok(Inst::Return),
            [op] => match op.parse::<ArithOp>() {
                Ok(op) => Ok(Inst::Arith(op)),
                Err(_) => Err(Self::unknown_or_arity(op)),
            },
            [op, ..] => Err(Self::unknown_or_arity(op)),
        }
    }
}

impl Inst {
    fn unknown_or_arity(op: &str) -> InstParseError {
        let known = matches!(
            op,
            "push" | "pop" | "label" | "goto" | "if-goto" | "call" | "function" | "return"
        ) || op.parse::<ArithOp>().is_ok();
        if known {
            InstParseError::OperandCount(op.to_string())
        } else {
            InstParseError::UnknownOperation(op.to_string())
        }
    }
}

impl Inst {
    pub fn cformat(&self) -> String {
        macro_rules! si {
            ($name:expr, $seg:expr, $idx:expr) => {
                cformat!("  <r>{:<9}</><b>{:<9}</><y>{}</>", $name, $seg, $idx)
            };
        }

        macro_rules! nl {
            ($name:expr, $label:expr) => {
                cformat!("  <r>{:<9}</><g>{}</>", $name, $label)
            };
        }

        match self {
            Inst::Push(seg, idx) => si!("push", seg, idx),
            Inst::Pop(seg, idx) => si!("pop", seg, idx),
            Inst::Arith(op) => cformat!("  <r>{}</>", op),
            Inst::Label(name) => cformat!("<g>{}:</>", name),
            Inst::Goto(name) => nl!("goto", name),
            Inst::IfGoto(name) => nl!("if-goto", name),
            Inst::Call(name, nargs) => si!("call", name, nargs),
            Inst::Function(name, nlocals) => cformat!("<c,s>function {}</> <y>{}</>", name, nlocals),
            Inst::Return => cformat!("  <r>return</>"),
        }
    }
}
