use strum::{Display, EnumString};

/// Stack arithmetic. Binary ops pop two operands, unary ops (`neg`, `not`) pop one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ArithOp {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}
