use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstParseError {
    #[error("Empty instruction")]
    Empty,

    #[error("Unknown operation: `{0}`")]
    UnknownOperation(String),

    #[error("Unknown segment: `{0}`")]
    UnknownSegment(String),

    #[error("Cannot parse `{0}` as index")]
    InvalidIndex(String),

    #[error("Wrong number of operands for `{0}`")]
    OperandCount(String),
}
