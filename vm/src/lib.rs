pub mod code;
pub mod error;
pub mod inst;
pub mod op;
pub mod segment;

pub use code::Code;
pub use error::InstParseError;
pub use inst::Inst;
pub use op::ArithOp;
pub use segment::Segment;
