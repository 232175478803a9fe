pub mod compile;
pub mod error;
pub mod grammer;
pub mod symbols;

pub use compile::{compile, ClassCompiler, Labels};
pub use error::Error;
pub use grammer::lexer::Lexer;
pub use grammer::parsercore::Parser;
pub use symbols::{Kind, Resolved, Symbol, SymbolTable};
