mod table;

pub use table::{Kind, Resolved, Symbol, SymbolTable};
