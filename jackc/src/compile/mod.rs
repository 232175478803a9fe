mod class;

pub use class::ClassCompiler;

use crate::{error::Error, grammer::lexer::Lexer, grammer::parsercore::Parser};
use vm::Code;

/// Control-flow label counter shared by every class of one run.
#[derive(Debug, Default)]
pub struct Labels(usize);

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh pair `{prefix}_{first}_n`, `{prefix}_{second}_n`.
    pub fn pair(&mut self, prefix: &str, first: &str, second: &str) -> (String, String) {
        let n = self.0;
        self.0 += 1;
        (
            format!("{prefix}_{first}_{n}"),
            format!("{prefix}_{second}_{n}"),
        )
    }
}

/// Compile the source text of one class.
pub fn compile(code: &str, labels: &mut Labels) -> Result<Code, Error> {
    let tokens = Lexer::new(code).parse()?;
    let class = Parser::new(tokens.into_iter()).parse()?;
    ClassCompiler::new(&class, labels).compile()
}
