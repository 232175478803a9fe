use crate::grammer::token::{Pos, Token, TokenKind};
use color_print::cprintln;
use std::fmt;
use thiserror::Error;

// Token information for diagnostics
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub kind: TokenKind,
    pub pos: Pos,
}

impl fmt::Display for TokenInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.pos)
    }
}

impl From<&Token> for TokenInfo {
    fn from(token: &Token) -> Self {
        TokenInfo {
            kind: token.kind.clone(),
            pos: token.pos,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    // Lex errors
    #[error("Unterminated string constant")]
    UnterminatedString(Pos),

    #[error("Block comment line must start with `*`")]
    MalformedComment(Pos),

    #[error("Unterminated block comment")]
    UnterminatedComment(Pos),

    #[error("Integer constant out of range 0..=32767: `{1}`")]
    IntegerOverflow(Pos, String),

    #[error("Invalid integer constant: `{1}`")]
    InvalidInteger(Pos, String),

    #[error("Character `{1}` out of range 0..=32767 in string constant")]
    InvalidCharacter(Pos, char),

    #[error("String constant of {1} characters exceeds 32767")]
    StringTooLong(Pos, usize),

    // Parse errors
    #[error("Unexpected token: {0}")]
    UnexpectedToken(TokenInfo),

    #[error("Unexpected end of file")]
    UnexpectedEOF,

    // Code generation errors
    #[error("Undefined variable: `{0}`")]
    UndefinedVariable(String),

    // File errors
    #[error("Failed to open file: {0}: {1}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read directory: {0}: {1}")]
    ReadDir(String, #[source] std::io::Error),

    #[error("Failed to create directory: {0}: {1}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}: {1}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    /// Source position the error points at, if any.
    pub fn pos(&self) -> Option<Pos> {
        match self {
            Error::UnterminatedString(pos)
            | Error::MalformedComment(pos)
            | Error::UnterminatedComment(pos)
            | Error::IntegerOverflow(pos, _)
            | Error::InvalidInteger(pos, _)
            | Error::InvalidCharacter(pos, _)
            | Error::StringTooLong(pos, _) => Some(*pos),
            Error::UnexpectedToken(info) => Some(info.pos),
            _ => None,
        }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str, source: &str) {
        cprintln!("<red,bold>error</>: {}", self);

        let Some(pos) = self.pos() else {
            cprintln!("     <blue>--></> <underline>{}</>", file);
            return;
        };

        // pos is 0-based, display as 1-based
        let line_num = pos.row + 1;
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, pos);
        cprintln!("      <blue>|</>");

        let line_content = source.lines().nth(pos.row).unwrap_or("");
        cprintln!(" <blue>{:>4} |</> {}", line_num, line_content);
        cprintln!("      <blue>|</> {}<red,bold>^</>", " ".repeat(pos.col));
    }
}
