use super::token::{Token, TokenKind};
use crate::error::Error;
use itertools::{peek_nth, PeekNth};

/// Forward-only cursor over the tokens of one class, with two tokens of lookahead.
pub struct Parser<I: Iterator<Item = Token>> {
    tokens: PeekNth<I>,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn new(tokens: I) -> Self {
        Parser {
            tokens: peek_nth(tokens),
        }
    }
}

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Peek : Watch next token without consuming it
    pub fn peek(&mut self) -> Option<&Token> {
        self.tokens.peek()
    }

    /// Next : Consume next token and return it
    pub fn next(&mut self) -> Option<Token> {
        self.tokens.next()
    }

    /// Peek and check next token is match with condition
    pub fn check_if<F: Fn(&Token) -> bool>(&mut self, cond: F) -> bool {
        self.tokens.peek().is_some_and(cond)
    }

    /// Check the token after the next one
    pub fn check_second_if<F: Fn(&Token) -> bool>(&mut self, cond: F) -> bool {
        self.tokens.peek_nth(1).is_some_and(cond)
    }

    /// Next token must be match with condition
    pub fn expect_tobe<F: Fn(&Token) -> bool>(&mut self, cond: F) -> Result<Token, Error> {
        match self.tokens.peek() {
            Some(token) if cond(token) => self.tokens.next().ok_or(Error::UnexpectedEOF),
            Some(token) => Err(Error::UnexpectedToken(token.into())),
            None => Err(Error::UnexpectedEOF),
        }
    }

    /// Next token must be accepted by `f`, which also extracts its value
    pub fn expect_map<T, F: Fn(&TokenKind) -> Option<T>>(&mut self, f: F) -> Result<T, Error> {
        match self.tokens.peek() {
            Some(token) => match f(&token.kind) {
                Some(value) => {
                    self.tokens.next();
                    Ok(value)
                }
                None => Err(Error::UnexpectedToken(token.into())),
            },
            None => Err(Error::UnexpectedEOF),
        }
    }

    /// No token may follow
    pub fn expect_end(&mut self) -> Result<(), Error> {
        match self.tokens.peek() {
            Some(token) => Err(Error::UnexpectedToken(token.into())),
            None => Ok(()),
        }
    }
}

#[macro_export]
macro_rules! check {
    ($parser:expr, $kind:pat) => {
        $parser.check_if(|token| matches!(&token.kind, $kind))
    };
}

#[macro_export]
macro_rules! check_second {
    ($parser:expr, $kind:pat) => {
        $parser.check_second_if(|token| matches!(&token.kind, $kind))
    };
}

#[macro_export]
macro_rules! expect {
    ($parser:expr, $kind:pat) => {
        $parser.expect_tobe(|token| matches!(&token.kind, $kind))
    };
}

#[macro_export]
macro_rules! optional {
    ($parser:expr, $trigger:pat, $following:expr) => {
        if $crate::check!($parser, $trigger) {
            $crate::expect!($parser, $trigger)?;
            Some($following)
        } else {
            None
        }
    };
}

/// Parse repeated elements with optional delimiters
/// 3 args: { element } terminal (no delimiter)
/// 4 args: [ element { delimiter element } ] terminal (with delimiter)
#[macro_export]
macro_rules! repeat {
    // Without delimiter: { element } terminal
    ($parser:expr, $elem:expr, $terminal:pat) => {{
        let mut items = Vec::new();
        while !$crate::check!($parser, $terminal) {
            items.push($elem?);
        }
        items
    }};

    // With delimiter: [ element { delimiter element } ] terminal
    ($parser:expr, $elem:expr, $delimiter:pat, $terminal:pat) => {{
        let mut items = Vec::new();
        if !$crate::check!($parser, $terminal) {
            items.push($elem?);
            while $crate::check!($parser, $delimiter) {
                $crate::expect!($parser, $delimiter)?;
                items.push($elem?);
            }
        }
        items
    }};
}
