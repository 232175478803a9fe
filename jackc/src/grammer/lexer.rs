use super::token::{Kw, Pos, Token, TokenKind, SYMBOLS};
use crate::error::Error;
use std::iter::Peekable;
use std::str::CharIndices;

const INT_MAX: u16 = 32767;

pub struct Lexer<'a> {
    code: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(code: &'a str) -> Self {
        Self { code }
    }

    /// Tokenize a whole class. The block comment state is carried from line to line.
    pub fn parse(self) -> Result<Vec<Token>, Error> {
        let mut tokens = Vec::new();
        let mut open_comment: Option<Pos> = None;
        for (row, line) in self.code.lines().enumerate() {
            let lexer = LineLexer::new(line, row, open_comment);
            open_comment = lexer.parse(&mut tokens)?;
        }
        match open_comment {
            Some(pos) => Err(Error::UnterminatedComment(pos)),
            None => Ok(tokens),
        }
    }
}

pub struct LineLexer<'a> {
    iter: Peekable<CharIndices<'a>>,
    line: &'a str,
    row: usize,
    comment: Option<Pos>,
}

impl<'a> LineLexer<'a> {
    /// `comment` is the start of a block comment left open by a previous line.
    pub fn new(line: &'a str, row: usize, comment: Option<Pos>) -> Self {
        Self {
            iter: line.char_indices().peekable(),
            line,
            row,
            comment,
        }
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl<'a> LineLexer<'a> {
    fn peek_nth(&self, n: usize) -> Option<(usize, char)> {
        self.iter.clone().nth(n)
    }

    fn consume(&mut self) -> Option<(usize, char)> {
        self.iter.next()
    }

    fn pos(&self, col: usize) -> Pos {
        Pos { row: self.row, col }
    }

    /// Skip to the end of the open block comment. False if the line ends first.
    fn skip_comment(&mut self) -> bool {
        while let Some((_, ch)) = self.consume() {
            if ch == '*' && self.iter.next_if(|&(_, ch)| ch == '/').is_some() {
                self.comment = None;
                return true;
            }
        }
        false
    }
}

// ----------------------------------------------------------------------------
// Parser
// ----------------------------------------------------------------------------

impl<'a> LineLexer<'a> {
    /// Push the tokens of this line. Returns the block comment still open at the end of it.
    pub fn parse(mut self, tokens: &mut Vec<Token>) -> Result<Option<Pos>, Error> {
        if self.comment.is_some() {
            let body = self.line.trim_start();
            if !body.starts_with('*') {
                let col = self.line.len() - body.len();
                return Err(Error::MalformedComment(self.pos(col)));
            }
        }

        loop {
            if self.comment.is_some() && !self.skip_comment() {
                break;
            }

            let Some((idx, ch0)) = self.peek_nth(0) else {
                break;
            };

            // 0. Skip whitespaces
            if ch0.is_whitespace() {
                self.consume();
                continue;
            }

            let pos = self.pos(idx);

            // 1. Comments
            if ch0 == '/' {
                match self.peek_nth(1) {
                    Some((_, '/')) => break,
                    Some((_, '*')) => {
                        self.consume(); // consume '/'
                        self.consume(); // consume '*'
                        self.comment = Some(pos);
                        continue;
                    }
                    _ => {}
                }
            }

            // 2. Symbol
            if SYMBOLS.contains(ch0) {
                self.consume();
                tokens.push(Token::new(TokenKind::Symbol(ch0), pos));
                continue;
            }

            // 3. String constant
            if ch0 == '"' {
                tokens.push(Token::new(self.parse_text(pos)?, pos));
                continue;
            }

            // 4. Integer constant
            if ch0.is_ascii_digit() {
                tokens.push(Token::new(self.parse_number(pos)?, pos));
                continue;
            }

            // 5. Identifier or keyword
            tokens.push(Token::new(self.parse_word(), pos));
        }
        Ok(self.comment)
    }

    fn lexeme(&mut self) -> String {
        let mut lexeme = String::new();
        while let Some((_, ch)) = self
            .iter
            .next_if(|&(_, ch)| !ch.is_whitespace() && ch != '"' && !SYMBOLS.contains(ch))
        {
            lexeme.push(ch);
        }
        lexeme
    }

    fn parse_word(&mut self) -> TokenKind {
        let lexeme = self.lexeme();
        match lexeme.parse::<Kw>() {
            Ok(kw) => TokenKind::Keyword(kw),
            Err(_) => TokenKind::Ident(lexeme),
        }
    }

    fn parse_number(&mut self, pos: Pos) -> Result<TokenKind, Error> {
        let lexeme = self.lexeme();
        if !lexeme.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(Error::InvalidInteger(pos, lexeme));
        }
        match lexeme.parse::<u16>() {
            Ok(num) if num <= INT_MAX => Ok(TokenKind::Int(num)),
            _ => Err(Error::IntegerOverflow(pos, lexeme)),
        }
    }

    // Text: "hoge \"fuga\""
    // Every character and the length must fit an integer constant.
    fn parse_text(&mut self, pos: Pos) -> Result<TokenKind, Error> {
        self.consume(); // consume opening '"'

        let mut lexeme = String::new();
        let mut len: usize = 0;
        while let Some((idx, ch)) = self.consume() {
            let ch = match ch {
                '"' if len > INT_MAX as usize => return Err(Error::StringTooLong(pos, len)),
                '"' => return Ok(TokenKind::Str(lexeme)),
                '\\' => match self.iter.next_if(|&(_, ch)| ch == '"' || ch == '\\') {
                    Some((_, escaped)) => escaped,
                    None => '\\',
                },
                ch if ch as u32 > INT_MAX as u32 => {
                    return Err(Error::InvalidCharacter(self.pos(idx), ch))
                }
                ch => ch,
            };
            lexeme.push(ch);
            len += 1;
        }
        Err(Error::UnterminatedString(pos))
    }
}
