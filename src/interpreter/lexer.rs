use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::Chars;
use lazy_static::lazy_static;
use crate::util;


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenPos {
    pub line: i32,
    pub column: i32,
}

impl TokenPos {
    pub fn new(line: i32, column: i32) -> TokenPos {
        TokenPos { line, column }
    }

    pub fn begin() -> TokenPos {
        TokenPos::new(1, 1)
    }
}

impl Display for TokenPos {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {} column {}]", self.line, self.column)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenType {
    Illegal,

    ParenthesisLeft, ParenthesisRight,
    BracketLeft, BracketRight,
    SquareBracketLeft, SquareBracketRight,
    Comma, Semicolon, Colon,

    Assign, Equal,
    Not, NotEqual,
    Greater, Less,

    Plus, DoublePlus,
    Minus,
    Multiply, Divide, Percent,
    DoubleAnd,

    Identifier,
    Int, Hex,
    String,

    // Keywords
    Let,
    Return,
    Function,
    If, Else,
    For,
    Switch, Case, Break,
    True, False,

    Eof,
}

impl Display for TokenType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TokenType::Illegal => "ILLEGAL",
            TokenType::ParenthesisLeft => "(",
            TokenType::ParenthesisRight => ")",
            TokenType::BracketLeft => "{",
            TokenType::BracketRight => "}",
            TokenType::SquareBracketLeft => "[",
            TokenType::SquareBracketRight => "]",
            TokenType::Comma => ",",
            TokenType::Semicolon => ";",
            TokenType::Colon => ":",
            TokenType::Assign => "=",
            TokenType::Equal => "==",
            TokenType::Not => "!",
            TokenType::NotEqual => "!=",
            TokenType::Greater => ">",
            TokenType::Less => "<",
            TokenType::Plus => "+",
            TokenType::DoublePlus => "++",
            TokenType::Minus => "-",
            TokenType::Multiply => "*",
            TokenType::Divide => "/",
            TokenType::Percent => "%",
            TokenType::DoubleAnd => "&&",
            TokenType::Identifier => "IDENT",
            TokenType::Int => "INT",
            TokenType::Hex => "HEX",
            TokenType::String => "STRING",
            TokenType::Let => "LET",
            TokenType::Return => "RETURN",
            TokenType::Function => "FUNCTION",
            TokenType::If => "IF",
            TokenType::Else => "ELSE",
            TokenType::For => "FOR",
            TokenType::Switch => "SWITCH",
            TokenType::Case => "CASE",
            TokenType::Break => "BREAK",
            TokenType::True => "TRUE",
            TokenType::False => "FALSE",
            TokenType::Eof => "EOF",
        })
    }
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenType> = HashMap::from([
        ("let", TokenType::Let),
        ("return", TokenType::Return),
        ("fn", TokenType::Function),
        ("if", TokenType::If),
        ("else", TokenType::Else),
        ("for", TokenType::For),
        ("switch", TokenType::Switch),
        ("case", TokenType::Case),
        ("break", TokenType::Break),
        ("true", TokenType::True),
        ("false", TokenType::False),
    ]);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    token_type: TokenType,
    source: String,
    start: TokenPos, end: TokenPos,
}

impl Token {
    pub fn new(token_type: TokenType, source: String, start: TokenPos, end: TokenPos) -> Token {
        Token {
            token_type, source,
            start, end
        }
    }

    pub fn eof() -> Token {
        Token::new(TokenType::Eof, String::new(), TokenPos::begin(), TokenPos::begin())
    }

    pub fn token_type(&self) -> TokenType { self.token_type }
    pub fn source(&self) -> &str { &self.source }
    pub fn start(&self) -> &TokenPos { &self.start }
    pub fn end(&self) -> &TokenPos { &self.end }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.token_type {
            TokenType::Eof => f.write_str("Eof"),
            TokenType::String => write!(f, "`\"{}\"`", self.source),
            _ => write!(f, "`{}`", self.source),
        }
    }
}

/// Single-pass scanner over a source string.
///
/// The lexer never fails: characters it does not recognize come out as
/// [`TokenType::Illegal`] tokens and are reported later by the parser.
pub struct Lexer<'source> {
    input: &'source str,

    chars: Chars<'source>,
    peek_1: Option<char>,

    start_index: usize,
    current_index: usize,

    start_pos: TokenPos,
    current_pos: TokenPos,

    finished: bool,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Lexer<'source> {
        Lexer {
            input: source,

            chars: source.chars(),
            peek_1: None,

            start_index: 0,
            current_index: 0,

            start_pos: TokenPos::begin(),
            current_pos: TokenPos::begin(),

            finished: false,
        }
    }

    /// Scans the next token. Once the input is exhausted every call returns `Eof`.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            self.start_index = self.current_index;
            self.start_pos = self.current_pos;

            let c = match self.consume() {
                Some(c) => c,
                None => return self.make_token(TokenType::Eof),
            };

            return match c {
                '(' => self.make_token(TokenType::ParenthesisLeft),
                ')' => self.make_token(TokenType::ParenthesisRight),
                '{' => self.make_token(TokenType::BracketLeft),
                '}' => self.make_token(TokenType::BracketRight),
                '[' => self.make_token(TokenType::SquareBracketLeft),
                ']' => self.make_token(TokenType::SquareBracketRight),
                ',' => self.make_token(TokenType::Comma),
                ';' => self.make_token(TokenType::Semicolon),
                ':' => self.make_token(TokenType::Colon),

                '=' => if self.expect('=') { self.make_token(TokenType::Equal) } else {
                    self.make_token(TokenType::Assign)
                },
                '!' => if self.expect('=') { self.make_token(TokenType::NotEqual) } else {
                    self.make_token(TokenType::Not)
                },
                '+' => if self.expect('+') { self.make_token(TokenType::DoublePlus) } else {
                    self.make_token(TokenType::Plus)
                },
                '&' => if self.expect('&') { self.make_token(TokenType::DoubleAnd) } else {
                    self.make_token(TokenType::Illegal)
                },
                '>' => self.make_token(TokenType::Greater),
                '<' => self.make_token(TokenType::Less),
                '-' => self.make_token(TokenType::Minus),
                '*' => self.make_token(TokenType::Multiply),
                '%' => self.make_token(TokenType::Percent),
                '/' => if self.expect('/') {
                    self.skip_line();
                    continue;
                } else {
                    self.make_token(TokenType::Divide)
                },

                '"' => self.scan_string(),
                '0' if self.peek() == Some('x') => self.scan_hex(),
                c if util::is_numeric(c) => self.scan_number(),
                c if util::is_alphabetic(c) => self.scan_identifier(),

                _ => self.make_token(TokenType::Illegal),
            };
        }
    }

    fn scan_string(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }

            self.consume();
        }

        // An unterminated string runs to the end of the input
        let terminated = self.consume().is_some();
        let end_index = if terminated { self.current_index - 1 } else { self.current_index };

        Token {
            token_type: TokenType::String,
            source: self.input[(self.start_index + 1)..end_index].to_owned(),
            start: self.start_pos, end: self.current_pos,
        }
    }

    fn scan_hex(&mut self) -> Token {
        self.consume(); // the 'x'

        while let Some(c) = self.peek() {
            if !util::is_hex_digit(c) {
                break;
            }

            self.consume();
        }

        self.make_token(TokenType::Hex)
    }

    fn scan_number(&mut self) -> Token {
        while let Some('0'..='9') = self.peek() {
            self.consume();
        }

        self.make_token(TokenType::Int)
    }

    fn scan_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if !util::is_alphanumeric(c) {
                break;
            }

            self.consume();
        }

        let name = &self.input[self.start_index..self.current_index];
        let token_type = KEYWORDS.get(name).copied().unwrap_or(TokenType::Identifier);

        Token { source: name.to_owned(), token_type, start: self.start_pos, end: self.current_pos }
    }

    fn make_token(&self, token_type: TokenType) -> Token {
        Token {
            token_type,
            source: self.input[self.start_index..self.current_index].to_owned(),

            start: self.start_pos, end: self.current_pos,
        }
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek_1.take().or_else(|| self.chars.next())?;
        self.current_index += c.len_utf8();

        if c == '\n' {
            self.current_pos.line += 1;
            self.current_pos.column = 1;
        } else {
            self.current_pos.column += 1;
        }

        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        if self.peek_1.is_none() {
            self.peek_1 = self.chars.next();
        }

        self.peek_1
    }

    fn expect(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.consume();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                return;
            }

            self.consume();
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.consume() {
            if c == '\n' {
                return;
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields every token up to and including the first `Eof`.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        self.finished = token.token_type() == TokenType::Eof;
        Some(token)
    }
}

/// Scans the whole input. The returned sequence always ends with a single `Eof` token.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}
