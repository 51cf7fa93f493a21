use std::fmt::Display;
use std::rc::Rc;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,

    Ident,
    Int,
    Str,

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,

    Equal,
    NotEqual,

    GreaterThan,
    LessThan,

    Comma,
    Colon,
    SemiColon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords
    Function,
    Def,
    True,
    False,
    If,
    Else,
    Ret,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use TokenKind::*;
        let name = match self {
            Illegal => "INVALID",
            Eof => "EOF",
            Ident => "ID",
            Int => "INT",
            Str => "STR",
            Assign => "=",
            Plus => "+",
            Minus => "-",
            Bang => "!",
            Asterisk => "*",
            Slash => "/",
            Equal => "==",
            NotEqual => "!=",
            GreaterThan => ">",
            LessThan => "<",
            Comma => ",",
            Colon => ":",
            SemiColon => ";",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            LBracket => "[",
            RBracket => "]",
            Function => "FUN",
            Def => "DEF",
            True => "TRUE",
            False => "FALSE",
            If => "IF",
            Else => "ELSE",
            Ret => "RET",
        };
        f.write_str(name)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: Rc<str>,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<Rc<str>>) -> Self {
        Token {
            kind,
            literal: literal.into(),
        }
    }

    pub fn eof() -> Self {
        Token::new(TokenKind::Eof, "")
    }
}

/// Pull-style supplier of tokens for the parser.
///
/// Once the input is exhausted every further call returns an
/// [`TokenKind::Eof`] token.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

impl<I: Iterator<Item = Token>> TokenSource for I {
    fn next_token(&mut self) -> Token {
        self.next().unwrap_or_else(Token::eof)
    }
}

fn keywords(ident: &str) -> Option<TokenKind> {
    match ident {
        "fun" => Some(TokenKind::Function),
        "def" => Some(TokenKind::Def),
        "true" => Some(TokenKind::True),
        "false" => Some(TokenKind::False),
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "ret" => Some(TokenKind::Ret),
        _ => None,
    }
}

#[derive(Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    iter: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        let iter = input.char_indices().peekable();
        Self { input, iter }
    }

    fn is_letter(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        while self.iter.next_if(|(_, ch)| Self::is_letter(*ch)).is_some() {}

        let ident = &self.input[start..self.next_idx()];
        Token::new(keywords(ident).unwrap_or(TokenKind::Ident), ident)
    }

    fn read_number(&mut self, start: usize) -> Token {
        while self.iter.next_if(|(_, ch)| ch.is_ascii_digit()).is_some() {}

        Token::new(TokenKind::Int, &self.input[start..self.next_idx()])
    }

    /// `start` is the index of the opening quote; the literal excludes both quotes.
    fn read_string(&mut self, start: usize) -> Token {
        loop {
            match self.iter.next() {
                Some((end, '"')) => return Token::new(TokenKind::Str, &self.input[start + 1..end]),
                None => return Token::new(TokenKind::Illegal, &self.input[start..]),
                _ => {}
            }
        }
    }

    /// Consumes `second` if it follows, producing the two-character token.
    fn either(&mut self, start: usize, second: char, double: TokenKind, single: TokenKind) -> Token {
        let kind = if self.iter.next_if(|(_, ch)| *ch == second).is_some() {
            double
        } else {
            single
        };
        Token::new(kind, &self.input[start..self.next_idx()])
    }

    fn next_idx(&mut self) -> usize {
        self.iter
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while self
            .iter
            .next_if(|(_, ch)| matches!(*ch, ' ' | '\t' | '\r' | '\n'))
            .is_some()
        {}

        let (idx, ch) = self.iter.next()?;
        let kind = match ch {
            '=' => return Some(self.either(idx, '=', TokenKind::Equal, TokenKind::Assign)),
            '!' => return Some(self.either(idx, '=', TokenKind::NotEqual, TokenKind::Bang)),
            '"' => return Some(self.read_string(idx)),
            c if Tokenizer::is_letter(c) => return Some(self.read_identifier(idx)),
            c if c.is_ascii_digit() => return Some(self.read_number(idx)),
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Asterisk),
            '/' => Some(TokenKind::Slash),
            '<' => Some(TokenKind::LessThan),
            '>' => Some(TokenKind::GreaterThan),
            ',' => Some(TokenKind::Comma),
            ':' => Some(TokenKind::Colon),
            ';' => Some(TokenKind::SemiColon),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            '[' => Some(TokenKind::LBracket),
            ']' => Some(TokenKind::RBracket),
            _ => None,
        };
        let end = self.next_idx();
        Some(Token::new(
            kind.unwrap_or(TokenKind::Illegal),
            &self.input[idx..end],
        ))
    }
}
