use std::rc::Rc;

use thiserror::Error;

use crate::lexer::{Token, TokenKind};

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ParseError {
    #[error("expected next token to be {expected} but got {got} instead")]
    UnexpectedToken { expected: TokenKind, got: TokenKind },
    #[error("no prefix parse function for {0} found")]
    NoPrefixFunction(TokenKind),
    #[error("could not parse {0:?} as an integer")]
    InvalidInteger(Rc<str>),
}

impl ParseError {
    pub fn unexpected_token(expected: TokenKind, got: &Token) -> Self {
        ParseError::UnexpectedToken {
            expected,
            got: got.kind,
        }
    }
}
