pub mod error;
pub mod expressions;
pub mod statements;

use log::debug;

use crate::ast::Program;
use crate::lexer::{Token, TokenKind, TokenSource};
pub use error::ParseError;
use statements::parse_statement;

/// Pratt parser over a [`TokenSource`].
///
/// The parser always holds the token under consideration (`current`) and a
/// single token of lookahead (`peek`). Parse functions are entered with
/// `current` on the first token of their construct and leave it on the last.
pub struct Parser<S: TokenSource> {
    source: S,
    pub(crate) current: Token,
    pub(crate) peek: Token,
    /// Braces opened and not yet closed, counting `current`.
    pub(crate) depth: usize,
    errors: Vec<ParseError>,
}

impl<S: TokenSource> Parser<S> {
    pub fn new(mut source: S) -> Self {
        let current = source.next_token();
        let peek = source.next_token();
        let mut parser = Self {
            source,
            current,
            peek,
            depth: 0,
            errors: Vec::new(),
        };
        parser.track_depth();
        parser
    }

    /// Syntax errors collected by the last [`Parser::parse_program`] call.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub(crate) fn next_token(&mut self) {
        let next = self.source.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
        self.track_depth();
    }

    fn track_depth(&mut self) {
        match self.current.kind {
            TokenKind::LBrace => self.depth += 1,
            TokenKind::RBrace => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
    }

    pub(crate) fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub(crate) fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advances only if the lookahead is `kind`.
    pub(crate) fn expect_peek(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek_is(kind) {
            self.next_token();
            Ok(())
        } else {
            Err(ParseError::unexpected_token(kind, &self.peek))
        }
    }

    pub(crate) fn record_error(&mut self, err: ParseError) {
        debug!("syntax error: {err}");
        self.errors.push(err);
    }

    /// Skips the rest of a malformed statement that started at brace `depth`.
    ///
    /// Stops on the `;` ending it, or on the `}` closing the enclosing block,
    /// so nested braces inside the statement are skipped whole.
    pub(crate) fn synchronize(&mut self, depth: usize) {
        loop {
            match self.current.kind {
                TokenKind::Eof => return,
                TokenKind::SemiColon if self.depth == depth => return,
                TokenKind::RBrace if self.depth < depth => return,
                _ => self.next_token(),
            }
        }
    }

    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        self.errors.clear();

        while !self.current_is(TokenKind::Eof) {
            match parse_statement(self) {
                Ok(statement) => {
                    statements.push(statement);
                }
                Err(err) => {
                    self.record_error(err);
                    self.synchronize(0);
                }
            }
            self.next_token();
        }

        Program { statements }
    }
}
