use crate::ast::{DefStatement, Identifier, ReturnStatement, Statement};
use crate::lexer::{TokenKind, TokenSource};
use crate::parser::expressions::{parse_expression, Precedence};
use crate::parser::{ParseError, Parser};

/// Parses one statement, consuming its trailing `;` when there is one.
pub fn parse_statement<S: TokenSource>(parser: &mut Parser<S>) -> Result<Statement, ParseError> {
    let statement = match parser.current.kind {
        TokenKind::Def => Statement::Def(parse_def_statement(parser)?),
        TokenKind::Ret => Statement::Return(parse_return_statement(parser)?),
        _ => Statement::Expression(parse_expression(parser, Precedence::Lowest)?),
    };

    if parser.peek_is(TokenKind::SemiColon) {
        parser.next_token();
    }
    Ok(statement)
}

fn parse_def_statement<S: TokenSource>(parser: &mut Parser<S>) -> Result<DefStatement, ParseError> {
    parser.expect_peek(TokenKind::Ident)?;
    let name = parser.current.literal.clone();
    parser.expect_peek(TokenKind::Assign)?;
    parser.next_token();
    let value = parse_expression(parser, Precedence::Lowest)?;

    Ok(DefStatement {
        identifier: Identifier { name },
        value,
    })
}

fn parse_return_statement<S: TokenSource>(
    parser: &mut Parser<S>,
) -> Result<ReturnStatement, ParseError> {
    if parser.peek_is(TokenKind::SemiColon)
        || parser.peek_is(TokenKind::RBrace)
        || parser.peek_is(TokenKind::Eof)
    {
        return Ok(ReturnStatement { value: None });
    }
    parser.next_token();
    let value = parse_expression(parser, Precedence::Lowest)?;

    Ok(ReturnStatement { value: Some(value) })
}
