use super::error::ParseError;
use super::statements::parse_statement;
use crate::ast::{BlockStatement, Expression, Identifier, InfixOperationKind, PrefixOperationKind};
use crate::lexer::{TokenKind, TokenSource};
use crate::parser::Parser;

#[derive(PartialOrd, PartialEq, Debug, Clone, Copy)]
pub enum Precedence {
    Lowest = 0,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

pub fn precedence_of(token: TokenKind) -> Precedence {
    match token {
        TokenKind::Equal => Precedence::Equals,
        TokenKind::NotEqual => Precedence::Equals,
        TokenKind::LessThan => Precedence::LessGreater,
        TokenKind::GreaterThan => Precedence::LessGreater,
        TokenKind::Plus => Precedence::Sum,
        TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk => Precedence::Product,
        TokenKind::Slash => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        TokenKind::LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

type PrefixFunction<S> = fn(&mut Parser<S>) -> Result<Expression, ParseError>;
type InfixFunction<S> = fn(&mut Parser<S>, Expression) -> Result<Expression, ParseError>;

pub fn parse_expression<S: TokenSource>(
    parser: &mut Parser<S>,
    precedence: Precedence,
) -> Result<Expression, ParseError> {
    let Some(prefix_parse_function) = prefix_parsing_function::<S>(parser.current.kind) else {
        return Err(ParseError::NoPrefixFunction(parser.current.kind));
    };
    let mut left_expression = prefix_parse_function(parser)?;

    while !parser.peek_is(TokenKind::SemiColon) && precedence < precedence_of(parser.peek.kind) {
        let Some(infix_parse_function) = infix_parsing_function::<S>(parser.peek.kind) else {
            break;
        };
        parser.next_token();
        left_expression = infix_parse_function(parser, left_expression)?;
    }

    Ok(left_expression)
}

fn parse_identifier<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expression, ParseError> {
    Ok(Expression::Identifier(Identifier {
        name: parser.current.literal.clone(),
    }))
}

fn parse_integer_literal<S: TokenSource>(
    parser: &mut Parser<S>,
) -> Result<Expression, ParseError> {
    let literal = &parser.current.literal;
    match literal.parse() {
        Ok(value) => Ok(Expression::IntegerLiteral {
            value,
            literal: literal.clone(),
        }),
        Err(_) => Err(ParseError::InvalidInteger(literal.clone())),
    }
}

fn parse_string_literal<S: TokenSource>(
    parser: &mut Parser<S>,
) -> Result<Expression, ParseError> {
    Ok(Expression::StringLiteral(parser.current.literal.to_string()))
}

fn parse_boolean<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expression, ParseError> {
    Ok(Expression::BooleanLiteral(parser.current_is(TokenKind::True)))
}

fn parse_prefix_operation<S: TokenSource>(
    parser: &mut Parser<S>,
) -> Result<Expression, ParseError> {
    let kind = match parser.current.kind {
        TokenKind::Bang => PrefixOperationKind::Bang,
        _ => PrefixOperationKind::Minus,
    };
    parser.next_token();

    Ok(Expression::PrefixOperation(
        kind,
        Box::new(parse_expression(parser, Precedence::Prefix)?),
    ))
}

fn parse_grouped_expression<S: TokenSource>(
    parser: &mut Parser<S>,
) -> Result<Expression, ParseError> {
    parser.next_token();
    let expression = parse_expression(parser, Precedence::Lowest)?;
    parser.expect_peek(TokenKind::RParen)?;

    Ok(expression)
}

/// Comma separated elements closed by `terminator`; a trailing comma is allowed.
///
/// Entered on the opening token, `parse_element` is entered on the first token
/// of each element.
fn parse_sequence<S: TokenSource, T>(
    parser: &mut Parser<S>,
    parse_element: impl Fn(&mut Parser<S>) -> Result<T, ParseError>,
    terminator: TokenKind,
) -> Result<Vec<T>, ParseError> {
    let mut elements = Vec::new();

    while !parser.peek_is(terminator) {
        parser.next_token();
        elements.push(parse_element(parser)?);

        if parser.peek_is(TokenKind::Comma) {
            parser.next_token();
        } else {
            break;
        }
    }
    parser.expect_peek(terminator)?;

    Ok(elements)
}

fn parse_array_literal<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expression, ParseError> {
    let expressions = parse_sequence(
        parser,
        |parser| parse_expression(parser, Precedence::Lowest),
        TokenKind::RBracket,
    )?;
    Ok(Expression::ArrayLiteral(expressions))
}

fn parse_hash_literal<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expression, ParseError> {
    let pairs = parse_sequence(
        parser,
        |parser| {
            let key = parse_expression(parser, Precedence::Lowest)?;
            parser.expect_peek(TokenKind::Colon)?;
            parser.next_token();
            let value = parse_expression(parser, Precedence::Lowest)?;
            Ok((key, value))
        },
        TokenKind::RBrace,
    )?;
    Ok(Expression::HashLiteral(pairs))
}

fn parse_if_expression<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expression, ParseError> {
    parser.next_token();
    let condition = Box::new(parse_expression(parser, Precedence::Lowest)?);

    parser.expect_peek(TokenKind::LBrace)?;
    let consequence = parse_block_statement(parser)?;

    let alternative = if parser.peek_is(TokenKind::Else) {
        parser.next_token();
        parser.expect_peek(TokenKind::LBrace)?;
        Some(parse_block_statement(parser)?)
    } else {
        None
    };

    Ok(Expression::IfExpression {
        condition,
        consequence,
        alternative,
    })
}

/// Entered on `{`, leaves the parser on the matching `}`.
///
/// A malformed statement is recorded and skipped without leaving the block.
pub(crate) fn parse_block_statement<S: TokenSource>(
    parser: &mut Parser<S>,
) -> Result<BlockStatement, ParseError> {
    let mut statements = Vec::new();
    let depth = parser.depth;
    parser.next_token();

    while !parser.current_is(TokenKind::RBrace) {
        if parser.current_is(TokenKind::Eof) {
            return Err(ParseError::unexpected_token(
                TokenKind::RBrace,
                &parser.current,
            ));
        }
        match parse_statement(parser) {
            Ok(statement) => statements.push(statement),
            Err(err) => {
                parser.record_error(err);
                parser.synchronize(depth);
                if parser.current_is(TokenKind::RBrace) {
                    continue;
                }
            }
        }
        parser.next_token();
    }

    Ok(BlockStatement { statements })
}

fn parse_function_literal<S: TokenSource>(
    parser: &mut Parser<S>,
) -> Result<Expression, ParseError> {
    parser.expect_peek(TokenKind::LParen)?;
    let parameters = parse_parameters(parser)?;

    parser.expect_peek(TokenKind::LBrace)?;
    let body = parse_block_statement(parser)?;

    Ok(Expression::FunctionLiteral { parameters, body })
}

fn parse_parameters<S: TokenSource>(parser: &mut Parser<S>) -> Result<Vec<Identifier>, ParseError> {
    parse_sequence(
        parser,
        |parser| {
            if parser.current_is(TokenKind::Ident) {
                Ok(Identifier {
                    name: parser.current.literal.clone(),
                })
            } else {
                Err(ParseError::unexpected_token(
                    TokenKind::Ident,
                    &parser.current,
                ))
            }
        },
        TokenKind::RParen,
    )
}

fn prefix_parsing_function<S: TokenSource>(token: TokenKind) -> Option<PrefixFunction<S>> {
    match token {
        TokenKind::Ident => Some(parse_identifier),
        TokenKind::Int => Some(parse_integer_literal),
        TokenKind::Str => Some(parse_string_literal),
        TokenKind::True | TokenKind::False => Some(parse_boolean),
        TokenKind::Bang | TokenKind::Minus => Some(parse_prefix_operation),
        TokenKind::LParen => Some(parse_grouped_expression),
        TokenKind::LBracket => Some(parse_array_literal),
        TokenKind::LBrace => Some(parse_hash_literal),
        TokenKind::If => Some(parse_if_expression),
        TokenKind::Function => Some(parse_function_literal),
        _ => None,
    }
}

fn parse_infix_operation<S: TokenSource>(
    parser: &mut Parser<S>,
    left: Expression,
) -> Result<Expression, ParseError> {
    let token = parser.current.kind;
    let kind = match token {
        TokenKind::Plus => InfixOperationKind::Plus,
        TokenKind::Minus => InfixOperationKind::Minus,
        TokenKind::LessThan => InfixOperationKind::LessThan,
        TokenKind::GreaterThan => InfixOperationKind::GreaterThan,
        TokenKind::Equal => InfixOperationKind::Equal,
        TokenKind::NotEqual => InfixOperationKind::NotEqual,
        TokenKind::Asterisk => InfixOperationKind::Multiply,
        _ => InfixOperationKind::Divide,
    };
    parser.next_token();

    Ok(Expression::InfixOperation(
        kind,
        Box::new(left),
        Box::new(parse_expression(parser, precedence_of(token))?),
    ))
}

fn parse_call_function<S: TokenSource>(
    parser: &mut Parser<S>,
    left: Expression,
) -> Result<Expression, ParseError> {
    let arguments = parse_sequence(
        parser,
        |parser| parse_expression(parser, Precedence::Lowest),
        TokenKind::RParen,
    )?;

    Ok(Expression::CallExpression {
        function: Box::new(left),
        arguments,
    })
}

fn parse_index_expression<S: TokenSource>(
    parser: &mut Parser<S>,
    left: Expression,
) -> Result<Expression, ParseError> {
    parser.next_token();
    let index = parse_expression(parser, Precedence::Lowest)?;
    parser.expect_peek(TokenKind::RBracket)?;

    Ok(Expression::IndexExpression {
        left: Box::new(left),
        index: Box::new(index),
    })
}

fn infix_parsing_function<S: TokenSource>(token: TokenKind) -> Option<InfixFunction<S>> {
    match token {
        TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::LessThan
        | TokenKind::GreaterThan
        | TokenKind::Equal
        | TokenKind::NotEqual
        | TokenKind::Asterisk
        | TokenKind::Slash => Some(parse_infix_operation),
        TokenKind::LParen => Some(parse_call_function),
        TokenKind::LBracket => Some(parse_index_expression),
        _ => None,
    }
}
