use std::io::{self, Write};

use coff_lang_core::parser::ParseError;
use coff_lang_interpreter::object::{EvaluationError, Object};

/// Renders parse results and evaluation results for a human.
pub struct Printer<W: Write> {
    out: W,
}

impl Printer<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> Printer<W> {
    pub fn print_parse_errors(&mut self, errors: &[ParseError]) -> io::Result<()> {
        for error in errors {
            writeln!(self.out, "\t{}", error)?;
        }
        Ok(())
    }

    pub fn print_result(&mut self, result: Result<&Object, &EvaluationError>) -> io::Result<()> {
        match result {
            Ok(object) => writeln!(self.out, "{}", object.inspect()),
            Err(error) => writeln!(self.out, "ERROR: {}", error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coff_lang_core::lexer::TokenKind;
    use coff_lang_interpreter::object::ObjectType;
    use pretty_assertions::assert_eq;

    fn printed(print: impl FnOnce(&mut Printer<Vec<u8>>) -> io::Result<()>) -> String {
        let mut printer = Printer { out: Vec::new() };
        print(&mut printer).unwrap();
        String::from_utf8(printer.out).unwrap()
    }

    #[test]
    fn test_parse_errors_are_indented() {
        let errors = vec![
            ParseError::NoPrefixFunction(TokenKind::RParen),
            ParseError::UnexpectedToken {
                expected: TokenKind::Assign,
                got: TokenKind::Int,
            },
        ];

        assert_eq!(
            printed(|printer| printer.print_parse_errors(&errors)),
            "\tno prefix parse function for ) found\n\
             \texpected next token to be = but got INT instead\n"
        );
    }

    #[test]
    fn test_results() {
        let array = Object::Array(vec![Object::integer(1), Object::string("a".to_owned())]);
        assert_eq!(
            printed(|printer| printer.print_result(Ok(&array))),
            "[1, a]\n"
        );
        assert_eq!(
            printed(|printer| printer.print_result(Err(&EvaluationError::CallNonFunction(
                ObjectType::Integer
            )))),
            "ERROR: not a function: INT\n"
        );
    }
}
