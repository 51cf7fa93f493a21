use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use coff_lang_core::lexer;
use coff_lang_core::parser;
use coff_lang_interpreter::environment;
use coff_lang_interpreter::evaluator;
use log::info;

use crate::printer::Printer;

/// Runs a whole script once and prints its result. Syntax errors stop the
/// script before anything is evaluated.
pub fn execute_file(path: &Path) -> anyhow::Result<ExitCode> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    info!("running {}", path.display());

    let mut printer = Printer::stdout();
    let mut parser = parser::Parser::new(lexer::Tokenizer::new(&source));
    let program = parser.parse_program();
    if !parser.errors().is_empty() {
        printer.print_parse_errors(parser.errors())?;
        return Ok(ExitCode::FAILURE);
    }

    let mut env = environment::Environment::new();
    let result = evaluator::eval_program(&program, &mut env);
    printer.print_result(result.as_deref())?;

    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
