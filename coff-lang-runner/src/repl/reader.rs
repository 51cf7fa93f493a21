use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use coff_lang_core::ast::Program;
use coff_lang_core::lexer;
use coff_lang_core::parser;

use crate::printer::Printer;

const PROMPT: &str = ">> ";

pub enum ReadOutput {
    Exit,
    Clear,
    Value(Program),
}

pub struct Reader {
    rl: DefaultEditor,
}

impl Reader {
    pub fn new(rl: DefaultEditor) -> Self {
        Self { rl }
    }

    /// Reads one line and parses it. Lines with syntax errors are reported
    /// and skipped.
    pub fn read(&mut self, printer: &mut Printer<impl std::io::Write>) -> anyhow::Result<ReadOutput> {
        let line = match self.rl.readline(PROMPT) {
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                return Ok(ReadOutput::Clear);
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                return Ok(ReadOutput::Exit);
            }
            Err(err) => return Err(err.into()),
            Ok(line) => line,
        };
        if line.trim().is_empty() {
            return Ok(ReadOutput::Clear);
        }
        self.rl.add_history_entry(&line)?;

        let mut parser = parser::Parser::new(lexer::Tokenizer::new(&line));
        let program = parser.parse_program();

        if parser.errors().is_empty() {
            Ok(ReadOutput::Value(program))
        } else {
            printer.print_parse_errors(parser.errors())?;
            Ok(ReadOutput::Clear)
        }
    }
}
