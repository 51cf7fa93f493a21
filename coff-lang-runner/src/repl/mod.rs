mod reader;

use rustyline::DefaultEditor;

use coff_lang_interpreter::environment::Environment;
use coff_lang_interpreter::evaluator;
use log::info;

use crate::printer::Printer;
use reader::{ReadOutput, Reader};

struct Repl {
    reader: Reader,
    environment: Environment,
    printer: Printer<std::io::Stdout>,
}

impl Repl {
    fn run(mut self) -> anyhow::Result<()> {
        loop {
            match self.reader.read(&mut self.printer)? {
                ReadOutput::Exit => break,
                ReadOutput::Clear => continue,
                ReadOutput::Value(program) => {
                    let result = evaluator::eval_program(&program, &mut self.environment);
                    self.printer.print_result(result.as_deref())?;
                }
            }
        }
        Ok(())
    }
}

fn greeting() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "stranger".to_owned());
    format!("Hello {user}! This is the Coff programming language.\nFeel free to type in commands")
}

/// Runs the interactive loop until CTRL-D. One environment lives for the
/// whole session.
pub fn start(greet: bool) -> anyhow::Result<()> {
    let rl = DefaultEditor::new()?;
    info!("starting interactive session");

    if greet {
        println!("{}", greeting());
    }

    Repl {
        reader: Reader::new(rl),
        environment: Environment::new(),
        printer: Printer::stdout(),
    }
    .run()
}
