use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::interpreter::evaluator::EvalContext;
use crate::interpreter::scope::Scope;
use crate::{RunError, eval_source};

const PROMPT: &str = ">> ";

/// Runs the interactive loop.
///
/// Each line is lexed, parsed and evaluated against a root scope that
/// persists for the whole session, so bindings and loaded modules carry
/// over between lines. Parse errors list every problem in the line;
/// runtime errors print in their standard format. Ctrl-C and Ctrl-D end
/// the session.
pub fn start() -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;
    let env = Scope::new();
    let mut ctx = EvalContext::new("repl");

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(&line);

                match eval_source(&line, "repl", &env, &mut ctx) {
                    Ok(value) => println!("{}", value.inspect()),
                    Err(RunError::Parse(errors)) => {
                        for error in errors {
                            println!("\t{error}");
                        }
                    },
                    Err(RunError::Runtime(error)) => println!("{error}"),
                }
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        }
    }

    Ok(())
}
