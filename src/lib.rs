//! # renelle
//!
//! Renelle is a small dynamically-typed, expression-oriented functional
//! scripting language: tagged atoms, immutable arrays/tuples/maps,
//! destructuring `let` and `case`, first-class functions with lexical
//! closure, a pipe operator, and modules backed by an embedded standard
//! library.
//!
//! The crate is the complete language pipeline — a hand-written lexer, a
//! Pratt parser and a tree-walking evaluator — plus the driver binary
//! (REPL, script runner and project tooling).

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::multiple_crate_versions
)]

use std::rc::Rc;

use crate::ast::Program;
use crate::error::{ParseError, RuntimeError};
use crate::interpreter::evaluator::{self, EvalContext};
use crate::interpreter::lexer::Lexer;
use crate::interpreter::parser::Parser;
use crate::interpreter::scope::Scope;
use crate::interpreter::value::Value;

/// The abstract syntax tree: statements, expressions and operators.
pub mod ast;
/// Parse and runtime error types.
pub mod error;
/// The language pipeline: lexer, parser, values, scopes and the evaluator.
pub mod interpreter;
/// The line-edited interactive loop.
pub mod repl;
/// Project scaffolding and discovery for the `new` and `run` subcommands.
pub mod project;

/// Everything that can stop a source run: a list of parse errors, or the
/// runtime error that aborted evaluation.
#[derive(Debug)]
pub enum RunError {
    Parse(Vec<ParseError>),
    Runtime(RuntimeError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(errors) => {
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{error}")?;
                }
                Ok(())
            },
            Self::Runtime(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for RunError {}

/// Lexes and parses `source`, returning the program or every parse error
/// found.
///
/// # Parameters
/// - `source`: The source text to parse.
/// - `file`: File name recorded in every token for error reporting.
///
/// # Errors
/// Returns the accumulated list of parse errors when the source does not
/// parse cleanly; the list holds one entry per independent mistake.
pub fn parse_source(source: &str, file: &str) -> Result<Program, Vec<ParseError>> {
    let mut parser = Parser::new(Lexer::new(source, file));
    let program = parser.parse_program();
    if parser.errors().is_empty() {
        Ok(program)
    } else {
        Err(parser.into_errors())
    }
}

/// Parses and evaluates `source` in a fresh root scope.
///
/// `args` become the values of `os_args()`. If the program leaves a `main`
/// binding at the top level it is invoked, and its value is the result.
///
/// # Errors
/// Returns [`RunError::Parse`] when the source does not parse, and
/// [`RunError::Runtime`] when evaluation aborts; the runtime error carries
/// the file/line/column of the failing node.
///
/// # Examples
/// ```
/// use renelle::run_source;
///
/// let value = run_source("let x = 2 + 3 x", "example", Vec::new()).unwrap();
/// assert_eq!(value.inspect(), "5");
///
/// let value = run_source("fn main() { 1 + 1 }", "example", Vec::new()).unwrap();
/// assert_eq!(value.inspect(), "2");
/// ```
pub fn run_source(source: &str, file: &str, args: Vec<String>) -> Result<Value, RunError> {
    let program = parse_source(source, file).map_err(RunError::Parse)?;
    let env = Scope::new();
    let mut ctx = EvalContext::with_args(file, args);
    evaluator::run_program(&program, &env, &mut ctx).map_err(RunError::Runtime)
}

/// Parses and evaluates `source` against an existing scope, without the
/// implicit `main` invocation — the REPL protocol.
pub fn eval_source(source: &str,
                   file: &str,
                   env: &Rc<Scope>,
                   ctx: &mut EvalContext)
                   -> Result<Value, RunError> {
    let program = parse_source(source, file).map_err(RunError::Parse)?;
    evaluator::eval_program(&program, env, ctx).map_err(RunError::Runtime)
}
