use std::fs;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use walkdir::WalkDir;

use renelle::interpreter::evaluator::{self, EvalContext};
use renelle::interpreter::scope::Scope;
use renelle::{RunError, project, repl, run_source};

/// renelle is an expression-oriented functional scripting language with
/// atoms, immutable data, destructuring and modules.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scaffold a new project directory.
    New {
        /// Name of the project (and its directory).
        name: String,
    },
    /// Locate the enclosing project and run its main module.
    Run {
        /// Arguments passed through to `os_args()`.
        args: Vec<String>,
    },
    /// Run every `*_test.rnl` file under a directory.
    Test {
        /// Directory to search (defaults to `./test`).
        dir: Option<String>,
    },
    /// Run a script file: `renelle <file> [args…]`.
    #[command(external_subcommand)]
    Script(Vec<String>),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        None => match repl::start() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("repl error: {err}");
                ExitCode::FAILURE
            },
        },
        Some(Command::New { name }) => match project::create(&name) {
            Ok(()) => {
                println!("Project created successfully: {name}");
                ExitCode::SUCCESS
            },
            Err(err) => {
                eprintln!("Error creating project: {err}");
                ExitCode::FAILURE
            },
        },
        Some(Command::Run { args }) => run_project(args),
        Some(Command::Test { dir }) => run_tests(&dir.unwrap_or_else(|| "./test".to_string())),
        Some(Command::Script(parts)) => {
            let file = &parts[0];
            let args = parts[1..].to_vec();
            run_script(file, args)
        },
    }
}

fn run_script(file: &str, args: Vec<String>) -> ExitCode {
    let source = match fs::read_to_string(file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error reading file {file}: {err}");
            return ExitCode::FAILURE;
        },
    };

    match run_source(&source, file, args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(RunError::Parse(errors)) => {
            for error in errors {
                eprintln!("\t{error}");
            }
            ExitCode::FAILURE
        },
        Err(RunError::Runtime(error)) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        },
    }
}

/// `renelle run`: walk upward for the project marker, read the module name
/// from `rnl.rnl`, evaluate `src/main.rnl`, and call the module's `main`.
fn run_project(args: Vec<String>) -> ExitCode {
    let root = match project::find_root() {
        Ok(root) => root,
        Err(err) => {
            eprintln!("Error finding project directory: {err}");
            return ExitCode::FAILURE;
        },
    };

    let module_name = match project::module_name(&root) {
        Ok(name) => name,
        Err(err) => {
            eprintln!("Error getting module name: {err}");
            return ExitCode::FAILURE;
        },
    };

    // Module resolution is relative to the project root.
    if let Err(err) = std::env::set_current_dir(&root) {
        eprintln!("Error entering project directory: {err}");
        return ExitCode::FAILURE;
    }

    let main_path = root.join("src").join("main.rnl");
    let source = match fs::read_to_string(&main_path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error reading file {}: {err}", main_path.display());
            return ExitCode::FAILURE;
        },
    };

    let program = match renelle::parse_source(&source, &main_path.display().to_string()) {
        Ok(program) => program,
        Err(errors) => {
            for error in errors {
                eprintln!("\t{error}");
            }
            return ExitCode::FAILURE;
        },
    };

    let env = Scope::new();
    let mut ctx = EvalContext::with_args(&main_path.display().to_string(), args);
    if let Err(error) = evaluator::eval_program(&program, &env, &mut ctx) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    let Some(module) = env.get_module(&module_name) else {
        eprintln!("Module not found: {module_name}");
        return ExitCode::FAILURE;
    };
    let Some(main) = module.env.get("main") else {
        eprintln!("main function not found");
        return ExitCode::FAILURE;
    };

    match evaluator::apply_function(&main, &[], &mut ctx) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        },
    }
}

/// `renelle test [dir]`: run every `*_test.rnl` under the directory; any
/// parse or runtime failure fails the command.
fn run_tests(dir: &str) -> ExitCode {
    let mut ran = 0;
    let mut failed = 0;

    for entry in WalkDir::new(dir).into_iter().filter_map(Result::ok) {
        let path = entry.path();
        let is_test = path.is_file()
                      && path.file_name()
                             .and_then(|name| name.to_str())
                             .is_some_and(|name| name.ends_with("_test.rnl"));
        if !is_test {
            continue;
        }

        println!("Running tests in {}", path.display());
        ran += 1;

        let file = path.display().to_string();
        match fs::read_to_string(path) {
            Ok(source) => {
                if let Err(err) = run_source(&source, &file, Vec::new()) {
                    eprintln!("{err}");
                    failed += 1;
                }
            },
            Err(err) => {
                eprintln!("Error reading file {file}: {err}");
                failed += 1;
            },
        }
    }

    if ran == 0 {
        println!("No *_test.rnl files found under {dir}");
    }
    if failed > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
