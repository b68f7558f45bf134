mod builtins;
mod env;
mod error;
mod eval;
mod reader;
mod value;

use clap::Parser;
use env::Environment;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

const BANNER: &str = "Lispy Version 0.0.1\nPress Ctrl+c to Exit\n";
const PROMPT: &str = "lispy> ";
const HISTORY_FILE: &str = ".lispy_history";

/// A small Lisp-like interpreter: run with no arguments for a REPL, or
/// pass one or more source files to execute them in sequence.
#[derive(Parser, Debug)]
#[command(version, about)]
struct CliArgs {
    /// Source files to load and execute, in order.
    files: Vec<PathBuf>,
}

fn main() {
    let args = CliArgs::parse();
    let env = Environment::new();
    builtins::register_builtins(&env);

    if args.files.is_empty() {
        repl(&env);
    } else {
        run_files(&env, &args.files);
    }
}

/// Invokes the same `load` builtin a script could call itself, once per
/// file argument, in order.
fn run_files(env: &std::rc::Rc<Environment>, files: &[PathBuf]) {
    for file in files {
        let load_fn = env.get("load");
        let arg = value::Value::Str(file.to_string_lossy().into_owned());
        let result = eval::call(env, load_fn, vec![arg]);
        if result.is_err() {
            println!("{result}");
        }
    }
}

fn repl(env: &std::rc::Rc<Environment>) {
    print!("{BANNER}");

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("could not start line editor: {err}");
            return;
        }
    };
    // Absence of a prior history file is not worth warning about.
    let _ = editor.load_history(HISTORY_FILE);

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                let parsed = reader::read(&line);
                let result = eval::eval(env, parsed);
                println!("{result}");
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        }
    }

    if let Err(err) = editor.save_history(HISTORY_FILE) {
        let host_err = error::HostError::History(std::io::Error::other(err.to_string()));
        eprintln!("{host_err}");
    }
}
