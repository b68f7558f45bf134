// ABOUTME: I/O builtins: print, error, load

use crate::env::Environment;
use crate::error::{assert_arity, assert_type, HostError};
use crate::eval::eval;
use crate::reader::read;
use crate::value::Value;
use std::path::PathBuf;
use std::rc::Rc;

fn is_str(v: &Value) -> bool {
    matches!(v, Value::Str(_))
}

/// Prints each argument space-separated, followed by a newline. Returns
/// the empty `SExpr`.
fn builtin_print(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    let rendered: Vec<String> = args.iter().map(|v| v.to_string()).collect();
    println!("{}", rendered.join(" "));
    Value::SExpr(vec![])
}

/// Turns its one `Str` argument into an `Err` value.
fn builtin_error(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    if let Err(e) = assert_arity("error", &args, 1) {
        return e;
    }
    if let Err(e) = assert_type("error", &args, 0, "String", is_str) {
        return e;
    }
    match args.into_iter().next().unwrap() {
        Value::Str(s) => Value::Err(s),
        _ => unreachable!(),
    }
}

/// Reads and evaluates every top-level form in the named file. Errors
/// produced by individual forms are printed and execution continues; a
/// failure to open the file itself produces `Err("Could not load file
/// <name>")`.
fn builtin_load(env: &Rc<Environment>, args: Vec<Value>) -> Value {
    if let Err(e) = assert_arity("load", &args, 1) {
        return e;
    }
    if let Err(e) = assert_type("load", &args, 0, "String", is_str) {
        return e;
    }
    let name = match args.into_iter().next().unwrap() {
        Value::Str(s) => s,
        _ => unreachable!(),
    };

    let contents = match std::fs::read_to_string(&name) {
        Ok(contents) => contents,
        Err(source) => {
            let host_err = HostError::Io {
                path: PathBuf::from(&name),
                source,
            };
            eprintln!("{host_err}");
            return Value::err(format!("Could not load file {name}"));
        }
    };

    let forms = match read(&contents).into_seq() {
        Some(forms) => forms,
        None => unreachable!("read always returns an SExpr"),
    };

    for form in forms {
        let result = eval(env, form);
        if result.is_err() {
            println!("{result}");
        }
    }

    Value::SExpr(vec![])
}

pub fn register(env: &Rc<Environment>) {
    env.add_builtin("print", builtin_print);
    env.add_builtin("error", builtin_error);
    env.add_builtin("load", builtin_load);
}
