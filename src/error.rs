// ABOUTME: Host-level error type and builtin precondition helpers

use crate::value::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Failures below the language: these never reach the evaluator as
/// `Value::Err` directly. `load` converts an `Io` failure to
/// `Err("Could not load file <name>")` at its single call site; the REPL
/// driver only logs a `History` failure, since a missing history file must
/// not abort the session.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not access history file: {0}")]
    History(#[source] std::io::Error),
}

/// The spiritual equivalent of the original interpreter's `LASSERT` family:
/// small, composable precondition checks that a builtin calls before doing
/// its real work. Each returns `Err(...)` describing the violation, or
/// `Ok(())` if the check passed. Builtins short-circuit with `?`-like
/// early-return on the `Err` case (Rust's `?` does not apply here since the
/// check itself already hands back a `Value`, not a `Result` wrapping one —
/// builtins do `if let Err(e) = ... { return e; }`).
pub fn assert_arity(fname: &str, args: &[Value], expected: usize) -> Result<(), Value> {
    if args.len() != expected {
        return Err(Value::err(format!(
            "Function '{fname}' passed incorrect number of arguments. Got {}, Expected {expected}.",
            args.len()
        )));
    }
    Ok(())
}

pub fn assert_arity_at_least(fname: &str, args: &[Value], minimum: usize) -> Result<(), Value> {
    if args.len() < minimum {
        return Err(Value::err(format!(
            "Function '{fname}' passed incorrect number of arguments. Got {}, Expected at least {minimum}.",
            args.len()
        )));
    }
    Ok(())
}

pub fn assert_type(
    fname: &str,
    args: &[Value],
    idx: usize,
    expected: &str,
    matches: impl Fn(&Value) -> bool,
) -> Result<(), Value> {
    if !matches(&args[idx]) {
        return Err(Value::err(format!(
            "Function '{fname}' passed incorrect type for argument {idx}. Got {}, Expected {expected}.",
            args[idx].type_name()
        )));
    }
    Ok(())
}

pub fn assert_not_empty(fname: &str, args: &[Value], idx: usize) -> Result<(), Value> {
    match args[idx].as_seq() {
        Some(items) if items.is_empty() => Err(Value::err(format!(
            "Function '{fname}' passed {{}} for argument {idx}."
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_mismatch_reports_got_and_expected() {
        let args = vec![Value::Num(1)];
        let err = assert_arity("head", &args, 2).unwrap_err();
        assert_eq!(
            err,
            Value::err("Function 'head' passed incorrect number of arguments. Got 1, Expected 2.")
        );
    }

    #[test]
    fn type_mismatch_reports_got_and_expected() {
        let args = vec![Value::Sym("x".into())];
        let err = assert_type("head", &args, 0, "Q-Expression", |v| matches!(v, Value::QExpr(_)))
            .unwrap_err();
        assert_eq!(
            err,
            Value::err("Function 'head' passed incorrect type for argument 0. Got Symbol, Expected Q-Expression.")
        );
    }

    #[test]
    fn not_empty_check_only_fails_on_empty_sequences() {
        let empty = vec![Value::QExpr(vec![])];
        assert!(assert_not_empty("head", &empty, 0).is_err());

        let non_empty = vec![Value::QExpr(vec![Value::Num(1)])];
        assert!(assert_not_empty("head", &non_empty, 0).is_ok());
    }
}
