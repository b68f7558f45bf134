// ABOUTME: Definition (def, =) and lambda construction (\)

use crate::env::Environment;
use crate::error::{assert_arity_at_least, assert_type};
use crate::value::Value;
use std::rc::Rc;

fn is_qexpr(v: &Value) -> bool {
    matches!(v, Value::QExpr(_))
}

fn is_sym(v: &Value) -> bool {
    matches!(v, Value::Sym(_))
}

/// Shared body for `def` (binds globally) and `=` (binds locally):
/// `{x y ...} v1 v2 ...` binds each symbol in the first `QExpr` to the
/// matching value.
fn bind(fname: &'static str, env: &Rc<Environment>, args: Vec<Value>, global: bool) -> Value {
    if let Err(e) = assert_arity_at_least(fname, &args, 1) {
        return e;
    }
    if let Err(e) = assert_type(fname, &args, 0, "Q-Expression", is_qexpr) {
        return e;
    }

    let mut args = args;
    let names = args.remove(0).into_seq().unwrap();

    for (i, name) in names.iter().enumerate() {
        if !is_sym(name) {
            return Value::err(format!(
                "Function '{fname}' cannot define non-symbol at position {i}. Got {}, Expected Symbol.",
                name.type_name()
            ));
        }
    }

    if names.len() != args.len() {
        return Value::err(format!(
            "Function '{fname}' passed incorrect number of arguments. Got {}, Expected {}.",
            args.len(),
            names.len()
        ));
    }

    for (name, value) in names.into_iter().zip(args) {
        let name = match name {
            Value::Sym(s) => s,
            _ => unreachable!(),
        };
        if global {
            env.def(name, value);
        } else {
            env.put(name, value);
        }
    }

    Value::SExpr(vec![])
}

fn builtin_def(env: &Rc<Environment>, args: Vec<Value>) -> Value {
    bind("def", env, args, true)
}

fn builtin_put(env: &Rc<Environment>, args: Vec<Value>) -> Value {
    bind("=", env, args, false)
}

/// `\ {formals} {body}` constructs a `Lambda` after checking both are
/// `QExpr`s and that every formal is a `Sym`.
fn builtin_lambda(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    if args.len() != 2 {
        return Value::err(format!(
            "Function '\\' passed incorrect number of arguments. Got {}, Expected 2.",
            args.len()
        ));
    }
    if let Err(e) = assert_type("\\", &args, 0, "Q-Expression", is_qexpr) {
        return e;
    }
    if let Err(e) = assert_type("\\", &args, 1, "Q-Expression", is_qexpr) {
        return e;
    }

    let formals = args[0].as_seq().unwrap();
    for formal in formals {
        if !is_sym(formal) {
            return Value::err(format!(
                "Function '\\' cannot define non-symbol. Got {}, Expected Symbol.",
                formal.type_name()
            ));
        }
    }

    let mut args = args.into_iter();
    let formals = args.next().unwrap();
    let body = args.next().unwrap();
    Value::lambda(formals, body)
}

pub fn register(env: &Rc<Environment>) {
    env.add_builtin("def", builtin_def);
    env.add_builtin("=", builtin_put);
    env.add_builtin("\\", builtin_lambda);
}
