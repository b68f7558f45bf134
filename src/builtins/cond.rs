// ABOUTME: Conditional: if

use crate::env::Environment;
use crate::error::assert_type;
use crate::eval::eval;
use crate::value::Value;
use std::rc::Rc;

fn is_num(v: &Value) -> bool {
    matches!(v, Value::Num(_))
}

fn is_qexpr(v: &Value) -> bool {
    matches!(v, Value::QExpr(_))
}

/// `if cond {then} {else}`: evaluates `then` when `cond` is non-zero,
/// `else` otherwise, treating both branches as `SExpr` bodies.
fn builtin_if(env: &Rc<Environment>, args: Vec<Value>) -> Value {
    if args.len() != 3 {
        return Value::err(format!(
            "Function 'if' passed incorrect number of arguments. Got {}, Expected 3.",
            args.len()
        ));
    }
    if let Err(e) = assert_type("if", &args, 0, "Number", is_num) {
        return e;
    }
    if let Err(e) = assert_type("if", &args, 1, "Q-Expression", is_qexpr) {
        return e;
    }
    if let Err(e) = assert_type("if", &args, 2, "Q-Expression", is_qexpr) {
        return e;
    }

    let mut args = args;
    let else_branch = args.pop().unwrap();
    let then_branch = args.pop().unwrap();
    let cond = match args.pop().unwrap() {
        Value::Num(n) => n,
        _ => unreachable!(),
    };

    let branch = if cond != 0 { then_branch } else { else_branch };
    eval(env, Value::SExpr(branch.into_seq().unwrap()))
}

pub fn register(env: &Rc<Environment>) {
    env.add_builtin("if", builtin_if);
}
