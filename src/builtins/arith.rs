// ABOUTME: Arithmetic operators: + - * /

use crate::env::Environment;
use crate::error::{assert_arity_at_least, assert_type};
use crate::value::Value;
use std::rc::Rc;

fn is_num(v: &Value) -> bool {
    matches!(v, Value::Num(_))
}

/// Reduces a non-empty list of `Num` left-to-right with `op`. If exactly
/// one argument is given, `unary` decides its value (identity for `+`/`*`,
/// negation for `-`, left as an error case the caller must reject for `/`
/// which has no meaningful unary form here).
fn fold_nums(
    name: &'static str,
    args: Vec<Value>,
    unary: impl Fn(i64) -> i64,
    op: impl Fn(i64, i64) -> Option<i64>,
) -> Value {
    if let Err(e) = assert_arity_at_least(name, &args, 1) {
        return e;
    }
    for i in 0..args.len() {
        if let Err(e) = assert_type(name, &args, i, "Number", is_num) {
            return e;
        }
    }

    let mut nums = args.into_iter().map(|v| match v {
        Value::Num(n) => n,
        _ => unreachable!(),
    });

    let first = nums.next().unwrap();
    let rest: Vec<i64> = nums.collect();

    if rest.is_empty() {
        return Value::Num(unary(first));
    }

    let mut acc = first;
    for n in rest {
        match op(acc, n) {
            Some(result) => acc = result,
            None => return Value::err("Division By Zero."),
        }
    }
    Value::Num(acc)
}

fn builtin_add(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    fold_nums("+", args, |a| a, |a, b| Some(a.wrapping_add(b)))
}

fn builtin_sub(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    fold_nums("-", args, i64::wrapping_neg, |a, b| Some(a.wrapping_sub(b)))
}

fn builtin_mul(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    fold_nums("*", args, |a| a, |a, b| Some(a.wrapping_mul(b)))
}

fn builtin_div(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    fold_nums("/", args, |a| a, |a, b| if b == 0 { None } else { Some(a.wrapping_div(b)) })
}

pub fn register(env: &Rc<Environment>) {
    env.add_builtin("+", builtin_add);
    env.add_builtin("-", builtin_sub);
    env.add_builtin("*", builtin_mul);
    env.add_builtin("/", builtin_div);
}
