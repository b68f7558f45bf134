// ABOUTME: Comparison (> < >= <=) and deep-equality (== !=) operators

use crate::env::Environment;
use crate::error::{assert_arity, assert_type};
use crate::value::Value;
use std::rc::Rc;

fn is_num(v: &Value) -> bool {
    matches!(v, Value::Num(_))
}

fn num_cmp(name: &'static str, args: Vec<Value>, op: impl Fn(i64, i64) -> bool) -> Value {
    if let Err(e) = assert_arity(name, &args, 2) {
        return e;
    }
    if let Err(e) = assert_type(name, &args, 0, "Number", is_num) {
        return e;
    }
    if let Err(e) = assert_type(name, &args, 1, "Number", is_num) {
        return e;
    }
    let (a, b) = match (&args[0], &args[1]) {
        (Value::Num(a), Value::Num(b)) => (*a, *b),
        _ => unreachable!(),
    };
    Value::Num(if op(a, b) { 1 } else { 0 })
}

fn builtin_gt(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    num_cmp(">", args, |a, b| a > b)
}

fn builtin_lt(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    num_cmp("<", args, |a, b| a < b)
}

fn builtin_ge(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    num_cmp(">=", args, |a, b| a >= b)
}

fn builtin_le(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    num_cmp("<=", args, |a, b| a <= b)
}

fn builtin_eq(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    if let Err(e) = assert_arity("==", &args, 2) {
        return e;
    }
    Value::Num(if args[0] == args[1] { 1 } else { 0 })
}

fn builtin_neq(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    if let Err(e) = assert_arity("!=", &args, 2) {
        return e;
    }
    Value::Num(if args[0] != args[1] { 1 } else { 0 })
}

pub fn register(env: &Rc<Environment>) {
    env.add_builtin(">", builtin_gt);
    env.add_builtin("<", builtin_lt);
    env.add_builtin(">=", builtin_ge);
    env.add_builtin("<=", builtin_le);
    env.add_builtin("==", builtin_eq);
    env.add_builtin("!=", builtin_neq);
}
