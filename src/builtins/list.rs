// ABOUTME: List primitives: list, head, tail, join, eval

use crate::env::Environment;
use crate::error::{assert_arity, assert_arity_at_least, assert_not_empty, assert_type};
use crate::eval::eval;
use crate::value::{seq_join, seq_pop, seq_take, Value};
use std::rc::Rc;

/// Retags its arguments as a `QExpr` without evaluating them further.
fn builtin_list(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    Value::QExpr(args)
}

/// Returns a `QExpr` containing only the first element of its one
/// non-empty `QExpr` argument.
fn builtin_head(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    if let Err(e) = assert_arity("head", &args, 1) {
        return e;
    }
    if let Err(e) = assert_type("head", &args, 0, "Q-Expression", |v| matches!(v, Value::QExpr(_))) {
        return e;
    }
    if let Err(e) = assert_not_empty("head", &args, 0) {
        return e;
    }
    let items = args.into_iter().next().unwrap().into_seq().unwrap();
    let first = seq_take(items, 0);
    Value::QExpr(vec![first])
}

/// Returns its one non-empty `QExpr` argument with the first element
/// removed.
fn builtin_tail(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    if let Err(e) = assert_arity("tail", &args, 1) {
        return e;
    }
    if let Err(e) = assert_type("tail", &args, 0, "Q-Expression", |v| matches!(v, Value::QExpr(_))) {
        return e;
    }
    if let Err(e) = assert_not_empty("tail", &args, 0) {
        return e;
    }
    let mut items = args.into_iter().next().unwrap().into_seq().unwrap();
    seq_pop(&mut items, 0);
    Value::QExpr(items)
}

/// Concatenates any number of `QExpr` arguments, in order.
fn builtin_join(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    if let Err(e) = assert_arity_at_least("join", &args, 1) {
        return e;
    }
    for i in 0..args.len() {
        if let Err(e) = assert_type("join", &args, i, "Q-Expression", |v| matches!(v, Value::QExpr(_))) {
            return e;
        }
    }
    let mut iter = args.into_iter();
    let mut acc = iter.next().unwrap().into_seq().unwrap();
    for rest in iter {
        acc = seq_join(acc, rest.into_seq().unwrap());
    }
    Value::QExpr(acc)
}

/// Evaluates its one `QExpr` argument as if it were an `SExpr` in the
/// current environment.
fn builtin_eval(env: &Rc<Environment>, args: Vec<Value>) -> Value {
    if let Err(e) = assert_arity("eval", &args, 1) {
        return e;
    }
    if let Err(e) = assert_type("eval", &args, 0, "Q-Expression", |v| matches!(v, Value::QExpr(_))) {
        return e;
    }
    let items = args.into_iter().next().unwrap().into_seq().unwrap();
    eval(env, Value::SExpr(items))
}

pub fn register(env: &Rc<Environment>) {
    env.add_builtin("list", builtin_list);
    env.add_builtin("head", builtin_head);
    env.add_builtin("tail", builtin_tail);
    env.add_builtin("join", builtin_join);
    env.add_builtin("eval", builtin_eval);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Rc<Environment> {
        Environment::new()
    }

    #[test]
    fn list_retags_without_evaluating() {
        assert_eq!(
            builtin_list(&env(), vec![Value::Num(1), Value::Num(2)]),
            Value::QExpr(vec![Value::Num(1), Value::Num(2)])
        );
    }

    #[test]
    fn head_takes_first_element() {
        let q = Value::QExpr(vec![Value::Num(1), Value::Num(2), Value::Num(3)]);
        assert_eq!(builtin_head(&env(), vec![q]), Value::QExpr(vec![Value::Num(1)]));
    }

    #[test]
    fn head_of_empty_qexpr_is_an_error() {
        let q = Value::QExpr(vec![]);
        assert_eq!(
            builtin_head(&env(), vec![q]),
            Value::err("Function 'head' passed {} for argument 0.")
        );
    }

    #[test]
    fn tail_drops_first_element() {
        let q = Value::QExpr(vec![Value::Num(1), Value::Num(2), Value::Num(3)]);
        assert_eq!(
            builtin_tail(&env(), vec![q]),
            Value::QExpr(vec![Value::Num(2), Value::Num(3)])
        );
    }

    #[test]
    fn join_with_empty_is_identity() {
        let empty = Value::QExpr(vec![]);
        let q = Value::QExpr(vec![Value::Num(1)]);
        assert_eq!(builtin_join(&env(), vec![empty.clone(), q.clone()]), q.clone());
        assert_eq!(builtin_join(&env(), vec![q.clone(), empty]), q);
    }

    #[test]
    fn eval_runs_a_qexpr_as_an_sexpr() {
        let env = env();
        crate::builtins::register_builtins(&env);
        let q = Value::QExpr(vec![Value::sym("+"), Value::Num(1), Value::Num(2)]);
        assert_eq!(builtin_eval(&env, vec![q]), Value::Num(3));
    }
}
