// ABOUTME: Evaluator: symbol resolution, S-expression reduction, function application

use crate::env::Environment;
use crate::value::{seq_pop, seq_take, Callable, Value};
use std::rc::Rc;

/// `Sym` resolves through the environment; `SExpr` reduces via
/// `eval_sexpr`; everything else (numbers, strings, errors, quoted
/// Q-expressions, functions) evaluates to itself.
pub fn eval(env: &Rc<Environment>, v: Value) -> Value {
    match v {
        Value::Sym(name) => env.get(&name),
        Value::SExpr(items) => eval_sexpr(env, items),
        other => other,
    }
}

fn eval_sexpr(env: &Rc<Environment>, items: Vec<Value>) -> Value {
    let mut evaluated: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        evaluated.push(eval(env, item));
    }

    if let Some(i) = evaluated.iter().position(Value::is_err) {
        return seq_take(evaluated, i);
    }

    if evaluated.is_empty() {
        return Value::SExpr(evaluated);
    }
    if evaluated.len() == 1 {
        return seq_take(evaluated, 0);
    }

    let f = seq_pop(&mut evaluated, 0);
    match f {
        Value::Fun(_) => call(env, f, evaluated),
        _ => Value::err("first element is not a function"),
    }
}

/// `args` is already evaluated and stripped of the function that is being
/// applied.
pub fn call(env: &Rc<Environment>, f: Value, mut args: Vec<Value>) -> Value {
    let callable = match f {
        Value::Fun(c) => c,
        _ => return Value::err("first element is not a function"),
    };

    match callable {
        Callable::Builtin { func, .. } => func(env, args),
        Callable::Lambda {
            env: lambda_env,
            formals,
            body,
        } => {
            let mut formals_list = match *formals {
                Value::QExpr(items) => items,
                other => return Value::err(format!("malformed lambda formals: {other}")),
            };

            let given = args.len();
            let total = formals_list.len();

            while !args.is_empty() {
                if formals_list.is_empty() {
                    return Value::err(format!(
                        "Function passed too many arguments. Got {given}, Expected {total}."
                    ));
                }

                let formal = seq_pop(&mut formals_list, 0);
                let name = match formal {
                    Value::Sym(s) => s,
                    other => return Value::err(format!("malformed lambda formal: {other}")),
                };

                if name == "&" {
                    if formals_list.len() != 1 {
                        return Value::err(
                            "Function format invalid. Symbol '&' not followed by single symbol.",
                        );
                    }
                    let varname = match seq_pop(&mut formals_list, 0) {
                        Value::Sym(s) => s,
                        other => return Value::err(format!("malformed lambda formal: {other}")),
                    };
                    lambda_env.put(varname, Value::QExpr(std::mem::take(&mut args)));
                    break;
                }

                let value = seq_pop(&mut args, 0);
                lambda_env.put(name, value);
            }

            if formals_list.first() == Some(&Value::sym("&")) {
                if formals_list.len() != 2 {
                    return Value::err(
                        "Function format invalid. Symbol '&' not followed by single symbol.",
                    );
                }
                let varname = match formals_list[1].clone() {
                    Value::Sym(s) => s,
                    other => return Value::err(format!("malformed lambda formal: {other}")),
                };
                lambda_env.put(varname, Value::QExpr(Vec::new()));
                formals_list.clear();
            }

            if formals_list.is_empty() {
                lambda_env.set_parent(Some(env.clone()));
                let body_items = match *body {
                    Value::QExpr(items) => items,
                    other => return Value::err(format!("malformed lambda body: {other}")),
                };
                eval(&lambda_env, Value::SExpr(body_items))
            } else {
                Value::Fun(Callable::Lambda {
                    env: lambda_env.copy(),
                    formals: Box::new(Value::QExpr(formals_list)),
                    body,
                })
            }
        }
    }
}
