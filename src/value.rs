// ABOUTME: Value types representing Lisp data structures and expressions

use crate::env::Environment;
use std::fmt;
use std::rc::Rc;

/// A native function bound into the environment. Takes the calling
/// environment (builtins like `eval`, `def`, `load` call back into the
/// evaluator) and the already-evaluated argument list, and owns both.
pub type BuiltinFn = fn(&Rc<Environment>, Vec<Value>) -> Value;

/// Something that can be applied to arguments: either a native primitive
/// or a user-defined closure.
pub enum Callable {
    /// `name` is carried alongside the function pointer so precondition
    /// helpers can report `Function '<f>' ...` without extra plumbing, and
    /// so two builtins can be compared by identity (see `PartialEq` below).
    Builtin { name: &'static str, func: BuiltinFn },
    Lambda {
        env: Rc<Environment>,
        formals: Box<Value>,
        body: Box<Value>,
    },
}

/// Hand-written: cloning a `Lambda` must deep-copy its environment rather
/// than bump the `Rc` refcount. Every symbol lookup clones the stored
/// `Value`, so an `Rc`-sharing clone here would let two re-entrant calls of
/// the same closure (recursion, in particular) bind parameters into the
/// very same `HashMap`.
impl Clone for Callable {
    fn clone(&self) -> Self {
        match self {
            Callable::Builtin { name, func } => Callable::Builtin { name, func: *func },
            Callable::Lambda { env, formals, body } => Callable::Lambda {
                env: env.copy(),
                formals: formals.clone(),
                body: body.clone(),
            },
        }
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Builtin { name, .. } => write!(f, "Builtin({name})"),
            Callable::Lambda { formals, body, .. } => {
                write!(f, "Lambda({formals:?} {body:?})")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Num(i64),
    Err(String),
    Sym(String),
    Str(String),
    SExpr(Vec<Value>),
    QExpr(Vec<Value>),
    Fun(Callable),
}

impl Value {
    pub fn num(n: i64) -> Value {
        Value::Num(n)
    }

    pub fn err(msg: impl Into<String>) -> Value {
        Value::Err(msg.into())
    }

    pub fn sym(name: impl Into<String>) -> Value {
        Value::Sym(name.into())
    }

    pub fn sexpr(items: Vec<Value>) -> Value {
        Value::SExpr(items)
    }

    pub fn qexpr(items: Vec<Value>) -> Value {
        Value::QExpr(items)
    }

    pub fn builtin(name: &'static str, func: BuiltinFn) -> Value {
        Value::Fun(Callable::Builtin { name, func })
    }

    /// A lambda's environment is freshly allocated with no parent; the
    /// parent is wired in only at call time (see `env::Environment::set_parent`).
    pub fn lambda(formals: Value, body: Value) -> Value {
        Value::Fun(Callable::Lambda {
            env: Environment::new(),
            formals: Box::new(formals),
            body: Box::new(body),
        })
    }

    pub fn is_err(&self) -> bool {
        matches!(self, Value::Err(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Num(_) => "Number",
            Value::Err(_) => "Error",
            Value::Sym(_) => "Symbol",
            Value::Str(_) => "String",
            Value::SExpr(_) => "S-Expression",
            Value::QExpr(_) => "Q-Expression",
            Value::Fun(_) => "Function",
        }
    }

    /// Elements of an `SExpr`/`QExpr`, if this is one.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::SExpr(items) | Value::QExpr(items) => Some(items),
            _ => None,
        }
    }

    pub fn into_seq(self) -> Option<Vec<Value>> {
        match self {
            Value::SExpr(items) | Value::QExpr(items) => Some(items),
            _ => None,
        }
    }
}

/// Deep equality per the data model: different tags are always unequal
/// (so an `SExpr` and a `QExpr` with identical contents are not equal);
/// two builtins are equal iff their registered names match; two lambdas
/// are equal iff their formals and bodies match (their captured
/// environments are not compared); a builtin and a lambda are never equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Err(a), Value::Err(b)) => a == b,
            (Value::Sym(a), Value::Sym(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::SExpr(a), Value::SExpr(b)) => a == b,
            (Value::QExpr(a), Value::QExpr(b)) => a == b,
            (Value::Fun(Callable::Builtin { name: a, .. }), Value::Fun(Callable::Builtin { name: b, .. })) => {
                a == b
            }
            (
                Value::Fun(Callable::Lambda { formals: fa, body: ba, .. }),
                Value::Fun(Callable::Lambda { formals: fb, body: bb, .. }),
            ) => fa == fb && ba == bb,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num(n) => write!(f, "{n}"),
            Value::Err(msg) => write!(f, "Error: {msg}"),
            Value::Sym(s) => write!(f, "{s}"),
            Value::Str(s) => write!(f, "\"{}\"", escape_str(s)),
            Value::SExpr(items) => write_seq(f, '(', items, ')'),
            Value::QExpr(items) => write_seq(f, '{', items, '}'),
            Value::Fun(Callable::Builtin { .. }) => write!(f, "<builtin>"),
            Value::Fun(Callable::Lambda { formals, body, .. }) => {
                write!(f, "<\\ {formals} {body}>")
            }
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: char, items: &[Value], close: char) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}

/// Escape map per the reader's string-literal grammar, applied on the way
/// back out so printed strings re-read identically.
fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0b' => out.push_str("\\v"),
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out
}

/// Appends `v` to `seq`, taking ownership.
pub fn seq_add(seq: &mut Vec<Value>, v: Value) {
    seq.push(v);
}

/// Removes and returns the i-th element; remaining elements shift left.
pub fn seq_pop(seq: &mut Vec<Value>, i: usize) -> Value {
    seq.remove(i)
}

/// `pop` then discard the container.
pub fn seq_take(mut seq: Vec<Value>, i: usize) -> Value {
    seq_pop(&mut seq, i)
}

/// Drains `y` into `x` preserving order, then discards `y`.
pub fn seq_join(mut x: Vec<Value>, mut y: Vec<Value>) -> Vec<Value> {
    x.append(&mut y);
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_display() {
        assert_eq!(format!("{}", Value::Num(42)), "42");
        assert_eq!(format!("{}", Value::Num(-7)), "-7");
    }

    #[test]
    fn sexpr_and_qexpr_display_differ_in_brackets_only() {
        let items = vec![Value::Num(1), Value::Num(2)];
        assert_eq!(format!("{}", Value::SExpr(items.clone())), "(1 2)");
        assert_eq!(format!("{}", Value::QExpr(items)), "{1 2}");
    }

    #[test]
    fn err_display_has_prefix() {
        assert_eq!(format!("{}", Value::Err("bad".into())), "Error: bad");
    }

    #[test]
    fn string_display_escapes_newline() {
        assert_eq!(format!("{}", Value::Str("a\nb".into())), "\"a\\nb\"");
    }

    #[test]
    fn sexpr_and_qexpr_with_same_contents_are_not_equal() {
        let items = vec![Value::Num(1)];
        assert_ne!(Value::SExpr(items.clone()), Value::QExpr(items));
    }

    #[test]
    fn builtins_with_different_names_are_not_equal() {
        fn f(_env: &Rc<Environment>, _args: Vec<Value>) -> Value {
            Value::Num(0)
        }
        let a = Value::builtin("foo", f);
        let b = Value::builtin("bar", f);
        assert_ne!(a, b);
    }

    #[test]
    fn builtins_with_same_name_are_equal() {
        fn f(_env: &Rc<Environment>, _args: Vec<Value>) -> Value {
            Value::Num(0)
        }
        let a = Value::builtin("foo", f);
        let b = Value::builtin("foo", f);
        assert_eq!(a, b);
    }

    #[test]
    fn lambda_equality_ignores_env() {
        let formals = Value::QExpr(vec![Value::sym("x")]);
        let body = Value::QExpr(vec![Value::sym("x")]);
        let a = Value::lambda(formals.clone(), body.clone());
        let b = Value::lambda(formals, body);
        assert_eq!(a, b);
    }

    #[test]
    fn seq_join_preserves_order() {
        let a = vec![Value::Num(1), Value::Num(2)];
        let b = vec![Value::Num(3)];
        assert_eq!(seq_join(a, b), vec![Value::Num(1), Value::Num(2), Value::Num(3)]);
    }

    #[test]
    fn seq_pop_shifts_remaining_left() {
        let mut seq = vec![Value::Num(1), Value::Num(2), Value::Num(3)];
        let popped = seq_pop(&mut seq, 0);
        assert_eq!(popped, Value::Num(1));
        assert_eq!(seq, vec![Value::Num(2), Value::Num(3)]);
    }
}
