// ABOUTME: End-to-end tests driving the reader and evaluator together

use lispy::env::Environment;
use lispy::eval::eval;
use lispy::reader::read;
use lispy::value::Value;
use std::rc::Rc;

fn setup() -> Rc<Environment> {
    let env = Environment::new();
    lispy::builtins::register_builtins(&env);
    env
}

fn run(env: &Rc<Environment>, src: &str) -> Value {
    eval(env, read(src))
}

fn run_lines(env: &Rc<Environment>, lines: &[&str]) -> Value {
    let mut last = Value::SExpr(vec![]);
    for line in lines {
        last = run(env, line);
    }
    last
}

#[test]
fn arithmetic_on_a_bare_line() {
    let env = setup();
    assert_eq!(run(&env, "+ 1 2 3"), Value::Num(6));
}

#[test]
fn global_definitions_persist_across_lines() {
    let env = setup();
    assert_eq!(run_lines(&env, &["def {x} 100", "x"]), Value::Num(100));
}

#[test]
fn lambda_application() {
    let env = setup();
    assert_eq!(run(&env, "(\\ {x y} {+ x y}) 10 20"), Value::Num(30));
}

#[test]
fn variadic_tail_binding() {
    let env = setup();
    assert_eq!(
        run_lines(
            &env,
            &[
                "def {add-mul} (\\ {x & xs} {+ x (eval (join {*} xs))})",
                "add-mul 10 2 3 4",
            ]
        ),
        Value::Num(34)
    );
}

#[test]
fn list_primitives() {
    let env = setup();
    assert_eq!(run(&env, "head {1 2 3}"), Value::QExpr(vec![Value::Num(1)]));
    assert_eq!(
        run(&env, "tail {1 2 3}"),
        Value::QExpr(vec![Value::Num(2), Value::Num(3)])
    );
    assert_eq!(run(&env, "eval {+ 1 2}"), Value::Num(3));
}

#[test]
fn conditional_and_division_by_zero() {
    let env = setup();
    assert_eq!(run(&env, "if (== 1 1) {+ 1 2} {+ 10 20}"), Value::Num(3));
    assert_eq!(run(&env, "/ 10 0"), Value::err("Division By Zero."));
}

#[test]
fn currying_matches_full_application() {
    let env = setup();
    run(&env, "def {add} (\\ {x y} {+ x y})");
    assert_eq!(run(&env, "(add 1) 2"), Value::Num(3));
    assert_eq!(run(&env, "add 1 2"), Value::Num(3));
}

#[test]
fn local_definition_does_not_escape_a_lambda_call() {
    let env = setup();
    run(&env, "def {shadow-test} (\\ {} {= {x} 99})");
    run(&env, "shadow-test");
    assert_eq!(run(&env, "x"), Value::err("Unbound Symbol 'x'"));
}

#[test]
fn join_identity_law() {
    let env = setup();
    assert_eq!(run(&env, "join {} {1 2}"), Value::QExpr(vec![Value::Num(1), Value::Num(2)]));
    assert_eq!(run(&env, "join {1 2} {}"), Value::QExpr(vec![Value::Num(1), Value::Num(2)]));
}

#[test]
fn error_values_propagate_through_arithmetic_like_any_other_value() {
    let env = setup();
    assert_eq!(
        run(&env, "+ 1 (error \"boom\")"),
        Value::err("boom")
    );
}

#[test]
fn load_runs_a_script_file_and_its_definitions_are_visible_afterward() {
    let env = setup();
    let dir = std::env::temp_dir();
    let path = dir.join(format!("lispy-integration-{}.lispy", std::process::id()));
    std::fs::write(&path, "(def {answer} 42)\n(def {double} (\\ {x} {* x 2}))\n").unwrap();

    let result = run(&env, &format!("load \"{}\"", path.to_string_lossy()));
    assert_eq!(result, Value::SExpr(vec![]));
    assert_eq!(run(&env, "answer"), Value::Num(42));
    assert_eq!(run(&env, "double 21"), Value::Num(42));

    std::fs::remove_file(&path).ok();
}
