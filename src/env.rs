// ABOUTME: Environment module for managing variable bindings and scopes

use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A symbol-to-value mapping with an optional parent. The parent link is
/// mutable: a lambda's environment is allocated once, parentless, at
/// `\`-time, and re-parented to the caller's environment only for the
/// duration of each call (see `eval::call`). This is what lets the same
/// closure be invoked from different call sites without permanently
/// pointing at any one of them, and without ever forming a cycle.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: RefCell<Option<Rc<Environment>>>,
}

impl Environment {
    /// Creates a new environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: RefCell::new(None),
        })
    }

    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: RefCell::new(Some(parent)),
        })
    }

    /// Rebinds this environment's parent. Used exactly once per call, to
    /// attach a lambda's own environment to its caller's environment.
    pub fn set_parent(&self, parent: Option<Rc<Environment>>) {
        *self.parent.borrow_mut() = parent;
    }

    /// Searches local then parents, returning a fresh deep copy of the
    /// stored value (the binding itself is never aliased out), or
    /// `Err("Unbound Symbol '<name>'")`.
    pub fn get(&self, name: &str) -> Value {
        if let Some(value) = self.bindings.borrow().get(name) {
            return value.clone();
        }
        if let Some(parent) = self.parent.borrow().as_ref() {
            return parent.get(name);
        }
        Value::err(format!("Unbound Symbol '{name}'"))
    }

    /// Inserts or replaces `name` in this environment only (local binding,
    /// used by `=` and for lambda-parameter binding).
    pub fn put(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Ascends to the root environment and `put`s there (global binding,
    /// used by `def`).
    pub fn def(self: &Rc<Self>, name: impl Into<String>, value: Value) {
        self.root().put(name, value);
    }

    fn root(self: &Rc<Self>) -> Rc<Environment> {
        let mut current = self.clone();
        loop {
            let next = current.parent.borrow().clone();
            match next {
                Some(parent) => current = parent,
                None => return current,
            }
        }
    }

    /// Shortcut for `put(name, Fun(Builtin(name, fn_ptr)))`.
    pub fn add_builtin(&self, name: &'static str, func: crate::value::BuiltinFn) {
        self.put(name, Value::builtin(name, func));
    }

    /// Deep copy: a fresh environment with the same bindings and the same
    /// parent pointer (the parent itself is not deep-copied, matching the
    /// data model's `copy(env)` op).
    pub fn copy(&self) -> Rc<Environment> {
        Rc::new(Environment {
            bindings: RefCell::new(self.bindings.borrow().clone()),
            parent: RefCell::new(self.parent.borrow().clone()),
        })
    }
}
