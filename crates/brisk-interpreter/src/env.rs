//! Environment chain for the brisk interpreter.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;
use brisk_syntax::ast::Function;

/// A shared handle to one scope in the environment chain.
pub type EnvRef = Rc<RefCell<Environment>>;

/// One scope: variable and function bindings plus a link to the
/// enclosing scope. Variables and functions are independent namespaces;
/// a variable and a function may share a name.
pub struct Environment {
    vars: HashMap<String, Value>,
    funcs: HashMap<String, Rc<Function>>,
    parent: Option<EnvRef>,
}

impl Environment {
    /// A root scope with no enclosing environment.
    pub fn new_root() -> EnvRef {
        Rc::new(RefCell::new(Environment {
            vars: HashMap::new(),
            funcs: HashMap::new(),
            parent: None,
        }))
    }

    /// A fresh child scope of `parent`.
    pub fn child(parent: &EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Environment {
            vars: HashMap::new(),
            funcs: HashMap::new(),
            parent: Some(Rc::clone(parent)),
        }))
    }

    /// Bind a variable in this scope, shadowing any outer binding.
    pub fn define(&mut self, name: String, val: Value) {
        self.vars.insert(name, val);
    }

    /// Read a variable through the chain. Unknown names read as Null.
    pub fn get(&self, name: &str) -> Value {
        if let Some(v) = self.vars.get(name) {
            v.clone()
        } else if let Some(parent) = &self.parent {
            parent.borrow().get(name)
        } else {
            Value::Null
        }
    }

    /// Overwrite the nearest existing binding through the chain.
    /// Returns false when no binding exists anywhere.
    pub fn assign(&mut self, name: &str, val: Value) -> bool {
        if let Some(slot) = self.vars.get_mut(name) {
            *slot = val;
            true
        } else if let Some(parent) = &self.parent {
            parent.borrow_mut().assign(name, val)
        } else {
            false
        }
    }

    /// Bind a function in this scope's function namespace.
    pub fn define_func(&mut self, name: String, func: Rc<Function>) {
        self.funcs.insert(name, func);
    }

    /// Look up a function through the chain.
    pub fn get_func(&self, name: &str) -> Option<Rc<Function>> {
        if let Some(f) = self.funcs.get(name) {
            Some(Rc::clone(f))
        } else if let Some(parent) = &self.parent {
            parent.borrow().get_func(name)
        } else {
            None
        }
    }

    /// Variable bindings of this scope alone, for the REPL's `:vars`.
    pub fn vars_snapshot(&self) -> Vec<(String, Value)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// All function names visible from this scope, for the REPL's `:funcs`.
    pub fn function_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.funcs.keys().cloned().collect();
        if let Some(parent) = &self.parent {
            names.extend(parent.borrow().function_names());
        }
        names.sort();
        names.dedup();
        names
    }
}
