// ABOUTME: Environment frames mapping symbols to values across a lexical chain

use crate::error::EvalError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One frame in the lexical chain. Only the root frame carries a built-in
/// table; it is immutable after construction. User `define`s land in the
/// per-frame `bindings` map.
#[derive(Debug)]
pub struct Environment {
    builtins: HashMap<String, Value>,
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// The root frame, pre-loaded with the built-in library.
    pub fn global() -> Rc<Self> {
        Rc::new(Environment {
            builtins: crate::builtins::table(),
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// A child frame for `let` bindings and procedure calls.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            builtins: HashMap::new(),
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Binds `name` in THIS frame. Names in this frame's built-in table are
    /// protected, so only root built-ins reject redefinition; inner frames
    /// may shadow anything.
    pub fn define(&self, name: &str, value: Value) -> Result<(), EvalError> {
        if self.builtins.contains_key(name) {
            return Err(EvalError::DefineFormat);
        }
        self.bindings.borrow_mut().insert(name.to_string(), value);
        Ok(())
    }

    /// Looks `name` up in this frame's user map, then its built-in table,
    /// then the parent chain.
    pub fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Ok(value.clone());
        }
        if let Some(value) = self.builtins.get(name) {
            return Ok(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.lookup(name),
            None => Err(EvalError::UnboundSymbol(name.to_string())),
        }
    }

    /// Drops every user binding in this frame. Built-ins stay; frames
    /// captured by closures keep working.
    pub fn clear_user(&self) {
        self.bindings.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_lookup() {
        let env = Environment::global();
        env.define("x", Value::Int(42)).expect("x is not a built-in");
        assert_eq!(env.lookup("x").expect("bound"), Value::Int(42));
    }

    #[test]
    fn test_unbound_symbol() {
        let env = Environment::global();
        assert!(matches!(
            env.lookup("missing"),
            Err(EvalError::UnboundSymbol(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_builtins_are_protected_at_the_root() {
        let env = Environment::global();
        assert!(matches!(
            env.define("car", Value::Int(1)),
            Err(EvalError::DefineFormat)
        ));
        assert!(matches!(
            env.define("lambda", Value::Int(1)),
            Err(EvalError::DefineFormat)
        ));
    }

    #[test]
    fn test_inner_frames_may_shadow_builtins() {
        let root = Environment::global();
        let child = Environment::with_parent(root);
        child.define("car", Value::Int(5)).expect("shadowing is allowed");
        assert_eq!(child.lookup("car").expect("bound"), Value::Int(5));
    }

    #[test]
    fn test_lookup_walks_the_parent_chain() {
        let root = Environment::global();
        root.define("a", Value::Int(1)).expect("define");
        let middle = Environment::with_parent(Rc::clone(&root));
        middle.define("b", Value::Int(2)).expect("define");
        let inner = Environment::with_parent(middle);
        inner.define("c", Value::Int(3)).expect("define");

        assert_eq!(inner.lookup("a").expect("bound"), Value::Int(1));
        assert_eq!(inner.lookup("b").expect("bound"), Value::Int(2));
        assert_eq!(inner.lookup("c").expect("bound"), Value::Int(3));
        assert!(inner.lookup("cons").is_ok());
    }

    #[test]
    fn test_child_binding_shadows_parent() {
        let root = Environment::global();
        root.define("x", Value::Int(1)).expect("define");
        let child = Environment::with_parent(Rc::clone(&root));
        child.define("x", Value::Int(2)).expect("define");

        assert_eq!(child.lookup("x").expect("bound"), Value::Int(2));
        assert_eq!(root.lookup("x").expect("bound"), Value::Int(1));
    }

    #[test]
    fn test_clear_user_keeps_builtins() {
        let env = Environment::global();
        env.define("x", Value::Int(1)).expect("define");
        env.clear_user();
        assert!(env.lookup("x").is_err());
        assert!(env.lookup("cons").is_ok());
    }
}
