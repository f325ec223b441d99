use std::cell::RefCell;
use std::rc::Rc;
use rustc_hash::FxHashMap;
use crate::interpreter::object::Value;

/// Shared handle to a scope. Closures keep their defining scope alive through it.
pub type Env = Rc<RefCell<Environment>>;

/// One scope of variable bindings, linked to the scope that encloses it.
#[derive(Debug, Default)]
pub struct Environment {
    store: FxHashMap<String, Value>,
    outer: Option<Env>,
}

impl Environment {
    pub fn new_global() -> Env {
        Rc::new(RefCell::new(Environment::default()))
    }

    pub fn new_enclosed(outer: &Env) -> Env {
        Rc::new(RefCell::new(Environment {
            store: FxHashMap::default(),
            outer: Some(Rc::clone(outer)),
        }))
    }

    /// Looks `name` up in this scope, then in each enclosing scope in turn.
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.borrow().get(name)),
        }
    }

    /// Binds `name` in this scope only, shadowing any outer binding.
    pub fn set(&mut self, name: &str, value: Value) {
        self.store.insert(name.to_owned(), value);
    }

    /// Rebinds `name` in the nearest scope that already binds it.
    /// Returns `false` if no scope does.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.store.get_mut(name) {
            *slot = value;
            return true;
        }

        match &self.outer {
            Some(outer) => outer.borrow_mut().assign(name, value),
            None => false,
        }
    }
}
