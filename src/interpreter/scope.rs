use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::interpreter::value::{ModuleValue, Value};

/// A lexically nested scope.
///
/// Each scope maps names to values and points at its enclosing scope;
/// lookups walk the chain outward. The module registry lives only on the
/// root scope, and `set_module` on any scope writes through to it.
///
/// Bindings are additive — there is no rebinding — so the only interior
/// mutability is the insert into the store. Function values keep an
/// `Rc<Scope>` to their defining scope, which is what gives closures their
/// lexical capture.
#[derive(Debug, Default)]
pub struct Scope {
    store:   RefCell<HashMap<String, Value>>,
    modules: RefCell<HashMap<String, Rc<ModuleValue>>>,
    parent:  Option<Rc<Scope>>,
}

impl Scope {
    /// Creates a fresh root scope.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Creates a child scope enclosed by `parent`.
    #[must_use]
    pub fn enclosed(parent: &Rc<Self>) -> Rc<Self> {
        Rc::new(Self { store:   RefCell::new(HashMap::new()),
                       modules: RefCell::new(HashMap::new()),
                       parent:  Some(Rc::clone(parent)), })
    }

    /// Looks `name` up along the scope chain.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.store.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.get(name))
    }

    /// Binds `name` in this scope.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.store.borrow_mut().insert(name.into(), value);
    }

    /// Looks a module up; the registry is anchored at the root.
    #[must_use]
    pub fn get_module(&self, name: &str) -> Option<Rc<ModuleValue>> {
        if let Some(module) = self.modules.borrow().get(name) {
            return Some(Rc::clone(module));
        }
        self.parent.as_ref().and_then(|parent| parent.get_module(name))
    }

    /// Registers a module, writing through to the root scope.
    pub fn set_module(&self, name: impl Into<String>, module: Rc<ModuleValue>) {
        self.root().modules.borrow_mut().insert(name.into(), module);
    }

    /// The root of this scope's chain; module sources evaluate against it.
    #[must_use]
    pub fn root_scope(self: &Rc<Self>) -> Rc<Self> {
        let mut scope = Rc::clone(self);
        while let Some(parent) = scope.parent.clone() {
            scope = parent;
        }
        scope
    }

    fn root(&self) -> &Self {
        let mut scope = self;
        while let Some(parent) = &scope.parent {
            scope = parent;
        }
        scope
    }
}
