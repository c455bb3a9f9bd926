//! Lexical scope chain.
//!
//! Each level maps the names written in source to the mangled names they were
//! bound to. Levels are pushed on entering a block or function body and popped
//! on exit; lookups walk outward through the parents.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Scope {
    bindings: HashMap<String, String>,
    parent: Option<Box<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty level nested inside `parent`.
    pub fn push(parent: Scope) -> Self {
        Self {
            bindings: HashMap::new(),
            parent: Some(Box::new(parent)),
        }
    }

    /// Discards this level and returns the enclosing one, if any.
    pub fn into_parent(self) -> Option<Scope> {
        self.parent.map(|parent| *parent)
    }

    /// Binds `surface` to `mangled` at this level only.
    pub fn put(&mut self, surface: &str, mangled: &str) {
        self.bindings
            .insert(String::from(surface), String::from(mangled));
    }

    /// The innermost binding of `surface`.
    pub fn get(&self, surface: &str) -> Option<&str> {
        self.bindings
            .get(surface)
            .map(String::as_str)
            .or_else(|| self.parent.as_ref().and_then(|parent| parent.get(surface)))
    }

    pub fn get_immediate(&self, surface: &str) -> Option<&str> {
        self.bindings.get(surface).map(String::as_str)
    }

    /// Number of enclosing levels; the root is at depth 0.
    pub fn depth(&self) -> usize {
        match &self.parent {
            Some(parent) => parent.depth() + 1,
            None => 0,
        }
    }
}
