//! Symbol table: every declaration of one pass, keyed by mangled name.
//!
//! Entries are only ever added. Iteration follows declaration order.

use std::fmt::Display;

use indexmap::IndexMap;

use crate::{ast::types::LoxType, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Parameter,
    Function,
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Parameter => "parameter",
            SymbolKind::Function => "function",
        };
        f.pad(name)
    }
}

/// What is known about a declared name.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolInfo {
    /// The mangled name.
    pub name: String,
    /// The name as written at the declaration.
    pub surface: String,
    /// Declared type; the return type for functions.
    pub ty: LoxType,
    pub arity: usize,
    pub kind: SymbolKind,
    pub position: Position,
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: IndexMap<String, SymbolInfo>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `info` under its mangled name.
    pub fn insert(&mut self, info: SymbolInfo) {
        self.symbols.insert(info.name.clone(), info);
    }

    pub fn get(&self, mangled: &str) -> Option<&SymbolInfo> {
        self.symbols.get(mangled)
    }

    pub fn contains(&self, mangled: &str) -> bool {
        self.symbols.contains_key(mangled)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolInfo> {
        self.symbols.values()
    }
}
