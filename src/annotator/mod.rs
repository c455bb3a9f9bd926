//! Semantic annotation.
//!
//! Resolves names through a lexical scope chain, renames every declaration to
//! a unique mangled name, attaches types and arities to references, and
//! checks redeclarations, arity, assignments and return discipline.

pub mod annotator;
pub mod config;
pub mod mangler;
pub mod promote;
pub mod scope;
pub mod symbol_table;

#[cfg(test)]
mod tests;
