//! Type definitions for the AST.
//!
//! The language has a closed set of primitive types. Declarations name one of
//! them in their syntax; expressions acquire one during annotation.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoxType {
    Int,
    Double,
    Bool,
    String,
    /// "No value". Only meaningful as a function return type.
    Void,
}

impl LoxType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, LoxType::Int | LoxType::Double)
    }

    /// The display name of a possibly unknown type.
    pub fn name_of(ty: Option<LoxType>) -> String {
        match ty {
            Some(ty) => ty.to_string(),
            None => String::from("<unknown>"),
        }
    }
}

impl Display for LoxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LoxType::Int => "int",
            LoxType::Double => "double",
            LoxType::Bool => "bool",
            LoxType::String => "string",
            LoxType::Void => "void",
        };
        f.pad(name)
    }
}
