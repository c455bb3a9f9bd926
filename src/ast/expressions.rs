use crate::{lexer::tokens::Token, Span};

use super::{ast::Expr, types::LoxType};

/// What a name reference resolved to.
///
/// Attached to the reference by the annotator; the source token it came from
/// is left untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// The mangled, globally unique name.
    pub name: String,
    pub ty: LoxType,
    pub arity: usize,
}

// LITERALS

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Double(f64),
    String(String),
    Boolean(bool),
}

/// Literal Expression
/// Represents a number, string or boolean literal in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: Literal,
    pub span: Span,
}

impl LiteralExpr {
    pub fn get_type(&self) -> LoxType {
        match self.value {
            Literal::Int(_) => LoxType::Int,
            Literal::Double(_) => LoxType::Double,
            Literal::String(_) => LoxType::String,
            Literal::Boolean(_) => LoxType::Bool,
        }
    }
}

/// Symbol Expression
/// Represents a reference to a declared name. This includes functions.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    /// The name as written in source.
    pub value: String,
    pub span: Span,
    pub resolved: Option<Resolved>,
}

impl SymbolExpr {
    pub fn new(value: String, span: Span) -> Self {
        SymbolExpr {
            value,
            span,
            resolved: None,
        }
    }

    pub fn get_type(&self) -> Option<LoxType> {
        self.resolved.as_ref().map(|resolved| resolved.ty)
    }
}

// COMPLEX

/// Prefix Expression
/// Represents `-x` and `!x`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub operator: Token,
    pub right_expr: Box<Expr>,
    pub span: Span,
    pub ty: Option<LoxType>,
}

/// Binary Expression
/// Represents arithmetic and comparison operations (`a + b`, `a < b`).
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub span: Span,
    pub ty: Option<LoxType>,
}

/// Logical Expression
/// Represents short-circuiting `&&` and `||`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub span: Span,
    pub ty: Option<LoxType>,
}

/// Grouping Expression
/// Represents a parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingExpr {
    pub expression: Box<Expr>,
    pub span: Span,
    pub ty: Option<LoxType>,
}

/// Assignment Expression
/// Represents `name = value`. The type is the promoted result of the assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub assignee: SymbolExpr,
    pub operator: Token,
    pub value: Box<Expr>,
    pub span: Span,
    pub ty: Option<LoxType>,
}

/// Call Expression
/// Represents a call of a named function. The type is the callee's return type
/// once the call is known to be well formed.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: SymbolExpr,
    pub arguments: Vec<Expr>,
    pub span: Span,
    pub ty: Option<LoxType>,
}
