use std::slice::{Iter, IterMut};

use crate::Span;

use super::{ast::Stmt, ast::Expr, types::LoxType};

/// A declared name: the variable of a `var`, a function, or a parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub span: Span,
    pub ty: LoxType,
    /// 0 for variables and parameters, the parameter count for functions.
    pub arity: usize,
    /// Set by the annotator once the declaration is bound.
    pub mangled: Option<String>,
}

impl Declaration {
    pub fn new(name: String, span: Span, ty: LoxType) -> Self {
        Declaration {
            name,
            span,
            ty,
            arity: 0,
            mangled: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
    pub fn iter_mut(&mut self) -> IterMut<'_, Stmt> {
        self.body.iter_mut()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub expression: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub declaration: Declaration,
    pub assigned_value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Box<Stmt>,
    pub else_body: Option<Box<Stmt>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopControl {
    Break,
    Continue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopControlStmt {
    pub kind: LoopControl,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    /// The function's own name; its type is the declared return type.
    pub declaration: Declaration,
    pub parameters: Vec<Declaration>,
    pub body: BlockStmt,
    pub span: Span,
}

impl FnDeclStmt {
    pub fn return_type(&self) -> LoxType {
        self.declaration.ty
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    /// True when the annotator appended this return to a void function.
    pub implicit: bool,
    pub span: Span,
}

impl ReturnStmt {
    /// The bare `return` appended when control falls off the end of a void function.
    pub fn implicit() -> Self {
        ReturnStmt {
            value: None,
            implicit: true,
            span: Span::null(),
        }
    }
}
