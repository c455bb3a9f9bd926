use std::fmt::{Display, Formatter, Result};

use crate::Span;

use super::{
    expressions::{
        AssignmentExpr, BinaryExpr, CallExpr, GroupingExpr, Literal, LiteralExpr, LogicalExpr,
        PrefixExpr, SymbolExpr,
    },
    statements::{
        BlockStmt, Declaration, ExpressionStmt, FnDeclStmt, IfStmt, LoopControl, LoopControlStmt,
        PrintStmt, ReturnStmt, VarDeclStmt, WhileStmt,
    },
    types::LoxType,
};

/// A statement node. Owned by the enclosing block, function body or the
/// top-level sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    Print(PrintStmt),
    If(IfStmt),
    While(WhileStmt),
    LoopControl(LoopControlStmt),
    VarDecl(VarDeclStmt),
    Block(BlockStmt),
    FnDecl(FnDeclStmt),
    Return(ReturnStmt),
}

impl Stmt {
    /// Returns the span of the statement.
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::Print(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::LoopControl(stmt) => &stmt.span,
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::Block(stmt) => &stmt.span,
            Stmt::FnDecl(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Symbol(SymbolExpr),
    Prefix(PrefixExpr),
    Binary(BinaryExpr),
    Logical(LogicalExpr),
    Grouping(GroupingExpr),
    Assignment(AssignmentExpr),
    Call(CallExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Literal(expr) => &expr.span,
            Expr::Symbol(expr) => &expr.span,
            Expr::Prefix(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Logical(expr) => &expr.span,
            Expr::Grouping(expr) => &expr.span,
            Expr::Assignment(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
        }
    }

    /// The annotated type of the expression, `None` until annotation has
    /// assigned one (or when it could not).
    pub fn get_type(&self) -> Option<LoxType> {
        match self {
            Expr::Literal(expr) => Some(expr.get_type()),
            Expr::Symbol(expr) => expr.get_type(),
            Expr::Prefix(expr) => expr.ty,
            Expr::Binary(expr) => expr.ty,
            Expr::Logical(expr) => expr.ty,
            Expr::Grouping(expr) => expr.ty,
            Expr::Assignment(expr) => expr.ty,
            Expr::Call(expr) => expr.ty,
        }
    }
}

// Printing
//
// Compact parenthesized form. Resolved references print as `mangled:type`,
// unresolved ones as their source name.

impl Display for SymbolExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.resolved {
            Some(resolved) => write!(f, "{}:{}", resolved.name, resolved.ty),
            None => write!(f, "{}", self.value),
        }
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let name = self.mangled.as_deref().unwrap_or(&self.name);
        write!(f, "{}:{}", name, self.ty)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Expr::Literal(literal) => match &literal.value {
                Literal::Int(value) => write!(f, "{}", value),
                Literal::Double(value) => write!(f, "{:?}", value),
                Literal::String(value) => write!(f, "{:?}", value),
                Literal::Boolean(value) => write!(f, "{}", value),
            },
            Expr::Symbol(symbol) => write!(f, "{}", symbol),
            Expr::Prefix(prefix) => write!(f, "({} {})", prefix.operator.value, prefix.right_expr),
            Expr::Binary(binary) => write!(
                f,
                "({} {} {})",
                binary.operator.value, binary.left, binary.right
            ),
            Expr::Logical(logical) => write!(
                f,
                "({} {} {})",
                logical.operator.value, logical.left, logical.right
            ),
            Expr::Grouping(grouping) => write!(f, "(group {})", grouping.expression),
            Expr::Assignment(assignment) => {
                write!(f, "(= {} {})", assignment.assignee, assignment.value)
            }
            Expr::Call(call) => {
                write!(f, "(call {}", call.callee)?;
                for argument in call.arguments.iter() {
                    write!(f, " {}", argument)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Stmt::Expression(stmt) => write!(f, "(expr {})", stmt.expression),
            Stmt::Print(stmt) => write!(f, "(print {})", stmt.expression),
            Stmt::If(stmt) => {
                write!(f, "(if {} {}", stmt.condition, stmt.then_body)?;
                if let Some(else_body) = &stmt.else_body {
                    write!(f, " {}", else_body)?;
                }
                write!(f, ")")
            }
            Stmt::While(stmt) => write!(f, "(while {} {})", stmt.condition, stmt.body),
            Stmt::LoopControl(stmt) => match stmt.kind {
                LoopControl::Break => write!(f, "(break)"),
                LoopControl::Continue => write!(f, "(continue)"),
            },
            Stmt::VarDecl(stmt) => match &stmt.assigned_value {
                Some(value) => write!(f, "(var {} {})", stmt.declaration, value),
                None => write!(f, "(var {})", stmt.declaration),
            },
            Stmt::Block(block) => fmt_block(f, block),
            Stmt::FnDecl(function) => {
                write!(f, "(fn {} (", function.declaration)?;
                for (index, parameter) in function.parameters.iter().enumerate() {
                    if index > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", parameter)?;
                }
                write!(f, ") ")?;
                fmt_block(f, &function.body)?;
                write!(f, ")")
            }
            Stmt::Return(stmt) => match &stmt.value {
                Some(value) => write!(f, "(return {})", value),
                None => write!(f, "(return)"),
            },
        }
    }
}

fn fmt_block(f: &mut Formatter<'_>, block: &BlockStmt) -> Result {
    write!(f, "(block")?;
    for stmt in block.iter() {
        write!(f, " {}", stmt)?;
    }
    write!(f, ")")
}
