//! The annotation pass.
//!
//! A single depth-first walk over the statement sequence that binds every
//! declaration to a fresh mangled name, resolves every reference to the
//! declaration it denotes, propagates types and checks assignments, calls and
//! returns. Problems are reported to a [`DiagnosticSink`] and never stop the
//! walk.

use std::mem;

use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::Resolved,
        statements::{Declaration, ReturnStmt},
        types::LoxType,
    },
    errors::{
        diagnostics::DiagnosticSink,
        errors::{Error, ErrorImpl},
    },
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    config::AnnotatorConfig,
    mangler::Mangler,
    promote::{LoxPromotion, PromotionContext, TypeError, TypeOracle},
    scope::Scope,
    symbol_table::{SymbolInfo, SymbolKind, SymbolTable},
};

/// The function whose body is being annotated.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionContext {
    pub name: String,
    pub return_type: LoxType,
    pub return_found: bool,
}

pub struct Annotator<'s> {
    symbols: SymbolTable,
    scope: Scope,
    mangler: Mangler,
    oracle: Box<dyn TypeOracle>,
    function: Option<FunctionContext>,
    sink: &'s mut dyn DiagnosticSink,
}

impl<'s> Annotator<'s> {
    pub fn new(config: &AnnotatorConfig, sink: &'s mut dyn DiagnosticSink) -> Self {
        Annotator {
            symbols: SymbolTable::new(),
            scope: Scope::new(),
            mangler: Mangler::new(config),
            oracle: Box::new(LoxPromotion),
            function: None,
            sink,
        }
    }

    /// Replaces the promotion rules used for assignments and initializers.
    pub fn with_oracle(mut self, oracle: impl TypeOracle + 'static) -> Self {
        self.oracle = Box::new(oracle);
        self
    }

    /// Annotates `statements` in place and returns every declaration made.
    pub fn annotate(mut self, statements: &mut [Stmt]) -> SymbolTable {
        for stmt in statements.iter_mut() {
            annotate_stmt(&mut self, stmt);
        }
        self.symbols
    }

    fn push_scope(&mut self) {
        let parent = mem::take(&mut self.scope);
        self.scope = Scope::push(parent);
        trace!(depth = self.scope.depth(), "push scope");
    }

    fn pop_scope(&mut self) {
        let scope = mem::take(&mut self.scope);
        self.scope = scope.into_parent().unwrap_or_default();
        trace!(depth = self.scope.depth(), "pop scope");
    }

    fn error(&mut self, error: ErrorImpl, position: Position) {
        debug!(
            line = position.line,
            column = position.column,
            "{}",
            error
        );
        self.sink.report_error(Error::new(error, position));
    }

    fn type_error(&mut self, error: TypeError, target: LoxType, position: Position) {
        let received = match error {
            TypeError::NotPromotable { from, .. } => from.to_string(),
            TypeError::Unknown => LoxType::name_of(None),
        };
        self.error(
            ErrorImpl::TypeMatchError {
                expected: target.to_string(),
                received,
            },
            position,
        );
    }

    /// Binds `declaration` in the current level. Returns false, after
    /// reporting, when the level already binds the name.
    fn declare(&mut self, declaration: &mut Declaration, kind: SymbolKind) -> bool {
        if self.scope.get_immediate(&declaration.name).is_some() {
            self.error(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: declaration.name.clone(),
                },
                declaration.span.start.clone(),
            );
            return false;
        }

        let mangled = self.mangler.mangle(&declaration.name, &self.symbols);
        debug!(
            surface = declaration.name.as_str(),
            mangled = mangled.as_str(),
            %kind,
            "declare"
        );

        self.scope.put(&declaration.name, &mangled);
        self.symbols.insert(SymbolInfo {
            name: mangled.clone(),
            surface: declaration.name.clone(),
            ty: declaration.ty,
            arity: declaration.arity,
            kind,
            position: declaration.span.start.clone(),
        });
        declaration.mangled = Some(mangled);
        true
    }

    fn resolve(&self, surface: &str) -> Option<Resolved> {
        let mangled = self.scope.get(surface)?;
        let info = self.symbols.get(mangled)?;
        Some(Resolved {
            name: info.name.clone(),
            ty: info.ty,
            arity: info.arity,
        })
    }
}

/// Annotates `statements` with the default promotion rules.
pub fn annotate(
    statements: &mut [Stmt],
    config: &AnnotatorConfig,
    sink: &mut dyn DiagnosticSink,
) -> SymbolTable {
    Annotator::new(config, sink).annotate(statements)
}

pub fn annotate_stmt(annotator: &mut Annotator, stmt: &mut Stmt) {
    match stmt {
        Stmt::Expression(stmt) => annotate_expr(annotator, &mut stmt.expression),
        Stmt::Print(stmt) => annotate_expr(annotator, &mut stmt.expression),
        Stmt::If(stmt) => {
            annotate_expr(annotator, &mut stmt.condition);
            annotate_stmt(annotator, &mut stmt.then_body);
            if let Some(else_body) = &mut stmt.else_body {
                annotate_stmt(annotator, else_body);
            }
        }
        Stmt::While(stmt) => {
            annotate_expr(annotator, &mut stmt.condition);
            annotate_stmt(annotator, &mut stmt.body);
        }
        Stmt::LoopControl(_) => {}
        Stmt::VarDecl(stmt) => {
            // The initializer sees the bindings from before the declaration.
            if let Some(value) = &mut stmt.assigned_value {
                annotate_expr(annotator, value);
            }

            let declared = annotator.declare(&mut stmt.declaration, SymbolKind::Variable);

            if let (true, Some(value)) = (declared, &stmt.assigned_value) {
                let target = stmt.declaration.ty;
                let promoted =
                    annotator
                        .oracle
                        .promote(target, value.get_type(), PromotionContext::Initializer);
                if let Err(error) = promoted {
                    annotator.type_error(error, target, value.get_span().start.clone());
                }
            }
        }
        Stmt::Block(block) => {
            annotator.push_scope();
            for stmt in block.iter_mut() {
                annotate_stmt(annotator, stmt);
            }
            annotator.pop_scope();
        }
        Stmt::FnDecl(function) => {
            function.declaration.arity = function.parameters.len();

            // Declared before the body so the function can call itself.
            annotator.declare(&mut function.declaration, SymbolKind::Function);

            let return_type = function.return_type();
            let saved = mem::replace(
                &mut annotator.function,
                Some(FunctionContext {
                    name: function.declaration.name.clone(),
                    return_type,
                    return_found: false,
                }),
            );

            annotator.push_scope();
            for parameter in function.parameters.iter_mut() {
                annotator.declare(parameter, SymbolKind::Parameter);
            }
            for stmt in function.body.iter_mut() {
                annotate_stmt(annotator, stmt);
            }
            annotator.pop_scope();

            let context = mem::replace(&mut annotator.function, saved);
            let return_found = context.map_or(false, |context| context.return_found);

            if !return_found {
                if return_type == LoxType::Void {
                    function.body.body.push(Stmt::Return(ReturnStmt::implicit()));
                } else {
                    annotator.error(
                        ErrorImpl::MissingReturn {
                            function: function.declaration.name.clone(),
                            type_: return_type.to_string(),
                        },
                        function.declaration.span.start.clone(),
                    );
                }
            }
        }
        Stmt::Return(stmt) => {
            let expected = match &mut annotator.function {
                None => Err(ErrorImpl::ReturnOutsideFunction),
                Some(context) if context.return_found => Err(ErrorImpl::DuplicateReturn),
                Some(context) => {
                    context.return_found = true;
                    Ok(context.return_type)
                }
            };

            let expected = match expected {
                Ok(expected) => expected,
                Err(error) => {
                    annotator.error(error, stmt.span.start.clone());
                    return;
                }
            };

            let actual = match &mut stmt.value {
                Some(value) => {
                    annotate_expr(annotator, value);
                    value.get_type()
                }
                None => Some(LoxType::Void),
            };

            if actual != Some(expected) {
                annotator.error(
                    ErrorImpl::ReturnTypeMismatch {
                        expected: expected.to_string(),
                        received: LoxType::name_of(actual),
                    },
                    stmt.span.start.clone(),
                );
            }
        }
    }
}

pub fn annotate_expr(annotator: &mut Annotator, expr: &mut Expr) {
    match expr {
        Expr::Literal(_) => {}
        Expr::Symbol(symbol) => {
            symbol.resolved = annotator.resolve(&symbol.value);
            if symbol.resolved.is_none() {
                annotator.error(
                    ErrorImpl::VariableNotDeclared {
                        variable: symbol.value.clone(),
                    },
                    symbol.span.start.clone(),
                );
            }
        }
        Expr::Prefix(prefix) => {
            annotate_expr(annotator, &mut prefix.right_expr);
            prefix.ty = match prefix.operator.kind {
                TokenKind::Not => Some(LoxType::Bool),
                _ => prefix.right_expr.get_type(),
            };
        }
        Expr::Binary(binary) => {
            annotate_expr(annotator, &mut binary.left);
            annotate_expr(annotator, &mut binary.right);
            binary.ty = binary_type(
                &binary.operator,
                binary.left.get_type(),
                binary.right.get_type(),
            );
        }
        Expr::Logical(logical) => {
            annotate_expr(annotator, &mut logical.left);
            annotate_expr(annotator, &mut logical.right);
            logical.ty = Some(LoxType::Bool);
        }
        Expr::Grouping(grouping) => {
            annotate_expr(annotator, &mut grouping.expression);
            grouping.ty = grouping.expression.get_type();
        }
        Expr::Assignment(assignment) => {
            let target = annotator.resolve(&assignment.assignee.value);
            if target.is_none() {
                annotator.error(
                    ErrorImpl::VariableNotDeclared {
                        variable: assignment.assignee.value.clone(),
                    },
                    assignment.assignee.span.start.clone(),
                );
            }
            assignment.assignee.resolved = target.clone();

            annotate_expr(annotator, &mut assignment.value);

            assignment.ty = None;
            if let Some(target) = target {
                let promoted = annotator.oracle.promote(
                    target.ty,
                    assignment.value.get_type(),
                    PromotionContext::Assignment,
                );
                match promoted {
                    Ok(ty) => assignment.ty = Some(ty),
                    Err(error) => annotator.type_error(
                        error,
                        target.ty,
                        assignment.value.get_span().start.clone(),
                    ),
                }
            }
        }
        Expr::Call(call) => {
            let callee = annotator.resolve(&call.callee.value);
            if callee.is_none() {
                annotator.error(
                    ErrorImpl::FunctionNotDeclared {
                        function: call.callee.value.clone(),
                    },
                    call.span.start.clone(),
                );
            }
            call.callee.resolved = callee.clone();

            for argument in call.arguments.iter_mut() {
                annotate_expr(annotator, argument);
            }

            call.ty = None;
            if let Some(callee) = callee {
                if callee.arity == call.arguments.len() {
                    call.ty = Some(callee.ty);
                } else {
                    annotator.error(
                        ErrorImpl::ArgumentCountMismatch {
                            function: call.callee.value.clone(),
                            expected: callee.arity,
                            received: call.arguments.len(),
                        },
                        call.span.start.clone(),
                    );
                }
            }
        }
    }
}

/// Result type of an arithmetic or comparison operator, if it has one.
fn binary_type(operator: &Token, left: Option<LoxType>, right: Option<LoxType>) -> Option<LoxType> {
    if operator.kind.is_comparison() {
        return Some(LoxType::Bool);
    }

    match (left?, right?) {
        (LoxType::String, LoxType::String) if operator.kind == TokenKind::Plus => {
            Some(LoxType::String)
        }
        (left, right) if left == right && left.is_numeric() => Some(left),
        (left, right) if left.is_numeric() && right.is_numeric() => Some(LoxType::Double),
        _ => None,
    }
}
