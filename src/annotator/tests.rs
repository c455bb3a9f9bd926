//! Unit tests for the annotation pass.
//!
//! Programs are parsed with the real front end, annotated, and checked through
//! the tree printer, the symbol table and the collected diagnostics.

use std::{collections::HashSet, rc::Rc};

use super::{
    annotator::{annotate, Annotator},
    config::{AnnotatorConfig, MangleStrategy},
    promote::{PromotionContext, TypeError, TypeOracle},
    symbol_table::{SymbolKind, SymbolTable},
};
use crate::{
    ast::{
        ast::{Expr, Stmt},
        types::LoxType,
    },
    errors::diagnostics::{DiagnosticSink, Diagnostics},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

fn parse_source(source: &str) -> Vec<Stmt> {
    let tokens = tokenize(source.to_string(), Some("test.lox".to_string())).unwrap();
    parse(tokens, Rc::new("test.lox".to_string())).unwrap()
}

fn annotate_source_with(
    source: &str,
    config: &AnnotatorConfig,
) -> (Vec<Stmt>, SymbolTable, Diagnostics) {
    let mut statements = parse_source(source);
    let mut diagnostics = Diagnostics::new();
    let symbols = annotate(&mut statements, config, &mut diagnostics);
    (statements, symbols, diagnostics)
}

fn annotate_source(source: &str) -> (Vec<Stmt>, SymbolTable, Diagnostics) {
    annotate_source_with(source, &AnnotatorConfig::default())
}

fn render(statements: &[Stmt]) -> String {
    statements
        .iter()
        .map(|stmt| stmt.to_string())
        .collect::<Vec<String>>()
        .join(" ")
}

fn messages(source: &str) -> Vec<String> {
    annotate_source(source).2.messages()
}

/// Type of the expression in the `index`th top-level `print`/expression statement.
fn expr_type(statements: &[Stmt], index: usize) -> Option<LoxType> {
    match &statements[index] {
        Stmt::Print(stmt) => stmt.expression.get_type(),
        Stmt::Expression(stmt) => stmt.expression.get_type(),
        other => panic!("expected an expression, got {:?}", other),
    }
}

// Mangling and resolution

#[test]
fn test_every_declaration_gets_a_unique_name() {
    let source = "
        var x: int = 1;
        fn f(a: int, b: int) -> int { var x: int = a; return x + b; }
        { var x: double = 2.0; }
    ";
    let (_, symbols, diagnostics) = annotate_source(source);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics.messages());
    assert_eq!(symbols.len(), 6);

    let names: HashSet<&str> = symbols.iter().map(|info| info.name.as_str()).collect();
    assert_eq!(names.len(), 6);

    let kinds: Vec<SymbolKind> = symbols.iter().map(|info| info.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SymbolKind::Variable,
            SymbolKind::Function,
            SymbolKind::Parameter,
            SymbolKind::Parameter,
            SymbolKind::Variable,
            SymbolKind::Variable,
        ]
    );
}

#[test]
fn test_counter_names_follow_declaration_order() {
    let (statements, symbols, _) =
        annotate_source("fn add(a: int, b: int) -> int { return a + b; }");

    assert_eq!(
        render(&statements),
        "(fn add_0:int (a_1:int b_2:int) (block (return (+ a_1:int b_2:int))))"
    );

    let add = symbols.get("add_0").unwrap();
    assert_eq!(add.surface, "add");
    assert_eq!(add.arity, 2);
    assert_eq!(add.ty, LoxType::Int);
    assert_eq!(add.position.line, 1);
    assert_eq!(add.position.column, 4);
}

#[test]
fn test_shadowing_resolves_to_inner_then_outer() {
    let (statements, _, diagnostics) =
        annotate_source("var x: int = 1; { var x: string = \"s\"; print x; } print x;");

    assert!(diagnostics.is_empty());
    assert_eq!(
        render(&statements),
        "(var x_0:int 1) (block (var x_1:string \"s\") (print x_1:string)) (print x_0:int)"
    );
}

#[test]
fn test_initializer_sees_outer_binding() {
    let (statements, _, diagnostics) =
        annotate_source("var x: int = 1; { var x: int = x + 1; }");

    assert!(diagnostics.is_empty());
    assert_eq!(
        render(&statements[1..]),
        "(block (var x_1:int (+ x_0:int 1)))"
    );
}

#[test]
fn test_self_reference_in_initializer_is_undeclared() {
    let errors = messages("var z: int = z;");
    assert_eq!(errors[0], "Undeclared variable z");
}

#[test]
fn test_redeclaration_keeps_first_binding() {
    let (statements, symbols, diagnostics) =
        annotate_source("var x: int = 1; var x: string = \"a\"; print x;");

    assert_eq!(
        diagnostics.messages(),
        vec!["Illegal redeclaration of variable x"]
    );
    let error = diagnostics.iter().next().unwrap();
    assert_eq!(error.get_error_name(), "VariableAlreadyDeclared");
    assert_eq!(error.get_position().line, 1);
    assert_eq!(error.get_position().column, 21);

    assert_eq!(symbols.len(), 1);
    assert_eq!(
        render(&statements),
        "(var x_0:int 1) (var x:string \"a\") (print x_0:int)"
    );
}

#[test]
fn test_redeclaration_in_nested_block_is_shadowing() {
    assert!(messages("var x: int = 1; { var x: int = 2; }").is_empty());
}

#[test]
fn test_duplicate_parameters() {
    assert_eq!(
        messages("fn p(a: int, a: int) {}"),
        vec!["Illegal redeclaration of variable a"]
    );
}

#[test]
fn test_body_shares_the_parameter_level() {
    assert_eq!(
        messages("fn q(a: int) { var a: int = 1; }"),
        vec!["Illegal redeclaration of variable a"]
    );
}

#[test]
fn test_undeclared_variable() {
    let (statements, _, diagnostics) = annotate_source("print y;");

    let error = diagnostics.iter().next().unwrap();
    assert_eq!(error.to_string(), "Undeclared variable y");
    assert_eq!(error.get_position().column, 7);
    assert_eq!(expr_type(&statements, 0), None);
    assert_eq!(render(&statements), "(print y)");
}

#[test]
fn test_undeclared_assignment_target() {
    let (statements, _, diagnostics) = annotate_source("y = 1;");

    assert_eq!(diagnostics.messages(), vec!["Undeclared variable y"]);
    assert_eq!(expr_type(&statements, 0), None);
}

#[test]
fn test_undeclared_function() {
    let (statements, _, diagnostics) = annotate_source("f(1);");

    assert_eq!(diagnostics.messages(), vec!["Undeclared function f"]);
    assert_eq!(expr_type(&statements, 0), None);
}

#[test]
fn test_recursion() {
    let (statements, _, diagnostics) =
        annotate_source("fn fact(n: int) -> int { return n * fact(n - 1); }");

    assert!(diagnostics.is_empty(), "{:?}", diagnostics.messages());
    assert_eq!(
        render(&statements),
        "(fn fact_0:int (n_1:int) (block (return (* n_1:int (call fact_0:int (- n_1:int 1))))))"
    );
}

#[test]
fn test_function_not_visible_before_declaration() {
    assert_eq!(
        messages("f(); fn f() {}"),
        vec!["Undeclared function f"]
    );
}

// Calls

#[test]
fn test_arity() {
    let source = "
        fn add(a: int, b: int) -> int { return a + b; }
        add(1);
        add(1, 2, 3);
        var r: int = add(1, 2);
    ";
    let (statements, _, diagnostics) = annotate_source(source);

    assert_eq!(
        diagnostics.messages(),
        vec![
            "Invalid number of arguments to function 'add' (expected 2, got 1)",
            "Invalid number of arguments to function 'add' (expected 2, got 3)",
        ]
    );
    assert_eq!(expr_type(&statements, 1), None);
    assert_eq!(expr_type(&statements, 2), None);
    assert_eq!(render(&statements[3..]), "(var r_3:int (call add_0:int 1 2))");

    match &statements[3] {
        Stmt::VarDecl(decl) => match &decl.assigned_value {
            Some(Expr::Call(call)) => {
                assert_eq!(call.ty, Some(LoxType::Int));
                assert_eq!(call.callee.resolved.as_ref().unwrap().arity, 2);
            }
            other => panic!("expected a call, got {:?}", other),
        },
        other => panic!("expected a declaration, got {:?}", other),
    }
}

#[test]
fn test_arguments_are_resolved() {
    let (_, _, diagnostics) = annotate_source("fn f(a: int) {} f(missing);");
    assert_eq!(diagnostics.messages(), vec!["Undeclared variable missing"]);
}

// Assignments and initializers

#[test]
fn test_assignment_type_mismatch() {
    assert_eq!(
        messages("var x: int = 1; x = \"s\";"),
        vec!["Cannot assign expression of type string to variable of type int"]
    );
}

#[test]
fn test_assignment_promotes_int_to_double() {
    let (statements, _, diagnostics) = annotate_source("var d: double = 1; d = 2;");

    assert!(diagnostics.is_empty());
    assert_eq!(expr_type(&statements, 1), Some(LoxType::Double));
    assert_eq!(render(&statements[1..]), "(expr (= d_0:double 2))");
}

#[test]
fn test_initializer_type_mismatch() {
    let (_, _, diagnostics) = annotate_source("var b: bool = 1;");

    let error = diagnostics.iter().next().unwrap();
    assert_eq!(error.get_error_name(), "TypeMatchError");
    assert_eq!(
        error.to_string(),
        "Cannot assign expression of type int to variable of type bool"
    );
    assert_eq!(error.get_position().column, 15);
}

#[test]
fn test_unknown_rvalue_is_reported() {
    assert_eq!(
        messages("var x: int = 1; x = y;"),
        vec![
            "Undeclared variable y",
            "Cannot assign expression of type <unknown> to variable of type int",
        ]
    );
}

// Returns

#[test]
fn test_missing_return() {
    let (_, _, diagnostics) = annotate_source("fn f() -> int { print 1; }");

    assert_eq!(
        diagnostics.messages(),
        vec!["Must return a value for function 'f' declared as int"]
    );
    assert_eq!(diagnostics.iter().next().unwrap().get_position().column, 4);
}

#[test]
fn test_void_function_gets_one_implicit_return() {
    let (statements, _, diagnostics) = annotate_source("fn g() { print 1; }");

    assert!(diagnostics.is_empty());
    assert_eq!(
        render(&statements),
        "(fn g_0:void () (block (print 1) (return)))"
    );
    match &statements[0] {
        Stmt::FnDecl(function) => match function.body.body.last() {
            Some(Stmt::Return(ret)) => {
                assert!(ret.implicit);
                assert!(ret.span.start.is_null());
            }
            other => panic!("expected a return, got {:?}", other),
        },
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_explicit_void_return_is_kept() {
    let (statements, _, diagnostics) = annotate_source("fn v() { return; }");

    assert!(diagnostics.is_empty());
    match &statements[0] {
        Stmt::FnDecl(function) => assert_eq!(function.body.body.len(), 1),
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_duplicate_return_in_exclusive_branches() {
    assert_eq!(
        messages("fn h(c: bool) -> int { if c return 1; else return 2; }"),
        vec!["Cannot return more than once inside a function"]
    );
}

#[test]
fn test_return_outside_function() {
    let (_, _, diagnostics) = annotate_source("return 1;");

    let error = diagnostics.iter().next().unwrap();
    assert_eq!(error.get_error_name(), "ReturnOutsideFunction");
    assert_eq!(error.to_string(), "Cannot return unless inside function");
}

#[test]
fn test_rejected_return_skips_its_value() {
    assert_eq!(
        messages("return nowhere;"),
        vec!["Cannot return unless inside function"]
    );
    assert_eq!(
        messages("fn f() -> int { return 1; return ghost(1, 2); }"),
        vec!["Cannot return more than once inside a function"]
    );
}

#[test]
fn test_return_type_mismatch_points_at_return() {
    let (_, _, diagnostics) = annotate_source("fn s() -> int {\n    return \"no\";\n}");

    let error = diagnostics.iter().next().unwrap();
    assert_eq!(error.get_error_name(), "ReturnTypeMismatch");
    assert_eq!(error.get_position().line, 2);
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_block_scope_is_popped_after_errors() {
    assert_eq!(
        messages("{ var x: int = 1; var x: int = 2; } print x;"),
        vec![
            "Illegal redeclaration of variable x",
            "Undeclared variable x",
        ]
    );
}

#[test]
fn test_nested_function_keeps_outer_return() {
    assert!(messages("fn o() -> int { return 1; fn i() {} }").is_empty());
}

#[test]
fn test_return_type_mismatch() {
    assert_eq!(
        messages("fn s() -> int { return \"no\"; }"),
        vec!["Illegal return type: function declared with type int, got string"]
    );
    assert_eq!(
        messages("fn d() -> double { return 1; }"),
        vec!["Illegal return type: function declared with type double, got int"]
    );
    assert_eq!(
        messages("fn n() -> int { return; }"),
        vec!["Illegal return type: function declared with type int, got void"]
    );
}

#[test]
fn test_nested_function_restores_context() {
    let source = "fn outer() -> int { fn inner() { print 1; } return 1; }";
    let (statements, _, diagnostics) = annotate_source(source);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics.messages());
    assert_eq!(
        render(&statements),
        "(fn outer_0:int () (block (fn inner_1:void () (block (print 1) (return))) (return 1)))"
    );
}

#[test]
fn test_loop_control_is_accepted() {
    assert!(messages("while true { break; continue; }").is_empty());
}

// Types

#[test]
fn test_expression_types() {
    let source = "
        var a: int = 1;
        var b: double = 2.0;
        print a + b;
        print a < b;
        print -a;
        print !true;
        print \"x\" + \"y\";
        print (a);
        print a && true;
        print \"x\" + 1;
        print a % a;
    ";
    let (statements, _, diagnostics) = annotate_source(source);

    assert!(diagnostics.is_empty());
    assert_eq!(expr_type(&statements, 2), Some(LoxType::Double));
    assert_eq!(expr_type(&statements, 3), Some(LoxType::Bool));
    assert_eq!(expr_type(&statements, 4), Some(LoxType::Int));
    assert_eq!(expr_type(&statements, 5), Some(LoxType::Bool));
    assert_eq!(expr_type(&statements, 6), Some(LoxType::String));
    assert_eq!(expr_type(&statements, 7), Some(LoxType::Int));
    assert_eq!(expr_type(&statements, 8), Some(LoxType::Bool));
    assert_eq!(expr_type(&statements, 9), None);
    assert_eq!(expr_type(&statements, 10), Some(LoxType::Int));
}

// Configuration and extension points

#[test]
fn test_reannotation_with_fresh_annotator_is_stable() {
    let source = "var x: int = 1; fn f(a: int) { { var x: int = a; } } f(x);";
    let (mut statements, symbols, diagnostics) = annotate_source(source);
    assert!(diagnostics.is_empty());

    let first = render(&statements);

    let mut again = Diagnostics::new();
    let second_symbols = annotate(&mut statements, &AnnotatorConfig::default(), &mut again);

    assert!(again.is_empty(), "{:?}", again.messages());
    assert_eq!(render(&statements), first);

    let first_names: Vec<&str> = symbols.iter().map(|info| info.name.as_str()).collect();
    let second_names: Vec<&str> = second_symbols
        .iter()
        .map(|info| info.name.as_str())
        .collect();
    assert_eq!(first_names, second_names);
}

#[test]
fn test_random_strategy() {
    let config = AnnotatorConfig {
        strategy: MangleStrategy::Random { seed: Some(3) },
        separator: '_',
    };
    let (_, symbols, diagnostics) =
        annotate_source_with("var x: int = 1; { var x: int = 2; { var x: int = 3; } }", &config);

    assert!(diagnostics.is_empty());
    let names: HashSet<&str> = symbols.iter().map(|info| info.name.as_str()).collect();
    assert_eq!(names.len(), 3);
    assert!(names.contains("x_"));
    assert!(names.iter().all(|name| name.starts_with("x_")));
}

#[test]
fn test_custom_separator() {
    let config = AnnotatorConfig {
        strategy: MangleStrategy::Counter,
        separator: '$',
    };
    let (statements, _, _) = annotate_source_with("var x: int = 1;", &config);

    assert_eq!(render(&statements), "(var x$0:int 1)");
}

struct Strict;

impl TypeOracle for Strict {
    fn promote(
        &self,
        target: LoxType,
        source: Option<LoxType>,
        _context: PromotionContext,
    ) -> Result<LoxType, TypeError> {
        match source {
            Some(source) if source == target => Ok(target),
            Some(source) => Err(TypeError::NotPromotable {
                to: target,
                from: source,
            }),
            None => Err(TypeError::Unknown),
        }
    }
}

#[test]
fn test_custom_oracle() {
    let source = "var d: double = 1;";
    assert!(messages(source).is_empty());

    let mut statements = parse_source(source);
    let mut diagnostics = Diagnostics::new();
    Annotator::new(&AnnotatorConfig::default(), &mut diagnostics)
        .with_oracle(Strict)
        .annotate(&mut statements);

    assert_eq!(
        diagnostics.messages(),
        vec!["Cannot assign expression of type int to variable of type double"]
    );
}

#[derive(Default)]
struct Lines(Vec<(u32, u32, String)>);

impl DiagnosticSink for Lines {
    fn report(&mut self, line: u32, column: u32, message: &str) {
        self.0.push((line, column, message.to_string()));
    }
}

#[test]
fn test_custom_sink() {
    let mut statements = parse_source("var a: int = 1;\nprint b;");
    let mut lines = Lines::default();
    annotate(&mut statements, &AnnotatorConfig::default(), &mut lines);

    assert_eq!(lines.0, vec![(2, 7, "Undeclared variable b".to_string())]);
}
