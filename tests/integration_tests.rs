//! Integration tests for the whole pipeline.
//!
//! These tests drive `check_source` from source text through tokenization,
//! parsing and annotation, and check the annotated tree, the symbol table and
//! the rendered diagnostics.

use annotator::{
    annotator::config::{AnnotatorConfig, MangleStrategy},
    ast::ast::Stmt,
    check_source, render_error,
};

const PROGRAM: &str = "\
// Sums the first n numbers.
fn sum(n: int) -> int {
    var total: int = 0;
    var i: int = 0;
    while i < n {
        i = i + 1;
        total = total + i;
    }
    return total;
}

fn report(label: string, value: int) {
    print label;
    print value;
}

var n: int = 10;
report(\"sum\", sum(n));
";

#[test]
fn test_check_clean_program() {
    let checked = check_source(PROGRAM, "sum.lox", &AnnotatorConfig::default()).unwrap();

    assert!(
        checked.diagnostics.is_empty(),
        "{:?}",
        checked.diagnostics.messages()
    );
    assert_eq!(checked.statements.len(), 4);
    assert_eq!(checked.symbols.len(), 8);

    let dump: Vec<String> = checked
        .statements
        .iter()
        .map(|stmt| stmt.to_string())
        .collect();
    assert_eq!(
        dump[0],
        "(fn sum_0:int (n_1:int) (block \
         (var total_2:int 0) \
         (var i_3:int 0) \
         (while (< i_3:int n_1:int) (block \
         (expr (= i_3:int (+ i_3:int 1))) \
         (expr (= total_2:int (+ total_2:int i_3:int))))) \
         (return total_2:int)))"
    );
    assert_eq!(
        dump[1],
        "(fn report_4:void (label_5:string value_6:int) (block \
         (print label_5:string) (print value_6:int) (return)))"
    );
    assert_eq!(dump[2], "(var n_7:int 10)");
    assert_eq!(
        dump[3],
        "(expr (call report_4:void \"sum\" (call sum_0:int n_7:int)))"
    );
}

#[test]
fn test_symbols_are_in_declaration_order() {
    let checked = check_source(PROGRAM, "sum.lox", &AnnotatorConfig::default()).unwrap();

    let surfaces: Vec<&str> = checked
        .symbols
        .iter()
        .map(|info| info.surface.as_str())
        .collect();
    assert_eq!(
        surfaces,
        vec!["sum", "n", "total", "i", "report", "label", "value", "n"]
    );
}

#[test]
fn test_check_reports_every_problem() {
    let source = "\
fn half(x: double) -> double {
    if x > 0.0 return x / 2.0;
    else return 0.0;
}
var r: int = half(1.0, 2.0);
var r: string = \"again\";
undefined = 3;
return r;
";
    let checked = check_source(source, "bad.lox", &AnnotatorConfig::default()).unwrap();

    assert_eq!(
        checked.diagnostics.messages(),
        vec![
            "Cannot return more than once inside a function",
            "Invalid number of arguments to function 'half' (expected 1, got 2)",
            "Cannot assign expression of type <unknown> to variable of type int",
            "Illegal redeclaration of variable r",
            "Undeclared variable undefined",
            "Cannot return unless inside function",
        ]
    );

    let lines: Vec<u32> = checked
        .diagnostics
        .iter()
        .map(|error| error.get_position().line)
        .collect();
    assert_eq!(lines, vec![3, 5, 5, 6, 7, 8]);
}

#[test]
fn test_render_diagnostic() {
    let source = "var a: int = 1;\n    a = \"text\";\n";
    let checked = check_source(source, "render.lox", &AnnotatorConfig::default()).unwrap();
    let error = checked.diagnostics.iter().next().unwrap();

    let rendered = render_error(error, source, "render.lox");
    assert!(rendered.starts_with(
        "Error: TypeMatchError: Cannot assign expression of type string to variable of type int\n"
    ));
    assert!(rendered.contains("-> render.lox:2:9\n"));
    assert!(rendered.contains("2 | a = \"text\";\n"));
    assert!(rendered.contains("  | ----^\n"));
}

#[test]
fn test_front_end_errors_are_returned() {
    let lex = check_source("var a: int = #;", "lex.lox", &AnnotatorConfig::default());
    assert_eq!(lex.unwrap_err().get_error_name(), "UnrecognisedToken");

    let parse = check_source("var a: int = ;", "parse.lox", &AnnotatorConfig::default());
    assert_eq!(parse.unwrap_err().get_error_name(), "UnexpectedToken");

    let ty = check_source("var a: float = 1.0;", "type.lox", &AnnotatorConfig::default());
    let error = ty.unwrap_err();
    assert_eq!(error.get_error_name(), "UnknownType");
    assert!(render_error(&error, "var a: float = 1.0;", "type.lox").contains("= help: "));
}

#[test]
fn test_random_names_are_unique() {
    let config = AnnotatorConfig {
        strategy: MangleStrategy::Random { seed: Some(2024) },
        separator: '_',
    };
    let checked = check_source(PROGRAM, "sum.lox", &config).unwrap();

    assert!(checked.diagnostics.is_empty());
    let mut names: Vec<&str> = checked
        .symbols
        .iter()
        .map(|info| info.name.as_str())
        .collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), checked.symbols.len());
}

#[test]
fn test_void_function_body_ends_in_return() {
    let checked = check_source(PROGRAM, "sum.lox", &AnnotatorConfig::default()).unwrap();

    match &checked.statements[1] {
        Stmt::FnDecl(function) => match function.body.body.last() {
            Some(Stmt::Return(ret)) => assert!(ret.implicit),
            other => panic!("expected a return, got {:?}", other),
        },
        other => panic!("expected a function, got {:?}", other),
    }
}
