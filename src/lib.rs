#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    annotator::{annotator::annotate, config::AnnotatorConfig, symbol_table::SymbolTable},
    ast::ast::Stmt,
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorTip},
    },
    lexer::lexer::tokenize,
    parser::parser::parse,
};

pub mod annotator;
pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A location in a source file.
///
/// `offset` is a byte offset, `line` and `column` are 1-based. A line of 0
/// marks a position that has no source location (synthesized nodes).
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(offset: u32, line: u32, column: u32, file: Rc<String>) -> Self {
        Position {
            offset,
            line,
            column,
            file,
        }
    }

    pub fn null() -> Self {
        Position::new(0, 0, 0, Rc::new(String::from("<null>")))
    }

    /// A position known only by line and column, as handed to a diagnostic sink.
    pub fn at(line: u32, column: u32) -> Self {
        Position::new(0, line, column, Rc::new(String::from("<unknown>")))
    }

    pub fn is_null(&self) -> bool {
        self.line == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Everything the pipeline produced for one source file.
#[derive(Debug)]
pub struct Checked {
    pub statements: Vec<Stmt>,
    pub symbols: SymbolTable,
    pub diagnostics: Diagnostics,
}

/// Tokenizes, parses and annotates `source`.
///
/// Lexing and parsing stop at the first error and return it. Annotation never
/// fails; its findings are collected in [`Checked::diagnostics`].
pub fn check_source(source: &str, file: &str, config: &AnnotatorConfig) -> Result<Checked, Error> {
    let tokens = tokenize(String::from(source), Some(String::from(file)))?;
    let mut statements = parse(tokens, Rc::new(String::from(file)))?;

    let mut diagnostics = Diagnostics::new();
    let symbols = annotate(&mut statements, config, &mut diagnostics);

    Ok(Checked {
        statements,
        symbols,
        diagnostics,
    })
}

/// Finds the line containing byte `position` of `source`.
///
/// Returns the 1-based line number, the line text and the offset of `position`
/// within that line.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos >= source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    None
}

/// Renders an error with the offending source line and a caret under it.
pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Error: VariableNotDeclared: Undeclared variable y
        -> final.lox:2:7
          |
        2 | print y;
          | ------^
    */

    let position = error.get_position();
    let mut out = format!("Error: {}: {}\n", error.get_error_name(), error);

    if position.is_null() {
        out.push_str(&format!("-> {}\n", file));
        return out;
    }

    out.push_str(&format!("-> {}:{}:{}\n", file, position.line, position.column));

    if let Some((line, line_text, line_pos)) = get_line_at_position(source, position.offset) {
        let line_string = line.to_string();
        let padding = line_string.len() + 2;

        out.push_str(&format!("{:>padding$}\n", "|"));

        let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
        out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

        // Columns count characters, the line position counts bytes.
        let line_chars = line_text.get(..line_pos).map_or(line_pos, |text| text.chars().count());
        let arrows = line_chars.saturating_sub(removed_whitespace) + 1;
        out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    }

    if let ErrorTip::Suggestion(tip) = error.get_tip() {
        out.push_str(&format!("= help: {}\n", tip));
    }

    out
}

/// Prints [`render_error`] to stderr.
pub fn display_error(error: &Error, source: &str, file: &str) {
    eprint!("{}", render_error(error, source, file));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
