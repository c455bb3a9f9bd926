//! Lexical analysis for the typed Lox front end.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using anchored regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Line and column tracking for diagnostics
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;
