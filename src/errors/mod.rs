//! Error types and diagnostic reporting.
//!
//! This module defines the error types shared by the front end and the
//! annotator. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and annotation
//! - The diagnostic sink contract the annotator reports through
//! - A collecting sink used by the pipeline and the tests

pub mod diagnostics;
pub mod errors;
