//! The diagnostic sink the annotator reports through.

use std::slice::Iter;

use crate::Position;

use super::errors::{Error, ErrorImpl};

/// Receives annotation diagnostics. Reporting is never fatal.
pub trait DiagnosticSink {
    fn report(&mut self, line: u32, column: u32, message: &str);

    /// Reports a typed error. Sinks that only care about text can rely on the
    /// default, which forwards the error's location and message to `report`.
    fn report_error(&mut self, error: Error) {
        let position = error.get_position();
        self.report(position.line, position.column, &error.to_string());
    }
}

/// Collects every reported diagnostic in order.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Error> {
        self.errors.iter()
    }

    /// The diagnostic messages, in the order they were reported.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, line: u32, column: u32, message: &str) {
        self.errors.push(Error::new(
            ErrorImpl::Message {
                message: String::from(message),
            },
            Position::at(line, column),
        ));
    }

    fn report_error(&mut self, error: Error) {
        self.errors.push(error);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Error;
    type IntoIter = Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
