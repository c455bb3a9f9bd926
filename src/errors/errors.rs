use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::FunctionNotDeclared { .. } => "FunctionNotDeclared",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::DuplicateReturn => "DuplicateReturn",
            ErrorImpl::MissingReturn { .. } => "MissingReturn",
            ErrorImpl::Message { .. } => "Message",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UnknownType { .. } => ErrorTip::Suggestion(String::from(
                "Known types are `int`, `double`, `bool`, `string` and `void`",
            )),
            ErrorImpl::VariableAlreadyDeclared { variable } => ErrorTip::Suggestion(format!(
                "`{}` is already declared in this block, pick another name or assign to it",
                variable
            )),
            ErrorImpl::VariableNotDeclared { variable } => ErrorTip::Suggestion(format!(
                "Declare `{}` with `var` before using it",
                variable
            )),
            ErrorImpl::FunctionNotDeclared { function } => ErrorTip::Suggestion(format!(
                "Declare `{}` with `fn` before calling it",
                function
            )),
            ErrorImpl::ArgumentCountMismatch { .. } => ErrorTip::None,
            ErrorImpl::TypeMatchError { .. } => ErrorTip::None,
            ErrorImpl::ReturnTypeMismatch { .. } => ErrorTip::None,
            ErrorImpl::ReturnOutsideFunction => ErrorTip::None,
            ErrorImpl::DuplicateReturn => ErrorTip::Suggestion(String::from(
                "Store the result in a variable and return it once at the end",
            )),
            ErrorImpl::MissingReturn { .. } => ErrorTip::Suggestion(String::from(
                "Add a `return` statement to the function body",
            )),
            ErrorImpl::Message { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Front end
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },

    // Annotation
    #[error("Illegal redeclaration of variable {variable}")]
    VariableAlreadyDeclared { variable: String },
    #[error("Undeclared variable {variable}")]
    VariableNotDeclared { variable: String },
    #[error("Undeclared function {function}")]
    FunctionNotDeclared { function: String },
    #[error("Invalid number of arguments to function '{function}' (expected {expected}, got {received})")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("Cannot assign expression of type {received} to variable of type {expected}")]
    TypeMatchError { expected: String, received: String },
    #[error("Illegal return type: function declared with type {expected}, got {received}")]
    ReturnTypeMismatch { expected: String, received: String },
    #[error("Cannot return unless inside function")]
    ReturnOutsideFunction,
    #[error("Cannot return more than once inside a function")]
    DuplicateReturn,
    #[error("Must return a value for function '{function}' declared as {type_}")]
    MissingReturn { function: String, type_: String },

    /// A diagnostic that arrived as plain text through `DiagnosticSink::report`.
    #[error("{message}")]
    Message { message: String },
}
