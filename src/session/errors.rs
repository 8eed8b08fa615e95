//! Session error types
//!
//! [`SessionError`] wraps the parse and evaluation errors of a formula and adds
//! the failures that only exist at the cell level: unclassifiable input and
//! formula results a cell cannot hold.

use crate::interpreter::errors::EvalError;
use crate::parser::parse::ParseError;
use crate::sheet::ValueKind;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    Parse(ParseError),
    Eval(EvalError),

    /// Literal input that is not a number, boolean or quoted string
    InvalidInput(String),

    /// The formula ended in a statement that produced no value
    NoCellValue,

    /// The formula produced a value a cell cannot hold
    UnsupportedResult(ValueKind),

    /// Coordinates outside the sheet
    OutOfSheet { row: usize, col: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Parse(err) => write!(f, "{}", err),
            SessionError::Eval(err) => write!(f, "{}", err),
            SessionError::InvalidInput(input) => write!(f, "Invalid input '{}'", input),
            SessionError::NoCellValue => write!(f, "Formula produced no value"),
            SessionError::UnsupportedResult(kind) => {
                write!(f, "Unsupported result type: {}", kind)
            }
            SessionError::OutOfSheet { row, col } => {
                write!(f, "Cell ({}, {}) is outside the sheet", row, col)
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Parse(err) => Some(err),
            SessionError::Eval(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for SessionError {
    fn from(err: ParseError) -> Self {
        SessionError::Parse(err)
    }
}

impl From<EvalError> for SessionError {
    fn from(err: EvalError) -> Self {
        SessionError::Eval(err)
    }
}
