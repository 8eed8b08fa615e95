//! Evaluation error types for the formula interpreter
//!
//! This module defines [`EvalError`], which represents all errors that can occur
//! while evaluating a parsed formula (as opposed to parse errors or session errors).
//!
//! Every error aborts the evaluation that raised it. Grid writes and variable
//! bindings made before the failing step are kept.

use crate::parser::ast::Span;
use std::fmt;

/// Which operand of an operation had the wrong type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    /// Unary operands, conditions and cell contents
    Operand,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left operand"),
            Side::Right => f.write_str("right operand"),
            Side::Operand => f.write_str("operand"),
        }
    }
}

/// Errors that can occur during evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// An operand had a type the operation does not accept
    TypeError {
        operation: String,
        side: Side,
        expected: String,
        found: String,
        span: Option<Span>,
    },

    /// A statistics function found no numeric cells in its rectangle
    RangeError {
        function: String,
        span: Option<Span>,
    },

    /// Reference to a variable that was never bound
    ReferenceError { name: String, span: Option<Span> },

    /// Integer overflow, modulo by zero, invalid shift or cast
    ArithmeticError {
        message: String,
        span: Option<Span>,
    },

    /// Nesting of the evaluated tree exceeded the configured bound
    DepthExceeded { limit: usize, span: Option<Span> },
}

impl EvalError {
    pub fn span(&self) -> Option<Span> {
        match self {
            EvalError::TypeError { span, .. } => *span,
            EvalError::RangeError { span, .. } => *span,
            EvalError::ReferenceError { span, .. } => *span,
            EvalError::ArithmeticError { span, .. } => *span,
            EvalError::DepthExceeded { span, .. } => *span,
        }
    }

    pub(crate) fn type_error(
        operation: impl Into<String>,
        side: Side,
        expected: impl Into<String>,
        found: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        EvalError::TypeError {
            operation: operation.into(),
            side,
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    pub(crate) fn arithmetic(message: impl Into<String>, span: Option<Span>) -> Self {
        EvalError::ArithmeticError {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::TypeError {
                operation,
                side,
                expected,
                found,
                ..
            } => {
                write!(
                    f,
                    "Invalid {} type for {}: expected {}, found {}",
                    side, operation, expected, found
                )?;
            }
            EvalError::RangeError { function, .. } => {
                write!(
                    f,
                    "No numeric values found in the given range for {} calculation",
                    function
                )?;
            }
            EvalError::ReferenceError { name, .. } => {
                write!(f, "Uninitialized variable referenced: {}", name)?;
            }
            EvalError::ArithmeticError { message, .. } => {
                write!(f, "Arithmetic error: {}", message)?;
            }
            EvalError::DepthExceeded { limit, .. } => {
                write!(f, "Evaluation nesting exceeds the limit of {}", limit)?;
            }
        }

        if let Some(span) = self.span() {
            write!(f, " at index {}", span.start)?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}
