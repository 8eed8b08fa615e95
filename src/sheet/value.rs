//! Runtime value representation
//!
//! This module defines the [`Value`] enum, which represents every value a formula
//! can produce or a cell can hold. Values are tagged and immutable once built.
//!
//! # Value Types
//!
//! - [`Value::Integer`]: 64-bit signed integer
//! - [`Value::Float`]: 64-bit IEEE float
//! - [`Value::Boolean`]: `true` / `false`
//! - [`Value::String`]: text (literal cell input only, no operators accept it)
//! - [`Value::CellAddress`]: an unresolved `[row, col]` produced by an l-value
//!
//! Evaluation results are wrapped in [`Outcome`], whose `Unit` variant marks
//! statements that produce no value.

use std::fmt;

/// Runtime values stored in cells and variables
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    CellAddress { row: i64, col: i64 },
}

/// The kind of a [`Value`], used in type errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Float,
    Boolean,
    String,
    CellAddress,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Integer => "Integer",
            ValueKind::Float => "Float",
            ValueKind::Boolean => "Boolean",
            ValueKind::String => "String",
            ValueKind::CellAddress => "CellAddress",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::String(_) => ValueKind::String,
            Value::CellAddress { .. } => ValueKind::CellAddress,
        }
    }

    /// Integer or Float
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric value widened to f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => f.write_str(s),
            Value::CellAddress { row, col } => write!(f, "[{}, {}]", row, col),
        }
    }
}

/// Format a float so finite values always show a fractional part (`2.0`)
pub fn format_float(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

/// Result of evaluating any node
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Value(Value),
    /// Statements such as an empty block or an untaken branch
    Unit,
}

impl Outcome {
    pub fn into_value(self) -> Option<Value> {
        match self {
            Outcome::Value(value) => Some(value),
            Outcome::Unit => None,
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Outcome::Unit)
    }
}

impl From<Value> for Outcome {
    fn from(value: Value) -> Self {
        Outcome::Value(value)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Value(value) => write!(f, "{}", value),
            Outcome::Unit => f.write_str("(no value)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_always_has_fraction() {
        assert_eq!(format_float(2.0), "2.0");
        assert_eq!(format_float(-0.5), "-0.5");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Integer(-4).to_string(), "-4");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::CellAddress { row: 1, col: 2 }.to_string(), "[1, 2]");
        assert_eq!(Outcome::Unit.to_string(), "(no value)");
    }

    #[test]
    fn test_numeric_helpers() {
        assert!(Value::Integer(1).is_numeric());
        assert!(!Value::Boolean(true).is_numeric());
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Value::String("x".into()).as_f64(), None);
        assert_eq!(Value::Float(1.5).kind().name(), "Float");
    }
}
