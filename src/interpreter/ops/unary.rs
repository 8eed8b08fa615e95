//! Unary operator evaluation

use crate::interpreter::engine::Evaluator;
use crate::interpreter::errors::{EvalError, Side};
use crate::parser::ast::*;
use crate::sheet::Value;

/// Floats at or beyond ±2^63 do not fit an i64
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

impl Evaluator<'_> {
    pub(crate) fn evaluate_unary_op(
        &mut self,
        op: UnOp,
        operand: &AstNode,
        span: Option<Span>,
    ) -> Result<Value, EvalError> {
        let value = self.evaluate_value(operand, op.name(), Side::Operand)?;
        Self::apply_unary(op, &value, span)
    }

    pub(crate) fn apply_unary(op: UnOp, value: &Value, span: Option<Span>) -> Result<Value, EvalError> {
        let mismatch = |expected: &str| {
            EvalError::type_error(op.name(), Side::Operand, expected, value.kind().name(), span)
        };

        match (op, value) {
            (UnOp::Neg, Value::Integer(n)) => n
                .checked_neg()
                .map(Value::Integer)
                .ok_or_else(|| EvalError::arithmetic(format!("integer overflow in -({})", n), span)),
            (UnOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
            (UnOp::Neg, _) => Err(mismatch("Integer or Float")),

            (UnOp::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
            (UnOp::Not, _) => Err(mismatch("Boolean")),

            (UnOp::BitNot, Value::Integer(n)) => Ok(Value::Integer(!n)),
            (UnOp::BitNot, _) => Err(mismatch("Integer")),

            (UnOp::FloatToInt, Value::Float(x)) => {
                let truncated = x.trunc();
                if !truncated.is_finite() || truncated >= I64_BOUND || truncated < -I64_BOUND {
                    return Err(EvalError::arithmetic(
                        format!("{} cannot be converted to an integer", x),
                        span,
                    ));
                }
                Ok(Value::Integer(truncated as i64))
            }
            (UnOp::FloatToInt, _) => Err(mismatch("Float")),

            (UnOp::IntToFloat, Value::Integer(n)) => Ok(Value::Float(*n as f64)),
            (UnOp::IntToFloat, _) => Err(mismatch("Integer")),
        }
    }
}
