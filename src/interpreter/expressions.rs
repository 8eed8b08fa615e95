//! Expression evaluation: references and binary operator dispatch.
//!
//! Operators that evaluate both operands eagerly go through
//! [`Evaluator::apply_binary`](crate::interpreter::engine::Evaluator); the
//! logical operators short-circuit, and cell access and statistics read the
//! grid, so those are routed to their own modules.

use crate::interpreter::engine::Evaluator;
use crate::interpreter::errors::{EvalError, Side};
use crate::parser::ast::*;
use crate::sheet::Value;

impl Evaluator<'_> {
    pub(crate) fn evaluate_reference(
        &mut self,
        name: &str,
        span: Option<Span>,
    ) -> Result<Value, EvalError> {
        self.runtime
            .lookup(name)
            .cloned()
            .ok_or_else(|| EvalError::ReferenceError {
                name: name.to_string(),
                span,
            })
    }

    pub(crate) fn evaluate_binary_op(
        &mut self,
        op: BinOp,
        left: &AstNode,
        right: &AstNode,
        span: Option<Span>,
    ) -> Result<Value, EvalError> {
        match op {
            BinOp::And | BinOp::Or => self.evaluate_logical(op, left, right, span),
            BinOp::RValue => self.evaluate_cell_read(left, right, span),
            BinOp::LValue => self.evaluate_cell_address(left, right),
            BinOp::Max | BinOp::Min | BinOp::Mean | BinOp::Sum => {
                self.evaluate_statistic(op, left, right, span)
            }
            _ => {
                let left_val = self.evaluate_value(left, op.name(), Side::Left)?;
                let right_val = self.evaluate_value(right, op.name(), Side::Right)?;
                Self::apply_binary(op, &left_val, &right_val, span)
            }
        }
    }

    /// `&&` / `||`; the right operand is only evaluated when needed
    fn evaluate_logical(
        &mut self,
        op: BinOp,
        left: &AstNode,
        right: &AstNode,
        span: Option<Span>,
    ) -> Result<Value, EvalError> {
        let left_val = self.evaluate_value(left, op.name(), Side::Left)?;
        let lhs = Self::expect_bool(&left_val, op, Side::Left, span)?;

        // Short-circuit
        match (op, lhs) {
            (BinOp::And, false) => return Ok(Value::Boolean(false)),
            (BinOp::Or, true) => return Ok(Value::Boolean(true)),
            _ => {}
        }

        let right_val = self.evaluate_value(right, op.name(), Side::Right)?;
        let rhs = Self::expect_bool(&right_val, op, Side::Right, span)?;
        Ok(Value::Boolean(rhs))
    }

    fn expect_bool(
        value: &Value,
        op: BinOp,
        side: Side,
        span: Option<Span>,
    ) -> Result<bool, EvalError> {
        value.as_bool().ok_or_else(|| {
            EvalError::type_error(op.name(), side, "Boolean", value.kind().name(), span)
        })
    }
}
