//! Cell access: r-values `#[row, col]` and l-values `[row, col]`

use crate::interpreter::engine::Evaluator;
use crate::interpreter::errors::{EvalError, Side};
use crate::parser::ast::*;
use crate::sheet::Value;

impl Evaluator<'_> {
    /// Evaluate both indices of a cell reference to integers
    pub(crate) fn evaluate_indices(
        &mut self,
        op: BinOp,
        row_node: &AstNode,
        col_node: &AstNode,
    ) -> Result<(i64, i64), EvalError> {
        let row_val = self.evaluate_value(row_node, op.name(), Side::Left)?;
        let row = row_val.as_int().ok_or_else(|| {
            EvalError::type_error(op.name(), Side::Left, "Integer", row_val.kind().name(), row_node.span())
        })?;

        let col_val = self.evaluate_value(col_node, op.name(), Side::Right)?;
        let col = col_val.as_int().ok_or_else(|| {
            EvalError::type_error(op.name(), Side::Right, "Integer", col_val.kind().name(), col_node.span())
        })?;

        Ok((row, col))
    }

    /// `#[row, col]`: the stored cell must hold a number
    pub(crate) fn evaluate_cell_read(
        &mut self,
        row: &AstNode,
        col: &AstNode,
        span: Option<Span>,
    ) -> Result<Value, EvalError> {
        let (row, col) = self.evaluate_indices(BinOp::RValue, row, col)?;

        match self.runtime.cell_value(row, col) {
            Some(value) if value.is_numeric() => Ok(value.clone()),
            other => {
                let found = other.map_or("an empty cell", |v| v.kind().name());
                Err(EvalError::type_error(
                    format!("cell [{}, {}]", row, col),
                    Side::Operand,
                    "Integer or Float",
                    found,
                    span,
                ))
            }
        }
    }

    /// `[row, col]`: an address value, the grid is not read
    pub(crate) fn evaluate_cell_address(
        &mut self,
        row: &AstNode,
        col: &AstNode,
    ) -> Result<Value, EvalError> {
        let (row, col) = self.evaluate_indices(BinOp::LValue, row, col)?;
        Ok(Value::CellAddress { row, col })
    }
}
