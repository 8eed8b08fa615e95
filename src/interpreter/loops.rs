//! Bounded `for` loop execution.
//!
//! A loop walks the inclusive rectangle between its two literal corners in
//! row-major order. Before each iteration the iterator variable is bound to
//! the cell's value, or unbound when the cell is empty, so a stale value from
//! an earlier cell never leaks into the body.
//!
//! The rectangle is clamped to the grid, the same way the statistics clamp
//! theirs, so the iteration count never exceeds the number of grid cells.

use crate::interpreter::engine::Evaluator;
use crate::interpreter::errors::EvalError;
use crate::parser::ast::{AstNode, CellCoord};
use crate::sheet::Outcome;

impl Evaluator<'_> {
    /// Returns the outcome of the last iteration, or Unit when no cell was visited
    pub(crate) fn execute_for(
        &mut self,
        iterator: &str,
        start: CellCoord,
        end: CellCoord,
        body: &AstNode,
    ) -> Result<Outcome, EvalError> {
        tracing::debug!(
            iterator,
            from = ?(start.row, start.col),
            to = ?(end.row, end.col),
            "for loop started"
        );

        let limit = self.runtime.grid().size() as i64;
        let rows = start.row.max(0)..=end.row.min(limit);
        let cols = start.col.max(0)..=end.col.min(limit);

        let mut last = Outcome::Unit;
        for row in rows {
            for col in cols.clone() {
                match self.runtime.cell_value(row, col).cloned() {
                    Some(value) => self.runtime.bind(iterator, value),
                    None => {
                        self.runtime.unbind(iterator);
                    }
                }

                last = self.evaluate(body)?;
            }
        }

        Ok(last)
    }
}
