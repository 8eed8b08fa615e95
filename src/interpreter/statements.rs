//! Statement execution: blocks, assignments and conditionals.
//!
//! Statements share the evaluator's return type: a block yields the outcome
//! of its last statement, an assignment yields the bound value, and a
//! conditional whose selected branch is absent yields [`Outcome::Unit`].

use crate::interpreter::engine::Evaluator;
use crate::interpreter::errors::{EvalError, Side};
use crate::parser::ast::*;
use crate::sheet::{Outcome, Value};

impl Evaluator<'_> {
    pub(crate) fn execute_block(&mut self, statements: &[AstNode]) -> Result<Outcome, EvalError> {
        let mut last = Outcome::Unit;
        for stmt in statements {
            last = self.evaluate(stmt)?;
        }
        Ok(last)
    }

    pub(crate) fn execute_assignment(
        &mut self,
        name: &str,
        value: &AstNode,
    ) -> Result<Value, EvalError> {
        let value = self.evaluate_value(value, "assignment", Side::Right)?;
        tracing::trace!(name, value = %value, "variable bound");
        self.runtime.bind(name, value.clone());
        Ok(value)
    }

    pub(crate) fn execute_conditional(
        &mut self,
        condition: &AstNode,
        then_block: &AstNode,
        else_block: Option<&AstNode>,
    ) -> Result<Outcome, EvalError> {
        let cond_val = self.evaluate_value(condition, "condition", Side::Operand)?;
        let taken = cond_val.as_bool().ok_or_else(|| {
            EvalError::type_error(
                "condition",
                Side::Operand,
                "Boolean",
                cond_val.kind().name(),
                condition.span(),
            )
        })?;

        if taken {
            self.evaluate(then_block)
        } else {
            match else_block {
                Some(block) => self.evaluate(block),
                None => Ok(Outcome::Unit),
            }
        }
    }
}
