// Evaluation engine for the formula language

use crate::interpreter::constants::{DEFAULT_MAX_DEPTH, STACK_GROW_SIZE, STACK_RED_ZONE};
use crate::interpreter::errors::{EvalError, Side};
use crate::parser::ast::*;
use crate::sheet::{Outcome, Runtime, Value};

/// Evaluate a node against a runtime with the default depth bound.
pub fn evaluate(node: &AstNode, runtime: &mut Runtime) -> Result<Outcome, EvalError> {
    Evaluator::new(runtime).evaluate(node)
}

/// Tree-walking evaluator borrowing the runtime it mutates
///
/// Evaluation methods are split across the sibling modules with
/// `impl Evaluator` blocks: expressions and operators in `expressions` and
/// `ops`, statistics in `builtins`, statements in `statements` and `loops`.
pub struct Evaluator<'rt> {
    pub(crate) runtime: &'rt mut Runtime,

    /// Current nesting of `evaluate` calls
    depth: usize,

    max_depth: usize,
}

impl<'rt> Evaluator<'rt> {
    pub fn new(runtime: &'rt mut Runtime) -> Self {
        Evaluator {
            runtime,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn runtime(&self) -> &Runtime {
        &*self.runtime
    }

    /// Evaluate any node. The first error aborts; earlier mutations remain.
    pub fn evaluate(&mut self, node: &AstNode) -> Result<Outcome, EvalError> {
        if self.depth >= self.max_depth {
            return Err(EvalError::DepthExceeded {
                limit: self.max_depth,
                span: node.span(),
            });
        }

        self.depth += 1;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.dispatch(node));
        self.depth -= 1;
        result
    }

    fn dispatch(&mut self, node: &AstNode) -> Result<Outcome, EvalError> {
        match node {
            AstNode::Block { statements } => self.execute_block(statements),
            AstNode::Assignment { name, value, .. } => {
                self.execute_assignment(name, value).map(Outcome::Value)
            }
            AstNode::Conditional {
                condition,
                then_block,
                else_block,
                ..
            } => self.execute_conditional(condition, then_block, else_block.as_deref()),
            AstNode::ForLoop {
                iterator,
                start,
                end,
                body,
                ..
            } => self.execute_for(iterator, *start, *end, body),

            AstNode::Integer(n, _) => Ok(Value::Integer(*n).into()),
            AstNode::Float(x, _) => Ok(Value::Float(*x).into()),
            AstNode::Boolean(b, _) => Ok(Value::Boolean(*b).into()),
            AstNode::String(s, _) => Ok(Value::String(s.clone()).into()),
            AstNode::Reference { name, span } => {
                self.evaluate_reference(name, *span).map(Outcome::Value)
            }
            AstNode::BinaryOp {
                op,
                left,
                right,
                span,
            } => self
                .evaluate_binary_op(*op, left, right, *span)
                .map(Outcome::Value),
            AstNode::UnaryOp { op, operand, span } => self
                .evaluate_unary_op(*op, operand, *span)
                .map(Outcome::Value),
        }
    }

    /// Evaluate an operand that must produce a value
    pub(crate) fn evaluate_value(
        &mut self,
        node: &AstNode,
        operation: &str,
        side: Side,
    ) -> Result<Value, EvalError> {
        match self.evaluate(node)? {
            Outcome::Value(value) => Ok(value),
            Outcome::Unit => Err(EvalError::type_error(
                operation,
                side,
                "a value",
                "a statement that produced no value",
                node.span(),
            )),
        }
    }
}
