//! Statistics over rectangular cell regions: `sum`, `mean`, `min`, `max`.
//!
//! Both arguments must evaluate to cell addresses. The inclusive rectangle
//! between them is scanned row-major; Integer and Float cells are collected
//! and every other cell (empty, Boolean, String, out of range) is skipped.
//!
//! | function | empty region | result type                       |
//! |----------|--------------|-----------------------------------|
//! | `sum`    | RangeError   | Integer unless any Float was seen |
//! | `min`    | RangeError   | Float if any Float was seen       |
//! | `max`    | RangeError   | Float if any Float was seen       |
//! | `mean`   | `0.0`        | always Float                      |

use crate::interpreter::engine::Evaluator;
use crate::interpreter::errors::{EvalError, Side};
use crate::parser::ast::*;
use crate::sheet::{Grid, Value};
use std::cmp::Ordering;

impl Evaluator<'_> {
    pub(crate) fn evaluate_statistic(
        &mut self,
        op: BinOp,
        first: &AstNode,
        second: &AstNode,
        span: Option<Span>,
    ) -> Result<Value, EvalError> {
        let from = self.evaluate_corner(op, first, Side::Left)?;
        let to = self.evaluate_corner(op, second, Side::Right)?;

        let values = collect_numeric(self.runtime.grid(), from, to);
        tracing::trace!(function = op.symbol(), count = values.len(), "statistics region scanned");

        if values.is_empty() {
            return match op {
                BinOp::Mean => Ok(Value::Float(0.0)),
                _ => Err(EvalError::RangeError {
                    function: op.symbol().to_string(),
                    span,
                }),
            };
        }

        match op {
            BinOp::Sum => sum(&values, span),
            BinOp::Mean => {
                let total: f64 = values.iter().filter_map(Value::as_f64).sum();
                Ok(Value::Float(total / values.len() as f64))
            }
            BinOp::Min => Ok(extreme(&values, Ordering::Less)),
            _ => Ok(extreme(&values, Ordering::Greater)),
        }
    }

    fn evaluate_corner(&mut self, op: BinOp, node: &AstNode, side: Side) -> Result<(i64, i64), EvalError> {
        match self.evaluate_value(node, op.name(), side)? {
            Value::CellAddress { row, col } => Ok((row, col)),
            other => Err(EvalError::type_error(
                op.name(),
                side,
                "CellAddress",
                other.kind().name(),
                node.span(),
            )),
        }
    }
}

/// Numeric cells of the inclusive rectangle, row-major
fn collect_numeric(grid: &Grid, from: (i64, i64), to: (i64, i64)) -> Vec<Value> {
    // Cells outside the grid read as empty, so the scan stops at its edge
    let limit = grid.size() as i64;
    let rows = from.0.max(0)..=to.0.min(limit);
    let cols = from.1.max(0)..=to.1.min(limit);

    let mut values = Vec::new();
    for row in rows {
        for col in cols.clone() {
            if let Some(value) = grid.read(row, col).filter(|v| v.is_numeric()) {
                values.push(value.clone());
            }
        }
    }
    values
}

fn sum(values: &[Value], span: Option<Span>) -> Result<Value, EvalError> {
    if values.iter().any(|v| matches!(v, Value::Float(_))) {
        let total: f64 = values.iter().filter_map(Value::as_f64).sum();
        return Ok(Value::Float(total));
    }

    let mut total: i64 = 0;
    for value in values {
        let n = value.as_int().unwrap_or(0);
        total = total
            .checked_add(n)
            .ok_or_else(|| EvalError::arithmetic("integer overflow in sum", span))?;
    }
    Ok(Value::Integer(total))
}

/// Smallest (`Less`) or largest (`Greater`) value; ties keep the earliest
fn extreme(values: &[Value], wanted: Ordering) -> Value {
    let any_float = values.iter().any(|v| matches!(v, Value::Float(_)));

    let mut best = &values[0];
    for value in &values[1..] {
        if compare(value, best) == Some(wanted) {
            best = value;
        }
    }

    match best {
        Value::Integer(n) if any_float => Value::Float(*n as f64),
        other => other.clone(),
    }
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => Some(x.cmp(y)),
        _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::engine::evaluate;
    use crate::interpreter::errors::EvalError;
    use crate::parser::parse::parse_formula;
    use crate::sheet::{Runtime, Value};

    fn sample_runtime() -> Runtime {
        let mut runtime = Runtime::with_size(4);
        let grid = runtime.grid_mut();
        grid.write(0, 0, Value::Integer(-1));
        grid.write(1, 1, Value::Integer(2));
        grid.write(2, 1, Value::Float(0.5));
        grid.write(0, 1, Value::Boolean(true));
        runtime
    }

    fn eval_in(source: &str, runtime: &mut Runtime) -> Result<Value, EvalError> {
        let ast = parse_formula(source).unwrap();
        evaluate(&ast, runtime).map(|o| o.into_value().unwrap())
    }

    #[test]
    fn test_mean_over_mixed_cells() {
        let mut runtime = sample_runtime();
        assert_eq!(
            eval_in("mean([0,0], [2,1])", &mut runtime).unwrap(),
            Value::Float((-1.0 + 2.0 + 0.5) / 3.0)
        );
    }

    #[test]
    fn test_min_max_sum() {
        let mut runtime = sample_runtime();
        assert_eq!(eval_in("min([0,0], [2,1])", &mut runtime).unwrap(), Value::Float(-1.0));
        assert_eq!(eval_in("max([0,0], [2,1])", &mut runtime).unwrap(), Value::Float(2.0));
        assert_eq!(eval_in("sum([0,0], [2,1])", &mut runtime).unwrap(), Value::Float(1.5));

        // Integer-only region keeps Integer results
        assert_eq!(eval_in("max([0,0], [1,1])", &mut runtime).unwrap(), Value::Integer(2));
        assert_eq!(eval_in("min([0,0], [1,1])", &mut runtime).unwrap(), Value::Integer(-1));
        assert_eq!(eval_in("sum([0,0], [1,1])", &mut runtime).unwrap(), Value::Integer(1));
    }

    #[test]
    fn test_empty_region() {
        let mut runtime = sample_runtime();
        for function in ["sum", "min", "max"] {
            let source = format!("{}([3,3], [4,4])", function);
            match eval_in(&source, &mut runtime).unwrap_err() {
                EvalError::RangeError { function: f, .. } => assert_eq!(f, function),
                other => panic!("Expected RangeError, got {:?}", other),
            }
        }
        assert_eq!(eval_in("mean([3,3], [4,4])", &mut runtime).unwrap(), Value::Float(0.0));
    }

    #[test]
    fn test_region_clamped_to_grid() {
        let mut runtime = sample_runtime();
        assert_eq!(
            eval_in("sum([-5,-5], [1000000000, 1000000000])", &mut runtime).unwrap(),
            Value::Float(1.5)
        );
    }

    #[test]
    fn test_arguments_must_be_addresses() {
        let mut runtime = sample_runtime();
        assert!(matches!(
            eval_in("sum(#[1,1], [2,2])", &mut runtime),
            Err(EvalError::TypeError { .. })
        ));
        assert!(matches!(
            eval_in("mean([0,0], 3)", &mut runtime),
            Err(EvalError::TypeError { .. })
        ));
    }
}
