//! Binary operators over already-evaluated operands.
//!
//! Integer arithmetic is checked: overflow raises an arithmetic error instead
//! of wrapping. Mixed Integer/Float operands are widened to Float.

use crate::interpreter::engine::Evaluator;
use crate::interpreter::errors::{EvalError, Side};
use crate::parser::ast::{BinOp, Span};
use crate::sheet::Value;
use std::cmp::Ordering;

const NUMERIC: &str = "Integer or Float";

impl Evaluator<'_> {
    pub(crate) fn apply_binary(
        op: BinOp,
        left: &Value,
        right: &Value,
        span: Option<Span>,
    ) -> Result<Value, EvalError> {
        use BinOp::*;

        match op {
            Add | Sub | Mul | Div | Mod | Pow => Self::apply_arithmetic(op, left, right, span),
            Eq | Ne => Self::apply_equality(op, left, right, span),
            Lt | Le | Gt | Ge => Self::apply_relational(op, left, right, span),
            BitAnd | BitOr | BitXor | BitShl | BitShr => {
                Self::apply_bitwise(op, left, right, span)
            }
            And | Or | RValue | LValue | Max | Min | Mean | Sum => Err(EvalError::type_error(
                op.name(),
                Side::Operand,
                "an operator over evaluated values",
                "a lazily evaluated operator",
                span,
            )),
        }
    }

    fn require_numeric(
        value: &Value,
        op: BinOp,
        side: Side,
        span: Option<Span>,
    ) -> Result<(), EvalError> {
        if value.is_numeric() {
            Ok(())
        } else {
            Err(EvalError::type_error(op.name(), side, NUMERIC, value.kind().name(), span))
        }
    }

    fn apply_arithmetic(
        op: BinOp,
        left: &Value,
        right: &Value,
        span: Option<Span>,
    ) -> Result<Value, EvalError> {
        Self::require_numeric(left, op, Side::Left, span)?;
        Self::require_numeric(right, op, Side::Right, span)?;

        // Division is always real-valued
        if op == BinOp::Div {
            let (a, b) = Self::widen(left, right);
            return Ok(Value::Float(a / b));
        }

        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => Self::integer_arithmetic(op, *a, *b, span),
            _ => {
                let (a, b) = Self::widen(left, right);
                let result = match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    BinOp::Mod => floored_rem(a, b),
                    _ => a.powf(b),
                };
                Ok(Value::Float(result))
            }
        }
    }

    fn integer_arithmetic(op: BinOp, a: i64, b: i64, span: Option<Span>) -> Result<Value, EvalError> {
        let overflow = || EvalError::arithmetic(format!("integer overflow in {} {} {}", a, op.symbol(), b), span);

        match op {
            BinOp::Add => a.checked_add(b).map(Value::Integer).ok_or_else(overflow),
            BinOp::Sub => a.checked_sub(b).map(Value::Integer).ok_or_else(overflow),
            BinOp::Mul => a.checked_mul(b).map(Value::Integer).ok_or_else(overflow),
            BinOp::Mod => {
                if b == 0 {
                    return Err(EvalError::arithmetic(format!("modulo by zero in {} % 0", a), span));
                }
                // i64::MIN % -1 overflows the hardware remainder
                let rem = if b == -1 { 0 } else { a % b };
                let floored = if rem != 0 && (rem < 0) != (b < 0) { rem + b } else { rem };
                Ok(Value::Integer(floored))
            }
            _ => {
                if b < 0 {
                    return Ok(Value::Float((a as f64).powf(b as f64)));
                }
                let result = match u32::try_from(b) {
                    Ok(exp) => a.checked_pow(exp),
                    Err(_) => match a {
                        0 | 1 => Some(a),
                        -1 => Some(if b % 2 == 0 { 1 } else { -1 }),
                        _ => None,
                    },
                };
                result.map(Value::Integer).ok_or_else(overflow)
            }
        }
    }

    fn apply_equality(
        op: BinOp,
        left: &Value,
        right: &Value,
        span: Option<Span>,
    ) -> Result<Value, EvalError> {
        if left.kind() != right.kind() {
            return Err(EvalError::type_error(
                op.name(),
                Side::Right,
                left.kind().name(),
                right.kind().name(),
                span,
            ));
        }

        let equal = left == right;
        Ok(Value::Boolean(if op == BinOp::Eq { equal } else { !equal }))
    }

    fn apply_relational(
        op: BinOp,
        left: &Value,
        right: &Value,
        span: Option<Span>,
    ) -> Result<Value, EvalError> {
        Self::require_numeric(left, op, Side::Left, span)?;
        Self::require_numeric(right, op, Side::Right, span)?;

        let ordering = match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            _ => {
                let (a, b) = Self::widen(left, right);
                a.partial_cmp(&b)
            }
        };

        // NaN compares false under every relational operator
        let result = match ordering {
            Some(ord) => match op {
                BinOp::Lt => ord == Ordering::Less,
                BinOp::Le => ord != Ordering::Greater,
                BinOp::Gt => ord == Ordering::Greater,
                _ => ord != Ordering::Less,
            },
            None => false,
        };
        Ok(Value::Boolean(result))
    }

    fn apply_bitwise(
        op: BinOp,
        left: &Value,
        right: &Value,
        span: Option<Span>,
    ) -> Result<Value, EvalError> {
        let a = left.as_int().ok_or_else(|| {
            EvalError::type_error(op.name(), Side::Left, "Integer", left.kind().name(), span)
        })?;
        let b = right.as_int().ok_or_else(|| {
            EvalError::type_error(op.name(), Side::Right, "Integer", right.kind().name(), span)
        })?;

        let result = match op {
            BinOp::BitAnd => a & b,
            BinOp::BitOr => a | b,
            BinOp::BitXor => a ^ b,
            _ => {
                if !(0..64).contains(&b) {
                    return Err(EvalError::arithmetic(
                        format!("shift amount {} is outside 0..64", b),
                        span,
                    ));
                }
                if op == BinOp::BitShr {
                    a >> b
                } else {
                    let shifted = a << b;
                    if shifted >> b != a {
                        return Err(EvalError::arithmetic(
                            format!("integer overflow in {} << {}", a, b),
                            span,
                        ));
                    }
                    shifted
                }
            }
        };
        Ok(Value::Integer(result))
    }

    /// Both operands as f64; callers have checked they are numeric
    fn widen(left: &Value, right: &Value) -> (f64, f64) {
        (
            left.as_f64().unwrap_or(f64::NAN),
            right.as_f64().unwrap_or(f64::NAN),
        )
    }
}

/// Remainder whose sign follows the divisor
fn floored_rem(a: f64, b: f64) -> f64 {
    let rem = a % b;
    if rem != 0.0 && (rem < 0.0) != (b < 0.0) {
        rem + b
    } else {
        rem
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::engine::Evaluator;
    use crate::interpreter::errors::{EvalError, Side};
    use crate::parser::ast::BinOp;
    use crate::sheet::Value;

    fn apply(op: BinOp, left: Value, right: Value) -> Result<Value, EvalError> {
        Evaluator::apply_binary(op, &left, &right, None)
    }

    #[test]
    fn test_integer_and_float_promotion() {
        assert_eq!(apply(BinOp::Add, Value::Integer(2), Value::Integer(3)).unwrap(), Value::Integer(5));
        assert_eq!(apply(BinOp::Add, Value::Integer(2), Value::Float(0.5)).unwrap(), Value::Float(2.5));
        assert_eq!(apply(BinOp::Mul, Value::Float(1.5), Value::Integer(2)).unwrap(), Value::Float(3.0));
        assert_eq!(apply(BinOp::Sub, Value::Integer(1), Value::Integer(4)).unwrap(), Value::Integer(-3));
    }

    #[test]
    fn test_division_is_always_float() {
        assert_eq!(apply(BinOp::Div, Value::Integer(7), Value::Integer(2)).unwrap(), Value::Float(3.5));
        assert_eq!(apply(BinOp::Div, Value::Integer(4), Value::Integer(2)).unwrap(), Value::Float(2.0));
        assert_eq!(
            apply(BinOp::Div, Value::Integer(1), Value::Integer(0)).unwrap(),
            Value::Float(f64::INFINITY)
        );
    }

    #[test]
    fn test_modulo_follows_divisor_sign() {
        assert_eq!(apply(BinOp::Mod, Value::Integer(7), Value::Integer(3)).unwrap(), Value::Integer(1));
        assert_eq!(apply(BinOp::Mod, Value::Integer(-7), Value::Integer(3)).unwrap(), Value::Integer(2));
        assert_eq!(apply(BinOp::Mod, Value::Integer(7), Value::Integer(-3)).unwrap(), Value::Integer(-2));
        assert_eq!(apply(BinOp::Mod, Value::Float(-1.5), Value::Integer(1)).unwrap(), Value::Float(0.5));
        assert_eq!(apply(BinOp::Mod, Value::Integer(i64::MIN), Value::Integer(-1)).unwrap(), Value::Integer(0));

        assert!(matches!(
            apply(BinOp::Mod, Value::Integer(1), Value::Integer(0)),
            Err(EvalError::ArithmeticError { .. })
        ));
    }

    #[test]
    fn test_exponentiation() {
        assert_eq!(apply(BinOp::Pow, Value::Integer(2), Value::Integer(10)).unwrap(), Value::Integer(1024));
        assert_eq!(apply(BinOp::Pow, Value::Integer(2), Value::Integer(-1)).unwrap(), Value::Float(0.5));
        assert_eq!(apply(BinOp::Pow, Value::Float(4.0), Value::Float(0.5)).unwrap(), Value::Float(2.0));
        assert!(matches!(
            apply(BinOp::Pow, Value::Integer(10), Value::Integer(40)),
            Err(EvalError::ArithmeticError { .. })
        ));
    }

    #[test]
    fn test_integer_overflow() {
        let err = apply(BinOp::Add, Value::Integer(i64::MAX), Value::Integer(1)).unwrap_err();
        assert!(err.to_string().contains("overflow"));
        assert!(apply(BinOp::Mul, Value::Integer(i64::MIN), Value::Integer(-1)).is_err());
    }

    #[test]
    fn test_arithmetic_type_errors() {
        match apply(BinOp::Add, Value::Boolean(true), Value::Integer(1)).unwrap_err() {
            EvalError::TypeError { side, found, .. } => {
                assert_eq!(side, Side::Left);
                assert_eq!(found, "Boolean");
            }
            other => panic!("Expected TypeError, got {:?}", other),
        }
        match apply(BinOp::Sub, Value::Integer(1), Value::String("a".into())).unwrap_err() {
            EvalError::TypeError { side, .. } => assert_eq!(side, Side::Right),
            other => panic!("Expected TypeError, got {:?}", other),
        }
    }

    #[test]
    fn test_equality_requires_same_kind() {
        assert_eq!(apply(BinOp::Eq, Value::Integer(1), Value::Integer(1)).unwrap(), Value::Boolean(true));
        assert_eq!(apply(BinOp::Ne, Value::Boolean(true), Value::Boolean(false)).unwrap(), Value::Boolean(true));
        assert!(matches!(
            apply(BinOp::Eq, Value::Integer(1), Value::Float(1.0)),
            Err(EvalError::TypeError { .. })
        ));
    }

    #[test]
    fn test_relational_mixed_numeric() {
        assert_eq!(apply(BinOp::Lt, Value::Integer(1), Value::Float(1.5)).unwrap(), Value::Boolean(true));
        assert_eq!(apply(BinOp::Ge, Value::Integer(2), Value::Integer(2)).unwrap(), Value::Boolean(true));
        assert_eq!(apply(BinOp::Gt, Value::Float(f64::NAN), Value::Integer(0)).unwrap(), Value::Boolean(false));
        assert!(apply(BinOp::Le, Value::Boolean(true), Value::Integer(2)).is_err());
    }

    #[test]
    fn test_bitwise() {
        assert_eq!(apply(BinOp::BitAnd, Value::Integer(6), Value::Integer(3)).unwrap(), Value::Integer(2));
        assert_eq!(apply(BinOp::BitOr, Value::Integer(6), Value::Integer(3)).unwrap(), Value::Integer(7));
        assert_eq!(apply(BinOp::BitXor, Value::Integer(6), Value::Integer(3)).unwrap(), Value::Integer(5));
        assert_eq!(apply(BinOp::BitShl, Value::Integer(1), Value::Integer(4)).unwrap(), Value::Integer(16));
        assert_eq!(apply(BinOp::BitShr, Value::Integer(-16), Value::Integer(2)).unwrap(), Value::Integer(-4));

        assert!(matches!(
            apply(BinOp::BitShl, Value::Integer(1), Value::Integer(64)),
            Err(EvalError::ArithmeticError { .. })
        ));
        assert!(matches!(
            apply(BinOp::BitShr, Value::Integer(1), Value::Integer(-1)),
            Err(EvalError::ArithmeticError { .. })
        ));
        assert!(matches!(
            apply(BinOp::BitAnd, Value::Float(1.0), Value::Integer(1)),
            Err(EvalError::TypeError { .. })
        ));
    }
}
