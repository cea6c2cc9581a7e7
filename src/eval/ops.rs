//! Primitive operations shared by the evaluator and the CK machine

use text_size::TextRange;

use super::error::EvalError;
use super::value::Value;
use crate::syntax::BinaryOp;

pub(crate) fn expect_bool(value: &Value, range: TextRange) -> Result<bool, EvalError> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(mismatch("bool", other, range)),
    }
}

pub(crate) fn expect_int(value: &Value, range: TextRange) -> Result<i64, EvalError> {
    match value {
        Value::Int(n) => Ok(*n),
        other => Err(mismatch("int", other, range)),
    }
}

pub(crate) fn mismatch(expected: &'static str, found: &Value, range: TextRange) -> EvalError {
    EvalError::TypeMismatch {
        expected,
        found: found.kind_name().to_string(),
        range,
    }
}

/// Integer arithmetic wraps; `/` and `mod` truncate toward zero
pub(crate) fn apply_binary(
    op: BinaryOp,
    lhs: &Value,
    rhs: &Value,
    range: TextRange,
) -> Result<Value, EvalError> {
    if op.is_equality() {
        match (lhs, rhs) {
            (Value::Bool(a), Value::Bool(b)) => {
                return Ok(Value::Bool(if op == BinaryOp::Eq { a == b } else { a != b }));
            }
            (Value::Bool(_), other) => return Err(mismatch("bool", other, range)),
            (Value::Int(_), _) => {}
            (other, _) => return Err(mismatch("int or bool", other, range)),
        }
    }

    let a = expect_int(lhs, range)?;
    let b = expect_int(rhs, range)?;
    Ok(match op {
        BinaryOp::Add => Value::Int(a.wrapping_add(b)),
        BinaryOp::Sub => Value::Int(a.wrapping_sub(b)),
        BinaryOp::Mul => Value::Int(a.wrapping_mul(b)),
        BinaryOp::Div | BinaryOp::Mod if b == 0 => return Err(EvalError::ZeroDivision { range }),
        BinaryOp::Div => Value::Int(a.wrapping_div(b)),
        BinaryOp::Mod => Value::Int(a.wrapping_rem(b)),
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::Le => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::Ge => Value::Bool(a >= b),
        BinaryOp::Eq => Value::Bool(a == b),
        BinaryOp::Ne => Value::Bool(a != b),
    })
}
