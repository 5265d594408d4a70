//! Infix operator evaluation.
//!
//! Two integers get checked arithmetic and comparisons. For any other pair,
//! `==`/`!=` use [`Value::is_same`] and every other operator yields `null`.

use quill_ir::InfixOp;

use crate::errors::{division_by_zero, integer_overflow, modulo_by_zero, EvalResult};
use crate::value::Value;

/// Checked arithmetic: `None` from the host operation means overflow.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Integer).ok_or_else(|| integer_overflow(op_name))
}

/// Evaluate `left op right`. Both operands are already evaluated and
/// neither is abrupt.
///
/// Strings compare by contents, so two separately built strings with the
/// same text are `==`. Arrays, structs and functions compare by identity.
pub fn evaluate_infix(op: InfixOp, left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => eval_int_infix(op, *a, *b),
        _ => Ok(match op {
            InfixOp::Eq => Value::Boolean(left.is_same(right)),
            InfixOp::NotEq => Value::Boolean(!left.is_same(right)),
            _ => Value::Null,
        }),
    }
}

fn eval_int_infix(op: InfixOp, a: i64, b: i64) -> EvalResult {
    match op {
        InfixOp::Add => checked_arith(a.checked_add(b), "addition"),
        InfixOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        InfixOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        InfixOp::Div if b == 0 => Err(division_by_zero()),
        InfixOp::Div => checked_arith(a.checked_div(b), "division"),
        InfixOp::Mod if b == 0 => Err(modulo_by_zero()),
        InfixOp::Mod => checked_arith(a.checked_rem(b), "remainder"),
        InfixOp::Lt => Ok(Value::Boolean(a < b)),
        InfixOp::Gt => Ok(Value::Boolean(a > b)),
        InfixOp::Eq => Ok(Value::Boolean(a == b)),
        InfixOp::NotEq => Ok(Value::Boolean(a != b)),
    }
}
