//! Prefix operator evaluation.

use quill_ir::PrefixOp;

use crate::errors::{integer_overflow, EvalResult};
use crate::value::Value;

/// Evaluate `op right`.
///
/// `!x` is `true` exactly when `x` is falsy. `-n` produces a fresh negated
/// integer; on any other type it yields `null`.
pub fn evaluate_prefix(op: PrefixOp, right: &Value) -> EvalResult {
    match (op, right) {
        (PrefixOp::Not, value) => Ok(Value::Boolean(!value.is_truthy())),
        (PrefixOp::Neg, Value::Integer(n)) => n
            .checked_neg()
            .map(Value::Integer)
            .ok_or_else(|| integer_overflow("negation")),
        (PrefixOp::Neg, _) => Ok(Value::Null),
    }
}
