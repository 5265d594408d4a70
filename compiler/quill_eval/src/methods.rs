//! Built-in methods on arrays and strings.
//!
//! The dispatchable method names of each type live in the static
//! [`DISPATCHABLE_METHODS`] table; the `methods` builtin reads it and
//! [`dispatch_builtin_method`] implements it. The protocol operations every
//! value carries (type tag, rendering, method calls) are never listed.

use crate::errors::{
    index_out_of_bounds, input_error, integer_overflow, no_such_method, wrong_arg_count, Arity,
    EvalError, EvalResult,
};
use crate::value::{ArrayValue, Value, ValueType};

/// Dispatchable methods per type, sorted by method name.
pub const DISPATCHABLE_METHODS: &[(ValueType, &[&str])] = &[
    (ValueType::Array, &["len", "pop", "push"]),
    (ValueType::String, &["len"]),
];

/// Method names a value of type `ty` responds to.
pub fn dispatchable_methods(ty: ValueType) -> &'static [&'static str] {
    for (candidate, methods) in DISPATCHABLE_METHODS {
        if *candidate == ty {
            return *methods;
        }
    }
    &[]
}

// Argument helpers

#[inline]
pub fn require_args(callee: &str, expected: Arity, actual: usize) -> Result<(), EvalError> {
    if expected.accepts(actual) {
        Ok(())
    } else {
        Err(wrong_arg_count(callee, expected, actual))
    }
}

/// Extract an integer argument; anything else is an input-type error.
#[inline]
pub fn require_int_arg(operation: &str, args: &[Value], index: usize) -> Result<i64, EvalError> {
    match args.get(index) {
        Some(Value::Integer(n)) => Ok(*n),
        Some(other) => Err(input_error(other.type_name(), operation)),
        None => Err(wrong_arg_count(operation, Arity::Exact(index + 1), args.len())),
    }
}

/// Convert a host length into a language integer.
#[inline]
pub fn length_value(len: usize) -> EvalResult {
    i64::try_from(len)
        .map(Value::Integer)
        .map_err(|_| integer_overflow("len"))
}

/// Resolve a language index against `len`. Negative and past-the-end
/// indices are out of bounds.
#[inline]
pub fn checked_index(index: i64, len: usize) -> Result<usize, EvalError> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| index_out_of_bounds(index, len))
}

/// Call a built-in method on an array or string receiver.
pub fn dispatch_builtin_method(receiver: &Value, method: &str, args: &[Value]) -> EvalResult {
    match receiver {
        Value::Array(items) => dispatch_array_method(receiver, items, method, args),
        Value::Str(s) => dispatch_string_method(s, method, args),
        _ => Err(no_such_method(method, receiver.type_name())),
    }
}

fn dispatch_array_method(
    receiver: &Value,
    items: &ArrayValue,
    method: &str,
    args: &[Value],
) -> EvalResult {
    match method {
        "len" => {
            require_args(method, Arity::Exact(0), args.len())?;
            length_value(items.len())
        }
        "push" => {
            require_args(method, Arity::Exact(1), args.len())?;
            items.push(args[0].clone());
            Ok(receiver.clone())
        }
        "pop" => {
            require_args(method, Arity::Between(0, 1), args.len())?;
            let index = if args.is_empty() {
                0
            } else {
                require_int_arg(method, args, 0)?
            };
            let position = checked_index(index, items.len())?;
            items
                .remove(position)
                .ok_or_else(|| index_out_of_bounds(index, items.len()))
        }
        _ => Err(no_such_method(method, ValueType::Array.as_str())),
    }
}

fn dispatch_string_method(s: &str, method: &str, args: &[Value]) -> EvalResult {
    match method {
        "len" => {
            require_args(method, Arity::Exact(0), args.len())?;
            length_value(s.chars().count())
        }
        _ => Err(no_such_method(method, ValueType::String.as_str())),
    }
}
