//! Runtime error types for the evaluator.
//!
//! `EvalErrorKind` provides typed error categories; its `Display` (derived
//! with `thiserror`) is the user-facing message. Factory functions (e.g.,
//! `division_by_zero()`) are the public API and populate both `kind` and
//! `message`.
//!
//! At the language level an error is an ordinary value (`Value::Error`);
//! inside Rust helpers it travels as `Err(EvalError)` in an [`EvalResult`].

use std::fmt;

use crate::value::Value;

/// Result of a fallible runtime operation.
pub type EvalResult = Result<Value, EvalError>;

/// Accepted argument counts for a callable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// Inclusive range.
    Between(usize, usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::Between(min, max) => (min..=max).contains(&count),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{n}"),
            Arity::Between(min, max) if *max == min + 1 => write!(f, "{min} or {max}"),
            Arity::Between(min, max) => write!(f, "{min} to {max}"),
        }
    }
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Calls
    #[error("wrong number of arguments to `{callee}`: expected {expected}, got {got}")]
    ArgumentCount {
        callee: String,
        expected: Arity,
        got: usize,
    },
    #[error("unsupported input type for `{operation}`: {found}")]
    InputType { found: String, operation: String },
    #[error("no such method `{method}` for type {type_name}")]
    NoSuchMethod { method: String, type_name: String },
    #[error("{type_name} is not callable")]
    NotCallable { type_name: String },
    #[error("maximum call depth exceeded (limit: {depth})")]
    StackOverflow { depth: usize },

    // Arithmetic
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: String },

    // Access
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: i64, len: usize },
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },
    #[error("no field `{field}` on {type_name}")]
    NoSuchField { field: String, type_name: String },

    // Control flow
    #[error("break outside of a loop")]
    BreakOutsideLoop,
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError { kind, message }
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::from_kind(kind)
    }
}

// Factory functions

/// Wrong argument count for a builtin, function or method.
#[cold]
pub fn wrong_arg_count(callee: &str, expected: Arity, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentCount {
        callee: callee.to_string(),
        expected,
        got,
    })
}

/// An operation received a value of a type it does not support.
#[cold]
pub fn input_error(found: &str, operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InputType {
        found: found.to_string(),
        operation: operation.to_string(),
    })
}

/// No such method on a type.
#[cold]
pub fn no_such_method(method: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoSuchMethod {
        method: method.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

/// Call depth limit reached.
#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn no_such_field(field: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoSuchField {
        field: field.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn break_outside_loop() -> EvalError {
    EvalError::from_kind(EvalErrorKind::BreakOutsideLoop)
}
