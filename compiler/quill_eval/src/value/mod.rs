//! Runtime values for the Quill interpreter.
//!
//! `Value` is a closed tagged union. Every variant has a type tag
//! ([`Value::value_type`]), a rendering ([`Value::inspect`] / `Display`) and
//! a method-call capability (`Interpreter::call_method`).
//!
//! Heap-backed variants go through factory methods (`Value::string`,
//! `Value::array`, ...): the `Heap<T>` constructor is private to this module.
//!
//! Integers, booleans and strings are immutable. Arrays are shared handles
//! edited in place by `push`/`pop`.

mod composite;
mod heap;

use std::fmt;
use std::rc::Rc;

use quill_ir::FunctionLiteral;

use crate::environment::{LocalScope, Scope};
use crate::errors::EvalError;

pub use composite::{
    ArrayValue, Builtin, BuiltinFn, FunctionValue, IncludedValue, MethodTable, StructValue,
};
pub use heap::Heap;

/// Acyclic nesting beyond this depth renders as `...`.
const MAX_RENDER_DEPTH: usize = 32;

/// Runtime type tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Integer,
    Boolean,
    Null,
    String,
    Array,
    Function,
    Struct,
    Builtin,
    Error,
    ReturnValue,
    Break,
    Include,
}

impl ValueType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ValueType::Integer => "INTEGER",
            ValueType::Boolean => "BOOLEAN",
            ValueType::Null => "NULL",
            ValueType::String => "STRING",
            ValueType::Array => "ARRAY",
            ValueType::Function => "FUNCTION",
            ValueType::Struct => "STRUCT",
            ValueType::Builtin => "BUILTIN",
            ValueType::Error => "ERROR",
            ValueType::ReturnValue => "RETURN_VALUE",
            ValueType::Break => "BREAK",
            ValueType::Include => "INCLUDE",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime value in the Quill interpreter.
#[derive(Clone)]
pub enum Value {
    // Primitives
    Integer(i64),
    Boolean(bool),
    Null,

    // Heap types
    Str(Heap<String>),
    Array(ArrayValue),
    Function(Heap<FunctionValue>),
    Struct(StructValue),
    Builtin(Builtin),
    Included(Heap<IncludedValue>),

    /// A failed operation, carried as an ordinary value.
    Error(Heap<EvalError>),

    // Control signals
    Return(Heap<Value>),
    Break,
}

// Factory methods

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Integer(n)
    }

    #[inline]
    pub fn boolean(b: bool) -> Self {
        Value::Boolean(b)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(ArrayValue::new(items))
    }

    pub fn function(literal: Rc<FunctionLiteral>, scope: LocalScope<Scope>) -> Self {
        Value::Function(Heap::new(FunctionValue::new(literal, scope)))
    }

    pub fn structure(fields: LocalScope<Scope>, methods: MethodTable) -> Self {
        Value::Struct(StructValue::new(fields, methods))
    }

    pub fn included(name: impl Into<String>, scope: LocalScope<Scope>) -> Self {
        Value::Included(Heap::new(IncludedValue {
            name: name.into(),
            scope,
        }))
    }

    pub fn error(err: EvalError) -> Self {
        Value::Error(Heap::new(err))
    }

    pub fn return_value(value: Value) -> Self {
        Value::Return(Heap::new(value))
    }
}

impl From<EvalError> for Value {
    fn from(err: EvalError) -> Self {
        Value::error(err)
    }
}

// Queries

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Integer(_) => ValueType::Integer,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Null => ValueType::Null,
            Value::Str(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Function(_) => ValueType::Function,
            Value::Struct(_) => ValueType::Struct,
            Value::Builtin(_) => ValueType::Builtin,
            Value::Included(_) => ValueType::Include,
            Value::Error(_) => ValueType::Error,
            Value::Return(_) => ValueType::ReturnValue,
            Value::Break => ValueType::Break,
        }
    }

    /// Type tag as used in error messages and by the `type` builtin.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.value_type().as_str()
    }

    /// Only `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null)
    }

    /// `Error`, `Return` and `Break` unwind the enclosing expression or block.
    pub fn is_abrupt(&self) -> bool {
        matches!(self, Value::Error(_) | Value::Return(_) | Value::Break)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&EvalError> {
        match self {
            Value::Error(err) => Some(&**err),
            _ => None,
        }
    }

    /// Language-level `==`.
    ///
    /// Integers, booleans, `null` and strings compare by value. Arrays,
    /// functions, structs and included modules compare by identity; builtins
    /// by name. Values of different types are never the same.
    pub fn is_same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) | (Value::Break, Value::Break) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Struct(a), Value::Struct(b)) => a.ptr_eq(b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            (Value::Included(a), Value::Included(b)) => a.ptr_eq(b),
            (Value::Error(a), Value::Error(b)) => a.ptr_eq(b),
            (Value::Return(a), Value::Return(b)) => a.is_same(b),
            _ => false,
        }
    }

    /// Printed form of the value.
    pub fn inspect(&self) -> String {
        self.to_string()
    }

    /// `open` holds the arrays and structs currently being rendered; meeting
    /// one again prints a placeholder instead of recursing.
    fn render(&self, f: &mut fmt::Formatter<'_>, open: &mut Vec<Value>) -> fmt::Result {
        if open.len() > MAX_RENDER_DEPTH {
            return f.write_str("...");
        }
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Null => f.write_str("null"),
            Value::Str(s) => f.write_str(s),
            Value::Array(_) if open.iter().any(|v| v.is_same(self)) => f.write_str("[...]"),
            Value::Array(items) => {
                open.push(self.clone());
                f.write_str("[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.render(f, open)?;
                }
                open.pop();
                f.write_str("]")
            }
            Value::Function(func) => write!(f, "{}", func.literal()),
            Value::Struct(_) if open.iter().any(|v| v.is_same(self)) => f.write_str("( ... )"),
            Value::Struct(s) => {
                open.push(self.clone());
                f.write_str("( ")?;
                for (name, value) in s.fields().borrow().sorted_bindings() {
                    write!(f, "{name}->")?;
                    value.render(f, open)?;
                    f.write_str(" ")?;
                }
                open.pop();
                f.write_str(" )")
            }
            Value::Builtin(_) => f.write_str("builtin function"),
            Value::Included(module) => write!(f, "included object: {}", module.name),
            Value::Error(err) => write!(f, "ERROR: {}", err.message),
            Value::Return(inner) => inner.render(f, open),
            Value::Break => f.write_str("break"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, &mut Vec::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "Integer({n})"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::Null => f.write_str("Null"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Break => f.write_str("Break"),
            Value::Error(err) => write!(f, "Error({:?})", err.message),
            Value::Return(inner) => write!(f, "Return({inner:?})"),
            Value::Builtin(b) => write!(f, "{b:?}"),
            other => write!(f, "{}({other})", other.type_name()),
        }
    }
}

/// Structural equality for tests and host code. Arrays compare by contents;
/// the language-level `==` is [`Value::is_same`].
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b) || *a.borrow() == *b.borrow(),
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Return(a), Value::Return(b)) => a == b,
            _ => self.is_same(other),
        }
    }
}
