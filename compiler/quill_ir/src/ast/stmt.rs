//! Statement types.

use std::fmt;

use super::Expr;

/// Statement node.
#[derive(Clone, PartialEq, Debug)]
pub enum Stmt {
    /// `let name = value`
    Let { name: String, value: Expr },

    /// `target = value`, rebinding an existing name or struct field.
    Assign { target: AssignTarget, value: Expr },

    /// `return` with an optional value.
    Return(Option<Expr>),

    /// `break` out of the innermost loop.
    Break,

    /// Expression statement.
    Expr(Expr),
}

/// Left-hand side of an assignment.
#[derive(Clone, PartialEq, Debug)]
pub enum AssignTarget {
    Name(String),
    Field { receiver: Box<Expr>, field: String },
}

impl fmt::Display for AssignTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignTarget::Name(name) => f.write_str(name),
            AssignTarget::Field { receiver, field } => write!(f, "{receiver}.{field}"),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let { name, value } => write!(f, "let {name} = {value}"),
            Stmt::Assign { target, value } => write!(f, "{target} = {value}"),
            Stmt::Return(Some(value)) => write!(f, "return {value}"),
            Stmt::Return(None) => f.write_str("return"),
            Stmt::Break => f.write_str("break"),
            Stmt::Expr(expr) => write!(f, "{expr}"),
        }
    }
}
