//! Syntax tree produced by the parser and walked by the evaluator.
//!
//! # Module Structure
//!
//! - `expr`: expressions, function and struct literals, interpolation segments
//! - `operators`: prefix and infix operators
//! - `stmt`: statements and assignment targets
//!
//! Every node renders back to source through `Display`. Function values use
//! that rendering for their printed form.

mod expr;
mod operators;
mod stmt;

use std::fmt;

pub use expr::{Expr, FunctionLiteral, Segment, StructLiteral};
pub use operators::{InfixOp, PrefixOp};
pub use stmt::{AssignTarget, Stmt};

/// Top-level statement sequence of a source file or module.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Program { statements }
    }
}

/// Braced statement sequence (function bodies, branches, loop bodies).
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

impl Block {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Block { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{ }");
        }
        f.write_str("{ ")?;
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{stmt}")?;
        }
        f.write_str(" }")
    }
}
