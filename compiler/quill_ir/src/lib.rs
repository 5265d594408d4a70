//! Quill IR - shared data structures for the Quill front end and evaluator.
//!
//! This crate contains:
//! - Spans for source locations
//! - Tokens produced by `quill_lexer`
//! - The syntax tree consumed by `quill_eval` (produced by an external parser)
//!
//! Nothing here has behavior beyond construction and source rendering.

pub mod ast;
mod span;
mod token;

pub use ast::{
    AssignTarget, Block, Expr, FunctionLiteral, InfixOp, PrefixOp, Program, Segment, Stmt,
    StructLiteral,
};
pub use span::Span;
pub use token::{Token, TokenKind};
