//! Lexer error types.
//!
//! Every error carries the span it refers to. The scanner returns these as
//! `Err` and does not try to recover inside the offending literal.

use quill_ir::Span;

#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexError {
    /// A `"` literal ran into the end of input. The span covers the opening
    /// quote through the end of the source.
    #[error("unterminated string literal at {span}")]
    UnterminatedString { span: Span },

    /// End of input inside a `'...'` string or one of its `{...}` segments.
    /// The span starts at the opening `'`.
    #[error("unterminated interpolated string at {span}")]
    UnterminatedInterpolation { span: Span },

    /// A `'` appeared inside an interpolation segment.
    #[error("interpolated strings cannot be nested (at {span})")]
    NestedInterpolation { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span }
            | LexError::UnterminatedInterpolation { span }
            | LexError::NestedInterpolation { span } => *span,
        }
    }
}
