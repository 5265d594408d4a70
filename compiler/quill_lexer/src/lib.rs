//! Lexer for Quill.
//!
//! [`Scanner`] produces one token per call and owns the interpolation state
//! machine. [`Lexer`] wraps it as a lazy iterator for the parser, and
//! [`tokenize`] collects a whole source at once.
//!
//! ```text
//! 'hi {1+2}'  =>  IString Bytes(h) Bytes(i) Bytes( ) LBrace Int(1) Plus Int(2) RBrace IString Eof
//! ```

mod cursor;
mod keywords;
mod lex_error;
mod scanner;

use quill_ir::Token;

pub use lex_error::LexError;
pub use scanner::{Mode, Scanner};

/// Lazy token stream over a source string.
///
/// Yields every token up to and including a single `Eof`, then stops. A
/// lexing error is yielded once and also ends the stream.
pub struct Lexer<'a> {
    scanner: Scanner<'a>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            scanner: Scanner::new(source),
            finished: false,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let next = self.scanner.next_token();
        match &next {
            Ok(token) if token.is_eof() => self.finished = true,
            Ok(_) => {}
            Err(error) => {
                tracing::debug!(%error, "lexing failed");
                self.finished = true;
            }
        }
        Some(next)
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Tokenize a whole source, including the trailing `Eof` token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).collect()
}
