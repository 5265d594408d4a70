//! Hand-written scanner with the interpolated-string state machine.
//!
//! # Modes
//!
//! - [`Mode::Normal`]: ordinary code. Whitespace is skipped, operators,
//!   identifiers, integers and `"..."` literals become tokens.
//! - [`Mode::Interpolating`]: inside `'...'`. Every character becomes its
//!   own [`TokenKind::Bytes`] token until the closing `'`. A `{` that is not
//!   immediately followed by `}` opens a segment.
//! - [`Mode::Paused`]: inside a `{...}` segment. Tokens are scanned as in
//!   normal mode; braces opened inside the segment are counted so the `}`
//!   that closes the segment is recognized and interpolation resumes.
//!
//! Only one level of interpolation exists: a `'` inside a segment is an
//! error.

use quill_ir::{Span, Token, TokenKind};

use crate::cursor::Cursor;
use crate::keywords;
use crate::lex_error::LexError;

/// Scanner state.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Mode {
    #[default]
    Normal,
    Interpolating,
    /// `depth` counts the `{` opened inside the current segment.
    Paused { depth: u32 },
}

/// Produces one token at a time from a source string.
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    mode: Mode,
    /// Offset of the `'` that opened the current interpolated string.
    interp_start: u32,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            mode: Mode::Normal,
            interp_start: 0,
        }
    }

    /// Current lexing mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Produce the next token.
    ///
    /// Returns an `Eof` token when the source is exhausted in normal mode;
    /// subsequent calls keep returning `Eof`.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        match self.mode {
            Mode::Interpolating => self.interpolated(),
            Mode::Normal | Mode::Paused { .. } => self.code(),
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        tracing::trace!(
            from = ?self.mode,
            to = ?mode,
            pos = self.cursor.pos(),
            "lexer mode switch"
        );
        self.mode = mode;
    }

    fn token(&self, kind: TokenKind, start: u32) -> Token {
        let end = self.cursor.pos();
        Token::new(kind, self.cursor.slice(start, end), Span::new(start, end))
    }

    fn single(&mut self, kind: TokenKind, start: u32) -> Token {
        self.cursor.advance();
        self.token(kind, start)
    }

    /// One- or two-byte operator: `second` following the current byte
    /// selects `double`, otherwise `single`.
    fn one_or_two(
        &mut self,
        start: u32,
        second: u8,
        double: TokenKind,
        single: TokenKind,
    ) -> Token {
        if self.cursor.peek() == second {
            self.cursor.advance_n(2);
            self.token(double, start)
        } else {
            self.single(single, start)
        }
    }

    fn unterminated_interpolation(&self) -> LexError {
        LexError::UnterminatedInterpolation {
            span: Span::new(self.interp_start, self.cursor.pos()),
        }
    }

    // Normal and paused mode

    fn code(&mut self) -> Result<Token, LexError> {
        self.cursor.eat_whitespace();
        let start = self.cursor.pos();
        if self.cursor.is_eof() {
            if let Mode::Paused { .. } = self.mode {
                return Err(self.unterminated_interpolation());
            }
            return Ok(Token::new(TokenKind::Eof, "", Span::point(start)));
        }

        let token = match self.cursor.current() {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(start),
            b'0'..=b'9' => {
                self.cursor.eat_while(|b| b.is_ascii_digit());
                self.token(TokenKind::Int, start)
            }
            b'"' => return self.string(start),
            b'\'' => return self.open_interpolation(start),
            b'{' => self.left_brace(start),
            b'}' => self.right_brace(start),
            b'=' => self.one_or_two(start, b'=', TokenKind::Eq, TokenKind::Assign),
            b'!' => self.one_or_two(start, b'=', TokenKind::NotEq, TokenKind::Bang),
            b'-' => self.one_or_two(start, b'>', TokenKind::Arrow, TokenKind::Minus),
            b'+' => self.single(TokenKind::Plus, start),
            b'*' => self.single(TokenKind::Star, start),
            b'/' => self.single(TokenKind::Slash, start),
            b'%' => self.single(TokenKind::Percent, start),
            b'<' => self.single(TokenKind::Lt, start),
            b'>' => self.single(TokenKind::Gt, start),
            b'(' => self.single(TokenKind::LParen, start),
            b')' => self.single(TokenKind::RParen, start),
            b'[' => self.single(TokenKind::LBracket, start),
            b']' => self.single(TokenKind::RBracket, start),
            b',' => self.single(TokenKind::Comma, start),
            b';' => self.single(TokenKind::Semicolon, start),
            b':' => self.single(TokenKind::Colon, start),
            b'.' => self.single(TokenKind::Dot, start),
            _ => {
                self.cursor.advance_char();
                self.token(TokenKind::Illegal, start)
            }
        };
        Ok(token)
    }

    fn identifier(&mut self, start: u32) -> Token {
        self.cursor.eat_while(|b| b.is_ascii_alphabetic() || b == b'_');
        let text = self.cursor.slice_from(start);
        let kind = keywords::lookup(text).unwrap_or(TokenKind::Ident);
        self.token(kind, start)
    }

    /// `"..."`: one token whose text excludes the quotes. No escapes.
    fn string(&mut self, start: u32) -> Result<Token, LexError> {
        self.cursor.advance();
        let content_start = self.cursor.pos();
        if !self.cursor.eat_until(b'"') {
            return Err(LexError::UnterminatedString {
                span: Span::new(start, self.cursor.pos()),
            });
        }
        let text = self.cursor.slice_from(content_start);
        self.cursor.advance();
        Ok(Token::new(
            TokenKind::Str,
            text,
            Span::new(start, self.cursor.pos()),
        ))
    }

    fn open_interpolation(&mut self, start: u32) -> Result<Token, LexError> {
        if let Mode::Paused { .. } = self.mode {
            return Err(LexError::NestedInterpolation {
                span: Span::new(start, start + 1),
            });
        }
        self.interp_start = start;
        let token = self.single(TokenKind::IString, start);
        self.set_mode(Mode::Interpolating);
        Ok(token)
    }

    fn left_brace(&mut self, start: u32) -> Token {
        if let Mode::Paused { depth } = self.mode {
            self.mode = Mode::Paused { depth: depth + 1 };
        }
        self.single(TokenKind::LBrace, start)
    }

    fn right_brace(&mut self, start: u32) -> Token {
        match self.mode {
            Mode::Paused { depth: 0 } => self.set_mode(Mode::Interpolating),
            Mode::Paused { depth } => self.mode = Mode::Paused { depth: depth - 1 },
            Mode::Normal | Mode::Interpolating => {}
        }
        self.single(TokenKind::RBrace, start)
    }

    // Interpolating mode

    fn interpolated(&mut self) -> Result<Token, LexError> {
        if self.cursor.is_eof() {
            return Err(self.unterminated_interpolation());
        }
        let start = self.cursor.pos();
        let token = match self.cursor.current() {
            b'\'' => {
                let token = self.single(TokenKind::IString, start);
                self.set_mode(Mode::Normal);
                token
            }
            b'{' if self.cursor.peek() != b'}' => {
                let token = self.single(TokenKind::LBrace, start);
                self.set_mode(Mode::Paused { depth: 0 });
                token
            }
            _ => {
                self.cursor.advance_char();
                self.token(TokenKind::Bytes, start)
            }
        };
        Ok(token)
    }
}
