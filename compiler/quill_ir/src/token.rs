//! Token types for the Quill lexer.
//!
//! A token is a kind tag plus the literal source text it was scanned from.
//! Tokens carry no behavior; the external parser consumes them in order
//! until it sees [`TokenKind::Eof`].

use std::fmt;

use crate::Span;

/// A token with its literal text and span in the source.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal characters. For [`TokenKind::Str`] this excludes the quotes.
    pub text: String,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Create a token without a meaningful source location.
    pub fn dummy(kind: TokenKind, text: impl Into<String>) -> Self {
        Token::new(kind, text, Span::DUMMY)
    }

    /// Returns `true` for the end-of-input token.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {}", self.kind, self.text, self.span)
    }
}

/// Token kinds for Quill.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// A character no rule accepts.
    Illegal,
    /// End of input.
    Eof,

    /// Identifier: letters and underscores.
    Ident,
    /// Decimal digit run.
    Int,
    /// Double-quoted string literal (text excludes the quotes).
    Str,

    // Interpolated strings
    /// `'` delimiter that opens or closes an interpolated string.
    IString,
    /// One raw character inside an interpolated string.
    Bytes,

    // Operators
    Assign,  // =
    Plus,    // +
    Minus,   // -
    Bang,    // !
    Star,    // *
    Slash,   // /
    Percent, // %
    Lt,      // <
    Gt,      // >
    Eq,      // ==
    NotEq,   // !=
    Arrow,   // ->

    // Punctuation
    Comma,
    Semicolon,
    Colon,
    Dot,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords
    Fn,
    Let,
    True,
    False,
    If,
    Else,
    Return,
    Break,
    While,
    Struct,
    Null,
}

impl TokenKind {
    /// Returns `true` if this kind is a reserved word.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Fn
                | TokenKind::Let
                | TokenKind::True
                | TokenKind::False
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Return
                | TokenKind::Break
                | TokenKind::While
                | TokenKind::Struct
                | TokenKind::Null
        )
    }

    /// Human-readable description used in diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Illegal => "illegal character",
            TokenKind::Eof => "end of input",
            TokenKind::Ident => "identifier",
            TokenKind::Int => "integer",
            TokenKind::Str => "string",
            TokenKind::IString => "'",
            TokenKind::Bytes => "string byte",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Arrow => "->",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Fn => "fn",
            TokenKind::Let => "let",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Return => "return",
            TokenKind::Break => "break",
            TokenKind::While => "while",
            TokenKind::Struct => "struct",
            TokenKind::Null => "null",
        }
    }
}
