//! Reserved keyword lookup.
//!
//! Uses the identifier's length as a first-pass filter (keywords are 2-6
//! chars), then matches against the keywords of that length.

use quill_ir::TokenKind;

/// Look up a reserved keyword by text.
///
/// Returns `None` for ordinary identifiers.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    match text.len() {
        2 => match text {
            "fn" => Some(TokenKind::Fn),
            "if" => Some(TokenKind::If),
            _ => None,
        },
        3 => match text {
            "let" => Some(TokenKind::Let),
            _ => None,
        },
        4 => match text {
            "else" => Some(TokenKind::Else),
            "null" => Some(TokenKind::Null),
            "true" => Some(TokenKind::True),
            _ => None,
        },
        5 => match text {
            "break" => Some(TokenKind::Break),
            "false" => Some(TokenKind::False),
            "while" => Some(TokenKind::While),
            _ => None,
        },
        6 => match text {
            "return" => Some(TokenKind::Return),
            "struct" => Some(TokenKind::Struct),
            _ => None,
        },
        _ => None,
    }
}
