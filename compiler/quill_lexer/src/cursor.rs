//! Byte cursor over the source text.
//!
//! The cursor advances through the source byte-by-byte and reports `0x00`
//! once the end is reached, so dispatch tables can treat EOF as an ordinary
//! byte. Interior null bytes are told apart from EOF with [`Cursor::is_eof`].
//!
//! Positions are `u32` byte offsets, matching [`quill_ir::Span`].

#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    /// Current read position (byte index into `source`).
    pos: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        debug_assert!(
            u32::try_from(source.len()).is_ok(),
            "source larger than 4 GiB is not supported"
        );
        Self { source, pos: 0 }
    }

    #[inline]
    fn byte_at(&self, pos: u32) -> u8 {
        self.source.as_bytes().get(pos as usize).copied().unwrap_or(0)
    }

    /// Byte under the cursor; `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// Lookahead by one byte; `0x00` past EOF.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos as usize >= self.source.len()
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "source length is checked to fit in u32 at construction"
    )]
    pub fn source_len(&self) -> u32 {
        self.source.len() as u32
    }

    /// Text of `start..end`, or `""` when the range is out of bounds or not
    /// on character boundaries.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        self.source.get(start as usize..end as usize).unwrap_or("")
    }

    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Consume bytes matching `pred`. Stops at EOF regardless of `pred`.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Step over the whole character at the cursor, so multi-byte input
    /// never splits a token mid-character.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "a char is at most 4 bytes"
    )]
    pub fn advance_char(&mut self) {
        let width = self
            .source
            .get(self.pos as usize..)
            .and_then(|rest| rest.chars().next())
            .map_or(1, char::len_utf8);
        self.pos = (self.pos + width as u32).min(self.source_len());
    }

    /// Skip spaces, tabs, carriage returns and newlines.
    #[inline]
    pub fn eat_whitespace(&mut self) {
        self.eat_while(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'));
    }

    /// Jump to the next occurrence of `byte` (memchr scan). On a miss the
    /// cursor ends at EOF and the result is `false`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset is bounded by the source length which fits in u32"
    )]
    pub fn eat_until(&mut self, byte: u8) -> bool {
        let remaining = self
            .source
            .as_bytes()
            .get(self.pos as usize..)
            .unwrap_or_default();
        if let Some(offset) = memchr::memchr(byte, remaining) {
            self.pos += offset as u32;
            true
        } else {
            self.pos = self.source_len();
            false
        }
    }
}
