//! Byte cursor with line tracking.

/// Byte-position cursor over source text.
///
/// The cursor only ever stops on ASCII bytes or at the end of a run of
/// non-ASCII bytes, so every slice it hands out is valid UTF-8.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `src`, on line 1.
    pub(crate) fn new(src: &'a str) -> Self {
        Self { src, pos: 0, line: 1 }
    }

    /// Returns the current byte offset.
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the current 1-based line.
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    /// Returns `true` once all input is consumed.
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Returns the byte at the cursor.
    pub(crate) fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// Returns the byte `n` positions past the cursor.
    pub(crate) fn peek_at(&self, n: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + n).copied()
    }

    /// Returns the unconsumed input.
    pub(crate) fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Returns the input between `start` and the cursor.
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        &self.src[start..self.pos]
    }

    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.rest().as_bytes().starts_with(prefix.as_bytes())
    }

    /// Case-insensitive ASCII prefix test.
    pub(crate) fn starts_with_ignore_case(&self, prefix: &str) -> bool {
        let rest = self.rest().as_bytes();
        rest.len() >= prefix.len() && rest[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    }

    /// Returns true if the cursor sits at the start of a line.
    pub(crate) fn at_line_start(&self) -> bool {
        self.pos == 0 || self.src.as_bytes()[self.pos - 1] == b'\n'
    }

    /// Advances by `count` bytes, clamped to input length, counting newlines.
    pub(crate) fn bump(&mut self, count: usize) {
        let end = self.pos.saturating_add(count).min(self.src.len());
        self.line += self.src.as_bytes()[self.pos..end]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.pos = end;
    }

    /// Advances while `pred` holds for the current byte.
    pub(crate) fn bump_while(&mut self, pred: impl Fn(u8) -> bool) {
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.bump(1);
        }
    }

    /// Moves to the end of input.
    pub(crate) fn bump_to_end(&mut self) {
        self.bump(self.src.len() - self.pos);
    }
}

/// First byte of a PHP label.
pub(crate) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

/// Subsequent byte of a PHP label.
pub(crate) fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
