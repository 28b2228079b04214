// WHY: Quote spans are found by byte offset but reported to people by line and column
// Type-safe wrappers keep byte offsets and 1-based positions from being mixed up

use anyhow::{bail, Result};

/// 0-based byte position in source text
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct BytePos(pub usize);

/// 1-based line number for output spans
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct OneBasedLine(pub usize);

/// 1-based column number (in characters) for output spans
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct OneBasedCol(pub usize);

impl BytePos {
    pub fn new(pos: usize) -> Self {
        BytePos(pos)
    }
}

/// Position of a quote in a text file, 1-based, end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

/// Incremental byte -> line/col conversion
/// WHY: quotes arrive in order, so one forward pass avoids rescanning from the start for every span
#[derive(Debug)]
pub struct PositionTracker<'t> {
    text_bytes: &'t [u8],
    current_byte_pos: usize,
    current_line: usize,
    current_col: usize,
}

impl<'t> PositionTracker<'t> {
    pub fn new(text: &'t str) -> Self {
        Self {
            text_bytes: text.as_bytes(),
            current_byte_pos: 0,
            current_line: 1,
            current_col: 1,
        }
    }

    /// Advance to target byte position, updating line/col counters
    pub fn advance_to_byte(&mut self, target: BytePos) -> Result<(OneBasedLine, OneBasedCol)> {
        if target.0 < self.current_byte_pos {
            bail!("Cannot seek backwards: current {} > target {}", self.current_byte_pos, target.0);
        }

        if target.0 > self.text_bytes.len() {
            bail!("Target byte position {} exceeds text length {}", target.0, self.text_bytes.len());
        }

        while self.current_byte_pos < target.0 {
            let byte = self.text_bytes[self.current_byte_pos];

            // Continuation bytes (10xxxxxx) belong to the previous character
            if (byte & 0xC0) != 0x80 {
                if byte == b'\n' {
                    self.current_line += 1;
                    self.current_col = 1;
                } else {
                    self.current_col += 1;
                }
            }

            self.current_byte_pos += 1;
        }

        Ok((OneBasedLine(self.current_line), OneBasedCol(self.current_col)))
    }

    /// Locate a byte range; the range must not start before the previous one ended
    pub fn span_of(&mut self, start: BytePos, end: BytePos) -> Result<Span> {
        let (start_line, start_col) = self.advance_to_byte(start)?;
        let (end_line, end_col) = self.advance_to_byte(end)?;
        Ok(Span {
            start_line: start_line.0,
            start_col: start_col.0,
            end_line: end_line.0,
            end_col: end_col.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_positions() {
        let text = "He said \"hi\" to her.";
        let mut tracker = PositionTracker::new(text);
        let span = tracker.span_of(BytePos(8), BytePos(12)).unwrap();
        assert_eq!(span, Span { start_line: 1, start_col: 9, end_line: 1, end_col: 13 });
    }

    #[test]
    fn test_multiline_and_multibyte_positions() {
        let text = "Line one.\nShe said “héllo”.";
        let start = text.find('“').unwrap();
        let end = text.find('”').unwrap() + '”'.len_utf8();
        let mut tracker = PositionTracker::new(text);
        let span = tracker.span_of(BytePos(start), BytePos(end)).unwrap();
        assert_eq!(span.start_line, 2);
        assert_eq!(span.start_col, 10);
        assert_eq!(span.end_line, 2);
        assert_eq!(span.end_col, 17);
    }

    #[test]
    fn test_backwards_seek_is_error() {
        let mut tracker = PositionTracker::new("abc");
        tracker.advance_to_byte(BytePos(2)).unwrap();
        assert!(tracker.advance_to_byte(BytePos(1)).is_err());
    }

    #[test]
    fn test_seek_past_end_is_error() {
        let mut tracker = PositionTracker::new("abc");
        assert!(tracker.advance_to_byte(BytePos(4)).is_err());
        assert!(tracker.advance_to_byte(BytePos(3)).is_ok());
    }
}
