//! Incremental payload line accumulation
//!
//! Payload lines arrive one byte at a time, possibly spread across many
//! control cycles. [`LineAccumulator`] buffers them until the line
//! terminator so the caller never has to block waiting for input.
//!
//! Line format:
//! - printable ASCII bytes, at most [`MAX_LINE_LEN`]
//! - optional CR (discarded)
//! - LF terminator

use heapless::String;

/// Maximum payload line length in bytes (terminator excluded)
///
/// Two `i32` values with sign, comma and some padding fit comfortably.
pub const MAX_LINE_LEN: usize = 32;

/// Line terminator
pub const LINE_END: u8 = b'\n';

/// Carriage return, accepted and dropped for CRLF senders
pub const CARRIAGE_RETURN: u8 = b'\r';

/// Errors reported when a line terminator closes an invalid line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LEN`]
    TooLong,
    /// Line contained a non-ASCII byte
    NotAscii,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccumState {
    /// Appending bytes to the buffer
    Collecting,
    /// Line already invalid, dropping bytes until the terminator
    Discarding(LineError),
}

/// State machine assembling one payload line
#[derive(Debug, Clone)]
pub struct LineAccumulator {
    state: AccumState,
    buffer: String<MAX_LINE_LEN>,
}

impl Default for LineAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl LineAccumulator {
    /// Create an empty accumulator
    pub const fn new() -> Self {
        Self {
            state: AccumState::Collecting,
            buffer: String::new(),
        }
    }

    /// Drop any partial line
    pub fn reset(&mut self) {
        self.state = AccumState::Collecting;
        self.buffer.clear();
    }

    /// Number of bytes buffered so far
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True if no byte of the current line has been buffered
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty() && self.state == AccumState::Collecting
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when the terminator completes a valid line,
    /// `Ok(None)` when more bytes are needed, or `Err` when the terminator
    /// closes a line that overflowed or held non-ASCII bytes. The
    /// accumulator is ready for a new line after any terminator.
    pub fn feed(&mut self, byte: u8) -> Result<Option<String<MAX_LINE_LEN>>, LineError> {
        match byte {
            LINE_END => {
                let result = match self.state {
                    AccumState::Collecting => Ok(Some(self.buffer.clone())),
                    AccumState::Discarding(e) => Err(e),
                };
                self.reset();
                result
            }
            CARRIAGE_RETURN => Ok(None),
            _ => {
                if self.state == AccumState::Collecting {
                    if !byte.is_ascii() {
                        self.state = AccumState::Discarding(LineError::NotAscii);
                    } else if self.buffer.push(byte as char).is_err() {
                        self.state = AccumState::Discarding(LineError::TooLong);
                    }
                }
                Ok(None)
            }
        }
    }

    /// Feed multiple bytes
    ///
    /// Returns the first complete line found, if any.
    /// Remaining bytes after a terminator are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<String<MAX_LINE_LEN>>, LineError> {
        for &byte in bytes {
            if let Some(line) = self.feed(byte)? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_line_completes_on_lf() {
        let mut acc = LineAccumulator::new();
        assert_eq!(acc.feed_bytes(b"10,20"), Ok(None));
        assert_eq!(acc.len(), 5);

        let line = acc.feed(b'\n').unwrap().unwrap();
        assert_eq!(line.as_str(), "10,20");
        assert!(acc.is_empty());
    }

    #[test]
    fn test_crlf_accepted() {
        let mut acc = LineAccumulator::new();
        let line = acc.feed_bytes(b" 50,50\r\n").unwrap().unwrap();
        assert_eq!(line.as_str(), " 50,50");
    }

    #[test]
    fn test_empty_line() {
        let mut acc = LineAccumulator::new();
        let line = acc.feed(b'\n').unwrap().unwrap();
        assert!(line.is_empty());
    }

    #[test]
    fn test_too_long_reported_at_terminator() {
        let mut acc = LineAccumulator::new();
        let long = [b'1'; MAX_LINE_LEN + 5];
        assert_eq!(acc.feed_bytes(&long), Ok(None));
        assert!(!acc.is_empty());
        assert_eq!(acc.feed(b'\n'), Err(LineError::TooLong));

        // Recovers for the next line
        let line = acc.feed_bytes(b"1,2\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "1,2");
    }

    #[test]
    fn test_exactly_max_len_fits() {
        let mut acc = LineAccumulator::new();
        let exact = [b'7'; MAX_LINE_LEN];
        acc.feed_bytes(&exact).unwrap();
        let line = acc.feed(b'\n').unwrap().unwrap();
        assert_eq!(line.len(), MAX_LINE_LEN);
    }

    #[test]
    fn test_non_ascii_rejected() {
        let mut acc = LineAccumulator::new();
        acc.feed_bytes(&[b'1', 0xC3, 0xA9, b',', b'2']).unwrap();
        assert_eq!(acc.feed(b'\n'), Err(LineError::NotAscii));
    }

    #[test]
    fn test_reset_drops_partial_line() {
        let mut acc = LineAccumulator::new();
        acc.feed_bytes(b"123,").unwrap();
        acc.reset();
        assert!(acc.is_empty());
        let line = acc.feed_bytes(b"4,5\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "4,5");
    }

    #[test]
    fn test_feed_bytes_stops_after_line() {
        let mut acc = LineAccumulator::new();
        let line = acc.feed_bytes(b"1,1\n9,9").unwrap().unwrap();
        assert_eq!(line.as_str(), "1,1");
        // Bytes after the terminator were not consumed
        assert!(acc.is_empty());
    }

    proptest! {
        #[test]
        fn prop_chunking_is_irrelevant(text in "[0-9 ,-]{0,32}", split in 0usize..33) {
            let bytes = text.as_bytes();
            let split = split.min(bytes.len());

            let mut whole = LineAccumulator::new();
            whole.feed_bytes(bytes).unwrap();
            let a = whole.feed(b'\n');

            let mut chunked = LineAccumulator::new();
            chunked.feed_bytes(&bytes[..split]).unwrap();
            chunked.feed_bytes(&bytes[split..]).unwrap();
            let b = chunked.feed(b'\n');

            prop_assert_eq!(a, b);
        }
    }
}
