//! Coordinate pair payloads
//!
//! `Z` and `M` carry one line `"<x>,<y>"`. The line is split once at the
//! first comma: everything before it is X, everything after it is Y. Each
//! side may be padded with ASCII whitespace.

/// A pair of step values, one per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoordinatePair {
    pub x: i32,
    pub y: i32,
}

impl CoordinatePair {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Reasons a payload line is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadError {
    /// No comma separating the two values
    MissingComma,
    /// X side empty or not a valid `i32`
    InvalidX,
    /// Y side empty or not a valid `i32`
    InvalidY,
    /// Line overflowed the receive buffer
    TooLong,
    /// Line held a non-ASCII byte
    NotAscii,
}

/// Parse a `"<x>,<y>"` payload line
pub fn parse_pair(line: &str) -> Result<CoordinatePair, PayloadError> {
    let (x, y) = line.split_once(',').ok_or(PayloadError::MissingComma)?;
    let x = parse_value(x).ok_or(PayloadError::InvalidX)?;
    let y = parse_value(y).ok_or(PayloadError::InvalidY)?;
    Ok(CoordinatePair { x, y })
}

fn parse_value(text: &str) -> Option<i32> {
    let text = text.trim_matches(|c: char| c.is_ascii_whitespace());
    if text.is_empty() {
        return None;
    }
    text.parse().ok()
}
