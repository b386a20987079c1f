//! Serial link abstraction
//!
//! The control loop talks to the host through this trait. Reads never
//! wait: a link with nothing buffered simply reports `None`.

/// Byte-oriented, line-answering serial link
pub trait Link {
    /// Error type for link operations
    type Error;

    /// Take one received byte if one is already buffered
    fn poll_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Send one response line (the text already carries its terminator)
    fn write_line(&mut self, line: &str) -> Result<(), Self::Error>;
}
