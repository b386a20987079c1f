//! UART serial link
//!
//! Wraps the buffered UART halves behind the core [`Link`] trait. The
//! interrupt-driven ring buffers make every read non-blocking; writes
//! block only while the TX ring is full.

use astrotracker_core::traits::Link;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx, Error};
use embedded_io::{Read, ReadReady, Write};

/// Host link over a buffered UART (HC-05 Bluetooth module)
pub struct UartLink {
    rx: BufferedUartRx,
    tx: BufferedUartTx,
}

impl UartLink {
    pub fn new(rx: BufferedUartRx, tx: BufferedUartTx) -> Self {
        Self { rx, tx }
    }
}

impl Link for UartLink {
    type Error = Error;

    fn poll_byte(&mut self) -> Result<Option<u8>, Error> {
        if !self.rx.read_ready()? {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        let n = self.rx.read(&mut byte)?;
        Ok((n == 1).then_some(byte[0]))
    }

    fn write_line(&mut self, line: &str) -> Result<(), Error> {
        self.tx.write_all(line.as_bytes())
    }
}
