//! Astrotracker serial command protocol
//!
//! This crate defines the byte-oriented protocol spoken between the
//! controlling host (phone or PC over Bluetooth serial) and the mount
//! firmware.
//!
//! # Protocol Overview
//!
//! Requests are single ASCII command bytes. Two of them carry a payload
//! line made of two comma-separated signed integers:
//! ```text
//! ┌──────┐     ┌──────┬─────────────┬────┐
//! │ CMD  │     │ CMD  │ "<x>,<y>"   │ LF │
//! │ 1B   │     │ 1B   │ ≤ 32B       │ 1B │
//! └──────┘     └──────┴─────────────┴────┘
//!  F B R L P + -      Z M
//! ```
//!
//! Responses are newline-terminated text lines, emitted only for position
//! reports and rejected requests.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod payload;
pub mod response;

pub use command::{Axis, Command, PayloadKind, COMMANDS};
pub use line::{LineAccumulator, LineError, LINE_END, MAX_LINE_LEN};
pub use payload::{parse_pair, CoordinatePair, PayloadError};
pub use response::{Response, MAX_RESPONSE_LEN};
