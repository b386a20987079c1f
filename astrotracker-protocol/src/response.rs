//! Response lines sent back over the link
//!
//! Only position reports and rejected requests produce a response. The
//! texts are fixed by the host applications that parse them.

use core::fmt::{self, Write};

use heapless::String;

use crate::command::Axis;
use crate::payload::CoordinatePair;

/// Longest encoded response, terminator included
pub const MAX_RESPONSE_LEN: usize = 48;

pub const MSG_POSITION_OUT_OF_LIMITS: &str = "Posición fuera de límites";
pub const MSG_INVALID_COORDINATES: &str = "Coordenadas inválidas";

/// A response line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// Accepted position report: `"<x>,<y>"`
    Position(CoordinatePair),
    /// Relative move rejected by the soft limits of one axis
    MoveOutOfLimits(Axis),
    /// Position report refused because an axis sits outside its limits
    PositionOutOfLimits,
    /// `Z`/`M` payload could not be parsed
    InvalidCoordinates,
}

impl Response {
    /// Write the response text followed by the line terminator
    pub fn write_line<W: Write>(&self, out: &mut W) -> fmt::Result {
        match self {
            Response::Position(pos) => write!(out, "{},{}", pos.x, pos.y)?,
            Response::MoveOutOfLimits(axis) => {
                write!(out, "Movimiento {} fuera de límites", axis.letter())?
            }
            Response::PositionOutOfLimits => out.write_str(MSG_POSITION_OUT_OF_LIMITS)?,
            Response::InvalidCoordinates => out.write_str(MSG_INVALID_COORDINATES)?,
        }
        out.write_char('\n')
    }

    /// Encode into a fixed-capacity line
    pub fn to_line(&self) -> String<MAX_RESPONSE_LEN> {
        let mut line = String::new();
        // Every variant fits in MAX_RESPONSE_LEN
        let _ = self.write_line(&mut line);
        line
    }
}
