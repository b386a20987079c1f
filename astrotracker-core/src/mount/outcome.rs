//! Structured result of one serviced command

use astrotracker_protocol::{Axis, CoordinatePair, PayloadError, PayloadKind, Response};

use crate::axis::LimitViolation;

/// What servicing one byte (or an expired payload) did to the mount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Byte is not a command
    Ignored(u8),
    /// `Z`/`M` received; payload line being assembled
    AwaitingPayload(PayloadKind),
    /// Jog accepted with the new target
    MoveAccepted { axis: Axis, target: i32 },
    /// Jog refused by the soft limits; target unchanged
    MoveRejected { axis: Axis, violation: LimitViolation },
    /// Current positions redefined
    ZeroDeclared(CoordinatePair),
    /// Max references set and limits established
    LimitsDeclared(CoordinatePair),
    /// Both positions admissible and reported
    PositionReported(CoordinatePair),
    /// At least one current position outside its limits
    PositionOutOfLimits(CoordinatePair),
    /// Max speed of both axes is now `max_speed`
    SpeedChanged { max_speed: u32 },
    /// Payload line malformed; nothing changed
    PayloadRejected { kind: PayloadKind, error: PayloadError },
    /// Payload line not terminated in time; nothing changed
    PayloadTimedOut(PayloadKind),
}

impl Outcome {
    /// The line to send back to the host, if any
    pub fn response(&self) -> Option<Response> {
        match *self {
            Outcome::MoveRejected { axis, .. } => Some(Response::MoveOutOfLimits(axis)),
            Outcome::PositionReported(pos) => Some(Response::Position(pos)),
            Outcome::PositionOutOfLimits(_) => Some(Response::PositionOutOfLimits),
            Outcome::PayloadRejected { .. } => Some(Response::InvalidCoordinates),
            Outcome::Ignored(_)
            | Outcome::AwaitingPayload(_)
            | Outcome::MoveAccepted { .. }
            | Outcome::ZeroDeclared(_)
            | Outcome::LimitsDeclared(_)
            | Outcome::SpeedChanged { .. }
            | Outcome::PayloadTimedOut(_) => None,
        }
    }
}
