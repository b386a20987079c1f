//! Command bytes and the command table
//!
//! Every request starts with one ASCII byte. The byte is looked up in
//! [`COMMANDS`]; unknown bytes are not commands and are ignored by the
//! interpreter.

/// Mount axis addressed by a command or named in a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// First stepper axis (jogged with `F`/`B`)
    X,
    /// Second stepper axis (jogged with `R`/`L`)
    Y,
}

impl Axis {
    /// Both axes, in report order
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// Single-letter name used in wire messages
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
        }
    }
}

/// Which payload a command is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadKind {
    /// `Z`: overwrite current positions (and zero references)
    Zero,
    /// `M`: declare the max references and establish limits
    Max,
}

/// A recognized command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Relative move of one axis by one jog increment
    Jog { axis: Axis, forward: bool },
    /// Command followed by a `"<x>,<y>"` payload line
    Declare(PayloadKind),
    /// Report current position of both axes
    ReportPosition,
    /// Raise max speed of both axes by one speed step
    SpeedUp,
    /// Lower max speed of both axes by one speed step (floored)
    SpeedDown,
}

// Wire format values
pub const CMD_X_FORWARD: u8 = b'F';
pub const CMD_X_BACKWARD: u8 = b'B';
pub const CMD_Y_FORWARD: u8 = b'R';
pub const CMD_Y_BACKWARD: u8 = b'L';
pub const CMD_ZERO: u8 = b'Z';
pub const CMD_MAX: u8 = b'M';
pub const CMD_POSITION: u8 = b'P';
pub const CMD_SPEED_UP: u8 = b'+';
pub const CMD_SPEED_DOWN: u8 = b'-';

/// Command byte → command table
///
/// This is the single source of truth for the command set.
pub const COMMANDS: [(u8, Command); 9] = [
    (CMD_X_FORWARD, Command::jog(Axis::X, true)),
    (CMD_X_BACKWARD, Command::jog(Axis::X, false)),
    (CMD_Y_FORWARD, Command::jog(Axis::Y, true)),
    (CMD_Y_BACKWARD, Command::jog(Axis::Y, false)),
    (CMD_ZERO, Command::Declare(PayloadKind::Zero)),
    (CMD_MAX, Command::Declare(PayloadKind::Max)),
    (CMD_POSITION, Command::ReportPosition),
    (CMD_SPEED_UP, Command::SpeedUp),
    (CMD_SPEED_DOWN, Command::SpeedDown),
];

impl Command {
    const fn jog(axis: Axis, forward: bool) -> Self {
        Command::Jog { axis, forward }
    }

    /// Look up a command byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|(b, _)| *b == byte)
            .map(|(_, cmd)| *cmd)
    }
}
