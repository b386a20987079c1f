//! Step/direction output trait
//!
//! This trait abstracts over the physical step pulse generation for one
//! axis (GPIO bit-banging, PIO, a simulator in tests).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Step direction, in position terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Position increases
    Forward,
    /// Position decreases
    Backward,
}

impl Direction {
    /// Position change of one step in this direction
    pub fn delta(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Trait for step/direction stepper outputs
///
/// Implementations emit exactly one step pulse per [`StepOutput::step`]
/// call. Timing between steps is the caller's concern.
pub trait StepOutput {
    /// Emit one step pulse in the given direction
    fn step(&mut self, direction: Direction);

    /// Enable or disable the driver
    ///
    /// When disabled, the motor is free to rotate and does not hold position.
    fn set_enabled(&mut self, enabled: bool);

    /// Check if the driver is enabled
    fn is_enabled(&self) -> bool;
}
