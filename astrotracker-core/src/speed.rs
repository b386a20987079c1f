//! Max speed adjustment
//!
//! `+` and `-` move the max speed of both axes in fixed increments. There
//! is a floor but no ceiling beyond what `u32` can hold.

/// Speed increment used by `+` and `-` (steps/s)
pub const DEFAULT_SPEED_STEP: u32 = 100;

/// Lowest max speed any configuration may allow (steps/s)
pub const SPEED_FLOOR: u32 = 100;

/// Lowest max speed reachable through `-` (steps/s)
pub const DEFAULT_MIN_SPEED: u32 = SPEED_FLOOR;

/// Increment and floor for max speed changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedPolicy {
    pub step: u32,
    pub floor: u32,
}

impl SpeedPolicy {
    pub const fn new(step: u32, floor: u32) -> Self {
        Self { step, floor }
    }

    /// Speed after one `+`
    pub fn raise(&self, speed: u32) -> u32 {
        speed.saturating_add(self.step)
    }

    /// Speed after one `-`, never below the floor
    pub fn lower(&self, speed: u32) -> u32 {
        speed.saturating_sub(self.step).max(self.floor)
    }
}

impl Default for SpeedPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED_STEP, DEFAULT_MIN_SPEED)
    }
}
