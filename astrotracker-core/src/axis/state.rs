//! Axis state tracking
//!
//! One [`AxisState`] exists per mount axis. The interpreter commits
//! targets and references through it; the motion primitive advances the
//! current position one step at a time.

use super::limits::{check, LimitViolation};
use crate::traits::Direction;

/// Max speed of both axes at boot (steps/s)
pub const DEFAULT_MAX_SPEED: u32 = 1000;

/// Position, target and soft limits of one axis
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisState {
    current_position: i32,
    target: i32,
    zero_reference: i32,
    max_reference: i32,
    limits_established: bool,
    max_speed: u32,
}

impl AxisState {
    /// Create an axis at the origin with no limits
    pub const fn new(max_speed: u32) -> Self {
        Self {
            current_position: 0,
            target: 0,
            zero_reference: 0,
            max_reference: 0,
            limits_established: false,
            max_speed,
        }
    }

    pub fn current_position(&self) -> i32 {
        self.current_position
    }

    pub fn target(&self) -> i32 {
        self.target
    }

    pub fn zero_reference(&self) -> i32 {
        self.zero_reference
    }

    pub fn max_reference(&self) -> i32 {
        self.max_reference
    }

    pub fn limits_established(&self) -> bool {
        self.limits_established
    }

    /// Max speed in steps/s
    pub fn max_speed(&self) -> u32 {
        self.max_speed
    }

    /// Signed steps remaining to the target
    pub fn distance_to_go(&self) -> i64 {
        i64::from(self.target) - i64::from(self.current_position)
    }

    /// Check if the axis sits on its target
    pub fn at_target(&self) -> bool {
        self.current_position == self.target
    }

    /// Commit a move relative to the current position
    ///
    /// The new target is validated against the soft limits. On rejection
    /// the previous target is kept.
    pub fn request_move(&mut self, delta: i32) -> Result<i32, LimitViolation> {
        let candidate = check(self, self.current_position.saturating_add(delta))?;
        self.target = candidate;
        Ok(candidate)
    }

    /// Redefine the current position (and the origin) without validation
    ///
    /// The axis is left with nothing to travel.
    pub fn declare_zero(&mut self, position: i32) {
        self.current_position = position;
        self.zero_reference = position;
        self.target = position;
    }

    /// Set the upper travel reference and establish limits
    pub fn declare_max(&mut self, max: i32) {
        self.max_reference = max;
        self.limits_established = true;
    }

    /// The current position, if it lies within the soft limits
    pub fn report(&self) -> Result<i32, LimitViolation> {
        check(self, self.current_position)
    }

    /// Record one physical step taken by the motion primitive
    pub fn record_step(&mut self, direction: Direction) {
        self.current_position = self.current_position.saturating_add(direction.delta());
    }

    pub fn set_max_speed(&mut self, max_speed: u32) {
        self.max_speed = max_speed;
    }
}

impl Default for AxisState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SPEED)
    }
}
