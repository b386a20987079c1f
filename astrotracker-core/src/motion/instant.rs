//! Untimed motion
//!
//! Moves one step per invocation with no speed or acceleration limits.
//! Used to drive the mount logic in host tests without a clock.

use super::{Motion, MotionPrimitive};
use crate::axis::AxisState;
use crate::traits::Direction;

/// One step per call toward the target
#[derive(Debug, Clone, Default)]
pub struct InstantMotion {
    steps: u32,
    resets: u32,
}

impl InstantMotion {
    pub const fn new() -> Self {
        Self { steps: 0, resets: 0 }
    }

    /// Total steps taken
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Number of times the ramp was reset
    pub fn resets(&self) -> u32 {
        self.resets
    }
}

impl MotionPrimitive for InstantMotion {
    fn advance(&mut self, axis: &mut AxisState, _now_us: u64) -> Motion {
        let direction = match axis.distance_to_go() {
            0 => return Motion::Idle,
            d if d > 0 => Direction::Forward,
            _ => Direction::Backward,
        };
        axis.record_step(direction);
        self.steps = self.steps.saturating_add(1);
        Motion::Stepped(direction)
    }

    fn retarget(&mut self, _axis: &AxisState) {}

    fn set_max_speed(&mut self, _axis: &AxisState) {}

    fn reset(&mut self) {
        self.resets = self.resets.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_step_per_call() {
        let mut axis = AxisState::default();
        let mut motion = InstantMotion::new();
        axis.request_move(-3).unwrap();

        for expected in [-1, -2, -3] {
            assert_eq!(motion.advance(&mut axis, 0), Motion::Stepped(Direction::Backward));
            assert_eq!(axis.current_position(), expected);
        }
        assert_eq!(motion.advance(&mut axis, 0), Motion::Idle);
        assert_eq!(motion.steps(), 3);
    }
}
