//! Motion primitive trait

use crate::axis::AxisState;
use crate::traits::Direction;

/// Result of one primitive invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Motion {
    /// At target and at rest
    Idle,
    /// Moving, but the next step is not due yet
    Waiting,
    /// One step was taken
    Stepped(Direction),
}

/// Per-axis stepping algorithm
///
/// Implementations own their step output and any ramp state. The axis
/// state stays with the mount; it is lent to the primitive on each call.
pub trait MotionPrimitive {
    /// Take at most one step toward `axis.target()`
    ///
    /// Must never block. Every step taken is recorded on `axis`.
    fn advance(&mut self, axis: &mut AxisState, now_us: u64) -> Motion;

    /// A new target was committed on `axis`
    fn retarget(&mut self, axis: &AxisState);

    /// The max speed of `axis` changed
    ///
    /// Takes effect on a move already in progress.
    fn set_max_speed(&mut self, axis: &AxisState);

    /// The axis position was redefined; forget any ramp speed
    fn reset(&mut self);
}
