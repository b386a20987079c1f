//! Constant-acceleration step ramp
//!
//! Step timing follows David Austin's recurrence for the interval between
//! successive steps of a linearly accelerating stepper:
//!
//! ```text
//! c0 = 0.676 * sqrt(2 / a) * 1e6          first interval (us)
//! cn = cn-1 - 2 * cn-1 / (4n + 1)         n > 0 accelerating, n < 0 decelerating
//! cmin = 1e6 / max_speed                  cruise interval
//! ```
//!
//! All arithmetic is integer. Intervals are kept in microseconds scaled by
//! 256 so the recurrence does not collapse at high speeds on a core with
//! no FPU.
//!
//! `n` doubles as the ramp length: while accelerating it counts the steps
//! taken from rest, which is also the number of steps needed to stop. It
//! is frozen while cruising at `cmin`.

use super::{Motion, MotionPrimitive};
use crate::axis::AxisState;
use crate::traits::{Direction, StepOutput};

/// Acceleration used when none is configured (steps/s^2)
pub const DEFAULT_ACCELERATION: u32 = 400;

/// Fixed-point scale of stored intervals
const FRAC_BITS: u32 = 8;

/// One second in scaled microseconds
const SECOND_Q8: i64 = 1_000_000 << FRAC_BITS;

/// Integer square root (floor)
fn isqrt(value: u64) -> u64 {
    if value < 2 {
        return value;
    }
    let mut x = value;
    let mut y = value / 2 + value % 2;
    while y < x {
        x = y;
        y = (x + value / x) / 2;
    }
    x
}

/// Cruise interval for a max speed, rounded up so the rate never exceeds it
fn cruise_interval(max_speed: u32) -> i64 {
    let speed = i64::from(max_speed.max(1));
    ((SECOND_Q8 + speed - 1) / speed).max(1)
}

/// AccelStepper-style ramp driving a step/direction output
pub struct AccelRamp<S: StepOutput> {
    output: S,
    acceleration: u32,
    /// First interval from rest (us << 8)
    c0: i64,
    /// Cruise interval (us << 8)
    cmin: i64,
    /// Current interval (us << 8)
    cn: i64,
    /// Ramp step counter; negative while decelerating
    n: i64,
    direction: Direction,
    /// Whole microseconds until the next step; 0 when at rest
    interval_us: u64,
    last_step_us: u64,
}

impl<S: StepOutput> AccelRamp<S> {
    /// Create a ramp and enable the output
    ///
    /// A zero acceleration is treated as 1 step/s^2.
    pub fn new(mut output: S, acceleration: u32, max_speed: u32) -> Self {
        let acceleration = acceleration.max(1);
        let root = isqrt((2_000_000_000_000u64 << 16) / u64::from(acceleration));
        let c0 = i64::try_from(676 * root / 1000).unwrap_or(i64::MAX);

        output.set_enabled(true);

        Self {
            output,
            acceleration,
            c0,
            cmin: cruise_interval(max_speed),
            cn: 0,
            n: 0,
            direction: Direction::Forward,
            interval_us: 0,
            last_step_us: 0,
        }
    }

    pub fn output(&self) -> &S {
        &self.output
    }

    /// Check if the ramp is at rest
    pub fn is_stopped(&self) -> bool {
        self.interval_us == 0
    }

    /// Interval before the next step (us), 0 at rest
    pub fn interval_us(&self) -> u64 {
        self.interval_us
    }

    /// Current speed in steps/s
    pub fn speed(&self) -> u32 {
        if self.interval_us == 0 || self.cn <= 0 {
            return 0;
        }
        u32::try_from(SECOND_Q8 / self.cn).unwrap_or(u32::MAX)
    }

    /// Steps needed to stop from `speed` steps/s
    fn steps_to_stop(&self, speed: i64) -> i64 {
        speed.saturating_mul(speed) / (2 * i64::from(self.acceleration))
    }

    /// Plan the interval before the next step
    fn compute_next(&mut self, distance: i64) {
        let ramp = self.n.abs();
        if distance == 0 && ramp <= 1 {
            self.stop();
            return;
        }

        let ahead = distance * i64::from(self.direction.delta());
        if self.n > 0 {
            // Target reached, behind us, or too close to stop in time
            if ahead <= ramp {
                self.n = -ramp;
            }
        } else if self.n < 0 && ahead > ramp + 1 {
            self.n = ramp;
        }

        if self.n == 0 {
            self.cn = self.c0;
            self.direction = if distance > 0 {
                Direction::Forward
            } else {
                Direction::Backward
            };
            self.n = 1;
        } else {
            let next = self.cn - (2 * self.cn) / (4 * self.n + 1);
            if next <= self.cmin {
                self.cn = self.cmin;
                if self.n < 0 {
                    self.n += 1;
                }
            } else {
                self.cn = next;
                self.n += 1;
            }
        }

        self.interval_us = self.whole_interval();
    }

    fn whole_interval(&self) -> u64 {
        let cn = u64::try_from(self.cn).unwrap_or(0);
        (cn + (1 << FRAC_BITS) - 1) >> FRAC_BITS
    }

    fn stop(&mut self) {
        self.n = 0;
        self.interval_us = 0;
    }
}

impl<S: StepOutput> MotionPrimitive for AccelRamp<S> {
    fn advance(&mut self, axis: &mut AxisState, now_us: u64) -> Motion {
        if self.interval_us == 0 {
            if axis.at_target() {
                return Motion::Idle;
            }
            self.compute_next(axis.distance_to_go());
        }

        if now_us.saturating_sub(self.last_step_us) < self.interval_us {
            return Motion::Waiting;
        }

        let direction = self.direction;
        self.output.step(direction);
        axis.record_step(direction);
        self.last_step_us = now_us;
        self.compute_next(axis.distance_to_go());
        Motion::Stepped(direction)
    }

    fn retarget(&mut self, axis: &AxisState) {
        // While moving, the next step re-plans against the new target
        if self.interval_us == 0 && !axis.at_target() {
            self.compute_next(axis.distance_to_go());
        }
    }

    fn set_max_speed(&mut self, axis: &AxisState) {
        self.cmin = cruise_interval(axis.max_speed());
        if self.n > 0 {
            let cruise = self.steps_to_stop(SECOND_Q8 / self.cmin);
            self.n = self.n.min(cruise).max(1);
        }
        if self.interval_us != 0 && self.cn < self.cmin {
            self.cn = self.cmin;
            self.interval_us = self.whole_interval();
        }
    }

    fn reset(&mut self) {
        self.stop();
        self.cn = 0;
    }
}
