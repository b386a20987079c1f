//! Two-axis mount controller
//!
//! [`Mount`] owns both axis states, their motion primitives and the
//! command interpreter. The firmware calls [`Mount::cycle`] in a tight
//! loop: each call services at most one link byte, then advances both
//! axes exactly once regardless of what the byte did.

mod outcome;

pub use outcome::Outcome;

use astrotracker_protocol::{Axis, CoordinatePair};

use crate::axis::AxisState;
use crate::config::MountConfig;
use crate::interpreter::{Interpreter, Request, Step};
use crate::motion::{Motion, MotionPrimitive};
use crate::speed::SpeedPolicy;
use crate::traits::Link;

/// A link failure during one cycle
///
/// `outcome` is set when the command was already applied and only its
/// response could not be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkFault<E> {
    pub error: E,
    pub outcome: Option<Outcome>,
}

/// Mount state and per-axis motion
pub struct Mount<P: MotionPrimitive> {
    x: AxisState,
    y: AxisState,
    x_motion: P,
    y_motion: P,
    interpreter: Interpreter,
    jog_steps: i32,
    speed: SpeedPolicy,
}

impl<P: MotionPrimitive> Mount<P> {
    /// Create a mount at the origin with no limits
    pub fn new(config: &MountConfig, x_motion: P, y_motion: P) -> Self {
        let max_speed = config.motion.default_max_speed;
        Self {
            x: AxisState::new(max_speed),
            y: AxisState::new(max_speed),
            x_motion,
            y_motion,
            interpreter: Interpreter::new(config.link.payload_timeout_ms),
            jog_steps: i32::try_from(config.motion.jog_steps).unwrap_or(i32::MAX),
            speed: config.motion.speed_policy(),
        }
    }

    pub fn axis(&self, axis: Axis) -> &AxisState {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    pub fn motion(&self, axis: Axis) -> &P {
        match axis {
            Axis::X => &self.x_motion,
            Axis::Y => &self.y_motion,
        }
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Current positions of both axes
    pub fn position(&self) -> CoordinatePair {
        CoordinatePair::new(self.x.current_position(), self.y.current_position())
    }

    /// Check if both axes rest on their targets
    pub fn at_target(&self) -> bool {
        self.x.at_target() && self.y.at_target()
    }

    /// Run one control cycle
    ///
    /// Motion is advanced even when the link fails; the link error is
    /// returned afterwards.
    pub fn cycle<L: Link>(
        &mut self,
        link: &mut L,
        now_us: u64,
    ) -> Result<Option<Outcome>, LinkFault<L::Error>> {
        let serviced = self.service(link, now_us);
        self.advance(now_us);
        serviced
    }

    fn service<L: Link>(
        &mut self,
        link: &mut L,
        now_us: u64,
    ) -> Result<Option<Outcome>, LinkFault<L::Error>> {
        // An expired payload takes this cycle's byte slot
        if let Some(outcome) = self.expire_payload(now_us) {
            return Ok(Some(outcome));
        }

        let byte = match link.poll_byte() {
            Ok(Some(byte)) => byte,
            Ok(None) => return Ok(None),
            Err(error) => {
                return Err(LinkFault {
                    error,
                    outcome: None,
                })
            }
        };
        let outcome = self.service_byte(byte, now_us);

        if let Some(response) = outcome.as_ref().and_then(Outcome::response) {
            if let Err(error) = link.write_line(&response.to_line()) {
                return Err(LinkFault { error, outcome });
            }
        }
        Ok(outcome)
    }

    /// Interpret one byte received at `now_us`
    ///
    /// Returns `None` for a payload byte that did not complete its line.
    pub fn service_byte(&mut self, byte: u8, now_us: u64) -> Option<Outcome> {
        let step = self.interpreter.feed(byte, now_us)?;
        Some(self.apply(step))
    }

    /// Drop a payload line whose timeout elapsed
    pub fn expire_payload(&mut self, now_us: u64) -> Option<Outcome> {
        let step = self.interpreter.expire(now_us)?;
        Some(self.apply(step))
    }

    /// Invoke both motion primitives once
    pub fn advance(&mut self, now_us: u64) -> (Motion, Motion) {
        let x = self.x_motion.advance(&mut self.x, now_us);
        let y = self.y_motion.advance(&mut self.y, now_us);
        (x, y)
    }

    fn apply(&mut self, step: Step) -> Outcome {
        match step {
            Step::Request(request) => self.execute(request),
            Step::Ignored(byte) => Outcome::Ignored(byte),
            Step::AwaitingPayload(kind) => Outcome::AwaitingPayload(kind),
            Step::Rejected(kind, error) => Outcome::PayloadRejected { kind, error },
            Step::TimedOut(kind) => Outcome::PayloadTimedOut(kind),
        }
    }

    fn execute(&mut self, request: Request) -> Outcome {
        match request {
            Request::Jog { axis, forward } => self.jog(axis, forward),
            Request::Zero(pair) => {
                self.x.declare_zero(pair.x);
                self.y.declare_zero(pair.y);
                self.x_motion.reset();
                self.y_motion.reset();
                Outcome::ZeroDeclared(pair)
            }
            Request::Max(pair) => {
                self.x.declare_max(pair.x);
                self.y.declare_max(pair.y);
                Outcome::LimitsDeclared(pair)
            }
            Request::ReportPosition => {
                let position = self.position();
                if self.x.report().is_ok() && self.y.report().is_ok() {
                    Outcome::PositionReported(position)
                } else {
                    Outcome::PositionOutOfLimits(position)
                }
            }
            Request::SpeedUp => self.set_speed(self.speed.raise(self.x.max_speed())),
            Request::SpeedDown => self.set_speed(self.speed.lower(self.x.max_speed())),
        }
    }

    fn jog(&mut self, axis: Axis, forward: bool) -> Outcome {
        let delta = if forward {
            self.jog_steps
        } else {
            -self.jog_steps
        };
        let (state, motion) = match axis {
            Axis::X => (&mut self.x, &mut self.x_motion),
            Axis::Y => (&mut self.y, &mut self.y_motion),
        };

        match state.request_move(delta) {
            Ok(target) => {
                motion.retarget(state);
                Outcome::MoveAccepted { axis, target }
            }
            Err(violation) => Outcome::MoveRejected { axis, violation },
        }
    }

    fn set_speed(&mut self, max_speed: u32) -> Outcome {
        self.x.set_max_speed(max_speed);
        self.y.set_max_speed(max_speed);
        self.x_motion.set_max_speed(&self.x);
        self.y_motion.set_max_speed(&self.y);
        Outcome::SpeedChanged { max_speed }
    }
}
