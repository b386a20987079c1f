//! Motion primitives
//!
//! A motion primitive moves one axis at most one step per invocation
//! toward its target, at up to the axis max speed. The control loop calls
//! it exactly once per axis per cycle.

mod instant;
mod primitive;
mod ramp;

pub use instant::InstantMotion;
pub use primitive::{Motion, MotionPrimitive};
pub use ramp::{AccelRamp, DEFAULT_ACCELERATION};
