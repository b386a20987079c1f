//! Board-agnostic core logic for the astrotracker mount firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (step output, serial link)
//! - Per-axis state with soft travel limits
//! - Command interpreter with non-blocking payload assembly
//! - Speed management
//! - Motion primitive trait and a constant-acceleration ramp
//! - The [`Mount`] controller tying it all together once per cycle
//! - Configuration type definitions and embedded config parsing

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod axis;
pub mod config;
pub mod interpreter;
pub mod motion;
pub mod mount;
pub mod speed;
pub mod traits;

pub use axis::{AxisState, LimitViolation};
pub use interpreter::{Interpreter, Request, Step};
pub use motion::{AccelRamp, InstantMotion, Motion, MotionPrimitive};
pub use mount::{LinkFault, Mount, Outcome};
pub use speed::SpeedPolicy;

pub use astrotracker_protocol::{Axis, CoordinatePair, PayloadError, PayloadKind, Response};
