//! Hardware abstraction traits
//!
//! These traits define the interface between the mount logic and the
//! board-specific implementations living in the HAL and firmware crates.

pub mod link;
pub mod stepper;

pub use link::Link;
pub use stepper::{Direction, StepOutput};
