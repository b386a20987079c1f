//! Per-axis state and soft travel limits

mod limits;
mod state;

pub use limits::{admissible, LimitViolation};
pub use state::{AxisState, DEFAULT_MAX_SPEED};
