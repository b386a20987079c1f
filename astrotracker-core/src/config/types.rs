//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::axis::DEFAULT_MAX_SPEED;
use crate::interpreter::DEFAULT_PAYLOAD_TIMEOUT_MS;
use crate::motion::DEFAULT_ACCELERATION;
use crate::speed::{SpeedPolicy, DEFAULT_MIN_SPEED, DEFAULT_SPEED_STEP, SPEED_FLOOR};

/// Steps per jog command (F/B/R/L)
pub const DEFAULT_JOG_STEPS: u32 = 200;

/// HC-05 factory baud rate
pub const DEFAULT_BAUDRATE: u32 = 9600;

/// Serial link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    /// UART baud rate
    pub baudrate: u32,
    /// Time allowed for a `Z`/`M` payload line (0 = no limit)
    pub payload_timeout_ms: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
            payload_timeout_ms: DEFAULT_PAYLOAD_TIMEOUT_MS,
        }
    }
}

/// Motion and speed configuration shared by both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionConfig {
    /// Steps per jog command
    pub jog_steps: u32,
    /// Max speed at boot (steps/s)
    pub default_max_speed: u32,
    /// Increment applied by `+` and `-` (steps/s)
    pub speed_step: u32,
    /// Lowest reachable max speed (steps/s)
    pub min_speed: u32,
    /// Ramp acceleration (steps/s^2)
    pub acceleration: u32,
}

impl MotionConfig {
    pub fn speed_policy(&self) -> SpeedPolicy {
        SpeedPolicy::new(self.speed_step, self.min_speed)
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            jog_steps: DEFAULT_JOG_STEPS,
            default_max_speed: DEFAULT_MAX_SPEED,
            speed_step: DEFAULT_SPEED_STEP,
            min_speed: DEFAULT_MIN_SPEED,
            acceleration: DEFAULT_ACCELERATION,
        }
    }
}

/// Per-axis driver wiring options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisHwConfig {
    /// Swap the physical meaning of forward and backward
    pub invert_direction: bool,
    /// Driver enable is active-low (TMC2209 and A4988 style)
    pub enable_inverted: bool,
}

impl Default for AxisHwConfig {
    fn default() -> Self {
        Self {
            invert_direction: false,
            enable_inverted: true,
        }
    }
}

/// Complete mount configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MountConfig {
    pub link: LinkConfig,
    pub motion: MotionConfig,
    pub x: AxisHwConfig,
    pub y: AxisHwConfig,
}

/// Configuration rejected by [`MountConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Acceleration must be non-zero
    ZeroAcceleration,
    /// Minimum speed below [`SPEED_FLOOR`]
    MinSpeedBelowFloor,
    /// Boot max speed below the minimum speed
    DefaultBelowMin,
    /// Jog increment must be non-zero
    ZeroJog,
    /// Baud rate must be non-zero
    ZeroBaudrate,
}

impl MountConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the invariants the mount relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let motion = &self.motion;
        if motion.acceleration == 0 {
            return Err(ConfigError::ZeroAcceleration);
        }
        if motion.min_speed < SPEED_FLOOR {
            return Err(ConfigError::MinSpeedBelowFloor);
        }
        if motion.default_max_speed < motion.min_speed {
            return Err(ConfigError::DefaultBelowMin);
        }
        if motion.jog_steps == 0 {
            return Err(ConfigError::ZeroJog);
        }
        if self.link.baudrate == 0 {
            return Err(ConfigError::ZeroBaudrate);
        }
        Ok(())
    }
}
