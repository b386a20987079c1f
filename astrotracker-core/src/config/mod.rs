//! Mount configuration
//!
//! The firmware embeds a `mount.toml` and parses it at boot with
//! [`parse_config`]. A missing or invalid file leaves the defaults in place.

mod parse;
mod types;

pub use parse::{parse_config, ParseError};
pub use types::{AxisHwConfig, ConfigError, LinkConfig, MotionConfig, MountConfig};
