//! Configuration loading
//!
//! The configuration is compiled in from `mount.toml`. A file that fails
//! to parse or validate falls back to the built-in defaults.

use defmt::*;

use astrotracker_core::config::{parse_config, MountConfig};

/// Embedded configuration (edit mount.toml and rebuild to customize)
const EMBEDDED_CONFIG: &str = include_str!("../mount.toml");

/// Load the embedded configuration
pub fn load_config() -> MountConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse mount.toml: {:?}, using defaults", e);
            return MountConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        error!("Invalid mount.toml: {:?}, using defaults", e);
        return MountConfig::default();
    }

    config
}
