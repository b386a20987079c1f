//! Minimal TOML parser for the mount configuration
//!
//! Handles only the subset `mount.toml` uses. It does NOT implement the
//! full TOML spec.
//!
//! Supported:
//! - `[section]` and `[section.subsection]` headers
//! - `key = value` pairs with integer or boolean values
//! - Comments (`# ...`), including after a value
//!
//! Unknown keys are ignored so a newer file still loads on older firmware.

use super::types::{AxisHwConfig, MountConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value of the wrong type or out of range
    InvalidValue,
    /// Line is neither a header, a comment nor `key = value`
    InvalidLine,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Link,
    Motion,
    AxisX,
    AxisY,
}

/// Parse TOML text into a [`MountConfig`]
///
/// Keys not present in the input keep their default values.
pub fn parse_config(input: &str) -> Result<MountConfig, ParseError> {
    let mut config = MountConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = header
                .strip_suffix(']')
                .ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header.trim())?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header {
        "link" => Ok(Section::Link),
        "motion" => Ok(Section::Motion),
        "axis.x" => Ok(Section::AxisX),
        "axis.y" => Ok(Section::AxisY),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();

    // Remove inline comments
    let value = match value.split_once('#') {
        Some((value, _)) => value,
        None => value,
    }
    .trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an integer value, allowing `_` digit separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: heapless::String<24> = heapless::String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_axis(axis: &mut AxisHwConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "invert_direction" => axis.invert_direction = parse_bool(value)?,
        "enable_inverted" => axis.enable_inverted = parse_bool(value)?,
        _ => {} // Ignore unknown keys
    }
    Ok(())
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut MountConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => {}
        Section::Link => match key {
            "baudrate" => config.link.baudrate = parse_int(value)?,
            "payload_timeout_ms" => config.link.payload_timeout_ms = parse_int(value)?,
            _ => {}
        },
        Section::Motion => {
            let m = &mut config.motion;
            match key {
                "jog_steps" => m.jog_steps = parse_int(value)?,
                "default_max_speed" => m.default_max_speed = parse_int(value)?,
                "speed_step" => m.speed_step = parse_int(value)?,
                "min_speed" => m.min_speed = parse_int(value)?,
                "acceleration" => m.acceleration = parse_int(value)?,
                _ => {}
            }
        }
        Section::AxisX => apply_axis(&mut config.x, key, value)?,
        Section::AxisY => apply_axis(&mut config.y, key, value)?,
    }
    Ok(())
}
