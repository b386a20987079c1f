//! Build script for astrotracker-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates mount.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Lowest min_speed the mount accepts (steps/s)
const SPEED_FLOOR: i64 = 100;

/// Known keys per section, with the kind of value each takes
const SCHEMA: &[(&str, &[(&str, Kind)])] = &[
    (
        "link",
        &[("baudrate", Kind::Int), ("payload_timeout_ms", Kind::Int)],
    ),
    (
        "motion",
        &[
            ("jog_steps", Kind::Int),
            ("default_max_speed", Kind::Int),
            ("speed_step", Kind::Int),
            ("min_speed", Kind::Int),
            ("acceleration", Kind::Int),
        ],
    ),
    (
        "axis.x",
        &[
            ("invert_direction", Kind::Bool),
            ("enable_inverted", Kind::Bool),
        ],
    ),
    (
        "axis.y",
        &[
            ("invert_direction", Kind::Bool),
            ("enable_inverted", Kind::Bool),
        ],
    ),
];

#[derive(Clone, Copy)]
enum Kind {
    Int,
    Bool,
}

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate mount.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=mount.toml");

    let config_path = Path::new("mount.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: mount.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a mount.toml configuration file.            ║\n\
            ║  Please create one in the astrotracker-firmware directory.       ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read mount.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in mount.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_motion(&config, &mut errors);
    validate_link(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid mount configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=mount.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Look up a table by dotted section name
fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::Value> {
    name.split('.').try_fold(config, |value, part| value.get(part))
}

/// Check that every known section holds values of the right kind
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(table) = config.as_table() {
        for name in table.keys() {
            if name != "axis" && !SCHEMA.iter().any(|(s, _)| *s == name.as_str()) {
                errors.push(format!("unknown section [{}]", name));
            }
        }
    }

    for (name, keys) in SCHEMA {
        let Some(table) = section(config, name).and_then(|v| v.as_table()) else {
            continue;
        };
        for (key, kind) in *keys {
            let Some(value) = table.get(*key) else {
                continue;
            };
            match (kind, value) {
                (Kind::Int, toml::Value::Integer(v)) if *v < 0 || *v > i64::from(u32::MAX) => {
                    errors.push(format!("[{}] {} out of range", name, key));
                }
                (Kind::Int, toml::Value::Integer(_)) | (Kind::Bool, toml::Value::Boolean(_)) => {}
                (Kind::Int, _) => errors.push(format!("[{}] {} must be an integer", name, key)),
                (Kind::Bool, _) => errors.push(format!("[{}] {} must be true or false", name, key)),
            }
        }
    }
}

fn int(config: &toml::Value, name: &str, key: &str) -> Option<i64> {
    section(config, name)?.get(key)?.as_integer()
}

/// Motion values the mount relies on
fn validate_motion(config: &toml::Value, errors: &mut Vec<String>) {
    for key in ["acceleration", "jog_steps"] {
        if int(config, "motion", key) == Some(0) {
            errors.push(format!("[motion] {} must be greater than 0", key));
        }
    }

    let min_speed = int(config, "motion", "min_speed").unwrap_or(SPEED_FLOOR);
    if min_speed < SPEED_FLOOR {
        errors.push(format!("[motion] min_speed {} below {}", min_speed, SPEED_FLOOR));
    }

    let default_max_speed = int(config, "motion", "default_max_speed").unwrap_or(1000);
    if default_max_speed < min_speed {
        errors.push(format!(
            "[motion] default_max_speed {} below min_speed {}",
            default_max_speed, min_speed
        ));
    }
}

fn validate_link(config: &toml::Value, errors: &mut Vec<String>) {
    if int(config, "link", "baudrate") == Some(0) {
        errors.push("[link] baudrate must be greater than 0".to_string());
    }
}
