//! RP2040-specific HAL for the astrotracker mount firmware
//!
//! Provides RP2040 implementations of the `astrotracker-core` hardware
//! traits:
//!
//! - GPIO step/direction stepper output
//! - Board pin assignments

#![no_std]

pub mod pins;
pub mod stepper;

pub use stepper::GpioStepper;
