//! GPIO step/direction stepper output
//!
//! Bit-bangs one step pulse per call, busy-waiting for the pulse width.

use astrotracker_core::config::AxisHwConfig;
use astrotracker_core::traits::{Direction, StepOutput};
use embassy_rp::gpio::{Level, Output, Pin};
use embassy_rp::Peri;
use embassy_time::Delay;
use embedded_hal::delay::DelayNs;

/// Step pulse high time (TMC2209 needs 100 ns, A4988 1 us)
pub const STEP_PULSE_NS: u32 = 2_000;

/// Direction setup time before the next step edge
pub const DIR_SETUP_NS: u32 = 1_000;

/// Stepper driver on plain GPIO pins
///
/// Direction and enable polarity come from the axis wiring options.
pub struct GpioStepper<'d> {
    step_pin: Output<'d>,
    dir_pin: Output<'d>,
    enable_pin: Output<'d>,
    config: AxisHwConfig,
    direction: Option<Direction>,
    enabled: bool,
    delay: Delay,
}

impl<'d> GpioStepper<'d> {
    /// Create a stepper output, initially disabled
    pub fn new<STEP: Pin, DIR: Pin, EN: Pin>(
        step_pin: Peri<'d, STEP>,
        dir_pin: Peri<'d, DIR>,
        enable_pin: Peri<'d, EN>,
        config: AxisHwConfig,
    ) -> Self {
        let step_pin = Output::new(step_pin, Level::Low);
        let dir_pin = Output::new(dir_pin, Level::Low);

        let enable_level = if config.enable_inverted {
            Level::High // Active low, so high = disabled
        } else {
            Level::Low
        };
        let enable_pin = Output::new(enable_pin, enable_level);

        Self {
            step_pin,
            dir_pin,
            enable_pin,
            config,
            direction: None,
            enabled: false,
            delay: Delay,
        }
    }

    fn set_direction(&mut self, direction: Direction) {
        let forward = (direction == Direction::Forward) != self.config.invert_direction;
        if forward {
            self.dir_pin.set_low();
        } else {
            self.dir_pin.set_high();
        }
        self.direction = Some(direction);
        self.delay.delay_ns(DIR_SETUP_NS);
    }
}

impl StepOutput for GpioStepper<'_> {
    fn step(&mut self, direction: Direction) {
        if self.direction != Some(direction) {
            self.set_direction(direction);
        }
        self.step_pin.set_high();
        self.delay.delay_ns(STEP_PULSE_NS);
        self.step_pin.set_low();
    }

    fn set_enabled(&mut self, enabled: bool) {
        if enabled != self.config.enable_inverted {
            self.enable_pin.set_high();
        } else {
            self.enable_pin.set_low();
        }
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
