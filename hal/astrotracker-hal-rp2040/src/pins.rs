//! Board pin assignments
//!
//! The mount uses the X and Y driver sockets of a BTT SKR Pico. Link
//! UART0 sits on GPIO0 (TX) and GPIO1 (RX).

/// GPIO numbers of one driver socket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperPins {
    pub step: u8,
    pub dir: u8,
    pub enable: u8,
}

/// X axis socket
pub const X_PINS: StepperPins = StepperPins {
    step: 11,
    dir: 10,
    enable: 12,
};

/// Y axis socket
pub const Y_PINS: StepperPins = StepperPins {
    step: 6,
    dir: 5,
    enable: 7,
};

/// Build the X axis [`GpioStepper`](crate::GpioStepper) from peripherals
///
/// Takes the pins listed in [`X_PINS`]. Usage:
/// ```ignore
/// let x = x_stepper!(p, config.x);
/// ```
#[macro_export]
macro_rules! x_stepper {
    ($p:expr, $config:expr) => {
        $crate::GpioStepper::new($p.PIN_11, $p.PIN_10, $p.PIN_12, $config)
    };
}

/// Build the Y axis [`GpioStepper`](crate::GpioStepper) from the [`Y_PINS`]
#[macro_export]
macro_rules! y_stepper {
    ($p:expr, $config:expr) => {
        $crate::GpioStepper::new($p.PIN_6, $p.PIN_5, $p.PIN_7, $config)
    };
}

