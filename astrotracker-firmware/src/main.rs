//! Astrotracker - Two-axis mount firmware
//!
//! Main firmware binary for RP2040-based boards. Drives the X and Y
//! steppers of a motorized mount from single-byte commands received over
//! a Bluetooth serial module.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use astrotracker_core::{AccelRamp, Mount};
use astrotracker_hal_rp2040::pins::{X_PINS, Y_PINS};
use astrotracker_hal_rp2040::{x_stepper, y_stepper};

use crate::channels::CYCLE_RATE;
use crate::config::load_config;
use crate::link::UartLink;

mod channels;
mod config;
mod link;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Astrotracker firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    info!(
        "Config: {} baud, jog {} steps, {} steps/s (step {}, min {}), accel {} steps/s^2",
        config.link.baudrate,
        config.motion.jog_steps,
        config.motion.default_max_speed,
        config.motion.speed_step,
        config.motion.min_speed,
        config.motion.acceleration
    );

    // Setup UART for the Bluetooth serial module
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.link.baudrate;

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    let link = UartLink::new(rx, tx);

    info!("UART initialized at {} baud", config.link.baudrate);

    // Stepper drivers (SKR Pico X and Y sockets)
    let x = x_stepper!(p, config.x);
    let y = y_stepper!(p, config.y);
    info!("X stepper: {}", X_PINS);
    info!("Y stepper: {}", Y_PINS);

    let motion = &config.motion;
    let mount = Mount::new(
        &config,
        AccelRamp::new(x, motion.acceleration, motion.default_max_speed),
        AccelRamp::new(y, motion.acceleration, motion.default_max_speed),
    );

    spawner.spawn(tasks::control_loop_task(mount, link)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        let rate = CYCLE_RATE.wait().await;
        trace!("Control loop heartbeat: {} cycles/s", rate);
    }
}
