//! Mount control loop task
//!
//! Runs the mount cycle as fast as the executor allows: at most one link
//! byte serviced per iteration, both axes advanced every iteration, then a
//! yield so other tasks get a turn.

use defmt::*;
use embassy_futures::yield_now;
use embassy_time::{Duration, Instant};

use astrotracker_core::{AccelRamp, Axis, Mount, Outcome};
use astrotracker_hal_rp2040::GpioStepper;

use crate::channels::CYCLE_RATE;
use crate::link::UartLink;

/// Mount driving the two GPIO steppers through acceleration ramps
pub type MountController = Mount<AccelRamp<GpioStepper<'static>>>;

/// Cycle rate reporting period
const RATE_PERIOD: Duration = Duration::from_secs(1);

/// Control loop task - owns the mount and the host link
#[embassy_executor::task]
pub async fn control_loop_task(mut mount: MountController, mut link: UartLink) {
    info!("Control loop started");

    let mut cycles: u32 = 0;
    let mut period_start = Instant::now();

    loop {
        let now = Instant::now();

        match mount.cycle(&mut link, now.as_micros()) {
            Ok(Some(outcome)) => log_outcome(&mount, &outcome),
            Ok(None) => {}
            Err(fault) => {
                if let Some(outcome) = fault.outcome {
                    log_outcome(&mount, &outcome);
                }
                warn!("Link error: {:?}", fault.error);
            }
        }

        cycles = cycles.wrapping_add(1);
        if now.duration_since(period_start) >= RATE_PERIOD {
            CYCLE_RATE.signal(cycles);
            cycles = 0;
            period_start = now;
        }

        yield_now().await;
    }
}

fn log_outcome(mount: &MountController, outcome: &Outcome) {
    match *outcome {
        Outcome::Ignored(byte) => debug!("Ignored byte {:#x}", byte),
        Outcome::AwaitingPayload(kind) => debug!("Awaiting {:?} payload", kind),
        Outcome::MoveAccepted { axis, target } => {
            let state = mount.axis(axis);
            info!(
                "{:?} move to {} (at {}, {} steps/s)",
                axis,
                target,
                state.current_position(),
                state.max_speed()
            );
        }
        Outcome::MoveRejected { axis, violation } => warn!(
            "{:?} move to {} outside [{}, {}]",
            axis, violation.candidate, violation.zero, violation.max
        ),
        Outcome::ZeroDeclared(pos) => info!("Zero declared at {},{}", pos.x, pos.y),
        Outcome::LimitsDeclared(pos) => info!("Limits declared at {},{}", pos.x, pos.y),
        Outcome::PositionReported(pos) => debug!("Position {},{}", pos.x, pos.y),
        Outcome::PositionOutOfLimits(pos) => {
            let x = mount.axis(Axis::X);
            let y = mount.axis(Axis::Y);
            warn!(
                "Position {},{} outside limits X [{}, {}] Y [{}, {}]",
                pos.x,
                pos.y,
                x.zero_reference(),
                x.max_reference(),
                y.zero_reference(),
                y.max_reference()
            );
        }
        Outcome::SpeedChanged { max_speed } => info!("Max speed {} steps/s", max_speed),
        Outcome::PayloadRejected { kind, error } => {
            warn!("{:?} payload rejected: {:?}", kind, error)
        }
        Outcome::PayloadTimedOut(kind) => warn!("{:?} payload timed out", kind),
    }
}
