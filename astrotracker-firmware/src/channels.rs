//! Inter-task communication channels

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Control loop cycles completed in the last second
pub static CYCLE_RATE: Signal<CriticalSectionRawMutex, u32> = Signal::new();
