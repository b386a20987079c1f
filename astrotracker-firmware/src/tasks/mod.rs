//! Embassy async tasks

pub mod control_loop;

pub use control_loop::{control_loop_task, MountController};
