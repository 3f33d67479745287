//! Embassy async tasks
//!
//! The three hardware-facing tasks only post events. All display logic
//! runs in the dispatch task.

pub mod dispatch;
pub mod rotation_sensor;
pub mod serial_rx;
pub mod step_timer;

pub use dispatch::{dispatch_task, Display, Latch};
pub use rotation_sensor::rotation_sensor_task;
pub use serial_rx::serial_rx_task;
pub use step_timer::step_timer_task;
