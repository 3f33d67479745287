//! Rotation clock and step timer backed by embassy-time
//!
//! The rotation sensor task timestamps each mark; [`MarkClock`] turns the
//! distance between consecutive marks into engine ticks. [`SharedStepTimer`]
//! publishes the step period to the step timer task, which picks it up at
//! its next countdown.

use embassy_time::TICK_HZ;
use portable_atomic::Ordering;

use kinora_core::traits::{RotationClock, StepTimer};

use crate::channels::{LAST_MARK, STEP_PERIOD, STEP_RETUNED};

/// Rotation clock reading the sensor mark timestamps
///
/// The first mark only starts the measurement: it reads as zero ticks,
/// which the synchronizer rejects.
pub struct MarkClock {
    previous: Option<u64>,
    engine_hz: u32,
}

impl MarkClock {
    pub fn new(engine_hz: u32) -> Self {
        Self {
            previous: None,
            engine_hz,
        }
    }
}

impl RotationClock for MarkClock {
    fn elapsed_ticks(&mut self) -> u32 {
        let mark = LAST_MARK.load(Ordering::Acquire);
        let previous = self.previous.replace(mark);
        mark_interval(previous, mark, self.engine_hz, TICK_HZ)
    }
}

/// Engine ticks between two mark timestamps taken at `tick_hz`
fn mark_interval(previous: Option<u64>, mark: u64, engine_hz: u32, tick_hz: u64) -> u32 {
    let Some(previous) = previous else {
        return 0;
    };
    let elapsed = mark.saturating_sub(previous);
    let ticks = elapsed.saturating_mul(engine_hz as u64) / tick_hz;
    u32::try_from(ticks).unwrap_or(u32::MAX)
}

/// Step timer handle shared with the step timer task
pub struct SharedStepTimer;

impl StepTimer for SharedStepTimer {
    fn set_period(&mut self, ticks: u32) {
        STEP_PERIOD.store(ticks, Ordering::Release);
        STEP_RETUNED.signal(());
    }

    fn period(&self) -> u32 {
        STEP_PERIOD.load(Ordering::Acquire)
    }
}
