//! Angular-step timer task
//!
//! Free-running periodic timer with a reprogrammable period. Deadlines
//! accumulate so rounding does not drift across a rotation. A new period
//! takes effect from the next countdown.

use defmt::*;
use embassy_time::{Duration, Instant, Timer, TICK_HZ};
use portable_atomic::Ordering;

use crate::channels::{EVENTS, STEP_PERIOD, STEP_RETUNED, WAKE};

/// Convert step-timer ticks to an embassy duration (at least one tick)
fn step_duration(ticks: u32, step_tick_hz: u32) -> Duration {
    let embassy_ticks = (ticks as u64).saturating_mul(TICK_HZ) / step_tick_hz.max(1) as u64;
    Duration::from_ticks(embassy_ticks.max(1))
}

/// Step timer task
#[embassy_executor::task]
pub async fn step_timer_task(step_tick_hz: u32) {
    info!("Step timer task started ({} Hz)", step_tick_hz);

    let events = EVENTS.source();
    let mut deadline = Instant::now();

    loop {
        let period = STEP_PERIOD.load(Ordering::Acquire);
        if period == 0 {
            // Not programmed yet
            STEP_RETUNED.wait().await;
            deadline = Instant::now();
            continue;
        }

        let step = step_duration(period, step_tick_hz);
        deadline += step;
        Timer::at(deadline).await;

        events.step_elapsed();
        WAKE.signal(());

        // More than a full step behind: the missed ticks coalesce
        let now = Instant::now();
        if now.saturating_duration_since(deadline) > step {
            trace!("Step timer overrun");
            deadline = now;
        }
    }
}
