//! Rotation sensor task
//!
//! Timestamps every pass of the reference mark and raises the engine
//! event. Bounce and missed marks are filtered by the plausibility window
//! when the period is evaluated.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Instant;
use portable_atomic::Ordering;

use crate::channels::{EVENTS, LAST_MARK, WAKE};

/// Rotation sensor task
///
/// `falling_edge` selects the edge that marks the reference (active-low
/// sensors mark on the falling edge).
#[embassy_executor::task]
pub async fn rotation_sensor_task(mut sensor: Input<'static>, falling_edge: bool) {
    info!("Rotation sensor task started");

    let events = EVENTS.source();

    loop {
        if falling_edge {
            sensor.wait_for_falling_edge().await;
        } else {
            sensor.wait_for_rising_edge().await;
        }

        LAST_MARK.store(Instant::now().as_ticks(), Ordering::Release);
        events.rotation_mark();
        WAKE.signal(());
    }
}
