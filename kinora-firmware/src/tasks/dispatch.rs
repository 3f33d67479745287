//! Dispatch task
//!
//! Owns the display state. Sleeps until a hardware task posts an event,
//! then services everything pending in priority order: rotation update,
//! render, picture select.

use defmt::*;
use embassy_rp::gpio::Output;

use kinora_core::dispatch::{DispatchReport, PovContext};
use kinora_core::picture::SelectOutcome;
use kinora_core::sync::SyncOutcome;
use kinora_drivers::ShiftRegisterLatch;

use crate::channels::{EVENTS, WAKE};
use crate::timing::{MarkClock, SharedStepTimer};

/// Latch driver on RP2040 GPIO
pub type Latch = ShiftRegisterLatch<Output<'static>>;

/// Display state owned by the dispatch task
pub type Display = PovContext<MarkClock, SharedStepTimer, Latch>;

/// Dispatch task
#[embassy_executor::task]
pub async fn dispatch_task(mut display: Display) {
    info!("Dispatch task started");

    // GPIO writes cannot fail on the RP2040
    match display.blank() {
        Ok(()) => {}
        Err(e) => match e {},
    }

    loop {
        WAKE.wait().await;

        while EVENTS.any_pending() {
            match display.service(&EVENTS) {
                Ok(report) => log_report(&report),
                Err(e) => match e {},
            }
        }
    }
}

fn log_report(report: &DispatchReport) {
    match report.sync {
        Some(SyncOutcome::Updated {
            ratio_time,
            resolution_time,
        }) => {
            debug!(
                "Rotation {} ticks, step {} ticks",
                ratio_time, resolution_time
            );
        }
        Some(SyncOutcome::Rejected { period, reason }) => {
            warn!("Rotation period {} rejected: {:?}", period, reason);
        }
        None => {}
    }

    if let Some(step) = report.rendered_step {
        trace!("Rendered step {}", step);
    }

    match report.select {
        Some(SelectOutcome::Switched { from, to }) => {
            info!("Picture {:?} -> {:?}", from, to);
        }
        Some(SelectOutcome::Unknown(index)) => {
            warn!("No picture with index {}, keeping current", index);
        }
        None => {}
    }

    if let Some(SyncOutcome::Rejected { period, reason }) = report.retarget {
        warn!(
            "Picture switch undone, no step grid at {} ticks: {:?}",
            period, reason
        );
    }
}
