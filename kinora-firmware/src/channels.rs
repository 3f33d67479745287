//! Inter-task communication
//!
//! Hardware-facing tasks post into [`EVENTS`] and wake the dispatch task.
//! The dispatch task is the only one that takes from the mailboxes.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicU32, AtomicU64};

use kinora_core::events::EventFlags;

/// Pending rotation marks, step ticks and picture requests
pub static EVENTS: EventFlags = EventFlags::new();

/// Raised after every post to [`EVENTS`]
pub static WAKE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Timestamp of the latest rotation mark, in embassy ticks
pub static LAST_MARK: AtomicU64 = AtomicU64::new(0);

/// Angular-step period in step-timer ticks (0 = not programmed yet)
pub static STEP_PERIOD: AtomicU32 = AtomicU32::new(0);

/// Raised when the step period is reprogrammed
pub static STEP_RETUNED: Signal<CriticalSectionRawMutex, ()> = Signal::new();
