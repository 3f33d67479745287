//! Event mailboxes between hardware callbacks and the dispatch loop
//!
//! Each event source owns one single-slot mailbox. Posting to a full
//! mailbox overwrites it: two rotation marks (or two step ticks) that
//! arrive before the dispatch loop gets round to them are serviced once.
//! This coalescing is lossy on purpose and matches a plain interrupt flag.
//!
//! Callbacks only ever see an [`EventSource`], which can post but not
//! take. The dispatch loop takes from the [`EventFlags`] it owns.

use portable_atomic::{AtomicBool, AtomicU16, Ordering};

/// Marks a pending picture request in the picture mailbox
const REQUEST_PENDING: u16 = 0x100;

/// Event sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    /// Rotation sensor saw the reference mark
    Engine,
    /// Angular-step timer expired
    Leds,
    /// Picture select command received over serial
    Bluetooth,
}

/// Pending-event record shared with the hardware callbacks
#[derive(Debug)]
pub struct EventFlags {
    engine: AtomicBool,
    leds: AtomicBool,
    /// Bit 8 set = pending, low byte = picture index
    picture: AtomicU16,
}

impl Default for EventFlags {
    fn default() -> Self {
        Self::new()
    }
}

impl EventFlags {
    /// Create an empty record (usable in a `static`)
    pub const fn new() -> Self {
        Self {
            engine: AtomicBool::new(false),
            leds: AtomicBool::new(false),
            picture: AtomicU16::new(0),
        }
    }

    /// Posting handle for interrupt callbacks
    pub fn source(&self) -> EventSource<'_> {
        EventSource { flags: self }
    }

    /// Check whether an event is waiting, without taking it
    pub fn is_pending(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Engine => self.engine.load(Ordering::Acquire),
            EventKind::Leds => self.leds.load(Ordering::Acquire),
            EventKind::Bluetooth => self.picture.load(Ordering::Acquire) & REQUEST_PENDING != 0,
        }
    }

    /// Check whether any event is waiting
    pub fn any_pending(&self) -> bool {
        [EventKind::Engine, EventKind::Leds, EventKind::Bluetooth]
            .into_iter()
            .any(|kind| self.is_pending(kind))
    }

    /// Take an event, clearing its mailbox
    ///
    /// Returns true if the event was pending. An occurrence posted after
    /// this call stays pending for the next take.
    pub fn take(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Engine => self.engine.swap(false, Ordering::AcqRel),
            EventKind::Leds => self.leds.swap(false, Ordering::AcqRel),
            EventKind::Bluetooth => self.take_picture_request().is_some(),
        }
    }

    /// Take the pending picture request, if any
    pub fn take_picture_request(&self) -> Option<u8> {
        let slot = self.picture.swap(0, Ordering::AcqRel);
        if slot & REQUEST_PENDING != 0 {
            Some(slot as u8)
        } else {
            None
        }
    }
}

/// Posting capability handed to interrupt callbacks
#[derive(Debug, Clone, Copy)]
pub struct EventSource<'a> {
    flags: &'a EventFlags,
}

impl EventSource<'_> {
    /// Rotation sensor edge
    pub fn rotation_mark(&self) {
        self.flags.engine.store(true, Ordering::Release);
    }

    /// Angular-step timer expiry
    pub fn step_elapsed(&self) {
        self.flags.leds.store(true, Ordering::Release);
    }

    /// Picture select command; a newer request replaces an unserviced one
    pub fn picture_requested(&self, index: u8) {
        self.flags
            .picture
            .store(REQUEST_PENDING | index as u16, Ordering::Release);
    }
}
