//! Timer traits
//!
//! Two clocks drive the display: the engine clock that times one full
//! rotation between sensor marks, and the angular-step timer whose expiry
//! paints the next bitmap column.

/// Free-running clock used to measure the rotation period
pub trait RotationClock {
    /// Ticks elapsed since the previous call, in engine ticks
    ///
    /// Each call restarts the measurement, so calling once per sensor mark
    /// yields the period of the last revolution.
    fn elapsed_ticks(&mut self) -> u32;
}

/// Reprogrammable periodic timer generating angular-step ticks
///
/// A new period applies from the next countdown; the countdown in
/// progress finishes at the old period.
pub trait StepTimer {
    /// Write the period register, in step-timer ticks (never zero)
    fn set_period(&mut self, ticks: u32);

    /// Currently programmed period
    fn period(&self) -> u32;
}
