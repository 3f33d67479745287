//! Tick domain conversion

/// Converts engine-clock ticks into step-timer ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickScale {
    engine_hz: u32,
    step_hz: u32,
}

impl TickScale {
    /// Scale between an engine clock and a step clock
    pub const fn new(engine_hz: u32, step_hz: u32) -> Self {
        Self { engine_hz, step_hz }
    }

    /// Both timers count in the same unit
    pub const fn identity() -> Self {
        Self::new(1, 1)
    }

    /// Engine clock rate in Hz
    pub const fn engine_hz(&self) -> u32 {
        self.engine_hz
    }

    /// Step clock rate in Hz
    pub const fn step_hz(&self) -> u32 {
        self.step_hz
    }

    /// Convert an engine tick count to step ticks, truncating
    ///
    /// Returns 0 for a zero engine rate.
    pub fn to_step_ticks(&self, engine_ticks: u32) -> u64 {
        (engine_ticks as u64 * self.step_hz as u64)
            .checked_div(self.engine_hz as u64)
            .unwrap_or(0)
    }
}

impl Default for TickScale {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let scale = TickScale::identity();
        assert_eq!(scale.to_step_ticks(7200), 7200);
    }

    #[test]
    fn test_engine_to_microseconds() {
        // 10 kHz engine clock, 1 MHz step clock
        let scale = TickScale::new(10_000, 1_000_000);
        assert_eq!(scale.to_step_ticks(1), 100);
        assert_eq!(scale.to_step_ticks(1_000), 100_000);
    }

    #[test]
    fn test_no_overflow_on_large_counts() {
        let scale = TickScale::new(1, 1_000_000);
        assert_eq!(scale.to_step_ticks(u32::MAX), u32::MAX as u64 * 1_000_000);
    }

    #[test]
    fn test_zero_engine_rate() {
        assert_eq!(TickScale::new(0, 1_000).to_step_ticks(500), 0);
    }
}
