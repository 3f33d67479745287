//! Rotation period measurement and step grid computation

use super::scale::TickScale;
use crate::config::TimingConfig;
use crate::traits::{RotationClock, StepTimer};

/// Engine timer: last accepted rotation period and the clock measuring it
#[derive(Debug)]
pub struct EngineTimer<C> {
    ratio_time: u32,
    clock: C,
}

impl<C: RotationClock> EngineTimer<C> {
    /// Create an engine timer assuming `initial_ratio_time` until the
    /// first valid measurement
    pub fn new(clock: C, initial_ratio_time: u32) -> Self {
        Self {
            ratio_time: initial_ratio_time,
            clock,
        }
    }

    /// Last accepted rotation period, in engine ticks
    pub fn ratio_time(&self) -> u32 {
        self.ratio_time
    }

    /// Underlying clock
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

/// Picture timer: step grid derived from the rotation period
#[derive(Debug)]
pub struct PictureTimer<T> {
    resolution: u16,
    resolution_time: u32,
    timer: T,
}

impl<T: StepTimer> PictureTimer<T> {
    /// Create a picture timer; nothing is programmed until the first
    /// accepted period (see [`Self::retarget`])
    pub fn new(timer: T, resolution: u16) -> Self {
        Self {
            resolution,
            resolution_time: 0,
            timer,
        }
    }

    /// Angular steps per rotation
    pub fn resolution(&self) -> u16 {
        self.resolution
    }

    /// Duration of one angular step, in step-timer ticks
    pub fn resolution_time(&self) -> u32 {
        self.resolution_time
    }

    /// Underlying step timer
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Switch to a new resolution and recompute the grid for `ratio_time`
    ///
    /// The resolution only changes together with an accepted grid; a
    /// rejection leaves the timer as it was.
    pub fn retarget(&mut self, resolution: u16, ratio_time: u32, rules: &SyncRules) -> SyncOutcome {
        match rules.step_ticks(ratio_time, resolution) {
            Ok(ticks) => {
                self.resolution = resolution;
                self.program(ticks);
                SyncOutcome::Updated {
                    ratio_time,
                    resolution_time: ticks,
                }
            }
            Err(reason) => SyncOutcome::Rejected {
                period: ratio_time,
                reason,
            },
        }
    }

    fn program(&mut self, ticks: u32) {
        self.resolution_time = ticks;
        self.timer.set_period(ticks);
    }
}

/// Why a rotation period was not used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncRejection {
    /// No ticks elapsed
    ZeroPeriod,
    /// Shorter than the plausible minimum (sensor bounce, noise)
    TooShort,
    /// Longer than the plausible maximum (arm stalled, missed mark)
    TooLong,
    /// Picture has no angular steps
    ZeroResolution,
    /// One step would round to zero step-timer ticks
    StepTooShort,
}

/// Result of a synchronization attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncOutcome {
    /// New grid programmed
    Updated { ratio_time: u32, resolution_time: u32 },
    /// Measurement discarded, previous grid kept
    Rejected { period: u32, reason: SyncRejection },
}

impl SyncOutcome {
    /// Check if the step timer was reprogrammed
    pub fn is_updated(&self) -> bool {
        matches!(self, SyncOutcome::Updated { .. })
    }
}

/// Plausibility window and tick conversion for rotation periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncRules {
    /// Engine to step tick conversion
    pub scale: TickScale,
    /// Shortest accepted period, in engine ticks
    pub min_period: u32,
    /// Longest accepted period, in engine ticks
    pub max_period: u32,
}

impl Default for SyncRules {
    fn default() -> Self {
        Self {
            scale: TickScale::identity(),
            min_period: 1,
            max_period: u32::MAX,
        }
    }
}

impl SyncRules {
    /// Rules from the timing configuration
    pub fn from_config(timing: &TimingConfig) -> Self {
        Self {
            scale: TickScale::new(timing.engine_tick_hz, timing.step_tick_hz),
            min_period: timing.min_rotation_ticks,
            max_period: timing.max_rotation_ticks,
        }
    }

    /// Step duration for a rotation `period`, in step-timer ticks
    ///
    /// Truncates, so the step grid may fall short of a full rotation by
    /// less than one tick per step.
    pub fn step_ticks(&self, period: u32, resolution: u16) -> Result<u32, SyncRejection> {
        if period == 0 {
            return Err(SyncRejection::ZeroPeriod);
        }
        if period < self.min_period {
            return Err(SyncRejection::TooShort);
        }
        if period > self.max_period {
            return Err(SyncRejection::TooLong);
        }
        if resolution == 0 {
            return Err(SyncRejection::ZeroResolution);
        }

        let ticks = self.scale.to_step_ticks(period) / resolution as u64;
        match u32::try_from(ticks) {
            Ok(0) => Err(SyncRejection::StepTooShort),
            Ok(ticks) => Ok(ticks),
            Err(_) => Err(SyncRejection::TooLong),
        }
    }
}

/// Recompute the angular-step interval from the last rotation
///
/// Call once per rotation mark. Reads the ticks elapsed since the previous
/// call; a plausible period is stored as `ratio_time` and its step
/// duration programmed into the step timer (effective from the timer's
/// next countdown). An implausible one leaves both timers untouched.
pub fn update_resolution_time<C, T>(
    engine: &mut EngineTimer<C>,
    picture: &mut PictureTimer<T>,
    rules: &SyncRules,
) -> SyncOutcome
where
    C: RotationClock,
    T: StepTimer,
{
    let period = engine.clock.elapsed_ticks();

    match rules.step_ticks(period, picture.resolution) {
        Ok(ticks) => {
            engine.ratio_time = period;
            picture.program(ticks);
            SyncOutcome::Updated {
                ratio_time: period,
                resolution_time: ticks,
            }
        }
        Err(reason) => SyncOutcome::Rejected { period, reason },
    }
}
