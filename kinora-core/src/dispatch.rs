//! Event dispatch
//!
//! One service pass takes every pending event and runs its handler, in
//! [`SERVICE_ORDER`]. A rotation update runs before the render so the next
//! column already uses the new step grid. Each flag is cleared before its
//! handler runs; an occurrence arriving mid-handler is kept for the next
//! pass.

use crate::config::DisplayConfig;
use crate::events::{EventFlags, EventKind};
use crate::picture::{change_picture, Picture, SelectOutcome};
use crate::render::FrameRenderer;
use crate::sync::{update_resolution_time, EngineTimer, PictureTimer, SyncOutcome, SyncRules};
use crate::traits::{LatchDriver, RotationClock, StepTimer};

/// Order in which pending events are serviced within a pass
pub const SERVICE_ORDER: [EventKind; 3] = [EventKind::Engine, EventKind::Leds, EventKind::Bluetooth];

/// What a service pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DispatchReport {
    /// Rotation update outcome
    pub sync: Option<SyncOutcome>,
    /// Step painted by the renderer
    pub rendered_step: Option<u16>,
    /// Picture select outcome
    pub select: Option<SelectOutcome>,
    /// Step grid recomputed for the new picture's resolution; a rejection
    /// means the switch was undone
    pub retarget: Option<SyncOutcome>,
}

impl DispatchReport {
    /// Check if nothing was pending
    pub fn is_idle(&self) -> bool {
        self.sync.is_none()
            && self.rendered_step.is_none()
            && self.select.is_none()
            && self.retarget.is_none()
    }
}

/// Everything the dispatch loop owns
pub struct PovContext<C, T, L> {
    engine: EngineTimer<C>,
    picture_timer: PictureTimer<T>,
    picture: Picture,
    renderer: FrameRenderer<L>,
    rules: SyncRules,
}

impl<C, T, L> PovContext<C, T, L>
where
    C: RotationClock,
    T: StepTimer,
    L: LatchDriver,
{
    /// Build the context and program the step timer from the initial
    /// rotation period
    ///
    /// `config` is expected to have passed [`DisplayConfig::validate`].
    pub fn new(config: &DisplayConfig, clock: C, step_timer: T, renderer: FrameRenderer<L>) -> Self {
        let picture = Picture::new(config.default_picture);
        let rules = SyncRules::from_config(&config.timing);
        let engine = EngineTimer::new(clock, config.timing.initial_rotation_ticks);
        let mut picture_timer = PictureTimer::new(step_timer, picture.resolution());
        picture_timer.retarget(picture.resolution(), engine.ratio_time(), &rules);

        Self {
            engine,
            picture_timer,
            picture,
            renderer,
            rules,
        }
    }

    pub fn engine(&self) -> &EngineTimer<C> {
        &self.engine
    }

    pub fn picture_timer(&self) -> &PictureTimer<T> {
        &self.picture_timer
    }

    pub fn picture(&self) -> &Picture {
        &self.picture
    }

    pub fn renderer(&self) -> &FrameRenderer<L> {
        &self.renderer
    }

    pub fn rules(&self) -> &SyncRules {
        &self.rules
    }

    /// Switch all LEDs off
    pub fn blank(&mut self) -> Result<(), L::Error> {
        self.renderer.blank()
    }

    /// Run one pass over the pending events
    pub fn service(&mut self, events: &EventFlags) -> Result<DispatchReport, L::Error> {
        let mut report = DispatchReport::default();

        for kind in SERVICE_ORDER {
            match kind {
                EventKind::Engine => {
                    if events.take(EventKind::Engine) {
                        report.sync = Some(update_resolution_time(
                            &mut self.engine,
                            &mut self.picture_timer,
                            &self.rules,
                        ));
                    }
                }
                EventKind::Leds => {
                    if events.take(EventKind::Leds) {
                        report.rendered_step = Some(self.renderer.update_leds(&mut self.picture)?);
                    }
                }
                EventKind::Bluetooth => {
                    if let Some(index) = events.take_picture_request() {
                        self.select(index, &mut report);
                    }
                }
            }
        }

        Ok(report)
    }

    /// Switch pictures, moving the step grid to the new resolution
    ///
    /// A picture whose resolution has no valid grid at the last rotation
    /// period is not shown; the previous picture keeps its cursor.
    fn select(&mut self, index: u8, report: &mut DispatchReport) {
        let previous = self.picture;
        let outcome = change_picture(index, &mut self.picture);
        report.select = Some(outcome);

        if matches!(outcome, SelectOutcome::Switched { .. })
            && self.picture.resolution() != self.picture_timer.resolution()
        {
            let retarget = self.picture_timer.retarget(
                self.picture.resolution(),
                self.engine.ratio_time(),
                &self.rules,
            );
            if !retarget.is_updated() {
                self.picture = previous;
            }
            report.retarget = Some(retarget);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimingConfig;
    use crate::led::{Bank, LedLatch};
    use crate::picture::PictureId;
    use crate::sync::SyncRejection;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Clock whose next reading is set by the test
    #[derive(Clone, Default)]
    struct ScriptedClock(Rc<Cell<u32>>);

    impl RotationClock for ScriptedClock {
        fn elapsed_ticks(&mut self) -> u32 {
            self.0.get()
        }
    }

    #[derive(Default)]
    struct MockTimer {
        period: u32,
    }

    impl StepTimer for MockTimer {
        fn set_period(&mut self, ticks: u32) {
            self.period = ticks;
        }

        fn period(&self) -> u32 {
            self.period
        }
    }

    #[derive(Default)]
    struct ByteDriver {
        last: Option<u8>,
        writes: usize,
    }

    impl LatchDriver for ByteDriver {
        type Error = core::convert::Infallible;

        fn latch_data(&mut self, latch: &LedLatch) -> Result<(), Self::Error> {
            self.last = Some(latch.byte());
            self.writes += 1;
            Ok(())
        }
    }

    fn config() -> DisplayConfig {
        DisplayConfig {
            timing: TimingConfig {
                engine_tick_hz: 1,
                step_tick_hz: 1,
                min_rotation_ticks: 360,
                max_rotation_ticks: 100_000,
                initial_rotation_ticks: 3_600,
            },
            ..Default::default()
        }
    }

    fn context(clock: ScriptedClock) -> PovContext<ScriptedClock, MockTimer, ByteDriver> {
        let config = config();
        let renderer = FrameRenderer::from_config(&config, ByteDriver::default(), ByteDriver::default());
        PovContext::new(&config, clock, MockTimer::default(), renderer)
    }

    #[test]
    fn test_initial_grid_programmed() {
        let ctx = context(ScriptedClock::default());
        assert_eq!(ctx.engine().ratio_time(), 3_600);
        assert_eq!(ctx.picture_timer().resolution_time(), 10);
        assert_eq!(ctx.picture_timer().timer().period(), 10);
        assert_eq!(ctx.picture().id(), PictureId::HalfWheel);
    }

    #[test]
    fn test_idle_pass() {
        let mut ctx = context(ScriptedClock::default());
        let report = ctx.service(&EventFlags::new()).unwrap();
        assert!(report.is_idle());
        assert_eq!(ctx.renderer().driver(Bank::Upper).writes, 0);
    }

    #[test]
    fn test_rotation_then_render() {
        let clock = ScriptedClock::default();
        let mut ctx = context(clock.clone());
        let events = EventFlags::new();

        clock.0.set(7_200);
        events.source().rotation_mark();
        let report = ctx.service(&events).unwrap();
        assert_eq!(
            report.sync,
            Some(SyncOutcome::Updated {
                ratio_time: 7_200,
                resolution_time: 20,
            })
        );
        assert_eq!(ctx.picture_timer().timer().period(), 20);

        // One full rotation of step ticks
        for step in 0..360u16 {
            events.source().step_elapsed();
            let report = ctx.service(&events).unwrap();
            assert_eq!(report.rendered_step, Some(step));
        }
        assert_eq!(ctx.picture().step(), 0);
        assert_eq!(ctx.renderer().driver(Bank::Lower).writes, 360);
    }

    #[test]
    fn test_all_events_in_one_pass() {
        let clock = ScriptedClock::default();
        let mut ctx = context(clock.clone());
        let events = EventFlags::new();
        let source = events.source();

        clock.0.set(7_200);
        source.picture_requested(1);
        source.step_elapsed();
        source.rotation_mark();

        let report = ctx.service(&events).unwrap();
        assert!(report.sync.is_some_and(|sync| sync.is_updated()));
        // Rendered from the old picture, then switched
        assert_eq!(report.rendered_step, Some(0));
        assert_eq!(ctx.renderer().latch(Bank::Upper).byte(), 0xFF);
        assert_eq!(
            report.select,
            Some(SelectOutcome::Switched {
                from: PictureId::HalfWheel,
                to: PictureId::ClockFace,
            })
        );
        assert_eq!(ctx.picture().step(), 0);
        // Same resolution, no retarget needed
        assert_eq!(report.retarget, None);
        assert!(!events.any_pending());
    }

    #[test]
    fn test_rejected_rotation_keeps_grid() {
        let clock = ScriptedClock::default();
        let mut ctx = context(clock.clone());
        let events = EventFlags::new();

        clock.0.set(0);
        events.source().rotation_mark();
        let report = ctx.service(&events).unwrap();
        assert!(report.sync.is_some_and(|sync| !sync.is_updated()));
        assert_eq!(ctx.engine().ratio_time(), 3_600);
        assert_eq!(ctx.picture_timer().resolution_time(), 10);
    }

    #[test]
    fn test_overrun_renders_once() {
        let mut ctx = context(ScriptedClock::default());
        let events = EventFlags::new();
        events.source().step_elapsed();
        events.source().step_elapsed();

        ctx.service(&events).unwrap();
        assert_eq!(ctx.picture().step(), 1);
        assert!(ctx.service(&events).unwrap().is_idle());
    }

    #[test]
    fn test_unknown_select_ignored() {
        let mut ctx = context(ScriptedClock::default());
        let events = EventFlags::new();
        for _ in 0..5 {
            events.source().step_elapsed();
            ctx.service(&events).unwrap();
        }

        events.source().picture_requested(7);
        let report = ctx.service(&events).unwrap();
        assert_eq!(report.select, Some(SelectOutcome::Unknown(7)));
        assert_eq!(ctx.picture().id(), PictureId::HalfWheel);
        assert_eq!(ctx.picture().step(), 5);
    }

    #[test]
    fn test_switch_retargets_grid() {
        let clock = ScriptedClock::default();
        let mut ctx = context(clock.clone());
        let events = EventFlags::new();

        clock.0.set(7_200);
        events.source().rotation_mark();
        ctx.service(&events).unwrap();
        assert_eq!(ctx.picture_timer().resolution_time(), 20);

        events.source().picture_requested(PictureId::Starburst.index());
        let report = ctx.service(&events).unwrap();
        assert_eq!(
            report.retarget,
            Some(SyncOutcome::Updated {
                ratio_time: 7_200,
                resolution_time: 100,
            })
        );
        assert_eq!(ctx.picture().id(), PictureId::Starburst);
        assert_eq!(ctx.picture_timer().resolution(), 72);
        assert_eq!(ctx.picture_timer().timer().period(), 100);

        // Next rotation divides by the starburst's resolution
        clock.0.set(3_600);
        events.source().rotation_mark();
        let report = ctx.service(&events).unwrap();
        assert_eq!(
            report.sync,
            Some(SyncOutcome::Updated {
                ratio_time: 3_600,
                resolution_time: 50,
            })
        );

        // Cursor wraps at 72 rows
        for step in 0..72u16 {
            events.source().step_elapsed();
            assert_eq!(ctx.service(&events).unwrap().rendered_step, Some(step));
        }
        assert_eq!(ctx.picture().step(), 0);
    }

    #[test]
    fn test_switch_without_valid_grid_is_undone() {
        let mut config = config();
        config.default_picture = PictureId::Starburst;
        config.timing.min_rotation_ticks = 72;
        config.timing.initial_rotation_ticks = 100;
        let renderer = FrameRenderer::from_config(&config, ByteDriver::default(), ByteDriver::default());
        let mut ctx = PovContext::new(&config, ScriptedClock::default(), MockTimer::default(), renderer);
        let events = EventFlags::new();
        assert_eq!(ctx.picture_timer().resolution_time(), 1);

        for _ in 0..3 {
            events.source().step_elapsed();
            ctx.service(&events).unwrap();
        }

        // 100 ticks cannot be split into 360 steps
        events.source().picture_requested(PictureId::HalfWheel.index());
        let report = ctx.service(&events).unwrap();
        assert_eq!(
            report.retarget,
            Some(SyncOutcome::Rejected {
                period: 100,
                reason: SyncRejection::StepTooShort,
            })
        );
        assert_eq!(ctx.picture().id(), PictureId::Starburst);
        assert_eq!(ctx.picture().step(), 3);
        assert_eq!(ctx.picture_timer().resolution(), 72);
        assert_eq!(ctx.picture_timer().resolution_time(), 1);
        assert!(!report.is_idle());
    }

    #[test]
    fn test_retarget_alone_is_not_idle() {
        let report = DispatchReport {
            retarget: Some(SyncOutcome::Updated {
                ratio_time: 7_200,
                resolution_time: 20,
            }),
            ..Default::default()
        };
        assert!(!report.is_idle());
    }

    #[test]
    fn test_blank_on_start() {
        let mut ctx = context(ScriptedClock::default());
        ctx.blank().unwrap();
        assert_eq!(ctx.renderer().driver(Bank::Upper).last, Some(0));
        assert_eq!(ctx.renderer().driver(Bank::Lower).last, Some(0));
    }
}
