// src/aura/animation.rs
//! One animation session: engine, spectrum source and surface, driven
//! frame by frame through a [`FrameScheduler`].

use rand::{Rng, rngs::StdRng};
use tracing::{debug, info};

use super::engine::AuraEngine;
use super::scheduler::FrameScheduler;
use super::surface::Surface;
use crate::analysis::{FrameColor, FrequencySource};

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

pub struct Animation<F, S, R = StdRng> {
    engine: AuraEngine<R>,
    source: F,
    surface: S,
    state: LoopState,
    last_color: FrameColor,
}

impl<F, S> Animation<F, S, StdRng>
where
    F: FrequencySource,
    S: Surface,
{
    /// A session over `surface`; the canvas size is read once, here.
    pub fn new(surface: S, source: F) -> Self {
        let engine = AuraEngine::new(surface.width(), surface.height());
        Self::from_parts(engine, surface, source)
    }
}

impl<F, S, R> Animation<F, S, R>
where
    F: FrequencySource,
    S: Surface,
    R: Rng,
{
    /// A session with a caller-supplied random source.
    pub fn with_rng(surface: S, source: F, rng: R) -> Self {
        let engine = AuraEngine::with_rng(surface.width(), surface.height(), rng);
        Self::from_parts(engine, surface, source)
    }

    fn from_parts(engine: AuraEngine<R>, surface: S, source: F) -> Self {
        Self {
            engine,
            source,
            surface,
            state: LoopState::Idle,
            last_color: FrameColor::default(),
        }
    }

    /// Begin the frame loop by requesting the first frame. Ignored unless idle.
    pub fn start<C: FrameScheduler + ?Sized>(&mut self, scheduler: &mut C) {
        if self.state != LoopState::Idle {
            debug!(state = ?self.state, "animation already started");
            return;
        }
        info!(
            width = self.surface.width(),
            height = self.surface.height(),
            bins = self.source.bin_count(),
            "starting aura animation"
        );
        self.state = LoopState::Running;
        scheduler.request_next_frame();
    }

    /// Run one frame and re-arm `scheduler`. Does nothing unless running.
    pub fn on_frame<C: FrameScheduler + ?Sized>(&mut self, scheduler: &mut C) {
        if self.state != LoopState::Running {
            return;
        }
        self.last_color = self.engine.tick(&mut self.source, &mut self.surface);
        scheduler.request_next_frame();
    }

    /// Playback finished: no more particles are created, ever.
    pub fn on_playback_ended(&mut self) {
        if self.engine.is_spawning() {
            info!(frames = self.engine.frames(), "playback ended, spawning disabled");
            self.engine.stop_spawning();
        }
    }

    /// Stop re-arming the scheduler. The session cannot be restarted.
    pub fn stop(&mut self) {
        if self.state != LoopState::Stopped {
            debug!(frames = self.engine.frames(), "animation stopped");
            self.state = LoopState::Stopped;
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn engine(&self) -> &AuraEngine<R> {
        &self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut F {
        &mut self.source
    }

    /// Color computed by the most recent frame.
    pub fn last_color(&self) -> &FrameColor {
        &self.last_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::StaticSnapshot;
    use crate::aura::canvas::PixelCanvas;
    use crate::aura::scheduler::ManualScheduler;
    use rand::SeedableRng;

    fn session() -> Animation<StaticSnapshot, PixelCanvas> {
        Animation::with_rng(
            PixelCanvas::for_cells(40, 12, 8.0, 16.0),
            StaticSnapshot::filled(1024, 90),
            StdRng::seed_from_u64(9),
        )
    }

    #[test]
    fn frames_only_run_after_start() {
        let mut animation = session();
        let mut scheduler = ManualScheduler::new();

        animation.on_frame(&mut scheduler);
        assert_eq!(animation.engine().frames(), 0);
        assert_eq!(scheduler.requests(), 0);

        animation.start(&mut scheduler);
        assert_eq!(animation.state(), LoopState::Running);
        assert_eq!(scheduler.requests(), 1);
    }

    #[test]
    fn every_frame_rearms_the_scheduler() {
        let mut animation = session();
        let mut scheduler = ManualScheduler::new();
        animation.start(&mut scheduler);

        for _ in 0..5 {
            assert!(scheduler.take_pending());
            animation.on_frame(&mut scheduler);
        }
        assert_eq!(animation.engine().frames(), 5);
        assert_eq!(scheduler.requests(), 6);
        assert_eq!(animation.source().refreshes(), 5);
    }

    #[test]
    fn second_start_is_ignored() {
        let mut animation = session();
        let mut scheduler = ManualScheduler::new();
        animation.start(&mut scheduler);
        animation.start(&mut scheduler);
        assert_eq!(scheduler.requests(), 1);
    }

    #[test]
    fn stop_breaks_the_loop() {
        let mut animation = session();
        let mut scheduler = ManualScheduler::new();
        animation.start(&mut scheduler);
        animation.on_frame(&mut scheduler);
        animation.stop();

        assert!(scheduler.take_pending());
        animation.on_frame(&mut scheduler);
        assert!(!scheduler.take_pending());
        assert_eq!(animation.engine().frames(), 1);

        animation.start(&mut scheduler);
        assert_eq!(animation.state(), LoopState::Stopped);
    }

    #[test]
    fn playback_end_freezes_population() {
        let mut animation = session();
        let mut scheduler = ManualScheduler::new();
        animation.start(&mut scheduler);
        for _ in 0..3 {
            animation.on_frame(&mut scheduler);
        }
        animation.on_playback_ended();
        animation.on_playback_ended();
        for _ in 0..3 {
            animation.on_frame(&mut scheduler);
        }
        assert_eq!(animation.engine().live_count(), 3);
        assert!(!animation.engine().is_spawning());
    }

    #[test]
    fn frame_color_is_exposed() {
        let mut animation = session();
        let mut scheduler = ManualScheduler::new();
        animation.start(&mut scheduler);
        animation.on_frame(&mut scheduler);
        let expected = FrameColor::from_snapshot(&[90; 1024]);
        assert_eq!(*animation.last_color(), expected);
    }
}
