// src/aura/engine.rs
//! The particle aura engine: spawn, cull, draw and advance once per frame.

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::trace;

use super::particle::Particle;
use super::surface::{Point, Surface};
use crate::analysis::{FrameColor, FrequencySource};

/// Upper bound on simultaneously live particles.
pub const MAX_PARTICLES: usize = 10;

/// Owns the live particles and the spawning gate.
#[derive(Debug)]
pub struct AuraEngine<R = StdRng> {
    particles: Vec<Particle>,
    spawning: bool,
    width: f32,
    height: f32,
    rng: R,
    frames: u64,
}

impl AuraEngine<StdRng> {
    /// An engine for a canvas of `width` x `height` units, seeded from the OS.
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_rng(width, height, StdRng::from_os_rng())
    }
}

impl<R: Rng> AuraEngine<R> {
    /// An engine drawing its randomness from `rng`.
    pub fn with_rng(width: f32, height: f32, rng: R) -> Self {
        Self {
            particles: Vec::with_capacity(MAX_PARTICLES),
            spawning: true,
            width: width.max(0.0),
            height: height.max(0.0),
            rng,
            frames: 0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    pub fn is_spawning(&self) -> bool {
        self.spawning
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Permanently stop creating particles. Live ones keep fading.
    pub fn stop_spawning(&mut self) {
        self.spawning = false;
    }

    /// Run one frame against `source` and `surface`, returning the frame's color.
    pub fn tick<F, S>(&mut self, source: &mut F, surface: &mut S) -> FrameColor
    where
        F: FrequencySource + ?Sized,
        S: Surface + ?Sized,
    {
        surface.clear(surface.bounds());

        source.refresh();
        let color = FrameColor::from_snapshot(source.snapshot());
        trace!(
            frame = self.frames,
            hue = color.hsv.hue,
            saturation = color.hsv.saturation,
            rgb = %color.rgb,
            "frame color"
        );

        self.maybe_spawn(&color);
        self.step(surface);

        self.frames += 1;
        color
    }

    fn maybe_spawn(&mut self, color: &FrameColor) {
        if !self.spawning || self.particles.len() >= MAX_PARTICLES {
            return;
        }
        let position = Point::new(
            self.rng.random::<f32>() * self.width,
            self.rng.random::<f32>() * self.height,
        );
        let particle = Particle::spawn(position, color.rgb, self.width, &mut self.rng);
        self.particles.push(particle);
    }

    /// Drop spent particles first, then draw and advance the survivors in
    /// their stored order.
    fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.particles.retain(|p| !p.is_spent());
        for particle in &mut self.particles {
            particle.update(surface);
        }
    }
}
