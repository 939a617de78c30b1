// src/aura/mod.rs
//! Particle aura - the engine, its particles, and the surfaces it draws on.

pub mod animation;
pub mod canvas;
pub mod engine;
pub mod particle;
pub mod scheduler;
pub mod surface;

pub use animation::{Animation, LoopState};
pub use canvas::PixelCanvas;
pub use engine::{AuraEngine, MAX_PARTICLES};
pub use particle::{Particle, Phase};
pub use scheduler::{FramePacer, FrameScheduler, ManualScheduler};
pub use surface::{Point, RadialGradient, Region, Surface};
