// src/lib.rs
//! Auraplay - plays an audio file and paints a frequency-driven aura of
//! soft radial glows behind it.
//!
//! The drawing core (`analysis`, `aura`, `color`) has no terminal or audio
//! device dependency and can be driven headless.

pub mod analysis;
pub mod app;
pub mod audio;
pub mod aura;
pub mod cli;
pub mod color;
pub mod config;
pub mod fs;
pub mod logging;
pub mod ui;
