// src/analysis/mod.rs
//! Spectrum analysis - frequency snapshots and the per-frame color features.

pub mod analyser;
pub mod features;
pub mod source;

pub use analyser::{AnalyserSettings, SampleBuffer, SpectrumAnalyser};
pub use features::{BandAverages, FrameColor};
pub use source::{FrequencySource, StaticSnapshot};
