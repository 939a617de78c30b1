// src/audio/mod.rs
//! Audio module - playback, sample capture for analysis, and track metadata.

pub mod metadata;
pub mod player;
pub mod sample_capture;

// Re-export commonly used types
pub use metadata::{TrackMetadata, load_metadata};
pub use player::MusicPlayer;
pub use sample_capture::SampleCapture;
