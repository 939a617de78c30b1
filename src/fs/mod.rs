// src/fs/mod.rs
//! Filesystem module - validates the audio file handed to the player.

pub mod detection;

// Re-export commonly used types
pub use detection::{FileCategory, FileType, detect_file_type, ensure_audio};
