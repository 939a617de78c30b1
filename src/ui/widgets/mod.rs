// src/ui/widgets/mod.rs
//! Custom widgets for the auraplay UI.

pub mod aura;
pub mod status_bar;

// Re-export widget rendering functions
pub use aura::{AuraView, render_aura};
pub use status_bar::{StatusLine, Transport, render_status_bar};
