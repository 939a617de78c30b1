// src/cli.rs
//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "auraplay")]
#[command(about = "Plays an audio file under a spectrum-colored particle aura", long_about = None)]
pub struct Args {
    /// Audio file to play
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Settings file (defaults to ./auraplay.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Animation frames per second
    #[arg(long, value_name = "FPS")]
    pub fps: Option<u32>,

    /// Initial volume, 0.0 to 1.0
    #[arg(long, value_name = "LEVEL")]
    pub volume: Option<f32>,

    /// Do not write a log file
    #[arg(long)]
    pub no_log: bool,
}

impl Args {
    /// Apply flags on top of loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(fps) = self.fps {
            settings.fps = fps;
        }
        if let Some(volume) = self.volume {
            settings.volume = volume;
        }
        if self.no_log {
            settings.log_enabled = false;
        }
    }
}
