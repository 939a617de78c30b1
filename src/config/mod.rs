// src/config/mod.rs
//! Runtime settings: defaults, an optional TOML file, then `AURAPLAY_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use ::config::{Config, Environment, File};
use serde::Deserialize;

use crate::analysis::AnalyserSettings;

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_NAME: &str = "auraplay";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Animation frames per second.
    pub fps: u32,
    /// Analyser window length (power of two).
    pub fft_size: usize,
    /// Analyser smoothing between frames, 0..=1.
    pub smoothing: f32,
    /// Initial linear volume, 0..=1.
    pub volume: f32,
    /// Canvas units per terminal cell, horizontally.
    pub cell_width: f32,
    /// Canvas units per terminal cell, vertically.
    pub cell_height: f32,
    pub log_enabled: bool,
    /// Default filter directive; `RUST_LOG` wins when set.
    pub log_level: String,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: 60,
            fft_size: 2048,
            smoothing: 0.8,
            volume: 1.0,
            cell_width: 8.0,
            cell_height: 16.0,
            log_enabled: true,
            log_level: "info".to_string(),
            log_file: PathBuf::from("auraplay.log"),
        }
    }
}

impl Settings {
    /// Load settings. An explicit `path` must exist; otherwise
    /// `auraplay.toml` is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("AURAPLAY").try_parsing(true))
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("failed to parse configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the analyser or the frame loop cannot work with.
    pub fn validate(&self) -> Result<()> {
        ensure!((1..=240).contains(&self.fps), "fps must be in 1..=240, got {}", self.fps);
        ensure!(
            self.fft_size.is_power_of_two() && (32..=32768).contains(&self.fft_size),
            "fft_size must be a power of two in 32..=32768, got {}",
            self.fft_size
        );
        ensure!(
            (0.0..=1.0).contains(&self.smoothing),
            "smoothing must be in 0..=1, got {}",
            self.smoothing
        );
        ensure!(
            (0.0..=1.0).contains(&self.volume),
            "volume must be in 0..=1, got {}",
            self.volume
        );
        ensure!(
            self.cell_width > 0.0 && self.cell_height > 0.0,
            "cell size must be positive"
        );
        Ok(())
    }

    pub fn analyser(&self) -> AnalyserSettings {
        AnalyserSettings {
            fft_size: self.fft_size,
            smoothing: self.smoothing,
            ..AnalyserSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.analyser(), AnalyserSettings::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let file = toml_file("fps = 30\nfft_size = 1024\nlog_level = \"debug\"\n");
        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.fps, 30);
        assert_eq!(settings.fft_size, 1024);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.volume, 1.0);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/no/such/auraplay.toml"))).is_err());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let file = toml_file("fft_size = 1000\n");
        let err = Settings::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("fft_size"));

        let settings = Settings {
            smoothing: 1.5,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            fps: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
