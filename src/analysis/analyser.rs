// src/analysis/analyser.rs
//! Byte-magnitude spectrum analyser fed from the playback sample buffer.

use std::sync::{Arc, Mutex};

use ringbuf::{HeapRb, traits::*};
use rustfft::{Fft, FftPlanner, num_complex::Complex};

use super::source::FrequencySource;

/// Shared ring of recent mono samples written by the playback thread.
pub type SampleBuffer = Arc<Mutex<HeapRb<f32>>>;

/// Tuning for [`SpectrumAnalyser`]. Defaults match a browser analyser node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyserSettings {
    /// FFT window length; the snapshot has half as many bins.
    pub fft_size: usize,
    /// Weight of the previous frame in the magnitude smoothing (0..=1).
    pub smoothing: f32,
    /// Magnitude mapped to byte 0.
    pub min_db: f32,
    /// Magnitude mapped to byte 255.
    pub max_db: f32,
}

impl Default for AnalyserSettings {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            smoothing: 0.8,
            min_db: -100.0,
            max_db: -30.0,
        }
    }
}

/// Turns the newest `fft_size` samples into a byte spectrum each refresh.
pub struct SpectrumAnalyser {
    settings: AnalyserSettings,
    samples: SampleBuffer,
    fft: Arc<dyn Fft<f32>>,
    /// Blackman window coefficients
    window: Vec<f32>,
    /// Scratch FFT buffer, reused every frame
    buffer: Vec<Complex<f32>>,
    /// Smoothed linear magnitudes carried between frames
    smoothed: Vec<f32>,
    bins: Vec<u8>,
}

impl SpectrumAnalyser {
    /// Create an analyser reading from `samples`. `settings.fft_size` must be
    /// a power of two (the configuration layer checks this).
    pub fn new(samples: SampleBuffer, settings: AnalyserSettings) -> Self {
        let fft_size = settings.fft_size.max(2);
        let bin_count = fft_size / 2;
        let fft = FftPlanner::new().plan_fft_forward(fft_size);

        Self {
            settings: AnalyserSettings { fft_size, ..settings },
            samples,
            fft,
            window: blackman_window(fft_size),
            buffer: vec![Complex::new(0.0, 0.0); fft_size],
            smoothed: vec![0.0; bin_count],
            bins: vec![0; bin_count],
        }
    }

    pub fn settings(&self) -> &AnalyserSettings {
        &self.settings
    }

    /// Copy the newest samples into the FFT buffer, zero-padding the front.
    /// Returns false if the sample buffer could not be locked.
    fn load_samples(&mut self) -> bool {
        let Ok(buf) = self.samples.lock() else {
            return false;
        };

        let fft_size = self.settings.fft_size;
        let available = buf.occupied_len();
        let take = available.min(fft_size);
        let pad = fft_size - take;

        for slot in &mut self.buffer[..pad] {
            *slot = Complex::new(0.0, 0.0);
        }

        let newest = buf.iter().skip(available - take);
        for ((slot, &sample), &w) in self.buffer[pad..]
            .iter_mut()
            .zip(newest)
            .zip(&self.window[pad..])
        {
            *slot = Complex::new(sample * w, 0.0);
        }
        true
    }
}

impl FrequencySource for SpectrumAnalyser {
    fn refresh(&mut self) {
        if !self.load_samples() {
            return;
        }

        self.fft.process(&mut self.buffer);

        let AnalyserSettings {
            fft_size,
            smoothing,
            min_db,
            max_db,
        } = self.settings;
        let scale = 1.0 / fft_size as f32;
        let range = (max_db - min_db).max(f32::EPSILON);

        for ((c, smoothed), byte) in self
            .buffer
            .iter()
            .zip(self.smoothed.iter_mut())
            .zip(self.bins.iter_mut())
        {
            let magnitude = c.norm() * scale;
            *smoothed = smoothing * *smoothed + (1.0 - smoothing) * magnitude;
            let db = 20.0 * smoothed.max(1e-20).log10();
            *byte = (255.0 / range * (db - min_db)).floor().clamp(0.0, 255.0) as u8;
        }
    }

    fn snapshot(&self) -> &[u8] {
        &self.bins
    }

    fn bin_count(&self) -> usize {
        self.bins.len()
    }
}

/// Classic Blackman window (a0 = 0.42, a1 = 0.5, a2 = 0.08) over `len` points.
fn blackman_window(len: usize) -> Vec<f32> {
    let n = len as f32;
    (0..len)
        .map(|i| {
            let x = std::f32::consts::TAU * i as f32 / n;
            0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos()
        })
        .collect()
}
