// src/analysis/features.rs
//! Reduction of a byte spectrum to three bands and one blended color.

use crate::color::{ColorHsv, ColorRgb};

/// Number of contiguous partitions (low, mid, high).
pub const BAND_COUNT: usize = 3;

/// Brightness does not follow the audio.
pub const FRAME_VALUE: f32 = 0.85;

// Per-band weight skew. Highs are boosted, mids damped; the sum is not 1.
const LOW_SKEW: f32 = 1.5;
const MID_SKEW: f32 = 0.6;
const HIGH_SKEW: f32 = 2.0;

/// Mean magnitude of the low, mid and high partitions of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BandAverages {
    pub low: f32,
    pub mid: f32,
    pub high: f32,
}

impl BandAverages {
    /// Split `snapshot` into three equal contiguous segments of
    /// `len / 3` samples and average each one. Trailing samples that do not
    /// fill a segment are ignored; fewer than three samples gives all zeros.
    pub fn from_snapshot(snapshot: &[u8]) -> Self {
        let segment = snapshot.len() / BAND_COUNT;
        if segment == 0 {
            return Self::default();
        }

        let mut means = snapshot
            .chunks_exact(segment)
            .take(BAND_COUNT)
            .map(|chunk| chunk.iter().map(|&b| b as u32).sum::<u32>() as f32 / segment as f32);

        Self {
            low: means.next().unwrap_or(0.0),
            mid: means.next().unwrap_or(0.0),
            high: means.next().unwrap_or(0.0),
        }
    }

    pub fn as_array(&self) -> [f32; BAND_COUNT] {
        [self.low, self.mid, self.high]
    }

    /// Sum of the three means, with zero replaced by one so it can divide.
    pub fn total_amplitude(&self) -> f32 {
        let total = self.low + self.mid + self.high;
        if total == 0.0 { 1.0 } else { total }
    }

    /// Hue each band maps to. The mid and high windows overlap on purpose.
    pub fn band_hues(&self) -> [f32; BAND_COUNT] {
        [
            (self.low / 255.0 * 160.0).round(),
            160.0 + (self.mid / 255.0 * 170.0).round(),
            170.0 + (self.high / 255.0 * 70.0).round(),
        ]
    }

    /// Share of the total amplitude of each band, skewed per band.
    pub fn band_weights(&self) -> [f32; BAND_COUNT] {
        let total = self.total_amplitude();
        [
            self.low / total * LOW_SKEW,
            self.mid / total * MID_SKEW,
            self.high / total * HIGH_SKEW,
        ]
    }

    /// Weighted sum of the band hues. Not wrapped; may exceed 360.
    pub fn blended_hue(&self) -> f32 {
        self.band_hues()
            .iter()
            .zip(self.band_weights())
            .map(|(hue, weight)| hue * weight)
            .sum()
    }
}

/// Saturation falls as the hue rises. The percentage is clamped before
/// it is scaled into `[0, 1]`.
pub fn saturation_for_hue(blended_hue: f32) -> f32 {
    (100.0 - (blended_hue / 360.0) * 100.0).clamp(0.0, 100.0) / 100.0
}

/// Everything derived from one snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameColor {
    pub bands: BandAverages,
    pub hsv: ColorHsv,
    pub rgb: ColorRgb,
}

impl FrameColor {
    pub fn from_snapshot(snapshot: &[u8]) -> Self {
        let bands = BandAverages::from_snapshot(snapshot);
        let hsv = frame_hsv(&bands);
        Self {
            bands,
            hsv,
            rgb: hsv.to_rgb(),
        }
    }
}

impl Default for FrameColor {
    fn default() -> Self {
        Self::from_snapshot(&[])
    }
}

/// Color for a set of band averages.
pub fn frame_hsv(bands: &BandAverages) -> ColorHsv {
    let hue = bands.blended_hue();
    ColorHsv::new(hue, saturation_for_hue(hue), FRAME_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(low: u8, mid: u8, high: u8, segment: usize) -> Vec<u8> {
        let mut bins = vec![low; segment];
        bins.extend(std::iter::repeat_n(mid, segment));
        bins.extend(std::iter::repeat_n(high, segment));
        bins
    }

    #[test]
    fn silence_is_hue_zero() {
        let bands = BandAverages::from_snapshot(&[0; 1024]);
        assert_eq!(bands, BandAverages::default());
        assert_eq!(bands.total_amplitude(), 1.0);
        assert_eq!(bands.band_weights(), [0.0, 0.0, 0.0]);
        assert_eq!(bands.blended_hue(), 0.0);

        let color = FrameColor::from_snapshot(&[0; 1024]);
        assert_eq!(color.hsv.saturation, 1.0);
        assert_eq!(color.hsv.value, FRAME_VALUE);
        assert_eq!(color.rgb.red, 217);
    }

    #[test]
    fn low_band_only() {
        let bands = BandAverages::from_snapshot(&snapshot(255, 0, 0, 100));
        assert_eq!(bands.band_hues(), [160.0, 160.0, 170.0]);
        assert_eq!(bands.band_weights(), [1.5, 0.0, 0.0]);
        assert_eq!(bands.blended_hue(), 240.0);

        let color = FrameColor::from_snapshot(&snapshot(255, 0, 0, 100));
        assert!((color.hsv.saturation - (100.0 - 240.0 / 360.0 * 100.0) / 100.0).abs() < 1e-6);
    }

    #[test]
    fn high_band_overshoots_full_circle() {
        let bands = BandAverages::from_snapshot(&snapshot(0, 0, 255, 10));
        assert_eq!(bands.blended_hue(), 480.0);
        assert_eq!(saturation_for_hue(bands.blended_hue()), 0.0);
    }

    #[test]
    fn remainder_is_dropped_from_last_band() {
        // 10 bins -> segments of 3, the tenth bin never counts
        let mut bins = snapshot(3, 6, 9, 3);
        bins.push(255);
        let bands = BandAverages::from_snapshot(&bins);
        assert_eq!(bands.as_array(), [3.0, 6.0, 9.0]);
    }

    #[test]
    fn undersized_snapshot_is_silent() {
        assert_eq!(BandAverages::from_snapshot(&[200, 200]), BandAverages::default());
        assert_eq!(FrameColor::default().bands, BandAverages::default());
    }

    #[test]
    fn mid_hue_window() {
        let bands = BandAverages::from_snapshot(&snapshot(0, 255, 0, 4));
        assert_eq!(bands.band_hues()[1], 330.0);
        assert!((bands.blended_hue() - 330.0 * 0.6).abs() < 1e-4);
    }

    #[test]
    fn saturation_clamps_percentage() {
        assert_eq!(saturation_for_hue(0.0), 1.0);
        assert_eq!(saturation_for_hue(-90.0), 1.0);
        assert_eq!(saturation_for_hue(180.0), 0.5);
        assert_eq!(saturation_for_hue(720.0), 0.0);
    }
}
