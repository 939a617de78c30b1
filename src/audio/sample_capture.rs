// src/audio/sample_capture.rs
//! A wrapper source that captures a mono mixdown into a circular buffer for analysis.

use std::sync::{Arc, Mutex};

use ringbuf::{HeapRb, traits::*};
use rodio::Source;

/// A wrapper source that averages each interleaved frame into one mono
/// sample in the capture buffer while passing every sample through untouched.
pub struct SampleCapture<S> {
    source: S,
    buffer: Arc<Mutex<HeapRb<f32>>>,
    /// Sum of the samples seen in the current frame
    frame_sum: f32,
    /// Samples seen in the current frame
    frame_fill: u16,
}

impl<S> SampleCapture<S> {
    /// Create a new sample capture wrapper around an existing source.
    pub fn new(source: S, buffer: Arc<Mutex<HeapRb<f32>>>) -> Self {
        Self {
            source,
            buffer,
            frame_sum: 0.0,
            frame_fill: 0,
        }
    }

    fn push_mono(&self, sample: f32) {
        if let Ok(mut buf) = self.buffer.lock() {
            // Overwrite the oldest sample when full
            if buf.is_full() {
                let _ = buf.try_pop();
            }
            let _ = buf.try_push(sample);
        }
    }
}

impl<S> Iterator for SampleCapture<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.source.next()?;
        let channels = self.source.channels().max(1);

        self.frame_sum += sample;
        self.frame_fill += 1;
        if self.frame_fill >= channels {
            self.push_mono(self.frame_sum / self.frame_fill as f32);
            self.frame_sum = 0.0;
            self.frame_fill = 0;
        }

        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

impl<S> Source for SampleCapture<S>
where
    S: Source<Item = f32>,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.source.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.source.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.source.sample_rate()
    }

    fn total_duration(&self) -> Option<std::time::Duration> {
        self.source.total_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rodio::buffer::SamplesBuffer;

    fn capture(channels: u16, samples: Vec<f32>, capacity: usize) -> (Vec<f32>, Vec<f32>) {
        let buffer = Arc::new(Mutex::new(HeapRb::<f32>::new(capacity)));
        let source = SamplesBuffer::new(channels, 44_100, samples);
        let passed: Vec<f32> = SampleCapture::new(source, buffer.clone()).collect();
        let captured = buffer.lock().unwrap().iter().copied().collect();
        (passed, captured)
    }

    #[test]
    fn stereo_is_downmixed() {
        let (passed, captured) = capture(2, vec![1.0, 0.0, 0.5, 0.5, -1.0, 1.0], 16);
        assert_eq!(passed, vec![1.0, 0.0, 0.5, 0.5, -1.0, 1.0]);
        assert_eq!(captured, vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn mono_passes_straight_through() {
        let (_, captured) = capture(1, vec![0.1, 0.2, 0.3], 16);
        assert_eq!(captured, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn full_buffer_keeps_newest() {
        let (_, captured) = capture(1, (0..10).map(|i| i as f32).collect(), 4);
        assert_eq!(captured, vec![6.0, 7.0, 8.0, 9.0]);
    }
}
