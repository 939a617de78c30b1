// src/analysis/source.rs
//! Frequency snapshot sources consumed by the aura engine.

/// Supplies one byte-magnitude spectrum per frame.
///
/// `refresh` updates the snapshot in place; the length of the snapshot is
/// fixed for the lifetime of the source.
pub trait FrequencySource {
    /// Pull the latest spectrum into the internal buffer.
    fn refresh(&mut self);

    /// The most recently refreshed spectrum.
    fn snapshot(&self) -> &[u8];

    /// Number of frequency bins in each snapshot.
    fn bin_count(&self) -> usize {
        self.snapshot().len()
    }
}

impl<T: FrequencySource + ?Sized> FrequencySource for Box<T> {
    fn refresh(&mut self) {
        (**self).refresh()
    }

    fn snapshot(&self) -> &[u8] {
        (**self).snapshot()
    }

    fn bin_count(&self) -> usize {
        (**self).bin_count()
    }
}

/// A source whose spectrum only changes when it is written to.
///
/// Used for headless runs and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSnapshot {
    bins: Vec<u8>,
    refreshes: u64,
}

impl StaticSnapshot {
    pub fn new(bins: Vec<u8>) -> Self {
        Self { bins, refreshes: 0 }
    }

    /// `len` bins all set to `value`.
    pub fn filled(len: usize, value: u8) -> Self {
        Self::new(vec![value; len])
    }

    /// Overwrite the spectrum. The bin count stays the same.
    pub fn fill(&mut self, value: u8) {
        self.bins.fill(value);
    }

    pub fn bins_mut(&mut self) -> &mut [u8] {
        &mut self.bins
    }

    /// How many times the engine asked for a new snapshot.
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }
}

impl FrequencySource for StaticSnapshot {
    fn refresh(&mut self) {
        self.refreshes += 1;
    }

    fn snapshot(&self) -> &[u8] {
        &self.bins
    }
}
