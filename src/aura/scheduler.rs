// src/aura/scheduler.rs
//! Frame scheduling: the host's "call me again next frame" primitive.

use std::time::{Duration, Instant};

/// Something that can be asked to run the animation once more.
pub trait FrameScheduler {
    /// Arm the scheduler so the next frame will be delivered.
    fn request_next_frame(&mut self);
}

/// Fixed-rate pacer for an event loop.
///
/// A frame is due once one was requested and a full interval has passed
/// since the previous frame was delivered.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    requested: bool,
    last_frame: Option<Instant>,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            requested: false,
            last_frame: None,
        }
    }

    /// A pacer for `fps` frames per second (at least one).
    pub fn with_fps(fps: u32) -> Self {
        Self::new(Duration::from_secs(1) / fps.max(1))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Time left until the requested frame is due, or `None` when nothing
    /// was requested.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        if !self.requested {
            return None;
        }
        Some(match self.last_frame {
            Some(last) => (last + self.interval).saturating_duration_since(now),
            None => Duration::ZERO,
        })
    }

    /// Consume the pending request if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.time_until_due(now) {
            Some(left) if left.is_zero() => {
                self.requested = false;
                self.last_frame = Some(now);
                true
            }
            _ => false,
        }
    }
}

impl FrameScheduler for FramePacer {
    fn request_next_frame(&mut self) {
        self.requested = true;
    }
}

/// Counts requests; every request is immediately due. For headless loops.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ManualScheduler {
    pending: bool,
    requests: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending request, if any.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn requests(&self) -> u64 {
        self.requests
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_next_frame(&mut self) {
        self.pending = true;
        self.requests += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_due_until_requested() {
        let mut pacer = FramePacer::with_fps(60);
        let now = Instant::now();
        assert_eq!(pacer.time_until_due(now), None);
        assert!(!pacer.take_due(now));

        pacer.request_next_frame();
        assert_eq!(pacer.time_until_due(now), Some(Duration::ZERO));
        assert!(pacer.take_due(now));
        assert!(!pacer.is_requested());
    }

    #[test]
    fn respects_interval_between_frames() {
        let mut pacer = FramePacer::new(Duration::from_millis(20));
        let start = Instant::now();
        pacer.request_next_frame();
        assert!(pacer.take_due(start));

        pacer.request_next_frame();
        let early = start + Duration::from_millis(5);
        assert_eq!(pacer.time_until_due(early), Some(Duration::from_millis(15)));
        assert!(!pacer.take_due(early));
        assert!(pacer.take_due(start + Duration::from_millis(20)));
    }

    #[test]
    fn fps_sets_interval() {
        assert_eq!(FramePacer::with_fps(50).interval(), Duration::from_millis(20));
        assert_eq!(FramePacer::with_fps(0).interval(), Duration::from_secs(1));
    }

    #[test]
    fn manual_scheduler_counts_requests() {
        let mut scheduler = ManualScheduler::new();
        assert!(!scheduler.take_pending());
        scheduler.request_next_frame();
        scheduler.request_next_frame();
        assert!(scheduler.take_pending());
        assert!(!scheduler.take_pending());
        assert_eq!(scheduler.requests(), 2);
    }
}
