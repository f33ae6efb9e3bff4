//! Release-velocity estimation from recent touch samples

use heapless::Deque;

use crate::types::TouchSample;

/// Samples kept regardless of the time window
pub const TRACKER_CAPACITY: usize = 20;

/// Rolling window of touch samples
///
/// Only the samples within the trailing time window are used, so a finger
/// that stops before lifting produces a release velocity of zero.
///
/// # Example
/// ```
/// use ruler_level::{TouchSample, velocity::VelocityTracker};
///
/// let mut tracker = VelocityTracker::new(100);
/// tracker.add(TouchSample { x: 0.0, timestamp_millis: 0 });
/// tracker.add(TouchSample { x: 50.0, timestamp_millis: 50 });
/// assert_eq!(tracker.velocity(), 1000.0); // px/s
/// ```
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    window_millis: u64,
    samples: Deque<TouchSample, TRACKER_CAPACITY>,
}

impl VelocityTracker {
    /// Create a tracker using the trailing `window_millis` of samples
    pub fn new(window_millis: u32) -> Self {
        Self {
            window_millis: u64::from(window_millis),
            samples: Deque::new(),
        }
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples are held
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Add a sample
    ///
    /// A sample older than the newest one means the host restarted its
    /// clock or reordered events; the history is discarded.
    pub fn add(&mut self, sample: TouchSample) {
        if !sample.x.is_finite() {
            return;
        }
        if let Some(newest) = self.samples.back() {
            if sample.timestamp_millis < newest.timestamp_millis {
                self.samples.clear();
            }
        }
        if self.samples.is_full() {
            self.samples.pop_front();
        }
        // Cannot fail: a slot was freed above
        let _ = self.samples.push_back(sample);
        self.evict_expired();
    }

    /// Finger velocity in pixels per second over the trailing window
    ///
    /// Zero with fewer than two samples in the window or when they share a
    /// timestamp.
    pub fn velocity(&self) -> f32 {
        let Some(newest) = self.samples.back() else {
            return 0.0;
        };
        let cutoff = newest.timestamp_millis.saturating_sub(self.window_millis);
        let Some(oldest) = self.samples.iter().find(|s| s.timestamp_millis >= cutoff) else {
            return 0.0;
        };

        let elapsed_millis = newest.timestamp_millis - oldest.timestamp_millis;
        if elapsed_millis == 0 {
            return 0.0;
        }
        (newest.x - oldest.x) * 1000.0 / elapsed_millis as f32
    }

    /// Velocity with its magnitude capped at `max`
    pub fn velocity_capped(&self, max: f32) -> f32 {
        self.velocity().clamp(-max, max)
    }

    fn evict_expired(&mut self) {
        let Some(newest) = self.samples.back().map(|s| s.timestamp_millis) else {
            return;
        };
        let cutoff = newest.saturating_sub(self.window_millis);
        while self
            .samples
            .front()
            .is_some_and(|s| s.timestamp_millis < cutoff)
        {
            self.samples.pop_front();
        }
    }
}
