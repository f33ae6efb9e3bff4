//! Low-pass smoothing of sensor direction vectors

use nalgebra::Vector3;

use crate::math::{Vector3Ext, blend_factor};

const NANOS_PER_SECOND: f32 = 1_000_000_000.0;

/// Exponential moving average over unit direction vectors
///
/// Smoothing the direction instead of the derived angles keeps the filter
/// continuous where `atan2` wraps from +180° to -180°. The blend weight is
/// rescaled by the real interval between samples so that irregular delivery
/// does not change the time constant.
#[derive(Debug, Clone, Copy)]
pub struct DirectionFilter {
    /// Weight of a new sample at the nominal cadence
    smoothing_factor: f32,
    /// Nominal sample period in seconds
    nominal_period: f32,
    /// Filtered unit direction, `None` until the first sample
    direction: Option<Vector3<f32>>,
    /// Timestamp of the last accepted sample
    last_timestamp_nanos: u64,
}

impl DirectionFilter {
    /// Create a filter
    ///
    /// # Arguments
    /// * `smoothing_factor` - Weight of a new sample at the nominal cadence, in `(0, 1]`
    /// * `nominal_period_nanos` - Sample period the factor is tuned for
    ///
    /// # Example
    /// ```
    /// use nalgebra::Vector3;
    /// use ruler_level::smoothing::DirectionFilter;
    ///
    /// let mut filter = DirectionFilter::new(0.15, 16_666_667);
    /// let first = filter.update(Vector3::new(0.0, 0.0, 9.81), 0);
    /// assert!((first.z - 1.0).abs() < 1e-6); // first sample seeds the filter
    /// ```
    pub fn new(smoothing_factor: f32, nominal_period_nanos: u64) -> Self {
        Self {
            smoothing_factor,
            nominal_period: nominal_period_nanos as f32 / NANOS_PER_SECOND,
            direction: None,
            last_timestamp_nanos: 0,
        }
    }

    /// Blend a new reading into the filtered direction
    ///
    /// The reading is normalized first, so its magnitude does not matter.
    /// A degenerate reading leaves the filter untouched and returns the
    /// current direction (zero before the first valid sample).
    pub fn update(&mut self, reading: Vector3<f32>, timestamp_nanos: u64) -> Vector3<f32> {
        if reading.is_degenerate() {
            return self.direction();
        }
        let unit = reading.safe_normalize();

        let blended = match self.direction {
            None => unit,
            Some(previous) => {
                let alpha = self.blend_weight(timestamp_nanos);
                let mixed = previous + (unit - previous) * alpha;
                // Opposite directions can cancel out; keep the newest reading then
                if mixed.is_degenerate() {
                    unit
                } else {
                    mixed.safe_normalize()
                }
            }
        };

        self.direction = Some(blended);
        self.last_timestamp_nanos = timestamp_nanos;
        blended
    }

    /// Current filtered unit direction, zero before the first sample
    pub fn direction(&self) -> Vector3<f32> {
        self.direction.unwrap_or_else(Vector3::zeros)
    }

    /// Whether a valid sample has been seen since creation or reset
    pub fn is_seeded(&self) -> bool {
        self.direction.is_some()
    }

    /// Forget all history
    pub fn reset(&mut self) {
        self.direction = None;
        self.last_timestamp_nanos = 0;
    }

    /// Get the smoothing factor
    pub fn smoothing_factor(&self) -> f32 {
        self.smoothing_factor
    }

    fn blend_weight(&self, timestamp_nanos: u64) -> f32 {
        // Repeated or out-of-order timestamps fall back to the nominal weight
        let dt = if timestamp_nanos > self.last_timestamp_nanos {
            (timestamp_nanos - self.last_timestamp_nanos) as f32 / NANOS_PER_SECOND
        } else {
            0.0
        };
        blend_factor(self.smoothing_factor, dt, self.nominal_period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: u64 = 16_666_667;

    #[test]
    fn test_first_sample_seeds_filter() {
        let mut filter = DirectionFilter::new(0.15, PERIOD);
        assert!(!filter.is_seeded());
        assert_eq!(filter.direction(), Vector3::zeros());

        let out = filter.update(Vector3::new(0.0, 3.0, 4.0), 0);
        assert!(filter.is_seeded());
        assert!((out - Vector3::new(0.0, 0.6, 0.8)).magnitude() < 1e-6);
    }

    #[test]
    fn test_degenerate_sample_is_ignored() {
        let mut filter = DirectionFilter::new(0.15, PERIOD);
        filter.update(Vector3::new(0.0, 0.0, 1.0), 0);

        let out = filter.update(Vector3::zeros(), PERIOD);
        assert_eq!(out, Vector3::new(0.0, 0.0, 1.0));

        let out = filter.update(Vector3::new(f32::NAN, 0.0, 1.0), 2 * PERIOD);
        assert_eq!(out, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_step_response_is_gradual() {
        let mut filter = DirectionFilter::new(0.15, PERIOD);
        filter.update(Vector3::new(0.0, 0.0, 1.0), 0);

        let target = Vector3::new(0.0, 1.0, 0.0);
        let first = filter.update(target, PERIOD);

        // Moved toward the target but not all the way
        assert!(first.y > 0.0 && first.y < 0.5);
        assert!((first.magnitude() - 1.0).abs() < 1e-5);

        let mut timestamp = PERIOD;
        let mut out = first;
        for _ in 0..200 {
            timestamp += PERIOD;
            out = filter.update(target, timestamp);
        }
        assert!((out - target).magnitude() < 1e-3);
    }

    #[test]
    fn test_unit_smoothing_factor_passes_through() {
        let mut filter = DirectionFilter::new(1.0, PERIOD);
        filter.update(Vector3::new(0.0, 0.0, 1.0), 0);
        let out = filter.update(Vector3::new(1.0, 0.0, 0.0), PERIOD);
        assert!((out - Vector3::new(1.0, 0.0, 0.0)).magnitude() < 1e-6);
    }

    #[test]
    fn test_cadence_independence() {
        // Two half-period samples land where one full-period sample does
        let start = Vector3::new(0.0, 0.0, 1.0);
        let target = Vector3::new(0.0, 0.2, 1.0);

        let mut coarse = DirectionFilter::new(0.15, PERIOD);
        coarse.update(start, 0);
        let coarse_out = coarse.update(target, PERIOD);

        let mut fine = DirectionFilter::new(0.15, PERIOD);
        fine.update(start, 0);
        fine.update(target, PERIOD / 2);
        let fine_out = fine.update(target, PERIOD);

        assert!((coarse_out - fine_out).magnitude() < 1e-3);
    }

    #[test]
    fn test_opposite_directions_do_not_collapse() {
        let mut filter = DirectionFilter::new(0.5, PERIOD);
        filter.update(Vector3::new(0.0, 0.0, 1.0), 0);
        let out = filter.update(Vector3::new(0.0, 0.0, -1.0), PERIOD);
        assert!((out.magnitude() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reset() {
        let mut filter = DirectionFilter::new(0.15, PERIOD);
        filter.update(Vector3::new(0.0, 0.0, 1.0), 0);
        filter.reset();
        assert!(!filter.is_seeded());

        let out = filter.update(Vector3::new(1.0, 0.0, 0.0), 5 * PERIOD);
        assert_eq!(out, Vector3::new(1.0, 0.0, 0.0));
    }
}
