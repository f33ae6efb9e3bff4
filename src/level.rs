//! Bubble level indicator model

use crate::error::{ConfigError, ConfigResult};
use crate::types::{LevelReading, OrientationState};

/// Tilt mapped to the edge of the bubble vial, in degrees
pub const DEFAULT_MAX_TILT: f32 = 45.0;
/// Largest tilt still reported as level, in degrees
pub const DEFAULT_TOLERANCE: f32 = 2.0;

/// Maps tilt angles to a bubble position and a level flag
///
/// Pure and stateless apart from its two thresholds, so it is safe to call
/// on every render frame.
///
/// # Example
/// ```
/// use ruler_level::{LevelIndicatorModel, OrientationState};
///
/// let model = LevelIndicatorModel::default();
/// let reading = model.compute(OrientationState::new(0.0, 90.0));
/// assert_eq!(reading.bubble_offset_x, 1.0); // clamped at the vial edge
/// assert!(!reading.is_level);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelIndicatorModel {
    max_tilt: f32,
    tolerance: f32,
}

impl LevelIndicatorModel {
    /// Create a model with custom thresholds
    ///
    /// Both thresholds must be positive and finite.
    pub fn new(max_tilt: f32, tolerance: f32) -> ConfigResult<Self> {
        if !(max_tilt.is_finite() && max_tilt > 0.0) {
            return Err(ConfigError::InvalidLevelThreshold {
                name: "max_tilt",
                value: max_tilt,
            });
        }
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(ConfigError::InvalidLevelThreshold {
                name: "tolerance",
                value: tolerance,
            });
        }
        Ok(Self { max_tilt, tolerance })
    }

    /// Tilt that puts the bubble at the edge of the vial
    pub fn max_tilt(&self) -> f32 {
        self.max_tilt
    }

    /// Largest tilt still reported as level (exclusive)
    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Compute the reading for one frame
    ///
    /// Roll moves the bubble horizontally; pitch moves it vertically with the
    /// sign inverted so that raising the top edge raises the bubble. Angles
    /// exactly at the tolerance are not level.
    pub fn compute(&self, state: OrientationState) -> LevelReading {
        compute_reading(state, self.max_tilt, self.tolerance)
    }
}

impl Default for LevelIndicatorModel {
    fn default() -> Self {
        Self {
            max_tilt: DEFAULT_MAX_TILT,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Compute a level reading with explicit thresholds
///
/// Non-finite angles produce a centered, non-level reading.
pub fn compute_reading(state: OrientationState, max_tilt: f32, tolerance: f32) -> LevelReading {
    let OrientationState { pitch, roll, .. } = state;
    if !(pitch.is_finite() && roll.is_finite()) {
        return LevelReading {
            bubble_offset_x: 0.0,
            bubble_offset_y: 0.0,
            max_tilt: 0.0,
            is_level: false,
        };
    }

    LevelReading {
        bubble_offset_x: bubble_offset(roll, max_tilt),
        bubble_offset_y: bubble_offset(-pitch, max_tilt),
        max_tilt: pitch.abs().max(roll.abs()),
        is_level: pitch.abs() < tolerance && roll.abs() < tolerance,
    }
}

fn bubble_offset(angle: f32, max_tilt: f32) -> f32 {
    let offset = (angle / max_tilt).clamp(-1.0, 1.0);
    // clamp passes NaN through (e.g. a zero or NaN max tilt)
    if offset.is_nan() { 0.0 } else { offset }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_is_level_and_centered() {
        let reading = LevelIndicatorModel::default().compute(OrientationState::default());
        assert_eq!(reading.bubble_offset_x, 0.0);
        assert_eq!(reading.bubble_offset_y, 0.0);
        assert_eq!(reading.max_tilt, 0.0);
        assert!(reading.is_level);
    }

    #[test]
    fn test_tolerance_boundary_is_strict() {
        let model = LevelIndicatorModel::default();

        let at_boundary = model.compute(OrientationState::new(DEFAULT_TOLERANCE, 0.0));
        assert!(!at_boundary.is_level);

        let just_inside = model.compute(OrientationState::new(DEFAULT_TOLERANCE - 1e-4, 0.0));
        assert!(just_inside.is_level);

        let roll_at_boundary = model.compute(OrientationState::new(0.0, -DEFAULT_TOLERANCE));
        assert!(!roll_at_boundary.is_level);

        let both_at_boundary =
            model.compute(OrientationState::new(DEFAULT_TOLERANCE, DEFAULT_TOLERANCE));
        assert!(!both_at_boundary.is_level);
    }

    #[test]
    fn test_offsets_are_clamped() {
        let model = LevelIndicatorModel::default();

        let reading = model.compute(OrientationState::new(0.0, 90.0));
        assert_eq!(reading.bubble_offset_x, 1.0);

        let reading = model.compute(OrientationState::new(-180.0, -1000.0));
        assert_eq!(reading.bubble_offset_x, -1.0);
        assert_eq!(reading.bubble_offset_y, 1.0);
    }

    #[test]
    fn test_pitch_sign_is_inverted() {
        let model = LevelIndicatorModel::default();
        let reading = model.compute(OrientationState::new(22.5, 0.0));
        assert_eq!(reading.bubble_offset_y, -0.5);

        let reading = model.compute(OrientationState::new(-22.5, 0.0));
        assert_eq!(reading.bubble_offset_y, 0.5);
    }

    #[test]
    fn test_proportional_offset() {
        let model = LevelIndicatorModel::new(30.0, 1.0).unwrap();
        let reading = model.compute(OrientationState::new(0.0, 15.0));
        assert_eq!(reading.bubble_offset_x, 0.5);
        assert_eq!(reading.max_tilt, 15.0);
    }

    #[test]
    fn test_max_tilt_uses_larger_angle() {
        let reading = LevelIndicatorModel::default().compute(OrientationState::new(-7.0, 3.0));
        assert_eq!(reading.max_tilt, 7.0);
        assert_eq!(reading.display_degrees(), 7);
    }

    #[test]
    fn test_non_finite_angles() {
        let reading = LevelIndicatorModel::default().compute(OrientationState::new(f32::NAN, 3.0));
        assert_eq!(reading.bubble_offset_x, 0.0);
        assert_eq!(reading.bubble_offset_y, 0.0);
        assert!(!reading.is_level);
    }

    #[test]
    fn test_invalid_thresholds() {
        assert!(matches!(
            LevelIndicatorModel::new(0.0, 2.0),
            Err(ConfigError::InvalidLevelThreshold { name: "max_tilt", .. })
        ));
        assert!(matches!(
            LevelIndicatorModel::new(45.0, f32::NAN),
            Err(ConfigError::InvalidLevelThreshold { name: "tolerance", .. })
        ));
    }
}
