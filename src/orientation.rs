//! Orientation engine: motion-sensor samples to smoothed tilt angles

use log::{debug, trace};
use nalgebra::{ComplexField, RealField, Vector3};

use crate::axes::align_axes;
use crate::compass::RotationMatrix;
use crate::error::ConfigResult;
use crate::math::{RAD_TO_DEG, Vector3Ext};
use crate::smoothing::DirectionFilter;
use crate::types::{OrientationSample, OrientationSettings, OrientationState};

/// Which computation produced the latest state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrientationSource {
    /// No sample accepted yet
    #[default]
    None,
    /// Gravity direction only
    Accelerometer,
    /// Rotation matrix from gravity and magnetic field
    Fused,
}

/// Converts raw accelerometer (and optional magnetometer) samples into
/// smoothed pitch and roll for a bubble level.
///
/// Two paths share one sign convention:
///
/// - accelerometer only: `pitch = atan2(-ax, sqrt(ay² + az²))`,
///   `roll = atan2(ay, az)`
/// - fused: a rotation matrix is built from gravity and the magnetic field,
///   pitch and roll come from its gravity row with the same formulas and the
///   heading comes from its horizontal rows
///
/// The fused path is taken whenever a magnetometer reading is available,
/// either in the sample itself or latched by [`update_magnetometer`] within
/// the configured timeout. Both sensor directions are low-pass filtered
/// before angles are derived.
///
/// Degenerate or non-finite accelerometer readings are ignored: the engine
/// keeps and returns its last state.
///
/// # Example
/// ```
/// use ruler_level::{OrientationEngine, OrientationSample};
///
/// let mut engine = OrientationEngine::new();
/// let state = engine.update(OrientationSample::new(0, 0.0, 0.0, 9.81));
/// assert_eq!(state.pitch, 0.0);
/// assert_eq!(state.roll, 0.0);
/// ```
///
/// [`update_magnetometer`]: OrientationEngine::update_magnetometer
pub struct OrientationEngine {
    /// Engine settings
    settings: OrientationSettings,
    /// Smoothed gravity direction in the level frame
    gravity: DirectionFilter,
    /// Smoothed magnetic field direction in the level frame
    magnetic: DirectionFilter,
    /// Latest magnetometer reading delivered on its own, with its timestamp
    latched_magnetometer: Option<(u64, Vector3<f32>)>,
    /// Latest output
    state: OrientationState,
    /// Path that produced `state`
    source: OrientationSource,
}

impl OrientationEngine {
    /// Create an engine with default settings
    pub fn new() -> Self {
        Self::build(OrientationSettings::default())
    }

    /// Create an engine with the given settings
    pub fn with_settings(settings: OrientationSettings) -> ConfigResult<Self> {
        settings.validate().inspect_err(|e| {
            log::warn!("rejected orientation settings: {}", e);
        })?;
        Ok(Self::build(settings))
    }

    fn build(settings: OrientationSettings) -> Self {
        Self {
            settings,
            gravity: DirectionFilter::new(
                settings.smoothing_factor,
                settings.nominal_sample_period_nanos,
            ),
            magnetic: DirectionFilter::new(
                settings.smoothing_factor,
                settings.nominal_sample_period_nanos,
            ),
            latched_magnetometer: None,
            state: OrientationState::default(),
            source: OrientationSource::None,
        }
    }

    /// Forget all history, returning to the flat state
    pub fn reset(&mut self) {
        self.gravity.reset();
        self.magnetic.reset();
        self.latched_magnetometer = None;
        self.state = OrientationState::default();
        self.source = OrientationSource::None;
    }

    /// Get current settings
    pub fn settings(&self) -> OrientationSettings {
        self.settings
    }

    /// Replace the settings
    ///
    /// Filter history is dropped when the smoothing parameters, axes
    /// alignment or screen rotation change, since old directions were
    /// expressed in a different frame or time constant.
    pub fn set_settings(&mut self, settings: OrientationSettings) -> ConfigResult<()> {
        settings.validate().inspect_err(|e| {
            log::warn!("rejected orientation settings: {}", e);
        })?;
        if settings != self.settings {
            debug!("orientation settings changed, resetting filters");
            let state = self.state;
            *self = Self::build(settings);
            // Keep showing the last angles until the next sample arrives
            self.state = state;
        }
        Ok(())
    }

    /// Latest output
    pub fn state(&self) -> OrientationState {
        self.state
    }

    /// Path that produced the latest output
    pub fn source(&self) -> OrientationSource {
        self.source
    }

    /// Latch a magnetometer reading delivered on its own event stream
    ///
    /// The next accelerometer samples take the fused path while the reading
    /// is younger than `magnetometer_timeout_nanos`. Degenerate readings
    /// are ignored.
    pub fn update_magnetometer(&mut self, timestamp_nanos: u64, magnetometer: Vector3<f32>) {
        if magnetometer.is_degenerate() {
            trace!("ignoring degenerate magnetometer reading");
            return;
        }
        self.latched_magnetometer = Some((timestamp_nanos, magnetometer));
    }

    /// Process one sample and return the new state
    ///
    /// # Arguments
    /// * `sample` - Accelerometer reading, optionally with a magnetometer reading
    ///
    /// # Returns
    /// The updated state, or the previous one if the sample was unusable
    pub fn update(&mut self, sample: OrientationSample) -> OrientationState {
        let accelerometer = self.to_level_frame(sample.accelerometer);
        if accelerometer.is_degenerate() {
            trace!("ignoring degenerate accelerometer sample");
            return self.state;
        }

        let gravity = self.gravity.update(accelerometer, sample.timestamp_nanos);

        let magnetometer = sample
            .magnetometer
            .filter(|m| !m.is_degenerate())
            .or_else(|| self.fresh_latched_magnetometer(sample.timestamp_nanos))
            .map(|m| self.to_level_frame(m));

        let fused = magnetometer.and_then(|m| {
            let field = self.magnetic.update(m, sample.timestamp_nanos);
            RotationMatrix::from_gravity_and_field(gravity, field)
        });

        let (state, source) = match fused {
            Some(rotation) => {
                let (pitch, roll) = tilt_from_gravity(rotation.up());
                (
                    OrientationState {
                        pitch,
                        roll,
                        heading: Some(rotation.heading()),
                    },
                    OrientationSource::Fused,
                )
            }
            None => {
                let (pitch, roll) = tilt_from_gravity(gravity);
                (
                    OrientationState::new(pitch, roll),
                    OrientationSource::Accelerometer,
                )
            }
        };

        if source != self.source {
            debug!("orientation source changed: {:?} -> {:?}", self.source, source);
        }
        trace!(
            "orientation update: pitch={:.2} roll={:.2} heading={:?}",
            state.pitch, state.roll, state.heading
        );

        self.state = state;
        self.source = source;
        state
    }

    fn to_level_frame(&self, v: Vector3<f32>) -> Vector3<f32> {
        align_axes(v, self.settings.alignment, self.settings.rotation)
    }

    fn fresh_latched_magnetometer(&self, timestamp_nanos: u64) -> Option<Vector3<f32>> {
        let (latched_at, reading) = self.latched_magnetometer?;
        let age = timestamp_nanos.saturating_sub(latched_at);
        (age <= self.settings.magnetometer_timeout_nanos).then_some(reading)
    }
}

impl Default for OrientationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Pitch and roll in degrees from a gravity reaction vector in the level frame
///
/// The caller guarantees a non-degenerate vector.
pub fn tilt_from_gravity(gravity: Vector3<f32>) -> (f32, f32) {
    let horizontal = ComplexField::sqrt(gravity.y * gravity.y + gravity.z * gravity.z);
    let pitch = RealField::atan2(-gravity.x, horizontal) * RAD_TO_DEG;
    let roll = RealField::atan2(gravity.y, gravity.z) * RAD_TO_DEG;
    (pitch, roll)
}
