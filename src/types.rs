//! Core types and conventions shared by the level and ruler engines

use core::fmt;
use core::str::FromStr;

use nalgebra::Vector3;

use crate::axes::{AxesAlignment, ScreenRotation};
use crate::error::{ConfigError, ConfigResult};

/// One motion-sensor reading
///
/// The accelerometer is required; the magnetometer is optional and, when
/// present, lets the engine take the fused rotation-matrix path. Units only
/// need to be consistent per sensor (m/s² or g, µT) since both vectors are
/// used for direction only.
///
/// # Example
/// ```
/// use ruler_level::OrientationSample;
///
/// let flat = OrientationSample::new(0, 0.0, 0.0, 9.81);
/// let fused = OrientationSample::new(16_000_000, 0.0, 0.0, 9.81)
///     .with_magnetometer(22.0, 5.0, -40.0);
/// assert!(flat.magnetometer.is_none());
/// assert!(fused.magnetometer.is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationSample {
    /// Sensor timestamp in nanoseconds (monotonic, arbitrary origin)
    pub timestamp_nanos: u64,
    /// Accelerometer reading (reaction to gravity)
    pub accelerometer: Vector3<f32>,
    /// Magnetometer reading, if delivered with this sample
    pub magnetometer: Option<Vector3<f32>>,
}

impl OrientationSample {
    /// Accelerometer-only sample
    pub fn new(timestamp_nanos: u64, ax: f32, ay: f32, az: f32) -> Self {
        Self {
            timestamp_nanos,
            accelerometer: Vector3::new(ax, ay, az),
            magnetometer: None,
        }
    }

    /// Attach a magnetometer reading
    pub fn with_magnetometer(mut self, mx: f32, my: f32, mz: f32) -> Self {
        self.magnetometer = Some(Vector3::new(mx, my, mz));
        self
    }
}

/// Tilt angles produced by the orientation engine, in degrees
///
/// Sign convention (level frame, see [`crate::axes`]):
/// - positive `pitch`: top edge tipped toward the user
/// - positive `roll`: device tipped to the right
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationState {
    /// Rotation about the left-right axis
    pub pitch: f32,
    /// Rotation about the top-bottom axis
    pub roll: f32,
    /// Magnetic heading in `[-180, 180]`, only known on the fused path
    pub heading: Option<f32>,
}

impl OrientationState {
    /// State with the given angles and no heading
    pub fn new(pitch: f32, roll: f32) -> Self {
        Self {
            pitch,
            roll,
            heading: None,
        }
    }
}

/// Output of the level indicator for one render frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelReading {
    /// Horizontal bubble offset in `[-1, 1]`, positive to the right
    pub bubble_offset_x: f32,
    /// Vertical bubble offset in `[-1, 1]`, positive upward
    pub bubble_offset_y: f32,
    /// Largest of `|pitch|` and `|roll|`, the tilt shown to the user
    pub max_tilt: f32,
    /// Both angles strictly inside the tolerance
    pub is_level: bool,
}

impl LevelReading {
    /// Tilt rounded to whole degrees for the "N°" label
    pub fn display_degrees(&self) -> i32 {
        nalgebra::ComplexField::round(self.max_tilt) as i32
    }
}

/// Orientation engine settings
///
/// # Example
/// ```
/// use ruler_level::{AxesAlignment, OrientationSettings};
///
/// let settings = OrientationSettings {
///     smoothing_factor: 0.3,               // snappier bubble
///     alignment: AxesAlignment::PyNxPz,    // Android sensor frame
///     ..Default::default()
/// };
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrientationSettings {
    /// Weight of a new sample at the nominal cadence, in `(0, 1]`
    ///
    /// 1.0 disables smoothing. Lower values give a steadier but slower bubble.
    pub smoothing_factor: f32,
    /// Sample period the smoothing factor is tuned for, in nanoseconds
    pub nominal_sample_period_nanos: u64,
    /// A latched magnetometer reading older than this is not fused
    pub magnetometer_timeout_nanos: u64,
    /// Mapping from the platform sensor frame to the level frame
    pub alignment: AxesAlignment,
    /// Current display rotation
    pub rotation: ScreenRotation,
}

impl Default for OrientationSettings {
    fn default() -> Self {
        Self {
            smoothing_factor: 0.15,
            nominal_sample_period_nanos: 16_666_667,
            magnetometer_timeout_nanos: 500_000_000,
            alignment: AxesAlignment::default(),
            rotation: ScreenRotation::default(),
        }
    }
}

impl OrientationSettings {
    /// Check the settings for values the engine cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(ConfigError::InvalidSmoothingFactor {
                value: self.smoothing_factor,
            });
        }
        if self.nominal_sample_period_nanos == 0 {
            return Err(ConfigError::InvalidSamplePeriod);
        }
        Ok(())
    }
}

/// Measurement system shown on the ruler
///
/// Metric sub-units are millimetres (major ticks every centimetre), imperial
/// sub-units are tenths of an inch (major ticks every inch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Sub-units per displayed unit
    pub const SUB_UNITS_PER_UNIT: i32 = 10;

    /// Label for a major value
    pub fn unit_label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "cm",
            UnitSystem::Imperial => "in",
        }
    }

    /// Sub-units in one physical inch
    pub fn sub_units_per_inch(self) -> f32 {
        match self {
            UnitSystem::Metric => 25.4,
            UnitSystem::Imperial => 10.0,
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => f.write_str("metric"),
            UnitSystem::Imperial => f.write_str("imperial"),
        }
    }
}

/// Parses the unit preference strings stored by the host settings.
impl FromStr for UnitSystem {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("metric") {
            Ok(UnitSystem::Metric)
        } else if s.eq_ignore_ascii_case("imperial") {
            Ok(UnitSystem::Imperial)
        } else {
            Err(ConfigError::UnknownUnitSystem)
        }
    }
}

/// Ruler scroll engine settings
///
/// Distances are in pixels, velocities in pixels per second. The defaults
/// follow common touch platform values at baseline density; hosts should
/// scale the distance and velocity fields by their display density.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollSettings {
    /// Movement from the touch-down point before a drag starts
    pub touch_slop: f32,
    /// Slowest release that still starts a fling
    pub min_fling_velocity: f32,
    /// Release velocities are capped to this magnitude
    pub max_fling_velocity: f32,
    /// Exponential velocity decay rate of a fling, per second
    pub friction: f32,
    /// A fling slower than this comes to rest
    pub stop_velocity: f32,
    /// Duration of the snap-back animation
    pub snap_duration_millis: u32,
    /// Trailing window of touch samples used for the release velocity
    pub velocity_window_millis: u32,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8_000.0,
            friction: 4.0,
            stop_velocity: 20.0,
            snap_duration_millis: 200,
            velocity_window_millis: 100,
        }
    }
}

impl ScrollSettings {
    /// Check the settings for values the engine cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        let finite_non_negative = |v: f32| v.is_finite() && v >= 0.0;

        if !finite_non_negative(self.touch_slop) {
            return Err(ConfigError::InvalidScrollSettings {
                field: "touch_slop",
            });
        }
        if !finite_non_negative(self.min_fling_velocity) {
            return Err(ConfigError::InvalidScrollSettings {
                field: "min_fling_velocity",
            });
        }
        if !(self.max_fling_velocity.is_finite()
            && self.max_fling_velocity >= self.min_fling_velocity)
        {
            return Err(ConfigError::InvalidScrollSettings {
                field: "max_fling_velocity",
            });
        }
        if !(self.friction.is_finite() && self.friction > 0.0) {
            return Err(ConfigError::InvalidScrollSettings { field: "friction" });
        }
        if !(self.stop_velocity.is_finite() && self.stop_velocity > 0.0) {
            return Err(ConfigError::InvalidScrollSettings {
                field: "stop_velocity",
            });
        }
        if self.velocity_window_millis == 0 {
            return Err(ConfigError::InvalidScrollSettings {
                field: "velocity_window_millis",
            });
        }
        Ok(())
    }
}

/// Ruler scroll phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPhase {
    /// At rest inside the range (also while a touch has not moved past slop)
    #[default]
    Idle,
    /// Following the finger, position may be out of range
    Dragging,
    /// Decelerating after a release
    Flinging,
    /// Animating back to a target inside the range
    Snapping,
}

/// Snapshot of the ruler scroll engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    /// Scroll offset of the indicator from the start of the range, in pixels
    pub position: f32,
    /// Current content velocity in pixels per second
    pub velocity: f32,
    /// Current phase
    pub phase: ScrollPhase,
}

/// Kind of a touch event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    /// Finger touched the ruler
    Down,
    /// Finger moved while touching
    Move,
    /// Finger lifted
    Up,
    /// The platform took the gesture away (e.g. a parent view intercepted it)
    Cancel,
}

/// Horizontal touch position at a point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    /// Finger position in pixels
    pub x: f32,
    /// Event time in milliseconds
    pub timestamp_millis: u64,
}

/// Touch event delivered by the host input dispatch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// What happened
    pub action: TouchAction,
    /// Finger position along the ruler, in pixels
    pub x: f32,
    /// Event time in milliseconds, on the same clock as frame ticks
    pub timestamp_millis: u64,
}

impl TouchEvent {
    /// Touch-down at `x`
    pub fn down(x: f32, timestamp_millis: u64) -> Self {
        Self {
            action: TouchAction::Down,
            x,
            timestamp_millis,
        }
    }

    /// Move to `x`
    pub fn moved(x: f32, timestamp_millis: u64) -> Self {
        Self {
            action: TouchAction::Move,
            x,
            timestamp_millis,
        }
    }

    /// Lift-off at `x`
    pub fn up(x: f32, timestamp_millis: u64) -> Self {
        Self {
            action: TouchAction::Up,
            x,
            timestamp_millis,
        }
    }

    /// Gesture cancelled by the platform
    pub fn cancel(x: f32, timestamp_millis: u64) -> Self {
        Self {
            action: TouchAction::Cancel,
            x,
            timestamp_millis,
        }
    }

    /// The position and time of this event
    pub fn sample(&self) -> TouchSample {
        TouchSample {
            x: self.x,
            timestamp_millis: self.timestamp_millis,
        }
    }
}

/// One ruler tick as seen by the drawing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickMark {
    /// Sub-unit index from the start of the range
    pub index: i32,
    /// Whole unit the tick belongs to (the label of a major tick)
    pub major_value: i32,
    /// Whole centimetre / inch
    pub is_major_tick: bool,
    /// Half unit, never set together with `is_major_tick`
    pub is_mid_tick: bool,
}
