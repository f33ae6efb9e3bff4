//! Sensor frame alignment for the level
//!
//! The orientation engine works in a single *level frame*:
//!
//! - X points toward the top edge of the screen
//! - Y points toward the left edge of the screen
//! - Z points out of the screen, toward the viewer
//!
//! The accelerometer reading in this frame is the reaction to gravity, so a
//! device lying flat reads `(0, 0, +g)`.
//!
//! Platforms report motion samples in their own frames, and the displayed
//! "top" of the screen moves when the UI rotates. [`AxesAlignment`] maps a
//! platform frame onto the level frame and [`ScreenRotation`] re-expresses
//! the result relative to the current display rotation.
//!
//! # Example
//! ```
//! use nalgebra::Vector3;
//! use ruler_level::{AxesAlignment, ScreenRotation, align_axes};
//!
//! // Android style frame: X right, Y top, Z out of the screen
//! let sample = Vector3::new(1.0, 2.0, 3.0);
//! let level = align_axes(sample, AxesAlignment::PyNxPz, ScreenRotation::Rotation0);
//!
//! assert_eq!(level.x, 2.0);   // Level X = Sensor Y
//! assert_eq!(level.y, -1.0);  // Level Y = -Sensor X
//! assert_eq!(level.z, 3.0);   // Level Z = Sensor Z
//! ```

use nalgebra::Vector3;

/// Where each level-frame axis comes from in the sensor frame.
///
/// The three letter-pairs name the source for level X, Y and Z. `P`/`N`
/// mean positive/negative, `x`/`y`/`z` the sensor axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxesAlignment {
    /// Samples are already in the level frame
    #[default]
    PxPyPz,
    /// X right, Y top, Z out, reporting the reaction to gravity (Android)
    PyNxPz,
    /// X right, Y top, Z out, reporting gravity itself (Core Motion)
    NyPxNz,
    /// Device lying face down in the level frame
    PxNyNz,
}

impl AxesAlignment {
    /// Remap a sensor-frame vector into the level frame
    #[inline]
    pub fn apply(self, sensor: Vector3<f32>) -> Vector3<f32> {
        match self {
            AxesAlignment::PxPyPz => sensor,
            AxesAlignment::PyNxPz => Vector3::new(sensor.y, -sensor.x, sensor.z),
            AxesAlignment::NyPxNz => Vector3::new(-sensor.y, sensor.x, -sensor.z),
            AxesAlignment::PxNyNz => Vector3::new(sensor.x, -sensor.y, -sensor.z),
        }
    }
}

/// Display rotation, counter-clockwise from the natural orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScreenRotation {
    /// Natural orientation
    #[default]
    Rotation0,
    /// Displayed top is the device's left edge
    Rotation90,
    /// Upside down
    Rotation180,
    /// Displayed top is the device's right edge
    Rotation270,
}

impl ScreenRotation {
    /// Re-express a level-frame vector relative to the displayed top edge
    #[inline]
    pub fn apply(self, level: Vector3<f32>) -> Vector3<f32> {
        match self {
            ScreenRotation::Rotation0 => level,
            ScreenRotation::Rotation90 => Vector3::new(level.y, -level.x, level.z),
            ScreenRotation::Rotation180 => Vector3::new(-level.x, -level.y, level.z),
            ScreenRotation::Rotation270 => Vector3::new(-level.y, level.x, level.z),
        }
    }

    /// Build from a rotation in degrees (0, 90, 180 or 270)
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(ScreenRotation::Rotation0),
            90 => Some(ScreenRotation::Rotation90),
            180 => Some(ScreenRotation::Rotation180),
            270 => Some(ScreenRotation::Rotation270),
            _ => None,
        }
    }
}

/// Map a platform sample into the level frame seen from the displayed top edge.
#[inline]
pub fn align_axes(
    sensor: Vector3<f32>,
    alignment: AxesAlignment,
    rotation: ScreenRotation,
) -> Vector3<f32> {
    rotation.apply(alignment.apply(sensor))
}
