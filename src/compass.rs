//! Accelerometer + magnetometer rotation matrix and tilt-compensated heading

use nalgebra::{Matrix3, RealField, Vector3};

use crate::math::{RAD_TO_DEG, Vector3Ext};

/// Smallest usable horizontal field component, relative to the field strength.
///
/// Below this the magnetic field is (almost) parallel to gravity and the
/// east direction is undefined.
const MIN_HORIZONTAL_FIELD: f32 = 0.1;

/// Device orientation relative to the Earth, built from gravity and the
/// magnetic field.
///
/// Rows are the East, North and Up directions expressed in the level frame,
/// so `rotation * v` converts a level-frame vector into East-North-Up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix(pub Matrix3<f32>);

impl RotationMatrix {
    /// Build the rotation matrix
    ///
    /// # Arguments
    /// * `accelerometer` - Accelerometer reading (reaction to gravity, points up)
    /// * `magnetometer` - Magnetometer reading
    ///
    /// # Returns
    /// `None` when either vector is degenerate or the field is too close to
    /// vertical to define a horizontal direction.
    ///
    /// # Example
    /// ```
    /// use nalgebra::Vector3;
    /// use ruler_level::compass::RotationMatrix;
    ///
    /// let up = Vector3::new(0.0, 0.0, 9.81);
    /// let field = Vector3::new(20.0, 0.0, -40.0); // top edge pointing north
    /// let rotation = RotationMatrix::from_gravity_and_field(up, field).unwrap();
    /// assert!(rotation.heading().abs() < 1e-3);
    /// ```
    pub fn from_gravity_and_field(
        accelerometer: Vector3<f32>,
        magnetometer: Vector3<f32>,
    ) -> Option<Self> {
        if accelerometer.is_degenerate() || magnetometer.is_degenerate() {
            return None;
        }

        let east = magnetometer.cross(&accelerometer);
        let east_norm = east.norm();
        let scale = accelerometer.norm() * magnetometer.norm();
        if !(east_norm >= MIN_HORIZONTAL_FIELD * scale) {
            return None;
        }

        let east = east / east_norm;
        let up = accelerometer.safe_normalize();
        let north = up.cross(&east);

        Some(Self(Matrix3::from_rows(&[
            east.transpose(),
            north.transpose(),
            up.transpose(),
        ])))
    }

    /// Up direction in the level frame (unit gravity reaction)
    pub fn up(&self) -> Vector3<f32> {
        self.0.row(2).transpose()
    }

    /// Heading of the device top edge in degrees, `[-180, 180]`, 0 = magnetic north,
    /// positive toward east.
    pub fn heading(&self) -> f32 {
        // Level X is the top edge: its east and north components
        let east_x = self.0[(0, 0)];
        let north_x = self.0[(1, 0)];
        RealField::atan2(east_x, north_x) * RAD_TO_DEG
    }
}

/// Calculate tilt-compensated magnetic heading of the device top edge
///
/// # Returns
/// Heading in degrees (`[-180, 180]`, 0 = magnetic north), or `None` when the
/// readings cannot define one.
pub fn calculate_heading(accelerometer: Vector3<f32>, magnetometer: Vector3<f32>) -> Option<f32> {
    RotationMatrix::from_gravity_and_field(accelerometer, magnetometer).map(|r| r.heading())
}
