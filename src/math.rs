//! Mathematical utilities and nalgebra extensions shared by the engines

use nalgebra::{ComplexField, Vector3};

/// Mathematical constants
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Extension trait for Vector3 operations
pub trait Vector3Ext {
    /// Normalize the vector, returning zero vector if magnitude is zero
    fn safe_normalize(&self) -> Vector3<f32>;

    /// True when every component is finite
    fn all_finite(&self) -> bool;

    /// True when the vector has a usable (finite, non-zero) direction
    fn is_degenerate(&self) -> bool;
}

impl Vector3Ext for Vector3<f32> {
    fn safe_normalize(&self) -> Vector3<f32> {
        let magnitude_squared = self.magnitude_squared();
        if magnitude_squared > 0.0 && magnitude_squared.is_finite() {
            *self / ComplexField::sqrt(magnitude_squared)
        } else {
            Vector3::zeros()
        }
    }

    fn all_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    fn is_degenerate(&self) -> bool {
        !self.all_finite() || self.magnitude_squared() <= 0.0
    }
}

/// Scale a per-sample blend factor to an arbitrary sample interval.
///
/// `alpha` is the weight given to a new sample when samples arrive every
/// `nominal` seconds. For an interval `dt` the equivalent weight is
/// `1 - (1 - alpha)^(dt / nominal)`, which keeps the filter time constant
/// independent of the delivery cadence.
pub fn blend_factor(alpha: f32, dt: f32, nominal: f32) -> f32 {
    if !(dt > 0.0) || !(nominal > 0.0) {
        return alpha;
    }
    let retained = ComplexField::powf(1.0 - alpha, dt / nominal);
    (1.0 - retained).clamp(0.0, 1.0)
}

/// Cubic ease-out: fast start, gentle arrival. `t` is clamped to `[0, 1]`.
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inverse = 1.0 - t;
    1.0 - inverse * inverse * inverse
}
