//! Ruler calibration: mapping physical units to screen pixels

use log::warn;

use crate::error::{ConfigError, ConfigResult};
use crate::types::UnitSystem;

/// Pixels per ruler sub-unit for a display density
///
/// Metric sub-units are millimetres, imperial sub-units are tenths of an
/// inch.
///
/// # Arguments
/// * `xdpi` - Physical pixels per inch along the ruler axis
/// * `unit_system` - Measurement system of the ruler
///
/// # Example
/// ```
/// use ruler_level::{UnitSystem, calibration::pixels_per_unit_from_dpi};
///
/// let per_mm = pixels_per_unit_from_dpi(96.0, UnitSystem::Metric).unwrap();
/// assert!((per_mm - 3.7795).abs() < 1e-3);
///
/// let per_tenth_inch = pixels_per_unit_from_dpi(96.0, UnitSystem::Imperial).unwrap();
/// assert_eq!(per_tenth_inch, 9.6);
/// ```
pub fn pixels_per_unit_from_dpi(xdpi: f32, unit_system: UnitSystem) -> ConfigResult<f32> {
    if !(xdpi.is_finite() && xdpi > 0.0) {
        warn!("rejected display density {}", xdpi);
        return Err(ConfigError::InvalidDensity { value: xdpi });
    }
    Ok(xdpi / unit_system.sub_units_per_inch())
}

/// Calibrated ruler geometry
///
/// Values are whole units (centimetres or inches); the ruler draws ten
/// sub-unit ticks per unit. A config is validated when built and is
/// immutable afterwards; a resize builds a new one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RulerConfig {
    pixels_per_unit: f32,
    min_value: i32,
    max_value: i32,
    unit_system: UnitSystem,
}

impl RulerConfig {
    /// Build a validated config
    ///
    /// # Arguments
    /// * `pixels_per_unit` - Pixels per sub-unit (mm or tenth of an inch)
    /// * `min_value` - First labelled value
    /// * `max_value` - Last labelled value
    /// * `unit_system` - Measurement system
    ///
    /// # Errors
    /// [`ConfigError::InvalidPixelsPerUnit`] for a non-positive or non-finite
    /// factor, [`ConfigError::EmptyRange`] when `max_value <= min_value`.
    ///
    /// # Example
    /// ```
    /// use ruler_level::{RulerConfig, UnitSystem};
    ///
    /// let config = RulerConfig::new(3.78, 0, 100, UnitSystem::Metric).unwrap();
    /// assert!((config.max_scroll() - 3780.0).abs() < 1e-2);
    ///
    /// assert!(RulerConfig::new(0.0, 0, 100, UnitSystem::Metric).is_err());
    /// assert!(RulerConfig::new(3.78, 10, 10, UnitSystem::Metric).is_err());
    /// ```
    pub fn new(
        pixels_per_unit: f32,
        min_value: i32,
        max_value: i32,
        unit_system: UnitSystem,
    ) -> ConfigResult<Self> {
        if !(pixels_per_unit.is_finite() && pixels_per_unit > 0.0) {
            warn!("rejected ruler calibration: {} px per unit", pixels_per_unit);
            return Err(ConfigError::InvalidPixelsPerUnit {
                value: pixels_per_unit,
            });
        }
        if max_value <= min_value {
            warn!("rejected ruler range {}..{}", min_value, max_value);
            return Err(ConfigError::EmptyRange {
                min: min_value,
                max: max_value,
            });
        }
        Ok(Self {
            pixels_per_unit,
            min_value,
            max_value,
            unit_system,
        })
    }

    /// Build a config from the display density
    pub fn from_dpi(
        xdpi: f32,
        min_value: i32,
        max_value: i32,
        unit_system: UnitSystem,
    ) -> ConfigResult<Self> {
        let pixels_per_unit = pixels_per_unit_from_dpi(xdpi, unit_system)?;
        Self::new(pixels_per_unit, min_value, max_value, unit_system)
    }

    /// Pixels per sub-unit
    pub fn pixels_per_unit(&self) -> f32 {
        self.pixels_per_unit
    }

    /// First labelled value
    pub fn min_value(&self) -> i32 {
        self.min_value
    }

    /// Last labelled value
    pub fn max_value(&self) -> i32 {
        self.max_value
    }

    /// Measurement system
    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    /// Number of sub-units between the first and last value
    pub fn range_sub_units(&self) -> i64 {
        (i64::from(self.max_value) - i64::from(self.min_value))
            * i64::from(UnitSystem::SUB_UNITS_PER_UNIT)
    }

    /// Largest scroll offset, in pixels
    pub fn max_scroll(&self) -> f32 {
        self.range_sub_units() as f32 * self.pixels_per_unit
    }

    /// Scroll offset that puts `value` under the indicator (clamped to the range)
    pub fn position_for_value(&self, value: f32) -> f32 {
        let value = if value.is_nan() {
            self.min_value as f32
        } else {
            value.clamp(self.min_value as f32, self.max_value as f32)
        };
        (value - self.min_value as f32)
            * UnitSystem::SUB_UNITS_PER_UNIT as f32
            * self.pixels_per_unit
    }

    /// Value under the indicator at a scroll offset
    pub fn value_at(&self, position: f32) -> f32 {
        self.min_value as f32
            + position / (self.pixels_per_unit * UnitSystem::SUB_UNITS_PER_UNIT as f32)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RulerConfig {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            pixels_per_unit: f32,
            min_value: i32,
            max_value: i32,
            unit_system: UnitSystem,
        }

        let raw = Raw::deserialize(deserializer)?;
        RulerConfig::new(raw.pixels_per_unit, raw.min_value, raw.max_value, raw.unit_system)
            .map_err(serde::de::Error::custom)
    }
}
