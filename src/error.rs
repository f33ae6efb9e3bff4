//! Configuration errors
//!
//! Sensor noise and malformed touch sequences are absorbed by the engines.
//! The only failures reported to the host are configurations that can never
//! produce a usable level or ruler.

use thiserror::Error;

/// Invalid configuration supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// Calibration factor is zero, negative or not finite
    #[error("pixels per unit must be positive and finite (got {value})")]
    InvalidPixelsPerUnit {
        /// The rejected value
        value: f32,
    },

    /// Measurement range contains no values
    #[error("ruler range is empty (min: {min}, max: {max})")]
    EmptyRange {
        /// Lower end of the range
        min: i32,
        /// Upper end of the range
        max: i32,
    },

    /// Display density is zero, negative or not finite
    #[error("display density must be positive and finite (got {value})")]
    InvalidDensity {
        /// The rejected value
        value: f32,
    },

    /// Level bubble range or tolerance is zero, negative or not finite
    #[error("invalid level threshold: {name} = {value}")]
    InvalidLevelThreshold {
        /// Which threshold
        name: &'static str,
        /// The rejected value
        value: f32,
    },

    /// Smoothing factor outside `(0, 1]`
    #[error("smoothing factor must be in (0, 1] (got {value})")]
    InvalidSmoothingFactor {
        /// The rejected value
        value: f32,
    },

    /// Nominal sample period of zero
    #[error("nominal sample period must be non-zero")]
    InvalidSamplePeriod,

    /// A scroll setting the physics cannot run with
    #[error("invalid scroll setting: {field}")]
    InvalidScrollSettings {
        /// Name of the offending field
        field: &'static str,
    },

    /// Unit preference string is neither "metric" nor "imperial"
    #[error("unknown unit system")]
    UnknownUnitSystem,
}

/// Result type for configuration
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;
