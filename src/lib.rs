#![no_std]

//! [![license]](https://opensource.org/licenses/MIT)
//!
//! [license]: https://img.shields.io/badge/License-MIT-blue.svg?style=for-the-badge&labelColor=555555
//!
//! Ruler Level - measurement core for a phone ruler and bubble level
//!
//! The crate turns raw motion-sensor samples into smoothed tilt angles and a
//! bubble position, and turns touch gestures into the scroll offset of a
//! physically calibrated on-screen ruler. It does no drawing and reads no
//! sensors itself: the host feeds samples, touch events and frame times in,
//! and reads plain values out.
//!
//! # Features
//!
//! - Pitch and roll from the accelerometer, fused with the magnetometer when
//!   available, with frame-rate independent smoothing
//! - Sensor axis alignment and screen rotation remapping
//! - Bubble level model with clamped offsets and a level tolerance
//! - Ruler scroll engine with touch slop, fling physics, edge clamping and
//!   snap-back
//! - Tick classification (major, mid, minor) for metric and imperial rulers
//! - `#![no_std]` compatible, no allocation
//!
//! # Quick Start
//!
//! ```rust
//! use ruler_level::{
//!     LevelIndicatorModel, OrientationEngine, OrientationSample, RulerConfig,
//!     RulerScrollEngine, TouchEvent, UnitSystem,
//! };
//!
//! // Level
//! let mut engine = OrientationEngine::new();
//! let level = LevelIndicatorModel::default();
//!
//! let sample = OrientationSample::new(0, 0.0, 0.0, 9.81); // m/s², lying flat
//! let reading = level.compute(engine.update(sample));
//! assert!(reading.is_level);
//!
//! // Ruler
//! let config = RulerConfig::from_dpi(96.0, 0, 30, UnitSystem::Metric).unwrap();
//! let mut ruler = RulerScrollEngine::new(config, 10.0);
//!
//! ruler.on_touch(TouchEvent::down(300.0, 0));
//! ruler.on_touch(TouchEvent::moved(262.0, 16));
//! ruler.on_touch(TouchEvent::up(262.0, 500));
//! while ruler.is_animating() {
//!     ruler.tick(516);
//! }
//! assert_eq!(ruler.current_tick().major_value, 11);
//! ```

#[cfg(test)]
extern crate std;

pub mod axes;
pub mod calibration;
pub mod compass;
mod error;
pub mod level;
mod math;
pub mod orientation;
pub mod scroll;
mod shared;
pub mod smoothing;
mod types;
pub mod units;
pub mod velocity;

// Re-export all public types and functions
pub use axes::{AxesAlignment, ScreenRotation, align_axes};
pub use calibration::{RulerConfig, pixels_per_unit_from_dpi};
pub use compass::calculate_heading;
pub use error::{ConfigError, ConfigResult};
pub use level::LevelIndicatorModel;
pub use math::{DEG_TO_RAD, RAD_TO_DEG, Vector3Ext};
pub use orientation::{OrientationEngine, OrientationSource};
pub use scroll::RulerScrollEngine;
pub use shared::Shared;
pub use types::*;
