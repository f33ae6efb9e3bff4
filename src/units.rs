//! Conversion between scroll positions and ruler ticks

use nalgebra::ComplexField;

use crate::calibration::RulerConfig;
use crate::types::{TickMark, UnitSystem};

/// Sub-ticks between two mid ticks
const MID_TICK_INTERVAL: i32 = 5;
/// Extra ticks generated past each viewport edge
const VISIBLE_MARGIN_TICKS: i32 = 10;

/// Tick nearest to a scroll position
///
/// The sub-unit index is `round(position / pixels_per_unit)`. Every tenth
/// index is a major tick (whole centimetre or inch), every fifth one that is
/// not major is a mid tick, everything else is a minor tick.
///
/// # Example
/// ```
/// use ruler_level::{RulerConfig, UnitSystem, units::to_display_value};
///
/// let config = RulerConfig::new(3.78, 0, 100, UnitSystem::Metric).unwrap();
/// let tick = to_display_value(3.78 * 10.0 * 7.0, &config);
/// assert!(tick.is_major_tick);
/// assert_eq!(tick.major_value, 7);
/// ```
pub fn to_display_value(position: f32, config: &RulerConfig) -> TickMark {
    tick_at(index_at(position, config), config)
}

/// Tick at a sub-unit index (negative indices lie before the range start)
pub fn tick_at(index: i32, config: &RulerConfig) -> TickMark {
    let per_unit = UnitSystem::SUB_UNITS_PER_UNIT;
    let is_major_tick = index.rem_euclid(per_unit) == 0;
    let is_mid_tick = !is_major_tick && index.rem_euclid(MID_TICK_INTERVAL) == 0;

    TickMark {
        index,
        major_value: config.min_value().saturating_add(index.div_euclid(per_unit)),
        is_major_tick,
        is_mid_tick,
    }
}

/// Scroll position of a sub-unit index
pub fn position_of(index: i32, config: &RulerConfig) -> f32 {
    index as f32 * config.pixels_per_unit()
}

/// Sub-unit index nearest to a scroll position
pub fn index_at(position: f32, config: &RulerConfig) -> i32 {
    let index = ComplexField::round(position / config.pixels_per_unit());
    // `as` saturates and maps NaN to zero
    index as i32
}

/// Ticks a view of `viewport_width` pixels shows when scrolled to `position`
///
/// The indicator sits at the viewport center, so the ticks span half a
/// viewport either side of `position`, plus a margin so partially visible
/// labels are still drawn. The drawing layer places each tick at
/// `position_of(tick.index) - position + viewport_width / 2`.
///
/// # Example
/// ```
/// use ruler_level::{RulerConfig, UnitSystem, units::visible_ticks};
///
/// let config = RulerConfig::new(10.0, 0, 100, UnitSystem::Metric).unwrap();
/// let majors: Vec<i32> = visible_ticks(500.0, 200.0, &config)
///     .filter(|t| t.is_major_tick)
///     .map(|t| t.major_value)
///     .collect();
/// assert!(majors.contains(&5));
/// ```
pub fn visible_ticks(
    position: f32,
    viewport_width: f32,
    config: &RulerConfig,
) -> impl Iterator<Item = TickMark> + '_ {
    let half_width = if viewport_width.is_finite() {
        viewport_width.max(0.0) / 2.0
    } else {
        0.0
    };
    let first = index_at(position - half_width, config).saturating_sub(VISIBLE_MARGIN_TICKS);
    let last = index_at(position + half_width, config).saturating_add(VISIBLE_MARGIN_TICKS);

    (first..=last).map(move |index| tick_at(index, config))
}
