//! Ruler scroll engine: touch gestures to a clamped, fling-capable scroll offset

use log::{debug, trace};
use nalgebra::ComplexField;

use crate::calibration::RulerConfig;
use crate::error::ConfigResult;
use crate::math::ease_out_cubic;
use crate::types::{
    ScrollPhase, ScrollSettings, ScrollState, TickMark, TouchAction, TouchEvent, TouchSample,
};
use crate::units;
use crate::velocity::VelocityTracker;

/// Touch sequence in progress
#[derive(Debug, Clone, Copy)]
struct Gesture {
    /// Finger position at touch-down
    down_x: f32,
    /// Finger position last applied to the scroll offset
    last_x: f32,
    /// Whether the finger has moved past the touch slop
    dragging: bool,
}

/// Snap-back animation
#[derive(Debug, Clone, Copy)]
struct Snap {
    from: f32,
    to: f32,
    start_millis: u64,
}

/// One-dimensional scroll state machine for the ruler
///
/// Phases: `Idle → Dragging → {Flinging | Snapping} → Idle`.
///
/// - Dragging follows the finger without clamping, so the content can be
///   pulled past either end.
/// - A release faster than `min_fling_velocity` flings: the velocity decays
///   exponentially under `friction` and the fling stops dead at either end of
///   the range.
/// - Any other release, a tap or a cancel snaps back into the range with a
///   short ease-out animation.
///
/// Outside of `Dragging` the scroll offset always ends up within
/// `0..=max_scroll`. Animations advance only when the host calls
/// [`tick`](RulerScrollEngine::tick) with its frame time.
///
/// # Example
/// ```
/// use ruler_level::{RulerConfig, RulerScrollEngine, ScrollPhase, TouchEvent, UnitSystem};
///
/// let config = RulerConfig::new(3.78, 0, 100, UnitSystem::Metric).unwrap();
/// let mut ruler = RulerScrollEngine::new(config, 50.0);
///
/// ruler.on_touch(TouchEvent::down(500.0, 0));
/// ruler.on_touch(TouchEvent::moved(400.0, 16));
/// ruler.on_touch(TouchEvent::up(400.0, 1_000));
/// assert_eq!(ruler.phase(), ScrollPhase::Snapping);
///
/// ruler.tick(1_250);
/// assert_eq!(ruler.phase(), ScrollPhase::Idle);
/// assert!((ruler.position() - 1990.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct RulerScrollEngine {
    config: RulerConfig,
    settings: ScrollSettings,
    /// Scroll offset in pixels
    position: f32,
    /// Content velocity in pixels per second (flinging only)
    velocity: f32,
    phase: ScrollPhase,
    gesture: Option<Gesture>,
    tracker: VelocityTracker,
    snap: Option<Snap>,
    /// Time of the last animation step
    last_frame_millis: u64,
}

impl RulerScrollEngine {
    /// Create an engine at rest on `initial_value` with default settings
    ///
    /// The initial value is clamped into the configured range.
    pub fn new(config: RulerConfig, initial_value: f32) -> Self {
        let settings = ScrollSettings::default();
        Self {
            config,
            settings,
            position: config.position_for_value(initial_value),
            velocity: 0.0,
            phase: ScrollPhase::Idle,
            gesture: None,
            tracker: VelocityTracker::new(settings.velocity_window_millis),
            snap: None,
            last_frame_millis: 0,
        }
    }

    /// Create an engine with custom gesture and physics settings
    pub fn with_settings(
        config: RulerConfig,
        initial_value: f32,
        settings: ScrollSettings,
    ) -> ConfigResult<Self> {
        settings.validate().inspect_err(|e| {
            log::warn!("rejected scroll settings: {}", e);
        })?;
        let mut engine = Self::new(config, initial_value);
        engine.settings = settings;
        engine.tracker = VelocityTracker::new(settings.velocity_window_millis);
        Ok(engine)
    }

    /// Current snapshot
    pub fn state(&self) -> ScrollState {
        ScrollState {
            position: self.position,
            velocity: self.velocity,
            phase: self.phase,
        }
    }

    /// Scroll offset in pixels
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Current phase
    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Whether the host should keep requesting animation frames
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, ScrollPhase::Flinging | ScrollPhase::Snapping)
    }

    /// Target of the running snap animation
    pub fn snap_target(&self) -> Option<f32> {
        self.snap.map(|s| s.to)
    }

    /// Largest scroll offset
    pub fn max_scroll(&self) -> f32 {
        self.config.max_scroll()
    }

    /// Active calibration
    pub fn config(&self) -> &RulerConfig {
        &self.config
    }

    /// Active settings
    pub fn settings(&self) -> ScrollSettings {
        self.settings
    }

    /// Value under the indicator, in whole units (not clamped while dragging)
    pub fn current_value(&self) -> f32 {
        self.config.value_at(self.position)
    }

    /// Tick nearest to the indicator
    pub fn current_tick(&self) -> TickMark {
        units::to_display_value(self.position, &self.config)
    }

    /// Replace the calibration after a resize
    ///
    /// Any gesture or animation is dropped and the value under the indicator
    /// is kept (clamped into the new range).
    pub fn set_config(&mut self, config: RulerConfig) {
        let value = self.current_value();
        debug!(
            "ruler recalibrated: {} px/unit, range {}..{}",
            config.pixels_per_unit(),
            config.min_value(),
            config.max_value()
        );
        self.config = config;
        self.position = config.position_for_value(value);
        self.gesture = None;
        self.tracker.clear();
        self.come_to_rest();
    }

    /// Jump to a value without animation
    pub fn scroll_to_value(&mut self, value: f32) {
        self.scroll_to(self.config.position_for_value(value));
    }

    /// Jump to a scroll offset without animation (clamped into the range)
    pub fn scroll_to(&mut self, position: f32) {
        if position.is_nan() {
            return;
        }
        self.gesture = None;
        self.tracker.clear();
        self.position = self.clamp(position);
        self.come_to_rest();
    }

    /// Start a fling with a content velocity in pixels per second
    ///
    /// The velocity is capped at `max_fling_velocity`. Flinging further out
    /// from an out-of-range offset snaps back instead. A touch in progress is
    /// abandoned; the finger drives the content again only after a new
    /// touch-down.
    pub fn fling(&mut self, velocity: f32, now_millis: u64) {
        self.gesture = None;
        self.tracker.clear();
        if !velocity.is_finite() {
            self.start_snap(now_millis);
            return;
        }
        let max = self.settings.max_fling_velocity;
        let velocity = velocity.clamp(-max, max);

        let outward = (self.position > self.max_scroll() && velocity > 0.0)
            || (self.position < 0.0 && velocity < 0.0);
        if outward || velocity == 0.0 {
            self.start_snap(now_millis);
            return;
        }

        self.snap = None;
        self.velocity = velocity;
        self.last_frame_millis = now_millis;
        self.set_phase(ScrollPhase::Flinging);
    }

    /// Feed one touch event from the host input dispatch
    pub fn on_touch(&mut self, event: TouchEvent) -> ScrollState {
        let sample = event.sample();
        if !sample.x.is_finite() {
            trace!("ignoring touch event with non-finite position");
            return self.state();
        }
        match event.action {
            TouchAction::Down => self.touch_down(sample),
            TouchAction::Move => self.touch_move(sample),
            TouchAction::Up => self.touch_up(sample),
            TouchAction::Cancel => self.touch_cancel(sample),
        }
        self.state()
    }

    /// Advance the running animation to the frame time `now_millis`
    pub fn tick(&mut self, now_millis: u64) -> ScrollState {
        match self.phase {
            ScrollPhase::Flinging => self.step_fling(now_millis),
            ScrollPhase::Snapping => self.step_snap(now_millis),
            ScrollPhase::Idle | ScrollPhase::Dragging => {}
        }
        self.state()
    }

    fn touch_down(&mut self, sample: TouchSample) {
        // Any running animation stops where it is
        self.snap = None;
        self.velocity = 0.0;
        self.tracker.clear();
        self.tracker.add(sample);

        let caught_out_of_range = !self.in_range(self.position);
        self.gesture = Some(Gesture {
            down_x: sample.x,
            last_x: sample.x,
            dragging: caught_out_of_range,
        });
        if caught_out_of_range {
            self.set_phase(ScrollPhase::Dragging);
        } else {
            self.set_phase(ScrollPhase::Idle);
        }
    }

    fn touch_move(&mut self, sample: TouchSample) {
        let Some(mut gesture) = self.gesture else {
            trace!("move without touch-down, treating as touch-down");
            self.touch_down(sample);
            return;
        };
        self.tracker.add(sample);

        if !gesture.dragging {
            if (sample.x - gesture.down_x).abs() <= self.settings.touch_slop {
                return;
            }
            gesture.dragging = true;
            self.set_phase(ScrollPhase::Dragging);
        }

        // Content moves opposite to the finger
        self.position -= sample.x - gesture.last_x;
        gesture.last_x = sample.x;
        self.gesture = Some(gesture);
    }

    fn touch_up(&mut self, sample: TouchSample) {
        let gesture = self.gesture.take();
        let dragging = gesture.is_some_and(|g| g.dragging);

        if dragging {
            self.tracker.add(sample);
            let finger_velocity = self
                .tracker
                .velocity_capped(self.settings.max_fling_velocity);
            let velocity = -finger_velocity;
            trace!("release velocity {:.1} px/s", velocity);

            if velocity.abs() >= self.settings.min_fling_velocity && velocity != 0.0 {
                self.tracker.clear();
                self.fling(velocity, sample.timestamp_millis);
                return;
            }
        }

        self.tracker.clear();
        self.start_snap(sample.timestamp_millis);
    }

    fn touch_cancel(&mut self, sample: TouchSample) {
        self.gesture = None;
        self.tracker.clear();
        self.start_snap(sample.timestamp_millis);
    }

    fn start_snap(&mut self, now_millis: u64) {
        let target = self.clamp(self.position);
        self.snap = Some(Snap {
            from: self.position,
            to: target,
            start_millis: now_millis,
        });
        self.velocity = 0.0;
        self.last_frame_millis = now_millis;
        self.set_phase(ScrollPhase::Snapping);
    }

    fn step_fling(&mut self, now_millis: u64) {
        let elapsed_millis = now_millis.saturating_sub(self.last_frame_millis);
        if elapsed_millis == 0 {
            return;
        }
        self.last_frame_millis = now_millis;

        let dt = elapsed_millis as f32 / 1000.0;
        let friction = self.settings.friction;
        let decay = ComplexField::exp(-friction * dt);

        // Exact integral of v0·e^(-kt) over the frame
        let next_position = self.position + self.velocity * (1.0 - decay) / friction;
        let next_velocity = self.velocity * decay;
        let max = self.max_scroll();

        if self.velocity > 0.0 && next_position >= max {
            trace!("fling hit the end of the range");
            self.position = max;
            self.come_to_rest();
            return;
        }
        if self.velocity < 0.0 && next_position <= 0.0 {
            trace!("fling hit the start of the range");
            self.position = 0.0;
            self.come_to_rest();
            return;
        }

        self.position = next_position;
        self.velocity = next_velocity;
        trace!("fling step: position={:.1} velocity={:.1}", self.position, self.velocity);

        if self.velocity.abs() < self.settings.stop_velocity {
            if self.in_range(self.position) {
                self.come_to_rest();
            } else {
                self.start_snap(now_millis);
            }
        }
    }

    fn step_snap(&mut self, now_millis: u64) {
        let Some(snap) = self.snap else {
            self.come_to_rest();
            return;
        };

        let elapsed = now_millis.saturating_sub(snap.start_millis);
        let duration = u64::from(self.settings.snap_duration_millis);
        if snap.from == snap.to || elapsed >= duration {
            self.position = snap.to;
            self.come_to_rest();
            return;
        }

        let progress = ease_out_cubic(elapsed as f32 / duration as f32);
        self.position = snap.from + (snap.to - snap.from) * progress;
        self.last_frame_millis = now_millis;
    }

    fn come_to_rest(&mut self) {
        self.velocity = 0.0;
        self.snap = None;
        self.set_phase(ScrollPhase::Idle);
    }

    fn set_phase(&mut self, phase: ScrollPhase) {
        if self.phase != phase {
            debug!(
                "ruler phase {:?} -> {:?} at {:.1} px",
                self.phase, phase, self.position
            );
            self.phase = phase;
        }
    }

    fn clamp(&self, position: f32) -> f32 {
        position.clamp(0.0, self.max_scroll())
    }

    fn in_range(&self, position: f32) -> bool {
        (0.0..=self.max_scroll()).contains(&position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::types::UnitSystem;

    fn config() -> RulerConfig {
        RulerConfig::new(3.78, 0, 100, UnitSystem::Metric).unwrap()
    }

    fn engine_at(value: f32) -> RulerScrollEngine {
        RulerScrollEngine::new(config(), value)
    }

    /// Run frames at 60 Hz until the engine settles
    fn settle(engine: &mut RulerScrollEngine, mut now: u64) -> u64 {
        for _ in 0..1000 {
            if !engine.is_animating() {
                break;
            }
            now += 16;
            engine.tick(now);
        }
        now
    }

    #[test]
    fn test_initial_state() {
        let engine = engine_at(50.0);
        assert_eq!(engine.phase(), ScrollPhase::Idle);
        assert!((engine.position() - 1890.0).abs() < 0.01);
        assert_eq!(engine.velocity, 0.0);
    }

    #[test]
    fn test_initial_value_is_clamped() {
        assert_eq!(engine_at(-10.0).position(), 0.0);
        let engine = engine_at(1000.0);
        assert_eq!(engine.position(), engine.max_scroll());
    }

    #[test]
    fn test_movement_within_slop_does_not_drag() {
        let mut engine = engine_at(50.0);
        let start = engine.position();

        engine.on_touch(TouchEvent::down(500.0, 0));
        engine.on_touch(TouchEvent::moved(505.0, 16));
        assert_eq!(engine.phase(), ScrollPhase::Idle);
        assert_eq!(engine.position(), start);
    }

    #[test]
    fn test_drag_applies_full_displacement_once_past_slop() {
        let mut engine = engine_at(50.0);
        let start = engine.position();

        engine.on_touch(TouchEvent::down(500.0, 0));
        engine.on_touch(TouchEvent::moved(505.0, 8));
        engine.on_touch(TouchEvent::moved(480.0, 16));
        assert_eq!(engine.phase(), ScrollPhase::Dragging);
        assert!((engine.position() - (start + 20.0)).abs() < 1e-3);

        engine.on_touch(TouchEvent::moved(490.0, 24));
        assert!((engine.position() - (start + 10.0)).abs() < 1e-3);
    }

    #[test]
    fn test_drag_is_not_clamped() {
        let mut engine = engine_at(0.0);
        engine.on_touch(TouchEvent::down(100.0, 0));
        engine.on_touch(TouchEvent::moved(300.0, 16));
        assert_eq!(engine.phase(), ScrollPhase::Dragging);
        assert!((engine.position() + 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_slow_release_snaps_back_into_range() {
        let mut engine = engine_at(0.0);
        engine.on_touch(TouchEvent::down(100.0, 0));
        engine.on_touch(TouchEvent::moved(300.0, 16));
        engine.on_touch(TouchEvent::up(300.0, 2_000));

        assert_eq!(engine.phase(), ScrollPhase::Snapping);
        assert_eq!(engine.snap_target(), Some(0.0));

        // Half way through the animation the position is in between
        engine.tick(2_100);
        assert!(engine.position() < 0.0 && engine.position() > -200.0);

        engine.tick(2_200);
        assert_eq!(engine.phase(), ScrollPhase::Idle);
        assert_eq!(engine.position(), 0.0);
    }

    #[test]
    fn test_fast_release_flings_opposite_to_finger() {
        let mut engine = engine_at(50.0);
        let start = engine.position();

        engine.on_touch(TouchEvent::down(500.0, 0));
        engine.on_touch(TouchEvent::moved(480.0, 10));
        engine.on_touch(TouchEvent::moved(460.0, 20));
        engine.on_touch(TouchEvent::up(460.0, 20));

        assert_eq!(engine.phase(), ScrollPhase::Flinging);
        assert!(engine.state().velocity > 0.0);

        engine.tick(36);
        assert!(engine.position() > start + 40.0);

        settle(&mut engine, 36);
        assert_eq!(engine.phase(), ScrollPhase::Idle);
        assert!(engine.position() <= engine.max_scroll());
    }

    #[test]
    fn test_fling_stops_exactly_at_end() {
        let mut engine = engine_at(0.0);
        let max = engine.max_scroll();
        engine.scroll_to(max - 5.0);

        engine.fling(6_000.0, 0);
        assert_eq!(engine.phase(), ScrollPhase::Flinging);

        engine.tick(16);
        assert_eq!(engine.phase(), ScrollPhase::Idle);
        assert_eq!(engine.position(), max);
        assert_eq!(engine.state().velocity, 0.0);
    }

    #[test]
    fn test_fling_stops_exactly_at_start() {
        let mut engine = engine_at(0.0);
        engine.scroll_to(3.0);
        engine.fling(-6_000.0, 100);
        engine.tick(116);
        assert_eq!(engine.position(), 0.0);
        assert_eq!(engine.phase(), ScrollPhase::Idle);
    }

    #[test]
    fn test_fling_decelerates_to_rest() {
        let mut engine = engine_at(10.0);
        let start = engine.position();
        engine.fling(400.0, 0);

        let mut previous_velocity = engine.state().velocity;
        let mut now = 0;
        while engine.phase() == ScrollPhase::Flinging {
            now += 16;
            engine.tick(now);
            if engine.phase() == ScrollPhase::Flinging {
                assert!(engine.state().velocity < previous_velocity);
                previous_velocity = engine.state().velocity;
            }
            assert!(now < 10_000, "fling never stopped");
        }

        assert_eq!(engine.phase(), ScrollPhase::Idle);
        // Total travel approaches v0 / friction
        let travelled = engine.position() - start;
        let limit = 400.0 / ScrollSettings::default().friction;
        assert!(travelled > 0.9 * limit && travelled <= limit + 1e-3, "{}", travelled);
    }

    #[test]
    fn test_fling_is_frame_rate_independent() {
        let mut fast = engine_at(10.0);
        let mut slow = engine_at(10.0);
        fast.fling(300.0, 0);
        slow.fling(300.0, 0);

        for frame in 1..=30u64 {
            fast.tick(frame * 8);
        }
        for frame in 1..=8u64 {
            slow.tick(frame * 30);
        }
        assert!((fast.position() - slow.position()).abs() < 0.01);
    }

    #[test]
    fn test_touch_down_stops_fling() {
        let mut engine = engine_at(10.0);
        engine.fling(2_000.0, 0);
        engine.tick(16);
        let caught = engine.position();

        engine.on_touch(TouchEvent::down(200.0, 20));
        assert_eq!(engine.phase(), ScrollPhase::Idle);
        assert_eq!(engine.state().velocity, 0.0);

        engine.tick(40);
        assert_eq!(engine.position(), caught);
    }

    #[test]
    fn test_touch_down_during_snap_catches_content() {
        let mut engine = engine_at(0.0);
        engine.on_touch(TouchEvent::down(100.0, 0));
        engine.on_touch(TouchEvent::moved(300.0, 16));
        engine.on_touch(TouchEvent::up(300.0, 2_000));
        engine.tick(2_050);
        let caught = engine.position();
        assert!(caught < 0.0);

        engine.on_touch(TouchEvent::down(250.0, 2_060));
        assert_eq!(engine.phase(), ScrollPhase::Dragging);
        assert_eq!(engine.position(), caught);
        assert_eq!(engine.snap_target(), None);

        // The catch moves with the finger immediately, no slop
        engine.on_touch(TouchEvent::moved(248.0, 2_070));
        assert!((engine.position() - (caught + 2.0)).abs() < 1e-3);
    }

    #[test]
    fn test_tap_snaps_in_place() {
        let mut engine = engine_at(25.0);
        let start = engine.position();
        engine.on_touch(TouchEvent::down(100.0, 0));
        engine.on_touch(TouchEvent::up(101.0, 80));

        assert_eq!(engine.phase(), ScrollPhase::Snapping);
        assert_eq!(engine.snap_target(), Some(start));

        engine.tick(96);
        assert_eq!(engine.phase(), ScrollPhase::Idle);
        assert_eq!(engine.position(), start);
    }

    #[test]
    fn test_move_without_down_starts_gesture() {
        let mut engine = engine_at(50.0);
        let start = engine.position();

        engine.on_touch(TouchEvent::moved(300.0, 0));
        assert_eq!(engine.phase(), ScrollPhase::Idle);
        assert_eq!(engine.position(), start);

        engine.on_touch(TouchEvent::moved(250.0, 16));
        assert_eq!(engine.phase(), ScrollPhase::Dragging);
        assert!((engine.position() - (start + 50.0)).abs() < 1e-3);
    }

    #[test]
    fn test_up_without_down_is_harmless() {
        let mut engine = engine_at(50.0);
        let start = engine.position();
        engine.on_touch(TouchEvent::up(300.0, 0));
        settle(&mut engine, 0);
        assert_eq!(engine.phase(), ScrollPhase::Idle);
        assert_eq!(engine.position(), start);
    }

    #[test]
    fn test_cancel_snaps_back() {
        let mut engine = engine_at(100.0);
        engine.on_touch(TouchEvent::down(100.0, 0));
        engine.on_touch(TouchEvent::moved(20.0, 16));
        assert!(engine.position() > engine.max_scroll());

        engine.on_touch(TouchEvent::cancel(20.0, 20));
        assert_eq!(engine.phase(), ScrollPhase::Snapping);
        assert_eq!(engine.snap_target(), Some(engine.max_scroll()));

        settle(&mut engine, 20);
        assert_eq!(engine.position(), engine.max_scroll());
    }

    #[test]
    fn test_outward_fling_from_overscroll_snaps() {
        let mut engine = engine_at(0.0);
        engine.on_touch(TouchEvent::down(100.0, 0));
        engine.on_touch(TouchEvent::moved(150.0, 10));
        engine.on_touch(TouchEvent::moved(200.0, 20));
        // Still pulling further out when released
        engine.on_touch(TouchEvent::up(200.0, 20));

        assert_eq!(engine.phase(), ScrollPhase::Snapping);
        assert_eq!(engine.snap_target(), Some(0.0));
    }

    #[test]
    fn test_inward_fling_from_overscroll() {
        let mut engine = engine_at(0.0);
        engine.on_touch(TouchEvent::down(100.0, 0));
        engine.on_touch(TouchEvent::moved(200.0, 500));
        // Fast flick back toward the range
        engine.on_touch(TouchEvent::moved(180.0, 510));
        engine.on_touch(TouchEvent::moved(160.0, 520));
        engine.on_touch(TouchEvent::up(160.0, 520));

        assert_eq!(engine.phase(), ScrollPhase::Flinging);
        settle(&mut engine, 520);
        assert_eq!(engine.phase(), ScrollPhase::Idle);
        assert!(engine.position() >= 0.0 && engine.position() <= engine.max_scroll());
    }

    #[test]
    fn test_fling_abandons_touch_in_progress() {
        let mut engine = engine_at(50.0);
        engine.on_touch(TouchEvent::down(500.0, 0));
        engine.on_touch(TouchEvent::moved(450.0, 16));
        assert_eq!(engine.phase(), ScrollPhase::Dragging);

        engine.fling(2_000.0, 20);
        let flung_from = engine.position();

        // The finger that was down no longer moves the content
        engine.on_touch(TouchEvent::moved(300.0, 30));
        assert_eq!(engine.phase(), ScrollPhase::Idle);
        assert_eq!(engine.position(), flung_from);
        assert_eq!(engine.state().velocity, 0.0);

        // Only once past the slop of the new gesture
        engine.on_touch(TouchEvent::moved(290.0, 40));
        assert_eq!(engine.phase(), ScrollPhase::Dragging);
        assert!((engine.position() - (flung_from + 10.0)).abs() < 1e-3);
    }

    #[test]
    fn test_cancel_during_fling_snaps_in_place() {
        let mut engine = engine_at(50.0);
        engine.fling(3_000.0, 0);
        engine.tick(16);
        let position = engine.position();
        assert_eq!(engine.phase(), ScrollPhase::Flinging);

        engine.on_touch(TouchEvent::cancel(200.0, 20));
        assert_eq!(engine.phase(), ScrollPhase::Snapping);
        assert_eq!(engine.snap_target(), Some(position));
        assert_eq!(engine.state().velocity, 0.0);

        engine.tick(36);
        assert_eq!(engine.phase(), ScrollPhase::Idle);
        assert_eq!(engine.position(), position);
    }

    #[test]
    fn test_set_config_keeps_value() {
        let mut engine = engine_at(42.0);
        let denser = RulerConfig::new(7.56, 0, 100, UnitSystem::Metric).unwrap();
        engine.set_config(denser);

        assert!((engine.current_value() - 42.0).abs() < 1e-3);
        assert!((engine.max_scroll() - 7560.0).abs() < 0.1);
        assert_eq!(engine.phase(), ScrollPhase::Idle);
    }

    #[test]
    fn test_scroll_to_value_and_tick() {
        let mut engine = engine_at(0.0);
        engine.scroll_to_value(12.0);
        let tick = engine.current_tick();
        assert!(tick.is_major_tick);
        assert_eq!(tick.major_value, 12);

        engine.scroll_to(f32::NAN);
        assert_eq!(engine.current_tick().major_value, 12);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = ScrollSettings {
            stop_velocity: -1.0,
            ..Default::default()
        };
        let result = RulerScrollEngine::with_settings(config(), 0.0, settings);
        assert_eq!(
            result.err(),
            Some(ConfigError::InvalidScrollSettings {
                field: "stop_velocity"
            })
        );
    }

    #[test]
    fn test_non_finite_touch_is_ignored() {
        let mut engine = engine_at(50.0);
        let before = engine.state();
        engine.on_touch(TouchEvent::down(f32::NAN, 0));
        assert_eq!(engine.state(), before);
    }
}
