//! Ruler scroll demonstration
//!
//! Calibrates a metric ruler from the display density, drags it with a
//! simulated finger, releases into a fling and ticks frames until the
//! ruler comes to rest. Each frame prints the scroll position, the reading
//! under the indicator and the labelled ticks on screen.
//!
//! Run with: `cargo run --example ruler`

use ruler_level::units::visible_ticks;
use ruler_level::{ConfigResult, RulerConfig, RulerScrollEngine, TouchEvent, UnitSystem};

const DPI: f32 = 420.0;
const VIEWPORT_WIDTH: f32 = 1080.0;
const FRAME_MILLIS: u64 = 16;

fn main() -> ConfigResult<()> {
    let config = RulerConfig::from_dpi(DPI, 0, 30, UnitSystem::Metric)?;
    let label = config.unit_system().unit_label();
    let mut ruler = RulerScrollEngine::new(config, 5.0);

    println!(
        "{:.2} px per mm, {:.0} px of travel",
        config.pixels_per_unit(),
        config.max_scroll()
    );

    // Swipe left over 80 ms, lifting while still moving
    let mut now = 0;
    let mut x = 900.0;
    ruler.on_touch(TouchEvent::down(x, now));
    for _ in 0..5 {
        now += FRAME_MILLIS;
        x -= 60.0;
        ruler.on_touch(TouchEvent::moved(x, now));
    }
    let state = ruler.on_touch(TouchEvent::up(x, now));
    println!(
        "released at {:.1} px, {:.0} px/s, {:?}",
        state.position, state.velocity, state.phase
    );

    while ruler.is_animating() {
        now += FRAME_MILLIS;
        let state = ruler.tick(now);
        let tick = ruler.current_tick();

        let labels: Vec<i32> = visible_ticks(state.position, VIEWPORT_WIDTH, &config)
            .filter(|t| t.is_major_tick)
            .map(|t| t.major_value)
            .collect();

        println!(
            "{:>5} ms {:?}: {:8.1} px, {:6.2} {} (tick {}), on screen {:?}",
            now,
            state.phase,
            state.position,
            ruler.current_value(),
            label,
            tick.index,
            labels
        );
    }

    println!("rest at {:.1} {}", ruler.current_value(), label);
    Ok(())
}
