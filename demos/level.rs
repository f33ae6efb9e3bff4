use ruler_level::{LevelIndicatorModel, OrientationEngine, OrientationSample};

const GRAVITY: f32 = 9.80665;
const SAMPLE_PERIOD_NANOS: u64 = 16_666_667; // 60 Hz sensor rate

fn main() {
    let mut engine = OrientationEngine::new();
    let level = LevelIndicatorModel::default();

    for i in 0..30u64 {
        // this loop should repeat each time new accelerometer data is available
        // here the device is tipped slowly towards its top edge
        let pitch = (i as f32 * 0.5).to_radians();
        let sample = OrientationSample::new(
            i * SAMPLE_PERIOD_NANOS,
            -GRAVITY * pitch.sin(),
            0.0,
            GRAVITY * pitch.cos(),
        ); // replace this with actual accelerometer data in m/s^2

        let state = engine.update(sample);
        let reading = level.compute(state);

        println!(
            "Pitch: {:.2}, Roll: {:.2}, Bubble: ({:.2}, {:.2}), {}°{}",
            state.pitch,
            state.roll,
            reading.bubble_offset_x,
            reading.bubble_offset_y,
            reading.display_degrees(),
            if reading.is_level { " level" } else { "" }
        );
    }
}
