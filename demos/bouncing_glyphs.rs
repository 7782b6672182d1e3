//! A headless glyph-rain scene.
//!
//! Drops a grid of whole-note heads and one treble clef into the boxed
//! simulation area, then drives the scene at 60 Hz for ten seconds,
//! firing a key press and a pointer press along the way. Poses go to the
//! log instead of a display surface; wire up a real renderer by reading
//! `scene.visuals()` after each tick.

use std::error::Error;
use std::time::Duration;

use log::info;
use nalgebra::vector;
use notefall::core::Visual;
use notefall::input::{InputEvent, KeyEvent, PointerEvent, PressState};
use notefall::scene::{SceneBuilder, SceneConfig};

const FRAME: Duration = Duration::from_micros(16_667);

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut builder = SceneBuilder::new(SceneConfig::default())?;

    for row in 0..4 {
        for col in 0..20 {
            let pos = vector![12.0 + 24.0 * col as f32, 40.0 + 60.0 * row as f32];
            builder.add_visual(Visual::new("noteheadWhole", pos, vector![18.0, 12.0])?);
        }
    }
    builder.add_visual(Visual::new("gClef", vector![100.0, 300.0], vector![30.0, 80.0])?);

    let mut scene = builder.run();
    let mut rng = rand::thread_rng();

    for frame in 0..600u32 {
        let timestamp = frame as f64 * FRAME.as_secs_f64();

        if frame == 120 {
            scene.handle_event(
                &InputEvent::Key(KeyEvent {
                    state: PressState::Pressed,
                    timestamp,
                }),
                &mut rng,
            );
        }
        if frame == 360 {
            scene.handle_event(
                &InputEvent::Pointer(PointerEvent {
                    state: PressState::Pressed,
                    position: vector![240.0, 300.0],
                    timestamp,
                }),
                &mut rng,
            );
        }

        scene.tick(FRAME);

        if frame % 60 == 0 {
            let clef = scene
                .visuals()
                .last()
                .expect("scene has at least the clef");
            info!(
                "t={timestamp:5.2}s  '{}' at ({:7.2}, {:7.2}) rot {:6.1}°",
                clef.visual().glyph(),
                clef.visual().transform.position().x,
                clef.visual().transform.position().y,
                clef.visual().transform.rotation_degrees(),
            );
        }
    }

    Ok(())
}
