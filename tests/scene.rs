use std::time::Duration;

use approx::assert_relative_eq;
use nalgebra::vector;
use rand::SeedableRng;
use rand::rngs::StdRng;

use notefall::core::Visual;
use notefall::scene::{SceneBuilder, SceneConfig, SceneDriver};

const FRAME: Duration = Duration::from_millis(17);

fn notehead(x: f32, y: f32) -> Visual {
    Visual::new("noteheadWhole", vector![x, y], vector![18.0, 12.0]).expect("valid extent")
}

fn scene_with(positions: &[(f32, f32)]) -> SceneDriver {
    let mut builder = SceneBuilder::new(SceneConfig::default()).expect("valid config");
    for &(x, y) in positions {
        builder.add_visual(notehead(x, y));
    }
    builder.run()
}

#[test]
fn visuals_match_bodies_exactly_after_tick() {
    let mut scene = scene_with(&[(100.0, 100.0), (200.0, 150.0), (300.0, 80.0)]);
    assert_eq!(scene.simulator().body_count(), 3);

    for _ in 0..30 {
        scene.tick(FRAME);
    }

    for paired in scene.visuals() {
        let body = scene
            .simulator()
            .body(paired.body_handle())
            .expect("body is alive");
        // Exact same-frame copy, not approximate agreement.
        assert_eq!(paired.visual().transform.position(), *body.translation());
        assert_eq!(paired.visual().transform.rotation(), body.rotation().angle());
    }
}

#[test]
fn identical_runs_produce_identical_transforms() {
    let run = || {
        let mut scene = scene_with(&[(50.0, 50.0), (150.0, 50.0), (250.0, 50.0), (350.0, 50.0)]);
        let mut rng = StdRng::seed_from_u64(42);
        for frame in 0..120 {
            if frame == 30 {
                scene.on_key_press(&mut rng);
            }
            if frame == 60 {
                scene.on_pointer_press(vector![240.0, 300.0]);
            }
            scene.tick(FRAME);
        }
        scene
            .visuals()
            .iter()
            .map(|p| p.visual().transform)
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

#[test]
fn bodies_never_leave_the_boundary_box() {
    let mut scene = scene_with(&[(100.0, 100.0), (240.0, 300.0), (400.0, 500.0)]);
    let mut rng = StdRng::seed_from_u64(7);
    let bounds = scene.config().bounds;

    for frame in 0..600 {
        if frame % 60 == 0 {
            scene.on_key_press(&mut rng);
        }
        scene.tick(FRAME);

        for paired in scene.visuals() {
            let pos = paired.visual().transform.position();
            assert!(
                pos.x >= 0.0 && pos.x <= bounds.x && pos.y >= 0.0 && pos.y <= bounds.y,
                "body escaped to ({}, {}) on frame {frame}",
                pos.x,
                pos.y
            );
        }
    }
}

#[test]
fn pointer_attraction_weakens_with_distance() {
    // Same mass everywhere, so velocity right after the press is a direct
    // read of the impulse magnitude.
    let mut scene = scene_with(&[(180.0, 300.0), (340.0, 300.0), (40.0, 300.0)]);
    let point = vector![240.0, 300.0];

    scene.on_pointer_press(point);

    let speeds: Vec<f32> = scene
        .visuals()
        .iter()
        .map(|p| {
            scene
                .simulator()
                .body(p.body_handle())
                .expect("body is alive")
                .linvel()
                .norm()
        })
        .collect();

    // Distances from the point: 60, 100, 200.
    assert!(speeds[0] > speeds[1]);
    assert!(speeds[1] > speeds[2]);
}

#[test]
fn pointer_attraction_pulls_toward_the_point() {
    let mut scene = scene_with(&[(100.0, 300.0)]);
    scene.on_pointer_press(vector![240.0, 300.0]);

    let vel = *scene
        .simulator()
        .body(scene.visuals()[0].body_handle())
        .expect("body is alive")
        .linvel();
    assert!(vel.x > 0.0, "body should accelerate toward the point");
    assert_relative_eq!(vel.y, 0.0, epsilon = 1e-4);
}

#[test]
fn pointer_attraction_is_bounded_below_the_clamp_distance() {
    let config = SceneConfig::default();
    let mut scene = scene_with(&[(240.001, 300.0)]);
    scene.on_pointer_press(vector![240.0, 300.0]);

    let body = scene
        .simulator()
        .body(scene.visuals()[0].body_handle())
        .expect("body is alive");
    let speed = body.linvel().norm();
    let mass = body.mass();

    assert!(speed.is_finite());
    // At the clamp the magnitude tops out at |K| / min_distance^2.
    let max_speed = -config.attraction_constant
        / (config.min_attraction_distance * config.min_attraction_distance)
        / mass;
    assert!(speed <= max_speed * 1.001);
}

#[test]
fn pointer_attraction_stays_finite_for_extreme_constants() {
    let mut config = SceneConfig::default();
    config.attraction_constant = -1.0e38;
    assert!(config.validate().is_ok());

    let mut builder = SceneBuilder::new(config).expect("valid config");
    builder.add_visual(notehead(100.0, 300.0));
    let mut scene = builder.run();

    // A press almost on top of the body: the direction divide sees a
    // tiny distance while the magnitude is enormous.
    scene.on_pointer_press(vector![100.001, 300.0]);

    let vel = *scene
        .simulator()
        .body(scene.visuals()[0].body_handle())
        .expect("body is alive")
        .linvel();
    assert!(vel.x.is_finite(), "x velocity became {}", vel.x);
    assert!(vel.y.is_finite(), "y velocity became {}", vel.y);
    assert!(vel.x > 0.0, "body should still accelerate toward the point");
}

#[test]
fn pointer_press_on_a_coincident_body_is_a_no_op() {
    let mut scene = scene_with(&[(240.0, 300.0)]);
    scene.on_pointer_press(vector![240.0, 300.0]);

    let vel = *scene
        .simulator()
        .body(scene.visuals()[0].body_handle())
        .expect("body is alive")
        .linvel();
    assert_eq!(vel, vector![0.0, 0.0]);
}

#[test]
fn key_impulses_stay_within_the_configured_range() {
    let config = SceneConfig::default();
    let mut scene = scene_with(&[(100.0, 100.0), (200.0, 200.0), (300.0, 300.0), (400.0, 400.0)]);
    let mut rng = StdRng::seed_from_u64(1234);

    scene.on_key_press(&mut rng);

    for paired in scene.visuals() {
        let body = scene
            .simulator()
            .body(paired.body_handle())
            .expect("body is alive");
        let impulse = body.linvel() * body.mass();
        assert!(impulse.x.abs() <= config.impulse_range * 1.001);
        assert!(impulse.y.abs() <= config.impulse_range * 1.001);
    }
}

#[test]
fn released_body_settles_on_the_floor() {
    let mut scene = scene_with(&[(240.0, 100.0)]);
    let bounds = scene.config().bounds;

    // 20 seconds of simulated time, far more than the fall takes.
    for _ in 0..1200 {
        scene.tick(FRAME);
    }

    let body = scene
        .simulator()
        .body(scene.visuals()[0].body_handle())
        .expect("body is alive");
    let pos = paired_position(&scene);

    assert!(
        body.linvel().y.abs() < 0.5,
        "still falling at {} px/s",
        body.linvel().y
    );
    // Resting on the floor's inner face: center height = floor - half extent.
    assert_relative_eq!(pos.y, bounds.y - 6.0, epsilon = 2.0);
    assert!(pos.x >= 0.0 && pos.x <= bounds.x && pos.y <= bounds.y);
}

fn paired_position(scene: &SceneDriver) -> nalgebra::Vector2<f32> {
    scene.visuals()[0].visual().transform.position()
}
