//! The [`SceneDriver`] owns the simulation space and the paired visuals.
//!
//! It advances the space at a fixed step decoupled from the display
//! refresh, resynchronizes every visual from its body after each step and
//! translates key/pointer presses into impulses. Setup and running are
//! separate types: a [`SceneBuilder`] collects walls and visuals, then
//! turns into a driver exactly once via [`SceneBuilder::run`].

use std::time::Duration;

use log::{debug, info, trace};
use nalgebra::Vector2;
use rand::Rng;
use snafu::{Snafu, ensure};

use crate::components::PhysicsBackedVisual;
use crate::core::Visual;
use crate::input::InputEvent;
use crate::physics::PhysicsSimulator;
use crate::utils::math::damping_coefficient;

/// Upper bound on catch-up sub-steps in a single [`SceneDriver::tick`].
/// Anything beyond this after a long stall is dropped instead of simulated.
const MAX_STEPS_PER_TICK: u32 = 8;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)))]
pub enum SceneError {
    #[snafu(display("Simulation bounds must be positive and finite, got {width}x{height}"))]
    InvalidBounds { width: f32, height: f32 },

    #[snafu(display("Damping must be a retained velocity fraction in (0, 1], got {value}"))]
    InvalidDamping { value: f32 },

    #[snafu(display("Friction must be non-negative and finite, got {value}"))]
    InvalidFriction { value: f32 },

    #[snafu(display("Wall thickness must be positive and finite, got {value}"))]
    InvalidWallThickness { value: f32 },

    #[snafu(display("Timestep must be positive and finite, got {value}"))]
    InvalidTimestep { value: f32 },

    #[snafu(display("Impulse range must be non-negative and finite, got {value}"))]
    InvalidImpulseRange { value: f32 },

    #[snafu(display("Attraction constant must be negative-signed and finite, got {value}"))]
    InvalidAttractionConstant { value: f32 },

    #[snafu(display("Minimum attraction distance must be positive, got {value}"))]
    InvalidClampDistance { value: f32 },
}

/// Startup constants for one scene.
///
/// Everything here is fixed for the lifetime of the driver; there is no
/// runtime reconfiguration. Defaults give a 480x600 document-space box,
/// near-Earth gravity pointing down the page and heavily damped bodies.
#[derive(Debug, Clone, Copy)]
pub struct SceneConfig {
    /// Gravity in document space, y grows downward.
    pub gravity: Vector2<f32>,
    /// Fraction of velocity a coasting body retains after one second.
    pub damping: f32,
    /// Friction shared by walls and glyph bodies.
    pub friction: f32,
    /// Key presses draw each impulse component uniformly from
    /// `[-impulse_range, impulse_range]`.
    pub impulse_range: f32,
    /// `K` in the pointer attraction `K / distance^2`. Negative-signed;
    /// the sign flips the body-to-pointer offset into an attraction.
    pub attraction_constant: f32,
    /// Distances below this are clamped before the attraction divide, so
    /// a press right on top of a body stays finite.
    pub min_attraction_distance: f32,
    /// Width and height of the boxed simulation area.
    pub bounds: Vector2<f32>,
    /// Thickness of the boundary walls. Must exceed the largest per-step
    /// displacement any body reaches, or fast bodies tunnel through.
    pub wall_thickness: f32,
    /// Fixed simulation step in seconds, independent of the display
    /// refresh interval handed to [`SceneDriver::tick`].
    pub timestep: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            gravity: Vector2::new(0.0, 981.0),
            damping: 0.2,
            friction: 0.68,
            impulse_range: 1000.0,
            attraction_constant: -20000.0,
            min_attraction_distance: 10.0,
            bounds: Vector2::new(480.0, 600.0),
            wall_thickness: 480.0,
            timestep: 1.0 / 60.0,
        }
    }
}

impl SceneConfig {
    /// Checks every constant once, before any body exists. A bad constant
    /// is a programming error and surfaces here instead of as NaN poses
    /// three frames into the simulation.
    pub fn validate(&self) -> Result<(), SceneError> {
        ensure!(
            self.bounds.x > 0.0 && self.bounds.y > 0.0 && self.bounds.norm().is_finite(),
            InvalidBoundsErr {
                width: self.bounds.x,
                height: self.bounds.y
            }
        );
        ensure!(
            self.damping > 0.0 && self.damping <= 1.0,
            InvalidDampingErr {
                value: self.damping
            }
        );
        ensure!(
            self.friction >= 0.0 && self.friction.is_finite(),
            InvalidFrictionErr {
                value: self.friction
            }
        );
        ensure!(
            self.wall_thickness > 0.0 && self.wall_thickness.is_finite(),
            InvalidWallThicknessErr {
                value: self.wall_thickness
            }
        );
        ensure!(
            self.timestep > 0.0 && self.timestep.is_finite(),
            InvalidTimestepErr {
                value: self.timestep
            }
        );
        ensure!(
            self.impulse_range >= 0.0 && self.impulse_range.is_finite(),
            InvalidImpulseRangeErr {
                value: self.impulse_range
            }
        );
        ensure!(
            self.attraction_constant < 0.0 && self.attraction_constant.is_finite(),
            InvalidAttractionConstantErr {
                value: self.attraction_constant
            }
        );
        ensure!(
            self.min_attraction_distance > 0.0 && self.min_attraction_distance.is_finite(),
            InvalidClampDistanceErr {
                value: self.min_attraction_distance
            }
        );
        Ok(())
    }
}

/// The setup phase of a scene.
///
/// Owns the space while walls and visuals are added. No stepping happens
/// until [`run`](SceneBuilder::run) consumes the builder, and there is no
/// way back from the driver it returns.
pub struct SceneBuilder {
    config: SceneConfig,
    space: PhysicsSimulator,
    visuals: Vec<PhysicsBackedVisual>,
}

impl SceneBuilder {
    pub fn new(config: SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;

        let mut space = PhysicsSimulator::new(config.gravity, config.timestep);
        space.add_boundary_walls(config.bounds, config.wall_thickness, config.friction);

        info!(
            "Simulation space ready: {}x{} box, gravity ({}, {})",
            config.bounds.x, config.bounds.y, config.gravity.x, config.gravity.y
        );

        Ok(SceneBuilder {
            config,
            space,
            visuals: Vec::new(),
        })
    }

    /// Pairs `visual` with a new dynamic body and registers it.
    ///
    /// Returns the registration index; resync happens in registration
    /// order on every step.
    pub fn add_visual(&mut self, visual: Visual) -> usize {
        let damping = damping_coefficient(self.config.damping);
        let paired =
            PhysicsBackedVisual::new(visual, &mut self.space, self.config.friction, damping);
        self.visuals.push(paired);
        self.visuals.len() - 1
    }

    /// Ends the setup phase. One-way for the process lifetime.
    pub fn run(self) -> SceneDriver {
        info!("Scene running with {} glyph bodies", self.visuals.len());
        SceneDriver {
            config: self.config,
            space: self.space,
            visuals: self.visuals,
            accumulator: 0.0,
        }
    }
}

/// The running phase of a scene.
///
/// Exclusively owns the [`PhysicsSimulator`]; the only mutating entry
/// points are [`tick`](SceneDriver::tick) and the two impulse handlers,
/// all driven synchronously from the display refresh thread.
pub struct SceneDriver {
    config: SceneConfig,
    space: PhysicsSimulator,
    visuals: Vec<PhysicsBackedVisual>,
    accumulator: f32,
}

impl SceneDriver {
    /// Advances the simulation, consuming `dt` of display time in fixed
    /// sub-steps, and resynchronizes every visual after each one.
    ///
    /// Returns the number of sub-steps taken. Leftover time below one
    /// step stays in the accumulator for the next tick; a stall longer
    /// than [`MAX_STEPS_PER_TICK`] steps is truncated.
    pub fn tick(&mut self, dt: Duration) -> u32 {
        self.accumulator += dt.as_secs_f32();

        // Half a step of slack keeps float noise from eating a sub-step.
        let cap = (MAX_STEPS_PER_TICK as f32 + 0.5) * self.config.timestep;
        if self.accumulator > cap {
            debug!("Stalled for {:.3}s, truncating catch-up", self.accumulator);
            self.accumulator = cap;
        }

        let mut steps = 0;
        while self.accumulator >= self.config.timestep {
            self.accumulator -= self.config.timestep;
            self.space.step();
            for paired in &mut self.visuals {
                paired.resync(&self.space);
            }
            steps += 1;
        }

        trace!("Tick consumed {dt:?} in {steps} sub-steps");
        steps
    }

    /// Scatters every glyph body with a random impulse at its local
    /// origin, each component drawn uniformly from the symmetric
    /// configured range.
    ///
    /// Draws two values per body, x then y, in registration order, so a
    /// seeded generator reproduces the exact same scatter.
    pub fn on_key_press<R: Rng>(&mut self, rng: &mut R) {
        let range = self.config.impulse_range;
        debug!("Key press: scattering {} bodies", self.visuals.len());

        for paired in &self.visuals {
            let Some(body) = self.space.body_mut(paired.body_handle()) else {
                continue;
            };
            let impulse = Vector2::new(rng.gen_range(-range..=range), rng.gen_range(-range..=range));
            body.apply_impulse(impulse, true);
        }
    }

    /// Pulls every glyph body toward `point` with a radial impulse of
    /// magnitude `|K| / distance^2`.
    ///
    /// The distance entering the divide is clamped at the configured
    /// minimum, and a body exactly on the point is skipped outright (no
    /// direction exists there), so no non-finite value can reach a
    /// body's velocity.
    pub fn on_pointer_press(&mut self, point: Vector2<f32>) {
        debug!(
            "Pointer press at ({}, {}): attracting {} bodies",
            point.x,
            point.y,
            self.visuals.len()
        );

        for paired in &self.visuals {
            let Some(body) = self.space.body_mut(paired.body_handle()) else {
                continue;
            };
            let offset = point - body.translation();
            let distance = offset.norm();
            if distance == 0.0 {
                continue;
            }

            let clamped = distance.max(self.config.min_attraction_distance);
            let magnitude = -self.config.attraction_constant / (clamped * clamped);
            if !magnitude.is_finite() {
                continue;
            }

            // Normalize before scaling: unit components keep the product
            // finite even when magnitude / distance would overflow.
            let dir = offset / distance;
            body.apply_impulse(dir * magnitude, true);
        }
    }

    /// Routes a display collaborator event to the matching impulse
    /// handler. Releases and other transitions are ignored.
    pub fn handle_event<R: Rng>(&mut self, event: &InputEvent, rng: &mut R) {
        match event {
            InputEvent::Key(key) if key.state.is_pressed() => self.on_key_press(rng),
            InputEvent::Pointer(pointer) if pointer.state.is_pressed() => {
                self.on_pointer_press(pointer.position)
            }
            _ => {}
        }
    }

    /// All paired visuals, in registration order.
    pub fn visuals(&self) -> &[PhysicsBackedVisual] {
        &self.visuals
    }

    /// Read-only view of the simulation space. All mutation goes through
    /// the tick and impulse entry points.
    pub fn simulator(&self) -> &PhysicsSimulator {
        &self.space
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}
