use log::debug;
use nalgebra::{Vector2, vector};
use rapier2d::prelude::*;

/// Collision category for the four static boundary walls.
pub const WALL_GROUP: Group = Group::GROUP_1;
/// Collision category for dynamic glyph bodies.
pub const OBJECT_GROUP: Group = Group::GROUP_2;

/// Walls collide with glyph bodies only.
pub fn wall_groups() -> InteractionGroups {
    InteractionGroups::new(WALL_GROUP, OBJECT_GROUP)
}

/// Glyph bodies collide with the walls and with each other.
pub fn object_groups() -> InteractionGroups {
    InteractionGroups::new(OBJECT_GROUP, WALL_GROUP | OBJECT_GROUP)
}

/// Owns the full rapier pipeline for one simulation space.
///
/// Created once during scene setup and stepped at a fixed timestep by the
/// [`SceneDriver`](crate::scene::SceneDriver), which holds it exclusively.
/// Bodies are only ever added during setup; the simulator itself has no
/// notion of the visuals attached to them.
pub struct PhysicsSimulator {
    pub gravity: Vector2<f32>,
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,
}

impl Default for PhysicsSimulator {
    fn default() -> Self {
        PhysicsSimulator {
            gravity: Vector2::zeros(),
            rigid_body_set: RigidBodySet::default(),
            collider_set: ColliderSet::default(),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::default(),
            island_manager: IslandManager::default(),
            broad_phase: DefaultBroadPhase::default(),
            narrow_phase: NarrowPhase::default(),
            impulse_joint_set: ImpulseJointSet::default(),
            multibody_joint_set: MultibodyJointSet::default(),
            ccd_solver: CCDSolver::default(),
            query_pipeline: QueryPipeline::default(),
        }
    }
}

impl PhysicsSimulator {
    /// Creates a simulator with the given gravity and step size in seconds.
    pub fn new(gravity: Vector2<f32>, timestep: f32) -> Self {
        let mut simulator = PhysicsSimulator {
            gravity,
            ..Default::default()
        };
        simulator.integration_parameters.dt = timestep;
        simulator
    }

    /// Advances the simulation by exactly one fixed step.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(), // no hooks
            &(), // no events
        );
        self.query_pipeline.update(&self.collider_set)
    }

    /// Adds the four static boundary walls boxing in `bounds`.
    ///
    /// Walls are solid slabs of `thickness` sitting flush against the box
    /// edges, extended past the corners so bodies cannot slip out
    /// diagonally. Thick walls are the tunneling guard: the thickness must
    /// exceed the largest per-step displacement any body reaches.
    pub fn add_boundary_walls(&mut self, bounds: Vector2<f32>, thickness: f32, friction: f32) {
        let (w, h) = (bounds.x, bounds.y);
        let t = thickness;

        let walls = [
            // (center, half extents)
            (vector![-t / 2.0, h / 2.0], vector![t / 2.0, h / 2.0 + t]),
            (vector![w + t / 2.0, h / 2.0], vector![t / 2.0, h / 2.0 + t]),
            (vector![w / 2.0, -t / 2.0], vector![w / 2.0 + t, t / 2.0]),
            (vector![w / 2.0, h + t / 2.0], vector![w / 2.0 + t, t / 2.0]),
        ];

        for (center, half) in walls {
            let collider = ColliderBuilder::cuboid(half.x, half.y)
                .translation(center)
                .friction(friction)
                .collision_groups(wall_groups())
                .build();
            self.collider_set.insert(collider);
        }

        debug!("Boundary walls set up around {w}x{h} with thickness {t}");
    }

    pub fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    pub fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Number of rigid bodies in the space. Boundary walls are plain
    /// colliders and do not count.
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }
}
