use log::trace;
use rapier2d::prelude::*;

use crate::core::Visual;
use crate::physics::{PhysicsSimulator, object_groups};

/// One renderable visual paired with one rigid body in a shared space.
///
/// The pairing is immutable for the lifetime of the scene: the body is
/// created from the visual's bounding extent exactly once, and from then
/// on state only flows one way, body pose to visual transform, via
/// [`resync`](PhysicsBackedVisual::resync). The visual never feeds back
/// into the body.
pub struct PhysicsBackedVisual {
    visual: Visual,
    body_handle: RigidBodyHandle,
    collider_handle: ColliderHandle,
}

impl PhysicsBackedVisual {
    /// Pairs `visual` with a fresh box-shaped dynamic body in `space`.
    ///
    /// The body is centered on the visual and sized to its bounding
    /// extent. Mass scales linearly with the extent (width/10 + height/10),
    /// so larger glyphs take proportionally stronger impulses to move.
    /// `damping` is rapier's exponential damping coefficient, see
    /// [`damping_coefficient`](crate::utils::math::damping_coefficient).
    pub fn new(
        visual: Visual,
        space: &mut PhysicsSimulator,
        friction: f32,
        damping: f32,
    ) -> Self {
        let extent = visual.extent();
        let mass = extent.x / 10.0 + extent.y / 10.0;

        let body = RigidBodyBuilder::dynamic()
            .translation(visual.transform.position())
            .rotation(visual.transform.rotation())
            .linear_damping(damping)
            .angular_damping(damping)
            .build();
        let body_handle = space.rigid_body_set.insert(body);

        let collider = ColliderBuilder::cuboid(extent.x / 2.0, extent.y / 2.0)
            .mass(mass)
            .friction(friction)
            .collision_groups(object_groups())
            .build();
        let collider_handle =
            space
                .collider_set
                .insert_with_parent(collider, body_handle, &mut space.rigid_body_set);

        trace!(
            "Paired '{}' with a {}x{} body of mass {mass}",
            visual.glyph(),
            extent.x,
            extent.y
        );

        PhysicsBackedVisual {
            visual,
            body_handle,
            collider_handle,
        }
    }

    /// Copies the body's current pose into the visual transform.
    ///
    /// Idempotent; the visual transform is the only thing written. Called
    /// once after every simulation step, never in between.
    pub fn resync(&mut self, space: &PhysicsSimulator) {
        if let Some(body) = space.body(self.body_handle) {
            self.visual.transform.set_position_vec(*body.translation());
            self.visual.transform.set_rotation(body.rotation().angle());
        }
    }

    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    pub fn body_handle(&self) -> RigidBodyHandle {
        self.body_handle
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider_handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn body_is_created_centered_with_derived_mass() {
        let mut space = PhysicsSimulator::new(vector![0.0, 981.0], 1.0 / 60.0);
        let visual =
            Visual::new("noteheadWhole", vector![50.0, 80.0], vector![18.0, 12.0]).unwrap();
        let paired = PhysicsBackedVisual::new(visual, &mut space, 0.68, 0.0);

        let body = space.body(paired.body_handle()).unwrap();
        assert_eq!(*body.translation(), vector![50.0, 80.0]);
        assert!(body.is_dynamic());
        assert!((body.mass() - 3.0).abs() < 1e-5);

        let collider = space
            .collider_set
            .get(paired.collider_handle())
            .expect("collider is alive");
        assert_eq!(collider.parent(), Some(paired.body_handle()));
        assert!((collider.friction() - 0.68).abs() < 1e-6);
    }

    #[test]
    fn resync_copies_the_body_pose() {
        let mut space = PhysicsSimulator::new(vector![0.0, 981.0], 1.0 / 60.0);
        let visual = Visual::new("gClef", vector![100.0, 100.0], vector![30.0, 80.0]).unwrap();
        let mut paired = PhysicsBackedVisual::new(visual, &mut space, 0.68, 0.0);

        let body = space.body_mut(paired.body_handle()).unwrap();
        body.set_translation(vector![120.0, 90.0], true);
        body.set_rotation(Rotation::new(0.5), true);

        paired.resync(&space);
        assert_eq!(paired.visual().transform.position(), vector![120.0, 90.0]);
        assert!((paired.visual().transform.rotation() - 0.5).abs() < 1e-6);

        // resync is idempotent
        paired.resync(&space);
        assert_eq!(paired.visual().transform.position(), vector![120.0, 90.0]);
    }
}
