use nalgebra::Vector2;

/// Stores the translation and rotation of a [`Visual`](crate::core::Visual).
///
/// Positions live in document space: x grows to the right, y grows downward,
/// matching the coordinate system the display collaborator reports pointer
/// events in. Rotation is a counterclockwise angle in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pos: Vector2<f32>,
    rot: f32,
}

impl Transform2D {
    /// Creates a new [`Transform2D`] at the given position with no rotation.
    pub fn at(pos: Vector2<f32>) -> Self {
        Transform2D { pos, rot: 0.0 }
    }

    /// Sets the position of the transform.
    #[inline(always)]
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.set_position_vec(Vector2::new(x, y))
    }

    /// Sets the position using a vector.
    pub fn set_position_vec(&mut self, pos: Vector2<f32>) {
        self.pos = pos;
    }

    /// Returns the position of the transform.
    pub fn position(&self) -> Vector2<f32> {
        self.pos
    }

    /// Sets the rotation angle in radians.
    pub fn set_rotation(&mut self, angle: f32) {
        self.rot = angle;
    }

    /// Returns the rotation angle in radians.
    pub fn rotation(&self) -> f32 {
        self.rot
    }

    /// Returns the rotation angle in degrees, for display collaborators
    /// that take degrees.
    pub fn rotation_degrees(&self) -> f32 {
        self.rot.to_degrees()
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Transform2D {
            pos: Vector2::zeros(),
            rot: 0.0,
        }
    }
}
