use nalgebra::Vector2;
use snafu::{Snafu, ensure};

use crate::core::Transform2D;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)))]
pub enum VisualError {
    #[snafu(display("Visual '{glyph}' has a degenerate extent of {width}x{height}"))]
    DegenerateExtent {
        glyph: String,
        width: f32,
        height: f32,
    },
}

/// A renderable glyph with a position, a rotation and a bounding extent.
///
/// The crate never rasterizes anything itself; the glyph name is carried
/// only as an identifier for the display collaborator and for logging.
/// The extent sizes the matching rigid body once at pairing time and is
/// never resynchronized afterwards.
#[derive(Debug, Clone)]
pub struct Visual {
    pub transform: Transform2D,
    glyph: String,
    extent: Vector2<f32>,
}

impl Visual {
    /// Creates a new visual at `pos` with the given bounding extent.
    ///
    /// A zero or negative extent would produce a massless, degenerate
    /// rigid body, so it is rejected here instead.
    pub fn new<S: Into<String>>(
        glyph: S,
        pos: Vector2<f32>,
        extent: Vector2<f32>,
    ) -> Result<Self, VisualError> {
        let glyph = glyph.into();
        ensure!(
            extent.x > 0.0 && extent.y > 0.0 && extent.x.is_finite() && extent.y.is_finite(),
            DegenerateExtentErr {
                glyph: glyph.clone(),
                width: extent.x,
                height: extent.y,
            }
        );

        Ok(Visual {
            transform: Transform2D::at(pos),
            glyph,
            extent,
        })
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    /// The bounding extent as (width, height).
    pub fn extent(&self) -> Vector2<f32> {
        self.extent
    }

    pub fn width(&self) -> f32 {
        self.extent.x
    }

    pub fn height(&self) -> f32 {
        self.extent.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn rejects_degenerate_extents() {
        assert!(Visual::new("gClef", vector![0.0, 0.0], vector![0.0, 10.0]).is_err());
        assert!(Visual::new("gClef", vector![0.0, 0.0], vector![10.0, -1.0]).is_err());
        assert!(Visual::new("gClef", vector![0.0, 0.0], vector![f32::NAN, 10.0]).is_err());
        assert!(Visual::new("gClef", vector![0.0, 0.0], vector![18.0, 12.0]).is_ok());
    }

    #[test]
    fn starts_at_requested_position() {
        let visual = Visual::new("noteheadWhole", vector![24.0, 40.0], vector![18.0, 12.0])
            .expect("valid extent");
        assert_eq!(visual.transform.position(), vector![24.0, 40.0]);
        assert_eq!(visual.transform.rotation(), 0.0);
    }
}
