//! Core data structures used throughout the crate.
//!
//! This includes renderable visuals and their 2D transforms.

pub mod transform;
pub mod visual;

pub use transform::*;
pub use visual::*;
