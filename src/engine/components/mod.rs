pub mod physics_visual;

pub use physics_visual::*;
