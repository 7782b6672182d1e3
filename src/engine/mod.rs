pub mod components;
pub mod core;
pub mod input;
pub mod physics;
pub mod scene;

pub use self::scene::SceneDriver;
