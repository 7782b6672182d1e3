//! Physics simulation powered by `rapier`.
//!
//! The [`PhysicsSimulator`] struct owns the rigid bodies and boundary
//! colliders and executes fixed-size physics steps.

pub mod simulator;

pub use simulator::*;
