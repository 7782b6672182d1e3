pub mod engine;
pub mod utils;

pub use engine::*;

pub use ::log;
pub use ::rand;
