// splash/mod.rs
// Re-exports for the splash data model

pub mod particle;
pub mod types;

pub use particle::Particle;
pub use types::{Particles, Splash};
