// engine/mod.rs
// Re-exports and module declarations for the particle field engine

pub mod draw;
pub mod engine;
pub mod rng;
pub use engine::*;
