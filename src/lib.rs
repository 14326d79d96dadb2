pub mod app;
pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod init_config;
pub mod io;
pub mod profiler;
pub mod splash;
pub mod surface;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use color::SplashColor;
pub use config::SplashConfig;
pub use engine::ParticleFieldEngine;

#[cfg(feature = "profiling")]
use once_cell::sync::Lazy;
#[cfg(feature = "profiling")]
use parking_lot::Mutex;

#[cfg(feature = "profiling")]
pub static PROFILER: Lazy<Mutex<profiler::Profiler>> =
    Lazy::new(|| Mutex::new(profiler::Profiler::new()));
