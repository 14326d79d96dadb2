// app/command_loop.rs
// Applies SplashCommand messages to the engine

use super::state::SplashCommand;
use super::triggers::EmissionPlanner;
use crate::engine::rng::UnitSource;
use crate::engine::ParticleFieldEngine;
use crate::surface::Surface;

/// Apply a single command. Returns `false` when the command asks the
/// driver to stop.
pub fn handle_command<S: Surface, R: UnitSource>(
    cmd: SplashCommand,
    engine: &mut ParticleFieldEngine<S, R>,
    planner: &mut EmissionPlanner<R>,
) -> bool {
    match cmd {
        SplashCommand::Emit { x, y, color } => {
            match color {
                Some(color) => engine.emit_with_color(x, y, color),
                None => engine.emit(x, y),
            }
            true
        }

        SplashCommand::Resize { width, height } => {
            engine.resize_to(width, height);
            planner.set_viewport(width, height);
            true
        }

        SplashCommand::Stop => {
            log::info!("stop requested after {} frames", engine.frame());
            false
        }
    }
}
