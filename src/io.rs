use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use ultraviolet::DVec2;

use crate::color::SplashColor;
use crate::engine::rng::UnitSource;
use crate::engine::{EngineStats, ParticleFieldEngine};
use crate::error::SnapshotError;
use crate::profile_scope;
use crate::splash::{Particle, Splash};
use crate::surface::Surface;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub life: f64,
    pub decay: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplashState {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub color: SplashColor,
    pub life: f64,
    pub particles: Vec<ParticleState>,
}

/// Everything needed to resume an effect mid-flight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub frame: u64,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub stats: EngineStats,
    #[serde(default)]
    pub splashes: Vec<SplashState>,
}

impl From<&Particle> for ParticleState {
    fn from(p: &Particle) -> Self {
        Self {
            x: p.pos.x,
            y: p.pos.y,
            vx: p.vel.x,
            vy: p.vel.y,
            life: p.life,
            decay: p.decay,
        }
    }
}

impl From<&ParticleState> for Particle {
    fn from(p: &ParticleState) -> Self {
        Particle {
            pos: DVec2::new(p.x, p.y),
            vel: DVec2::new(p.vx, p.vy),
            life: p.life,
            decay: p.decay,
        }
    }
}

impl From<&Splash> for SplashState {
    fn from(s: &Splash) -> Self {
        Self {
            id: s.id,
            x: s.origin.x,
            y: s.origin.y,
            color: s.color.clone(),
            life: s.life,
            particles: s.particles.iter().map(ParticleState::from).collect(),
        }
    }
}

impl From<&SplashState> for Splash {
    fn from(s: &SplashState) -> Self {
        Splash {
            id: s.id,
            origin: DVec2::new(s.x, s.y),
            color: s.color.clone(),
            life: s.life,
            particles: s.particles.iter().map(Particle::from).collect(),
        }
    }
}

impl EngineSnapshot {
    pub fn capture<S: Surface, R: UnitSource>(engine: &ParticleFieldEngine<S, R>) -> Self {
        let (width, height) = engine.surface().size();
        Self {
            frame: engine.frame(),
            width,
            height,
            stats: engine.stats(),
            splashes: engine.splashes().iter().map(SplashState::from).collect(),
        }
    }

    /// Replaces the engine's splashes and surface size with the snapshot's.
    pub fn apply_to<S: Surface, R: UnitSource>(&self, engine: &mut ParticleFieldEngine<S, R>) {
        engine.resize_to(self.width, self.height);
        engine.restore(
            self.splashes.iter().map(Splash::from).collect(),
            self.frame,
            self.stats,
        );
    }
}

pub fn save_snapshot<S: Surface, R: UnitSource, P: AsRef<Path>>(
    engine: &ParticleFieldEngine<S, R>,
    path: P,
) -> Result<(), SnapshotError> {
    profile_scope!("save_snapshot");
    let snapshot = EngineSnapshot::capture(engine);
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &snapshot)?;
    writer.flush()?;
    log::info!(
        "saved {} splashes at frame {} to {}",
        snapshot.splashes.len(),
        snapshot.frame,
        path.as_ref().display()
    );
    Ok(())
}

pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<EngineSnapshot, SnapshotError> {
    let file = File::open(path.as_ref())?;
    let snapshot: EngineSnapshot = serde_json::from_reader(BufReader::new(file))?;
    Ok(snapshot)
}
