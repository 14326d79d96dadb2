// splash/types.rs
// Contains the Splash struct: one radial burst and the particles it owns

use smallvec::SmallVec;
use std::f64::consts::TAU;
use ultraviolet::DVec2;

use super::particle::Particle;
use crate::color::SplashColor;
use crate::config::{self, SplashConfig};
use crate::engine::rng::UnitSource;

/// Inline storage sized for the stock particle count; larger configured
/// counts spill to the heap.
pub type Particles = SmallVec<[Particle; config::PARTICLES_PER_SPLASH]>;

#[derive(Clone, Debug, PartialEq)]
pub struct Splash {
    pub id: u64,
    pub origin: DVec2,
    pub color: SplashColor,
    /// Independent of particle life; the splash goes away when this runs out
    pub life: f64,
    pub particles: Particles,
}

use std::sync::atomic::{AtomicU64, Ordering};
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

impl Splash {
    /// Builds the full burst at once: particle `i` of `n` leaves at angle
    /// `TAU * i / n` with a random speed and decay rate.
    pub fn new<R: UnitSource + ?Sized>(
        origin: DVec2,
        color: SplashColor,
        config: &SplashConfig,
        rng: &mut R,
    ) -> Self {
        let count = config.particles_per_splash;
        let particles = (0..count)
            .map(|i| {
                let angle = TAU * i as f64 / count as f64;
                let speed = rng.range(config.speed_min, config.speed_max);
                let decay = rng.range(config.particle_decay_min, config.particle_decay_max);
                Particle::launched(origin, angle, speed, decay)
            })
            .collect();

        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            origin,
            color,
            life: 1.0,
            particles,
        }
    }

    /// Takes one frame off the splash timer. Returns `false` once the splash
    /// has expired and must be dropped without touching its particles.
    pub fn age(&mut self, step: f64) -> bool {
        self.life -= step;
        self.life > 0.0
    }

    pub fn live_particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_alive())
    }
}
