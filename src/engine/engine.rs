// engine/engine.rs
// Contains the ParticleFieldEngine struct: surface ownership, emission and the per-frame tick

use serde::{Deserialize, Serialize};
use ultraviolet::DVec2;

use super::draw;
use super::rng::UnitSource;
use crate::color::SplashColor;
use crate::config::{OverflowPolicy, SplashConfig};
use crate::profile_scope;
use crate::splash::Splash;
use crate::surface::{Surface, Viewport};

/// Running counters, reported by the headless driver and kept in snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub emitted: u64,
    pub expired: u64,
    /// Emissions lost to the active-splash cap (either end)
    pub dropped: u64,
    /// Emissions refused for non-finite coordinates
    pub ignored: u64,
}

/// Owns a full-viewport surface and every active splash. One `tick` per
/// display refresh clears the surface, ages and draws each splash in
/// emission order, and drops the ones whose timer ran out.
pub struct ParticleFieldEngine<S: Surface, R: UnitSource = fastrand::Rng> {
    surface: S,
    rng: R,
    config: SplashConfig,
    default_color: SplashColor,
    splashes: Vec<Splash>,
    frame: u64,
    stats: EngineStats,
}

impl<S: Surface> ParticleFieldEngine<S, fastrand::Rng> {
    pub fn new(surface: S, config: SplashConfig) -> Self {
        Self::with_rng(surface, config, fastrand::Rng::new())
    }
}

impl<S: Surface, R: UnitSource> ParticleFieldEngine<S, R> {
    pub fn with_rng(surface: S, config: SplashConfig, rng: R) -> Self {
        let default_color = match SplashColor::parse(&config.default_color) {
            Ok(color) => color,
            Err(e) => {
                log::warn!("{e}; falling back to black");
                SplashColor::black()
            }
        };
        Self {
            surface,
            rng,
            config,
            default_color,
            splashes: Vec::new(),
            frame: 0,
            stats: EngineStats::default(),
        }
    }

    /// Matches the surface to the viewport. Particle positions are left alone.
    pub fn resize<V: Viewport + ?Sized>(&mut self, viewport: &V) {
        let (width, height) = viewport.inner_size();
        self.resize_to(width, height);
    }

    pub fn resize_to(&mut self, width: u32, height: u32) {
        log::debug!("surface resized to {}x{}", width, height);
        self.surface.set_size(width, height);
    }

    /// Emits a splash in the configured default color.
    pub fn emit(&mut self, x: f64, y: f64) {
        let color = self.default_color.clone();
        self.emit_with_color(x, y, color);
    }

    /// Emits a splash at (x, y). Off-surface points are accepted as is.
    pub fn emit_with_color(&mut self, x: f64, y: f64, color: SplashColor) {
        if !x.is_finite() || !y.is_finite() {
            log::warn!("ignoring splash at non-finite point ({}, {})", x, y);
            self.stats.ignored += 1;
            return;
        }

        if let Some(max) = self.config.max_active_splashes {
            if self.splashes.len() >= max {
                self.stats.dropped += 1;
                match self.config.overflow_policy {
                    OverflowPolicy::DropNewest => {
                        log::warn!("{} splashes active, dropping new emission", max);
                        return;
                    }
                    OverflowPolicy::DropOldest => {
                        let evicted = self.splashes.remove(0);
                        log::warn!("{} splashes active, evicting splash {}", max, evicted.id);
                    }
                }
            }
        }

        let splash = Splash::new(DVec2::new(x, y), color, &self.config, &mut self.rng);
        log::debug!(
            "splash {} emitted at ({:.1}, {:.1}) in {}",
            splash.id,
            x,
            y,
            splash.color
        );
        self.splashes.push(splash);
        self.stats.emitted += 1;
    }

    /// One update-and-draw cycle.
    pub fn tick(&mut self) {
        profile_scope!("tick");
        self.frame += 1;
        self.surface.clear();

        let config = &self.config;
        let surface = &mut self.surface;
        let mut expired = 0;
        self.splashes.retain_mut(|splash| {
            if !splash.age(config.splash_decay) {
                log::debug!("splash {} expired", splash.id);
                expired += 1;
                return false;
            }
            let css = splash.color.css();
            for particle in splash.particles.iter_mut() {
                particle.advance(config.gravity);
                if particle.is_alive() {
                    draw::draw_particle(surface, css, particle, config.particle_radius);
                }
            }
            true
        });
        self.stats.expired += expired;
    }

    /// Replaces the active splashes, e.g. from a saved snapshot. Splashes
    /// over `max_active_splashes` are dropped the way the overflow policy
    /// would have dropped them.
    pub fn restore(&mut self, mut splashes: Vec<Splash>, frame: u64, stats: EngineStats) {
        self.stats = stats;
        if let Some(max) = self.config.max_active_splashes {
            if splashes.len() > max {
                let excess = splashes.len() - max;
                match self.config.overflow_policy {
                    OverflowPolicy::DropOldest => {
                        splashes.drain(..excess);
                    }
                    OverflowPolicy::DropNewest => splashes.truncate(max),
                }
                log::warn!("restored {} splashes over the cap of {}, dropped the excess", excess, max);
                self.stats.dropped += excess as u64;
            }
        }
        self.splashes = splashes;
        self.frame = frame;
    }

    pub fn splashes(&self) -> &[Splash] {
        &self.splashes
    }

    pub fn splash_count(&self) -> usize {
        self.splashes.len()
    }

    pub fn live_particle_count(&self) -> usize {
        self.splashes.iter().map(|s| s.live_particles().count()).sum()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn config(&self) -> &SplashConfig {
        &self.config
    }

    pub fn default_color(&self) -> &SplashColor {
        &self.default_color
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
