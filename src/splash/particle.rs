// splash/particle.rs
// A single point-mass inside a splash

use ultraviolet::DVec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Opacity-like life in (0, 1]; inert once it reaches zero
    pub life: f64,
    /// Life lost per frame, fixed at creation
    pub decay: f64,
}

impl Particle {
    pub fn new(pos: DVec2, vel: DVec2, decay: f64) -> Self {
        Self {
            pos,
            vel,
            life: 1.0,
            decay,
        }
    }

    /// Launches a particle from `origin` along `angle` (radians) at `speed`.
    pub fn launched(origin: DVec2, angle: f64, speed: f64, decay: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(origin, DVec2::new(cos, sin) * speed, decay)
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Position, then gravity, then decay: the order the effect has always used.
    pub fn advance(&mut self, gravity: f64) {
        self.pos += self.vel;
        self.vel.y += gravity;
        self.life -= self.decay;
    }
}
