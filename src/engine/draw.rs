use crate::splash::Particle;
use crate::surface::Surface;

/// Filled dot whose opacity tracks the particle's remaining life.
pub fn draw_particle<S: Surface + ?Sized>(surface: &mut S, css: &str, particle: &Particle, radius: f64) {
    surface.set_global_alpha(particle.life.min(1.0));
    surface.set_fill_color(css);
    surface.fill_circle(particle.pos.x, particle.pos.y, radius);
}
