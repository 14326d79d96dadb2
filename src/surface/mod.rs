// surface/mod.rs
// Drawing-surface and viewport capabilities the engine draws through

pub mod recording;

pub use recording::{DrawCall, FixedViewport, RecordingSurface};

/// The 2D canvas operations a splash frame needs.
pub trait Surface {
    fn size(&self) -> (u32, u32);
    fn set_size(&mut self, width: u32, height: u32);
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn set_fill_color(&mut self, css: &str);
    /// 0.0 is fully transparent, 1.0 fully opaque
    fn set_global_alpha(&mut self, alpha: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64);

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.clear_rect(0.0, 0.0, w as f64, h as f64);
    }
}

/// Host window dimensions.
pub trait Viewport {
    fn inner_size(&self) -> (u32, u32);
}
