// surface/recording.rs
// In-memory surface used by the headless driver and by tests

use super::{Surface, Viewport};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    FillColor(String),
    GlobalAlpha(f64),
    FillCircle { x: f64, y: f64, radius: f64 },
}

/// Records every call instead of rasterizing. Also keeps running totals so
/// long headless runs can drop the log with `take_calls` and still report.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    calls: Vec<DrawCall>,
    pub total_clears: u64,
    pub total_fills: u64,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::ClearRect { .. }))
            .count()
    }

    pub fn fill_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::FillCircle { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.total_clears += 1;
        self.calls.push(DrawCall::ClearRect { x, y, width, height });
    }

    fn set_fill_color(&mut self, css: &str) {
        self.calls.push(DrawCall::FillColor(css.to_string()));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.calls.push(DrawCall::GlobalAlpha(alpha));
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.total_fills += 1;
        self.calls.push(DrawCall::FillCircle { x, y, radius });
    }
}

/// Viewport with a size set by hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedViewport {
    pub width: u32,
    pub height: u32,
}

impl FixedViewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Viewport for FixedViewport {
    fn inner_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_covers_whole_surface() {
        let mut s = RecordingSurface::new(640, 480);
        s.clear();
        assert_eq!(
            s.calls(),
            &[DrawCall::ClearRect { x: 0.0, y: 0.0, width: 640.0, height: 480.0 }]
        );
        assert_eq!(s.total_clears, 1);
    }

    #[test]
    fn take_calls_keeps_totals() {
        let mut s = RecordingSurface::new(10, 10);
        s.fill_circle(1.0, 1.0, 2.0);
        s.fill_circle(2.0, 2.0, 2.0);
        assert_eq!(s.take_calls().len(), 2);
        assert!(s.calls().is_empty());
        assert_eq!(s.total_fills, 2);
    }
}
