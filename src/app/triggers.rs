// app/triggers.rs
// Turns page events (clicks, card hovers, scrolling, load, modal) into splash emissions

use super::spawn;
use super::state::SplashCommand;
use crate::config::TriggerConfig;
use crate::engine::rng::UnitSource;

/// Host timestamp in milliseconds (`performance.now()` on the web).
pub type Millis = f64;

#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    /// `target_excluded` is true when the click landed inside one of the
    /// configured excluded selectors; see `EmissionPlanner::click_excluded_by`.
    Click { x: f64, y: f64, target_excluded: bool },
    PointerMove { x: f64, y: f64 },
    /// Pointer entered a card; the card's bounding rect in viewport pixels.
    CardEntered { left: f64, top: f64, width: f64, height: f64 },
    Scroll { scroll_y: f64, document_height: f64 },
    Loaded,
    ModalOpened,
}

/// Fires once `delay` has passed since the last `bump`.
#[derive(Clone, Debug)]
pub struct Debounce<T> {
    delay: Millis,
    pending: Option<(Millis, T)>,
}

impl<T> Debounce<T> {
    pub fn new(delay: Millis) -> Self {
        Self { delay, pending: None }
    }

    pub fn bump(&mut self, now: Millis, value: T) {
        self.pending = Some((now + self.delay, value));
    }

    pub fn poll(&mut self, now: Millis) -> Option<T> {
        let due = matches!(self.pending, Some((deadline, _)) if now >= deadline);
        if due {
            self.pending.take().map(|(_, v)| v)
        } else {
            None
        }
    }
}

/// Lets one call through, then blocks for `limit`.
#[derive(Clone, Debug, Default)]
pub struct Throttle {
    limit: Millis,
    blocked_until: Option<Millis>,
}

impl Throttle {
    pub fn new(limit: Millis) -> Self {
        Self { limit, blocked_until: None }
    }

    pub fn try_pass(&mut self, now: Millis) -> bool {
        match self.blocked_until {
            Some(until) if now < until => false,
            _ => {
                self.blocked_until = Some(now + self.limit);
                true
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ScrollSample {
    scroll_y: f64,
    document_height: f64,
}

/// Decides when page activity should splash paint. Timed triggers are
/// collected with `poll`, which the frame driver calls once per frame.
pub struct EmissionPlanner<R: UnitSource = fastrand::Rng> {
    config: TriggerConfig,
    rng: R,
    viewport: (u32, u32),
    scroll: Debounce<ScrollSample>,
    load_at: Option<Millis>,
    hover: Throttle,
}

impl EmissionPlanner<fastrand::Rng> {
    pub fn new(config: TriggerConfig, viewport: (u32, u32)) -> Self {
        Self::with_rng(config, viewport, fastrand::Rng::new())
    }
}

impl<R: UnitSource> EmissionPlanner<R> {
    pub fn with_rng(config: TriggerConfig, viewport: (u32, u32), rng: R) -> Self {
        Self {
            scroll: Debounce::new(config.scroll_debounce_ms),
            hover: Throttle::new(config.hover_throttle_ms),
            config,
            rng,
            viewport,
            load_at: None,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    pub fn config(&self) -> &TriggerConfig {
        &self.config
    }

    /// True when `matches_closest` reports a hit for any excluded selector.
    /// Hosts pass a closure that walks up from the click target.
    pub fn click_excluded_by<F: FnMut(&str) -> bool>(&self, mut matches_closest: F) -> bool {
        self.config
            .click_excluded_selectors
            .iter()
            .any(|sel| matches_closest(sel.as_str()))
    }

    /// Immediate emissions come back right away; delayed ones are armed and
    /// come out of `poll`.
    pub fn handle(&mut self, event: PageEvent, now: Millis) -> Option<SplashCommand> {
        match event {
            PageEvent::Click { x, y, target_excluded } => {
                if self.config.click_splashes && !target_excluded {
                    return Some(SplashCommand::Emit { x, y, color: None });
                }
            }
            PageEvent::PointerMove { x, y } => {
                if self.config.hover_splashes && self.hover.try_pass(now) {
                    return Some(SplashCommand::Emit { x, y, color: None });
                }
            }
            PageEvent::CardEntered { left, top, width, height } => {
                if self.config.card_hover_splashes {
                    let (x, y) = spawn::rect_center(left, top, width, height);
                    return Some(SplashCommand::Emit { x, y, color: None });
                }
            }
            PageEvent::Scroll { scroll_y, document_height } => {
                if self.config.scroll_splashes {
                    self.scroll.bump(now, ScrollSample { scroll_y, document_height });
                }
            }
            PageEvent::Loaded => {
                if self.config.load_splash {
                    self.load_at = Some(now + self.config.load_splash_delay_ms);
                }
            }
            PageEvent::ModalOpened => {
                if self.config.modal_splash {
                    return Some(self.center_emission());
                }
            }
        }
        None
    }

    /// Emissions whose timers have elapsed by `now`.
    pub fn poll(&mut self, now: Millis) -> Vec<SplashCommand> {
        let mut out = Vec::new();

        if let Some(at) = self.load_at {
            if now >= at {
                self.load_at = None;
                out.push(self.center_emission());
            }
        }

        if let Some(sample) = self.scroll.poll(now) {
            let viewport_height = self.viewport.1 as f64;
            // Nothing at the very top or bottom of the page.
            if sample.scroll_y > 0.0 && sample.scroll_y < sample.document_height - viewport_height {
                let (x, y) = spawn::random_point(self.viewport, &mut self.rng);
                out.push(SplashCommand::Emit { x, y, color: None });
            } else {
                log::trace!("scroll settled at {} outside the page body", sample.scroll_y);
            }
        }

        out
    }

    fn center_emission(&self) -> SplashCommand {
        let (x, y) = spawn::viewport_center(self.viewport);
        SplashCommand::Emit { x, y, color: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::FixedUnits;

    fn planner(config: TriggerConfig) -> EmissionPlanner<FixedUnits> {
        EmissionPlanner::with_rng(config, (1000, 800), FixedUnits::new(vec![0.25, 0.5]))
    }

    fn emit_at(x: f64, y: f64) -> SplashCommand {
        SplashCommand::Emit { x, y, color: None }
    }

    #[test]
    fn click_emits_at_pointer_unless_excluded() {
        let mut p = planner(TriggerConfig::default());
        assert_eq!(
            p.handle(PageEvent::Click { x: 12.0, y: 34.0, target_excluded: false }, 0.0),
            Some(emit_at(12.0, 34.0))
        );
        assert_eq!(
            p.handle(PageEvent::Click { x: 12.0, y: 34.0, target_excluded: true }, 0.0),
            None
        );
    }

    #[test]
    fn excluded_selectors_are_checked() {
        let p = planner(TriggerConfig::default());
        assert!(p.click_excluded_by(|sel| sel == ".btn"));
        assert!(!p.click_excluded_by(|sel| sel == ".card"));
    }

    #[test]
    fn scroll_is_debounced() {
        let mut p = planner(TriggerConfig::default());
        let scroll = |y| PageEvent::Scroll { scroll_y: y, document_height: 3000.0 };
        assert_eq!(p.handle(scroll(100.0), 0.0), None);
        assert_eq!(p.handle(scroll(200.0), 60.0), None);
        assert!(p.poll(120.0).is_empty(), "fired before quiet period ended");
        let fired = p.poll(160.0);
        assert_eq!(fired, vec![emit_at(250.0, 400.0)]);
        assert!(p.poll(400.0).is_empty());
    }

    #[test]
    fn scroll_at_page_edges_is_quiet() {
        let mut p = planner(TriggerConfig::default());
        p.handle(PageEvent::Scroll { scroll_y: 0.0, document_height: 3000.0 }, 0.0);
        assert!(p.poll(200.0).is_empty());
        // 3000 - 800 = 2200 is the bottom.
        p.handle(PageEvent::Scroll { scroll_y: 2200.0, document_height: 3000.0 }, 300.0);
        assert!(p.poll(500.0).is_empty());
    }

    #[test]
    fn load_splash_is_delayed_and_centered() {
        let mut p = planner(TriggerConfig::default());
        assert_eq!(p.handle(PageEvent::Loaded, 50.0), None);
        assert!(p.poll(1000.0).is_empty());
        assert_eq!(p.poll(1050.0), vec![emit_at(500.0, 400.0)]);
        assert!(p.poll(5000.0).is_empty());
    }

    #[test]
    fn modal_splash_is_immediate() {
        let mut p = planner(TriggerConfig::default());
        p.set_viewport(640, 480);
        assert_eq!(p.handle(PageEvent::ModalOpened, 0.0), Some(emit_at(320.0, 240.0)));
    }

    #[test]
    fn hover_is_off_by_default_and_throttled_when_on() {
        let mut p = planner(TriggerConfig::default());
        assert_eq!(p.handle(PageEvent::PointerMove { x: 1.0, y: 1.0 }, 0.0), None);

        let mut p = planner(TriggerConfig { hover_splashes: true, ..Default::default() });
        assert!(p.handle(PageEvent::PointerMove { x: 1.0, y: 1.0 }, 0.0).is_some());
        assert!(p.handle(PageEvent::PointerMove { x: 2.0, y: 2.0 }, 50.0).is_none());
        assert!(p.handle(PageEvent::PointerMove { x: 3.0, y: 3.0 }, 100.0).is_some());
    }

    #[test]
    fn card_hover_emits_at_card_center_every_time() {
        let mut p = planner(TriggerConfig::default());
        let card = PageEvent::CardEntered { left: 100.0, top: 40.0, width: 300.0, height: 200.0 };
        assert_eq!(p.handle(card.clone(), 0.0), Some(emit_at(250.0, 140.0)));
        // Unlike pointer-move splashes, card entries are never throttled.
        assert_eq!(p.handle(card.clone(), 1.0), Some(emit_at(250.0, 140.0)));
        assert_eq!(p.handle(card, 2.0), Some(emit_at(250.0, 140.0)));
    }

    #[test]
    fn disabled_triggers_stay_silent() {
        let mut p = planner(TriggerConfig {
            click_splashes: false,
            scroll_splashes: false,
            load_splash: false,
            modal_splash: false,
            card_hover_splashes: false,
            ..Default::default()
        });
        let card = PageEvent::CardEntered { left: 0.0, top: 0.0, width: 10.0, height: 10.0 };
        assert_eq!(p.handle(card, 0.0), None);
        assert_eq!(p.handle(PageEvent::Click { x: 1.0, y: 1.0, target_excluded: false }, 0.0), None);
        assert_eq!(p.handle(PageEvent::ModalOpened, 0.0), None);
        p.handle(PageEvent::Loaded, 0.0);
        p.handle(PageEvent::Scroll { scroll_y: 500.0, document_height: 3000.0 }, 0.0);
        assert!(p.poll(10_000.0).is_empty());
    }

    #[test]
    fn throttle_reopens_after_limit() {
        let mut t = Throttle::new(100.0);
        assert!(t.try_pass(0.0));
        assert!(!t.try_pass(99.0));
        assert!(t.try_pass(100.0));
    }

    #[test]
    fn debounce_keeps_latest_value() {
        let mut d = Debounce::new(10.0);
        d.bump(0.0, 1u8);
        d.bump(5.0, 2u8);
        assert_eq!(d.poll(10.0), None);
        assert_eq!(d.poll(15.0), Some(2));
        assert_eq!(d.poll(30.0), None);
    }
}
