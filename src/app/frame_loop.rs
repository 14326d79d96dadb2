use crossbeam::channel::{Receiver, TryRecvError};

use super::command_loop;
use super::state::SplashCommand;
use super::triggers::{EmissionPlanner, Millis, PageEvent};
use crate::engine::rng::UnitSource;
use crate::engine::ParticleFieldEngine;
use crate::surface::{Surface, Viewport};

/// Host-facing driver: the host calls `on_frame` once per display refresh
/// and forwards page events. The engine never schedules itself.
pub struct FrameDriver<S: Surface, R: UnitSource = fastrand::Rng> {
    engine: ParticleFieldEngine<S, R>,
    planner: EmissionPlanner<R>,
    rx: Receiver<SplashCommand>,
    running: bool,
}

impl<S: Surface, R: UnitSource> FrameDriver<S, R> {
    pub fn new(
        engine: ParticleFieldEngine<S, R>,
        planner: EmissionPlanner<R>,
        rx: Receiver<SplashCommand>,
    ) -> Self {
        Self {
            engine,
            planner,
            rx,
            running: true,
        }
    }

    /// One frame: timed triggers, queued commands, then exactly one tick.
    /// Returns `false` once the driver has stopped; hosts should not
    /// schedule another frame after that.
    pub fn on_frame(&mut self, now: Millis) -> bool {
        if !self.running {
            return false;
        }

        for cmd in self.planner.poll(now) {
            self.apply(cmd);
        }

        loop {
            match self.rx.try_recv() {
                Ok(cmd) => {
                    if !self.apply(cmd) {
                        break;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::debug!("command channel closed");
                    break;
                }
            }
        }

        if !self.running {
            return false;
        }
        self.engine.tick();
        true
    }

    /// Feeds a page event through the trigger rules. Immediate emissions are
    /// applied right away so they show up on the next frame.
    pub fn page_event(&mut self, event: PageEvent, now: Millis) {
        if !self.running {
            return;
        }
        if let Some(cmd) = self.planner.handle(event, now) {
            self.apply(cmd);
        }
    }

    /// Resynchronises engine and triggers with the host viewport.
    pub fn resize<V: Viewport + ?Sized>(&mut self, viewport: &V) {
        let (width, height) = viewport.inner_size();
        self.apply(SplashCommand::Resize { width, height });
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn engine(&self) -> &ParticleFieldEngine<S, R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ParticleFieldEngine<S, R> {
        &mut self.engine
    }

    pub fn planner(&self) -> &EmissionPlanner<R> {
        &self.planner
    }

    fn apply(&mut self, cmd: SplashCommand) -> bool {
        if !command_loop::handle_command(cmd, &mut self.engine, &mut self.planner) {
            self.running = false;
        }
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::create_channel;
    use crate::config::{SplashConfig, TriggerConfig};
    use crate::engine::rng::FixedUnits;
    use crate::surface::{FixedViewport, RecordingSurface};
    use crossbeam::channel::Sender;

    fn driver() -> (FrameDriver<RecordingSurface, FixedUnits>, Sender<SplashCommand>) {
        let (tx, rx) = create_channel();
        let engine = ParticleFieldEngine::with_rng(
            RecordingSurface::new(800, 600),
            SplashConfig::default(),
            FixedUnits::constant(0.5),
        );
        let planner = EmissionPlanner::with_rng(TriggerConfig::default(), (800, 600), FixedUnits::constant(0.5));
        (FrameDriver::new(engine, planner, rx), tx)
    }

    #[test]
    fn one_tick_per_frame() {
        let (mut d, _tx) = driver();
        for i in 0..10 {
            assert!(d.on_frame(i as f64 * 16.0));
        }
        assert_eq!(d.engine().frame(), 10);
        assert_eq!(d.engine().surface().clear_count(), 10);
    }

    #[test]
    fn queued_emissions_land_before_the_tick() {
        let (mut d, tx) = driver();
        tx.send(SplashCommand::Emit { x: 5.0, y: 5.0, color: None }).unwrap();
        tx.send(SplashCommand::Emit { x: 6.0, y: 6.0, color: None }).unwrap();
        d.on_frame(0.0);
        assert_eq!(d.engine().splash_count(), 2);
        assert_eq!(d.engine().surface().fill_count(), 40);
    }

    #[test]
    fn stop_command_halts_frames() {
        let (mut d, tx) = driver();
        tx.send(SplashCommand::Stop).unwrap();
        tx.send(SplashCommand::Emit { x: 5.0, y: 5.0, color: None }).unwrap();
        assert!(!d.on_frame(0.0));
        assert!(!d.is_running());
        assert_eq!(d.engine().frame(), 0);
        assert!(!d.on_frame(16.0));
        assert_eq!(d.engine().splash_count(), 0);
    }

    #[test]
    fn stop_method_halts_frames() {
        let (mut d, _tx) = driver();
        d.on_frame(0.0);
        d.stop();
        assert!(!d.on_frame(16.0));
        assert_eq!(d.engine().frame(), 1);
    }

    #[test]
    fn load_splash_arrives_after_delay() {
        let (mut d, _tx) = driver();
        d.page_event(PageEvent::Loaded, 0.0);
        d.on_frame(500.0);
        assert_eq!(d.engine().splash_count(), 0);
        d.on_frame(1000.0);
        assert_eq!(d.engine().splash_count(), 1);
        let origin = d.engine().splashes()[0].origin;
        assert_eq!((origin.x, origin.y), (400.0, 300.0));
    }

    #[test]
    fn click_is_applied_immediately() {
        let (mut d, _tx) = driver();
        d.page_event(PageEvent::Click { x: 10.0, y: 20.0, target_excluded: false }, 0.0);
        assert_eq!(d.engine().splash_count(), 1);
    }

    #[test]
    fn resize_reaches_engine_and_triggers() {
        let (mut d, tx) = driver();
        d.resize(&FixedViewport::new(1024, 768));
        assert_eq!(d.engine().surface().size(), (1024, 768));

        tx.send(SplashCommand::Resize { width: 400, height: 200 }).unwrap();
        d.on_frame(0.0);
        assert_eq!(d.engine().surface().size(), (400, 200));
        d.page_event(PageEvent::ModalOpened, 10.0);
        let origin = d.engine().splashes()[0].origin;
        assert_eq!((origin.x, origin.y), (200.0, 100.0));
    }

    #[test]
    fn disconnected_channel_keeps_running() {
        let (mut d, tx) = driver();
        drop(tx);
        assert!(d.on_frame(0.0));
        assert!(d.is_running());
    }
}
