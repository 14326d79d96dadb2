use std::path::PathBuf;

use serde::Serialize;

use crate::config::{SplashConfig, TriggerConfig};
use crate::engine::{EngineStats, ParticleFieldEngine};
use crate::surface::{FixedViewport, RecordingSurface, Surface};

pub mod command_loop;
pub mod frame_loop;
pub mod script;
pub mod spawn;
pub mod state;
pub mod triggers;

use frame_loop::FrameDriver;
use script::{ScriptAction, ScriptedEvent};
use state::SplashCommand;
use triggers::PageEvent;

/// Nominal display refresh used to turn frame numbers into timestamps.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// A scripted page session driven without a display.
#[derive(Clone, Debug)]
pub struct HeadlessRun {
    pub splash: SplashConfig,
    pub triggers: TriggerConfig,
    pub frames: u64,
    pub viewport: FixedViewport,
    pub document_height: f64,
    pub seed: Option<u64>,
    pub events: Vec<ScriptedEvent>,
    pub snapshot_path: Option<PathBuf>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub frames: u64,
    pub stats: EngineStats,
    pub active_splashes: usize,
    pub live_particles: usize,
    pub peak_splashes: usize,
    pub surface_size: (u32, u32),
    pub clears: u64,
    pub fills: u64,
}

fn seeded(seed: Option<u64>, salt: u64) -> fastrand::Rng {
    match seed {
        Some(seed) => fastrand::Rng::with_seed(seed.wrapping_add(salt)),
        None => fastrand::Rng::new(),
    }
}

/// Simulates a page session: load, then the scripted events, one tick per
/// frame. Resize events are queued on the session's own command channel, as
/// a browser resize listener would queue them, and land on the next frame.
pub fn run(session: HeadlessRun) -> anyhow::Result<RunReport> {
    let (tx, rx) = state::create_channel();

    let viewport = session.viewport;
    let surface = RecordingSurface::new(viewport.width, viewport.height);
    let mut engine = ParticleFieldEngine::with_rng(surface, session.splash, seeded(session.seed, 0));
    engine.resize(&viewport);
    let planner = triggers::EmissionPlanner::with_rng(
        session.triggers,
        (viewport.width, viewport.height),
        seeded(session.seed, 1),
    );
    let mut driver = FrameDriver::new(engine, planner, rx);

    let mut events = session.events;
    events.sort_by_key(|e| e.frame);
    let mut pending = events.into_iter().peekable();

    log::info!(
        "running {} frames at {}x{}",
        session.frames,
        viewport.width,
        viewport.height
    );
    driver.page_event(PageEvent::Loaded, 0.0);

    let mut peak_splashes = 0;
    for frame in 0..session.frames {
        let now = frame as f64 * FRAME_MS;
        while let Some(event) = pending.next_if(|e| e.frame <= frame) {
            match event.action {
                ScriptAction::Click { x, y } => {
                    let target_excluded = false;
                    driver.page_event(PageEvent::Click { x, y, target_excluded }, now);
                }
                ScriptAction::Scroll { scroll_y } => driver.page_event(
                    PageEvent::Scroll {
                        scroll_y,
                        document_height: session.document_height,
                    },
                    now,
                ),
                ScriptAction::ModalOpened => driver.page_event(PageEvent::ModalOpened, now),
                ScriptAction::Resize { width, height } => {
                    tx.send(SplashCommand::Resize { width, height })?;
                }
            }
        }

        if !driver.on_frame(now) {
            break;
        }
        peak_splashes = peak_splashes.max(driver.engine().splash_count());
        // Only the totals matter here; keep the call log from growing.
        driver.engine_mut().surface_mut().take_calls();
    }

    let engine = driver.engine();
    if let Some(path) = &session.snapshot_path {
        crate::io::save_snapshot(engine, path)?;
    }

    #[cfg(feature = "profiling")]
    crate::PROFILER.lock().log_and_clear();

    let surface = engine.surface();
    let report = RunReport {
        frames: engine.frame(),
        stats: engine.stats(),
        active_splashes: engine.splash_count(),
        live_particles: engine.live_particle_count(),
        peak_splashes,
        surface_size: surface.size(),
        clears: surface.total_clears,
        fills: surface.total_fills,
    };
    log::info!(
        "{} frames, {} splashes emitted, {} expired, {} still active",
        report.frames,
        report.stats.emitted,
        report.stats.expired,
        report.active_splashes
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(frames: u64, events: Vec<ScriptedEvent>) -> HeadlessRun {
        HeadlessRun {
            splash: SplashConfig::default(),
            triggers: TriggerConfig::default(),
            frames,
            viewport: FixedViewport::new(800, 600),
            document_height: 4000.0,
            seed: Some(11),
            events,
            snapshot_path: None,
        }
    }

    #[test]
    fn quiet_session_only_clears() {
        let report = run(HeadlessRun {
            triggers: TriggerConfig {
                load_splash: false,
                ..Default::default()
            },
            ..session(30, vec![])
        })
        .unwrap();
        assert_eq!(report.frames, 30);
        assert_eq!(report.clears, 30);
        assert_eq!(report.fills, 0);
        assert_eq!(report.stats.emitted, 0);
    }

    #[test]
    fn scripted_session_emits_and_expires() {
        let events = vec![
            ScriptedEvent::parse_click("100,100@5").unwrap(),
            ScriptedEvent::parse_scroll("900@10").unwrap(),
            ScriptedEvent::parse_modal("20").unwrap(),
        ];
        // Load fires at frame 60 (1000 ms); everything is gone by frame 300.
        let report = run(session(300, events)).unwrap();
        assert_eq!(report.stats.emitted, 4);
        assert_eq!(report.stats.expired, 4);
        assert_eq!(report.active_splashes, 0);
        assert_eq!(report.live_particles, 0);
        assert!(report.peak_splashes >= 3);
        assert!(report.fills > 0);
    }

    #[test]
    fn scripted_resizes_reach_the_surface() {
        let events = vec![
            ScriptedEvent::parse_resize("1024x768@3").unwrap(),
            ScriptedEvent::parse_resize("400x300@8").unwrap(),
        ];
        let report = run(session(12, events)).unwrap();
        assert_eq!(report.surface_size, (400, 300));

        let report = run(session(12, vec![])).unwrap();
        assert_eq!(report.surface_size, (800, 600));
    }

    #[test]
    fn snapshot_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("end.json");
        let report = run(HeadlessRun {
            snapshot_path: Some(path.clone()),
            ..session(10, vec![ScriptedEvent::parse_click("1,1@0").unwrap()])
        })
        .unwrap();
        let snapshot = crate::io::load_snapshot(&path).unwrap();
        assert_eq!(snapshot.frame, report.frames);
        assert_eq!(snapshot.splashes.len(), 1);
    }
}
