use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Scoped profiler recording cumulative time and call count per section.
pub struct Profiler {
    pub timings: HashMap<&'static str, (Duration, u64)>,
}

impl Profiler {
    pub fn new() -> Self {
        Self { timings: HashMap::new() }
    }

    pub fn finish(&mut self, guard: &ProfilerGuard) {
        let elapsed = guard.start.elapsed();
        let entry = self.timings.entry(guard.name).or_default();
        entry.0 += elapsed;
        entry.1 += 1;
    }

    pub fn report_sorted(&self) -> Vec<(&'static str, Duration, u64)> {
        let mut v: Vec<_> = self.timings.iter().map(|(n, (d, c))| (*n, *d, *c)).collect();
        v.sort_by(|a, b| b.1.cmp(&a.1));
        v
    }

    pub fn clear(&mut self) {
        self.timings.clear();
    }

    pub fn log_and_clear(&mut self) {
        for (name, total, calls) in self.report_sorted() {
            let mean = total.checked_div(calls.max(1) as u32).unwrap_or_default();
            log::info!("{:<12} {:>10.3?} total  {:>6} calls  {:>9.3?} mean", name, total, calls, mean);
        }
        self.clear();
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ProfilerGuard {
    name: &'static str,
    start: Instant,
}

/// Start a profiling section. Returns a guard that will update the global
/// profiler when dropped.
pub fn start(name: &'static str) -> ProfilerGuard {
    ProfilerGuard { name, start: Instant::now() }
}

#[cfg(feature = "profiling")]
impl Drop for ProfilerGuard {
    fn drop(&mut self) {
        crate::PROFILER.lock().finish(self);
    }
}

/// Macro helper to profile a scope only when the `profiling` feature is enabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _guard = $crate::profiler::start($name);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_accumulates_per_section() {
        let mut p = Profiler::new();
        let g = start("tick");
        p.finish(&g);
        p.finish(&g);
        let g2 = start("emit");
        p.finish(&g2);
        let report = p.report_sorted();
        assert_eq!(report.len(), 2);
        let tick = report.iter().find(|r| r.0 == "tick").unwrap();
        assert_eq!(tick.2, 2);
        p.clear();
        assert!(p.report_sorted().is_empty());
    }
}
