use log::{log_enabled, trace, warn, Level};
use std::time::{Duration, Instant};

/// Scoped timer reporting the duration of a step phase at trace level.
pub struct PhaseTimer {
    label: &'static str,
    start: Instant,
}

impl PhaseTimer {
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for PhaseTimer {
    fn drop(&mut self) {
        if log_enabled!(Level::Trace) {
            trace!("{} took {} µs", self.label, self.start.elapsed().as_micros());
        }
    }
}

/// Emits a warning when a step ran longer than the fixed timestep it models.
pub fn warn_if_over_budget(frame_time: Duration, time_step: f64) {
    let actual_ms = frame_time.as_secs_f64() * 1000.0;
    let budget_ms = time_step * 1000.0;
    if actual_ms > budget_ms {
        warn!("step exceeded budget: {actual_ms:.3} ms > {budget_ms:.3} ms");
    }
}
