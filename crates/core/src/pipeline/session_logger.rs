use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for session events.
///
/// Keeps the frame loop free of output decisions: the CLI reports timing
/// and per-action totals, tests discard everything.
pub trait SessionLogger {
    /// Report that one more frame went through the loop.
    fn frame(&mut self, index: usize);

    /// Count an emitted action by its kind name.
    fn action(&mut self, kind: &str);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    fn info(&mut self, message: &str);

    /// Emit an end-of-session summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullSessionLogger;

impl SessionLogger for NullSessionLogger {
    fn frame(&mut self, _index: usize) {}
    fn action(&mut self, _kind: &str) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Running totals for one named stage.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StageTiming {
    pub count: usize,
    pub total_ms: f64,
}

impl StageTiming {
    pub fn avg_ms(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_ms / self.count as f64
        }
    }
}

/// CLI-oriented logger that tracks per-stage timing and action counts,
/// and prints a summary when the session ends.
///
/// Progress lines are throttled to every `throttle_frames` frames. Memory
/// use is fixed by the number of stage and action names, not by run length.
pub struct StdoutSessionLogger {
    throttle_frames: usize,
    timings: HashMap<String, StageTiming>,
    actions: HashMap<String, usize>,
    start_time: Instant,
    total_frames: usize,
}

impl StdoutSessionLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            actions: HashMap::new(),
            start_time: Instant::now(),
            total_frames: 0,
        }
    }

    /// Returns the formatted summary string, or `None` if no frame was seen.
    pub fn summary_string(&self) -> Option<String> {
        if self.total_frames == 0 && self.timings.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.total_frames;
        let mut lines = vec![format!(
            "Session summary ({frames} frames, {:.1}s total):",
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let timing = self.timings[stage];
            lines.push(format!(
                "  {stage:12}: avg {:6.3}ms  total {:7.1}ms",
                timing.avg_ms(),
                timing.total_ms
            ));
        }

        let mut kinds: Vec<_> = self.actions.iter().collect();
        kinds.sort();
        for (kind, count) in kinds {
            lines.push(format!("  {kind:12}: {count}"));
        }

        if frames > 0 && elapsed_ms > 0.0 {
            let fps = frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<StageTiming> {
        self.timings.get(stage).copied()
    }

    pub fn action_count(&self, kind: &str) -> usize {
        self.actions.get(kind).copied().unwrap_or(0)
    }

    pub fn frames(&self) -> usize {
        self.total_frames
    }
}

impl Default for StdoutSessionLogger {
    fn default() -> Self {
        Self::new(100)
    }
}

impl SessionLogger for StdoutSessionLogger {
    fn frame(&mut self, index: usize) {
        self.total_frames += 1;
        if self.total_frames % self.throttle_frames == 0 {
            log::info!("Processed {} frames (last index {index})", self.total_frames);
        }
    }

    fn action(&mut self, kind: &str) {
        *self.actions.entry(kind.to_string()).or_default() += 1;
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        let timing = self.timings.entry(stage.to_string()).or_default();
        timing.count += 1;
        timing.total_ms += duration_ms;
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
