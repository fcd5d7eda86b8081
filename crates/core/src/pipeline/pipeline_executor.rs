use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::gesture::domain::gesture_interpreter::GestureInterpreter;
use crate::control::domain::action_dispatcher::ActionDispatcher;
use crate::pipeline::session_logger::SessionLogger;
use crate::tracking::domain::landmark_source::LandmarkSource;

/// Configuration for one run of the frame loop.
pub struct PipelineConfig {
    /// Log and count sink failures instead of stopping the loop.
    pub continue_on_sink_error: bool,
    /// Called after every processed frame with the running frame count;
    /// returning `false` stops the loop.
    pub on_progress: Option<Box<dyn Fn(usize) -> bool + Send>>,
    /// External quit signal, checked once per frame.
    pub cancelled: Arc<AtomicBool>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            continue_on_sink_error: false,
            on_progress: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl PipelineConfig {
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub(crate) fn report_progress(&self, frames_processed: usize) -> bool {
        match &self.on_progress {
            Some(callback) => callback(frames_processed),
            None => true,
        }
    }
}

/// Totals for a finished run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: usize,
    /// Frames that carried a usable hand.
    pub hand_frames: usize,
    pub actions: usize,
    pub sink_failures: usize,
}

/// Abstracts how the acquire → interpret → dispatch loop is executed.
///
/// Every implementation must feed observations to the interpreter in
/// capture order from a single thread; gesture state depends on it.
pub trait PipelineExecutor: Send {
    fn execute(
        &self,
        source: Box<dyn LandmarkSource>,
        interpreter: GestureInterpreter,
        dispatcher: ActionDispatcher,
        logger: &mut dyn SessionLogger,
        config: PipelineConfig,
    ) -> Result<RunSummary, Box<dyn std::error::Error>>;
}
