use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::control::domain::action_dispatcher::ActionDispatcher;
use crate::gesture::domain::gesture_interpreter::GestureInterpreter;
use crate::pipeline::frame_processor::FrameProcessor;
use crate::pipeline::pipeline_executor::{PipelineConfig, PipelineExecutor, RunSummary};
use crate::pipeline::session_logger::SessionLogger;
use crate::tracking::domain::landmark_source::{HandObservation, LandmarkSource};

const DEFAULT_CHANNEL_CAPACITY: usize = 8;

type SendError = Box<dyn std::error::Error + Send + Sync>;

/// Executes the loop with landmark acquisition on its own thread.
///
/// Layout: `source → main [interpret/dispatch]`
///
/// Acquisition overlaps with interpretation. Observations cross a bounded
/// channel in capture order and are interpreted on the calling thread, so
/// gesture state sees exactly the sequence a sequential run would.
pub struct ThreadedPipelineExecutor {
    channel_capacity: usize,
}

impl ThreadedPipelineExecutor {
    pub fn new() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn with_capacity(channel_capacity: usize) -> Self {
        Self {
            channel_capacity: channel_capacity.max(1),
        }
    }
}

impl Default for ThreadedPipelineExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineExecutor for ThreadedPipelineExecutor {
    fn execute(
        &self,
        source: Box<dyn LandmarkSource>,
        interpreter: GestureInterpreter,
        dispatcher: ActionDispatcher,
        logger: &mut dyn SessionLogger,
        config: PipelineConfig,
    ) -> Result<RunSummary, Box<dyn std::error::Error>> {
        let (observation_tx, observation_rx) =
            crossbeam_channel::bounded::<Result<HandObservation, SendError>>(self.channel_capacity);

        let source_handle = spawn_source(source, observation_tx, config.cancelled.clone());

        let mut processor =
            FrameProcessor::new(interpreter, dispatcher, logger, config.continue_on_sink_error);
        let main_error = run_main_loop(observation_rx, &mut processor, &config);

        match join_source(source_handle, main_error) {
            Ok(()) => processor.finish(),
            Err(e) => Err(processor.abort(e)),
        }
    }
}

fn spawn_source(
    mut source: Box<dyn LandmarkSource>,
    observation_tx: crossbeam_channel::Sender<Result<HandObservation, SendError>>,
    cancelled: Arc<AtomicBool>,
) -> std::thread::JoinHandle<Box<dyn LandmarkSource>> {
    std::thread::spawn(move || {
        for observation in source.observations() {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            let mapped = observation.map_err(|e| -> SendError { e.to_string().into() });
            let failed = mapped.is_err();
            if observation_tx.send(mapped).is_err() || failed {
                break;
            }
        }
        source.close();
        source
    })
}

/// Drains the channel in order. Dropping the receiver on return unblocks
/// the source thread if it is waiting on a full channel.
fn run_main_loop(
    observation_rx: crossbeam_channel::Receiver<Result<HandObservation, SendError>>,
    processor: &mut FrameProcessor<'_>,
    config: &PipelineConfig,
) -> Option<Box<dyn std::error::Error>> {
    for received in observation_rx {
        if config.is_cancelled() {
            log::info!("Cancelled after {} frames", processor.frames());
            return None;
        }
        let observation = match received {
            Ok(observation) => observation,
            Err(e) => return Some(e.to_string().into()),
        };
        if let Err(e) = processor.process(&observation) {
            return Some(e);
        }
        if !config.report_progress(processor.frames()) {
            log::info!("Stopped by progress callback after {} frames", processor.frames());
            return None;
        }
    }
    None
}

fn join_source(
    source_handle: std::thread::JoinHandle<Box<dyn LandmarkSource>>,
    main_error: Option<Box<dyn std::error::Error>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let joined = source_handle.join();
    if let Some(e) = main_error {
        return Err(e);
    }
    match joined {
        Ok(_) => Ok(()),
        Err(_) => Err("Source thread panicked".into()),
    }
}
