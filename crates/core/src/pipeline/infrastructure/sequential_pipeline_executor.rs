use crate::control::domain::action_dispatcher::ActionDispatcher;
use crate::gesture::domain::gesture_interpreter::GestureInterpreter;
use crate::pipeline::frame_processor::FrameProcessor;
use crate::pipeline::pipeline_executor::{PipelineConfig, PipelineExecutor, RunSummary};
use crate::pipeline::session_logger::SessionLogger;
use crate::tracking::domain::landmark_source::LandmarkSource;

/// Runs acquire, interpret and dispatch back to back on the calling thread.
#[derive(Default)]
pub struct SequentialPipelineExecutor;

impl SequentialPipelineExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineExecutor for SequentialPipelineExecutor {
    fn execute(
        &self,
        mut source: Box<dyn LandmarkSource>,
        interpreter: GestureInterpreter,
        dispatcher: ActionDispatcher,
        logger: &mut dyn SessionLogger,
        config: PipelineConfig,
    ) -> Result<RunSummary, Box<dyn std::error::Error>> {
        let mut processor =
            FrameProcessor::new(interpreter, dispatcher, logger, config.continue_on_sink_error);

        let loop_result = run_loop(&mut *source, &mut processor, &config);
        source.close();

        match loop_result {
            Ok(()) => processor.finish(),
            Err(e) => Err(processor.abort(e)),
        }
    }
}

fn run_loop(
    source: &mut dyn LandmarkSource,
    processor: &mut FrameProcessor<'_>,
    config: &PipelineConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    for observation in source.observations() {
        if config.is_cancelled() {
            log::info!("Cancelled after {} frames", processor.frames());
            break;
        }
        processor.process(&observation?)?;
        if !config.report_progress(processor.frames()) {
            log::info!("Stopped by progress callback after {} frames", processor.frames());
            break;
        }
    }
    Ok(())
}
