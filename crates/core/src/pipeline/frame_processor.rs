use std::time::Instant;

use crate::control::domain::action_dispatcher::ActionDispatcher;
use crate::gesture::domain::gesture_interpreter::GestureInterpreter;
use crate::tracking::domain::landmark_source::HandObservation;

use super::pipeline_executor::RunSummary;
use super::session_logger::SessionLogger;

/// One interpret → dispatch step per observation, shared by the executors.
///
/// Interpretation always completes before the sink sees anything, so a
/// sink failure leaves gesture state exactly where a successful frame
/// would have left it.
pub(crate) struct FrameProcessor<'a> {
    interpreter: GestureInterpreter,
    dispatcher: ActionDispatcher,
    logger: &'a mut dyn SessionLogger,
    continue_on_sink_error: bool,
    summary: RunSummary,
}

impl<'a> FrameProcessor<'a> {
    pub(crate) fn new(
        interpreter: GestureInterpreter,
        dispatcher: ActionDispatcher,
        logger: &'a mut dyn SessionLogger,
        continue_on_sink_error: bool,
    ) -> Self {
        Self {
            interpreter,
            dispatcher,
            logger,
            continue_on_sink_error,
            summary: RunSummary::default(),
        }
    }

    pub(crate) fn frames(&self) -> usize {
        self.summary.frames
    }

    pub(crate) fn process(
        &mut self,
        observation: &HandObservation,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let start = Instant::now();
        let outcome = self.interpreter.interpret_observation(observation);
        self.logger
            .timing("interpret", start.elapsed().as_secs_f64() * 1000.0);

        self.summary.frames += 1;
        if outcome.channel.is_some() {
            self.summary.hand_frames += 1;
        }
        self.summary.actions += outcome.actions.len();
        if let Some(volume) = outcome.volume {
            log::debug!("Frame {}: volume {}%", observation.index, volume.percent());
        }
        for action in &outcome.actions {
            self.logger.action(action.kind());
        }

        let start = Instant::now();
        let dispatched = self.dispatcher.dispatch(&outcome.actions);
        self.logger
            .timing("dispatch", start.elapsed().as_secs_f64() * 1000.0);
        self.logger.frame(observation.index);

        match dispatched {
            Ok(()) => Ok(()),
            Err(e) if self.continue_on_sink_error => {
                log::warn!("Frame {}: action sink failed: {e}", observation.index);
                self.summary.sink_failures += 1;
                Ok(())
            }
            Err(e) => Err(format!("Frame {}: action sink failed: {e}", observation.index).into()),
        }
    }

    /// Flushes the sink and hands back the totals.
    pub(crate) fn finish(mut self) -> Result<RunSummary, Box<dyn std::error::Error>> {
        self.log_final_state();
        let flushed = self.dispatcher.finish();
        self.logger.summary();
        flushed?;
        Ok(self.summary)
    }

    /// Ends a run that failed with `error`: the sink is still flushed and
    /// the summary still emitted, then the original error is handed back.
    pub(crate) fn abort(mut self, error: Box<dyn std::error::Error>) -> Box<dyn std::error::Error> {
        self.log_final_state();
        if let Err(e) = self.dispatcher.finish() {
            log::warn!("Flushing the action sink after a failed run: {e}");
        }
        self.logger.summary();
        error
    }

    fn log_final_state(&self) {
        let session = self.interpreter.session();
        let [x, y] = session.pointer_position();
        let volume = session
            .last_volume()
            .map_or_else(|| "unset".to_string(), |v| format!("{}%", v.percent()));
        log::info!(
            "Stopped after {} frames: pointer at ({x:.0}, {y:.0}), volume {volume}",
            self.summary.frames
        );
    }
}
