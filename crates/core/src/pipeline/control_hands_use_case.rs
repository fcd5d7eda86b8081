use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::control::domain::action_dispatcher::ActionDispatcher;
use crate::control::domain::action_sink::ActionSink;
use crate::gesture::domain::gesture_interpreter::GestureInterpreter;
use crate::shared::gesture_config::GestureConfig;
use crate::tracking::domain::landmark_source::LandmarkSource;

use super::pipeline_executor::{PipelineConfig, PipelineExecutor, RunSummary};
use super::session_logger::SessionLogger;

/// Drives a whole control session: open the landmark source, build the
/// interpreter for its frame size, then run the loop through an executor.
///
/// This is a single-use struct: `execute` consumes the owned components,
/// so calling it twice will fail.
pub struct ControlHandsUseCase {
    source: Option<Box<dyn LandmarkSource>>,
    sink: Option<Box<dyn ActionSink>>,
    config: Option<GestureConfig>,
    executor: Box<dyn PipelineExecutor>,
    continue_on_sink_error: bool,
    on_progress: Option<Box<dyn Fn(usize) -> bool + Send>>,
    cancelled: Arc<AtomicBool>,
}

impl ControlHandsUseCase {
    pub fn new(
        source: Box<dyn LandmarkSource>,
        sink: Box<dyn ActionSink>,
        config: GestureConfig,
        executor: Box<dyn PipelineExecutor>,
        continue_on_sink_error: bool,
        on_progress: Option<Box<dyn Fn(usize) -> bool + Send>>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            source: Some(source),
            sink: Some(sink),
            config: Some(config),
            executor,
            continue_on_sink_error,
            on_progress,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn execute(
        &mut self,
        logger: &mut dyn SessionLogger,
    ) -> Result<RunSummary, Box<dyn std::error::Error>> {
        let mut source = self.source.take().ok_or("Pipeline already executed")?;
        let sink = self.sink.take().ok_or("Pipeline already executed")?;
        let config = self.config.take().ok_or("Pipeline already executed")?;

        let camera = match source.open() {
            Ok(camera) => camera,
            Err(e) => {
                source.close();
                return Err(e);
            }
        };
        logger.info(&format!(
            "Camera {}x{}, screen {}x{}, mirrored: {}",
            camera.width,
            camera.height,
            config.screen.width,
            config.screen.height,
            config.camera_mirrored
        ));

        let interpreter = GestureInterpreter::new(config, camera);
        let pipeline_config = PipelineConfig {
            continue_on_sink_error: self.continue_on_sink_error,
            on_progress: self.on_progress.take(),
            cancelled: self.cancelled.clone(),
        };

        self.executor.execute(
            source,
            interpreter,
            ActionDispatcher::new(sink),
            logger,
            pipeline_config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::domain::action::{Action, MouseButton};
    use crate::pipeline::infrastructure::sequential_pipeline_executor::SequentialPipelineExecutor;
    use crate::pipeline::infrastructure::threaded_pipeline_executor::ThreadedPipelineExecutor;
    use crate::pipeline::session_logger::{NullSessionLogger, StdoutSessionLogger};
    use crate::shared::frame_dimensions::FrameDimensions;
    use crate::shared::landmark_frame::{Handedness, LandmarkFrame};
    use crate::shared::test_fixtures::*;
    use crate::tracking::domain::landmark_source::HandObservation;
    use rstest::rstest;
    use std::sync::atomic::Ordering;
    use std::sync::Mutex;

    // --- Stubs ---

    struct StubSource {
        observations: Vec<Result<HandObservation, String>>,
        fail_open: bool,
        closed: Arc<Mutex<bool>>,
    }

    impl StubSource {
        fn new(observations: Vec<HandObservation>) -> Self {
            Self {
                observations: observations.into_iter().map(Ok).collect(),
                fail_open: false,
                closed: Arc::new(Mutex::new(false)),
            }
        }
    }

    impl LandmarkSource for StubSource {
        fn open(&mut self) -> Result<FrameDimensions, Box<dyn std::error::Error>> {
            if self.fail_open {
                return Err("camera unavailable".into());
            }
            Ok(FrameDimensions::new(640, 480))
        }

        fn observations(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<HandObservation, Box<dyn std::error::Error>>> + '_>
        {
            Box::new(self.observations.drain(..).map(|r| r.map_err(Into::into)))
        }

        fn close(&mut self) {
            *self.closed.lock().unwrap() = true;
        }
    }

    struct RecordingSink {
        applied: Arc<Mutex<Vec<Action>>>,
        flushed: Arc<Mutex<bool>>,
        reject: Option<&'static str>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                applied: Arc::new(Mutex::new(Vec::new())),
                flushed: Arc::new(Mutex::new(false)),
                reject: None,
            }
        }

        fn rejecting(kind: &'static str) -> Self {
            Self {
                reject: Some(kind),
                ..Self::new()
            }
        }
    }

    impl ActionSink for RecordingSink {
        fn apply(&mut self, action: &Action) -> Result<(), Box<dyn std::error::Error>> {
            if self.reject == Some(action.kind()) {
                return Err("sink rejected action".into());
            }
            self.applied.lock().unwrap().push(*action);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            *self.flushed.lock().unwrap() = true;
            Ok(())
        }
    }

    // --- Helpers ---

    fn observe(index: usize, handedness: Handedness, frame: &LandmarkFrame) -> HandObservation {
        HandObservation::with_hand(index, handedness, frame.points().to_vec())
    }

    /// Pointer hand pinching at the given thumb–index distances.
    fn pinch_sequence(distances: &[f64]) -> Vec<HandObservation> {
        distances
            .iter()
            .enumerate()
            .map(|(i, &d)| observe(i, Handedness::Left, &pointer_hand(d)))
            .collect()
    }

    fn executor(threaded: bool) -> Box<dyn PipelineExecutor> {
        if threaded {
            Box::new(ThreadedPipelineExecutor::with_capacity(2))
        } else {
            Box::new(SequentialPipelineExecutor::new())
        }
    }

    fn use_case(
        source: StubSource,
        sink: RecordingSink,
        threaded: bool,
        continue_on_sink_error: bool,
    ) -> ControlHandsUseCase {
        ControlHandsUseCase::new(
            Box::new(source),
            Box::new(sink),
            GestureConfig::default(),
            executor(threaded),
            continue_on_sink_error,
            None,
            None,
        )
    }

    fn kinds(actions: &[Action]) -> Vec<&'static str> {
        actions.iter().map(|a| a.kind()).collect()
    }

    // --- Tests ---

    #[rstest]
    #[case::sequential(false)]
    #[case::threaded(true)]
    fn test_pinch_sequence_clicks_twice(#[case] threaded: bool) {
        let source = StubSource::new(pinch_sequence(&[80.0, 15.0, 15.0, 40.0, 15.0]));
        let closed = source.closed.clone();
        let sink = RecordingSink::new();
        let applied = sink.applied.clone();
        let flushed = sink.flushed.clone();

        let mut uc = use_case(source, sink, threaded, false);
        let summary = uc.execute(&mut NullSessionLogger).unwrap();

        assert_eq!(
            kinds(&applied.lock().unwrap()),
            vec!["move", "left_click", "move", "left_click"]
        );
        assert_eq!(
            summary,
            RunSummary {
                frames: 5,
                hand_frames: 5,
                actions: 4,
                sink_failures: 0,
            }
        );
        assert!(*closed.lock().unwrap());
        assert!(*flushed.lock().unwrap());
    }

    #[rstest]
    #[case::sequential(false)]
    #[case::threaded(true)]
    fn test_scroll_volume_and_gaps_interleave(#[case] threaded: bool) {
        let observations = vec![
            observe(0, Handedness::Left, &scrolling_hand(200.0)),
            observe(1, Handedness::Left, &scrolling_hand(190.0)),
            observe(2, Handedness::Right, &volume_hand(10.0, 80.0)),
            observe(3, Handedness::Left, &scrolling_hand(150.0)),
            HandObservation::empty(4),
            observe(5, Handedness::Left, &scrolling_hand(140.0)),
        ];
        let sink = RecordingSink::new();
        let applied = sink.applied.clone();

        let mut uc = use_case(StubSource::new(observations), sink, threaded, false);
        let summary = uc.execute(&mut NullSessionLogger).unwrap();

        // Baselines are dropped on the volume frame and the empty frame, so
        // only the first pair of scroll frames produces a delta.
        let applied = applied.lock().unwrap();
        assert_eq!(applied[0], Action::Scroll { amount: -20 });
        assert!(matches!(applied[1], Action::SetVolume { .. }));
        assert_eq!(applied.len(), 2);
        assert_eq!(summary.frames, 6);
        assert_eq!(summary.hand_frames, 5);
    }

    #[test]
    fn test_invalid_hand_is_treated_as_absent() {
        let observations = vec![
            observe(0, Handedness::Left, &pointer_hand(80.0)),
            HandObservation::with_hand(1, Handedness::Left, raw_points(5)),
        ];
        let sink = RecordingSink::new();
        let applied = sink.applied.clone();

        let mut uc = use_case(StubSource::new(observations), sink, false, false);
        let summary = uc.execute(&mut NullSessionLogger).unwrap();

        assert_eq!(kinds(&applied.lock().unwrap()), vec!["move"]);
        assert_eq!(summary.frames, 2);
        assert_eq!(summary.hand_frames, 1);
    }

    #[rstest]
    #[case::sequential(false)]
    #[case::threaded(true)]
    fn test_sink_failure_stops_session(#[case] threaded: bool) {
        let source = StubSource::new(pinch_sequence(&[80.0, 15.0, 40.0, 80.0]));
        let closed = source.closed.clone();
        let sink = RecordingSink::rejecting("left_click");
        let applied = sink.applied.clone();
        let flushed = sink.flushed.clone();

        let mut uc = use_case(source, sink, threaded, false);
        let err = uc.execute(&mut NullSessionLogger).unwrap_err();

        assert!(err.to_string().contains("Frame 1"));
        assert!(err.to_string().contains("sink rejected action"));
        assert_eq!(kinds(&applied.lock().unwrap()), vec!["move"]);
        assert!(*closed.lock().unwrap());
        assert!(*flushed.lock().unwrap());
    }

    #[rstest]
    #[case::sequential(false)]
    #[case::threaded(true)]
    fn test_keep_going_counts_sink_failures(#[case] threaded: bool) {
        let sink = RecordingSink::rejecting("left_click");
        let applied = sink.applied.clone();

        let mut uc = use_case(
            StubSource::new(pinch_sequence(&[80.0, 15.0, 15.0, 40.0, 15.0, 80.0])),
            sink,
            threaded,
            true,
        );
        let summary = uc.execute(&mut NullSessionLogger).unwrap();

        // The rejected click still latched, so the held pinch never repeats it.
        assert_eq!(kinds(&applied.lock().unwrap()), vec!["move", "move", "move"]);
        assert_eq!(summary.sink_failures, 2);
        assert_eq!(summary.frames, 6);
    }

    #[rstest]
    #[case::sequential(false)]
    #[case::threaded(true)]
    fn test_source_error_is_fatal(#[case] threaded: bool) {
        let mut source = StubSource::new(pinch_sequence(&[80.0]));
        source.observations.push(Err("line 3: bad frame".to_string()));
        source
            .observations
            .extend(pinch_sequence(&[80.0]).into_iter().map(Ok));

        let sink = RecordingSink::new();
        let flushed = sink.flushed.clone();
        let mut logger = StdoutSessionLogger::new(10);

        let mut uc = use_case(source, sink, threaded, false);
        let err = uc.execute(&mut logger).unwrap_err();

        assert!(err.to_string().contains("line 3: bad frame"));
        // The frame before the failure still went through and the sink was flushed.
        assert_eq!(logger.frames(), 1);
        assert!(*flushed.lock().unwrap());
    }

    #[test]
    fn test_open_failure_closes_source() {
        let mut source = StubSource::new(Vec::new());
        source.fail_open = true;
        let closed = source.closed.clone();

        let mut uc = use_case(source, RecordingSink::new(), false, false);
        let err = uc.execute(&mut NullSessionLogger).unwrap_err();
        assert_eq!(err.to_string(), "camera unavailable");
        assert!(*closed.lock().unwrap());
    }

    #[rstest]
    #[case::sequential(false)]
    #[case::threaded(true)]
    fn test_cancel_flag_set_before_run(#[case] threaded: bool) {
        let cancelled = Arc::new(AtomicBool::new(true));
        let mut uc = ControlHandsUseCase::new(
            Box::new(StubSource::new(pinch_sequence(&[80.0, 80.0, 80.0]))),
            Box::new(RecordingSink::new()),
            GestureConfig::default(),
            executor(threaded),
            false,
            None,
            Some(cancelled.clone()),
        );
        let summary = uc.execute(&mut NullSessionLogger).unwrap();
        assert_eq!(summary.frames, 0);
        assert!(cancelled.load(Ordering::Relaxed));
    }

    #[rstest]
    #[case::sequential(false)]
    #[case::threaded(true)]
    fn test_progress_callback_can_stop(#[case] threaded: bool) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_cb = seen.clone();
        let mut uc = ControlHandsUseCase::new(
            Box::new(StubSource::new(pinch_sequence(&[80.0; 10]))),
            Box::new(RecordingSink::new()),
            GestureConfig::default(),
            executor(threaded),
            false,
            Some(Box::new(move |frames| {
                seen_cb.lock().unwrap().push(frames);
                frames < 3
            })),
            None,
        );
        let summary = uc.execute(&mut NullSessionLogger).unwrap();
        assert_eq!(summary.frames, 3);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_threaded_preserves_order_on_long_runs() {
        let distances: Vec<f64> = (0..200)
            .map(|i| if i % 4 == 1 { 15.0 } else { 80.0 })
            .collect();

        let run = |threaded: bool| {
            let sink = RecordingSink::new();
            let applied = sink.applied.clone();
            let mut uc = use_case(StubSource::new(pinch_sequence(&distances)), sink, threaded, false);
            uc.execute(&mut NullSessionLogger).unwrap();
            let actions = applied.lock().unwrap().clone();
            actions
        };

        let sequential = run(false);
        assert_eq!(
            sequential
                .iter()
                .filter(|a| **a == Action::Click { button: MouseButton::Left })
                .count(),
            50
        );
        assert_eq!(run(true), sequential);
    }

    #[test]
    fn test_logger_sees_frames_and_actions() {
        let mut logger = StdoutSessionLogger::new(10);
        let mut uc = use_case(
            StubSource::new(pinch_sequence(&[80.0, 15.0, 40.0])),
            RecordingSink::new(),
            false,
            false,
        );
        uc.execute(&mut logger).unwrap();

        assert_eq!(logger.frames(), 3);
        assert_eq!(logger.action_count("move"), 2);
        assert_eq!(logger.action_count("left_click"), 1);
        assert_eq!(logger.timings_for("interpret").unwrap().count, 3);
        assert_eq!(logger.timings_for("dispatch").unwrap().count, 3);
    }

    #[test]
    fn test_execute_twice_fails() {
        let mut uc = use_case(StubSource::new(Vec::new()), RecordingSink::new(), false, false);
        uc.execute(&mut NullSessionLogger).unwrap();
        let err = uc.execute(&mut NullSessionLogger).unwrap_err();
        assert_eq!(err.to_string(), "Pipeline already executed");
    }
}
