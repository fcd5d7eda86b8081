use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use visiontouch_core::control::domain::action_sink::ActionSink;
use visiontouch_core::control::infrastructure::json_lines_action_sink::JsonLinesActionSink;
use visiontouch_core::control::infrastructure::logging_action_sink::LoggingActionSink;
use visiontouch_core::pipeline::control_hands_use_case::ControlHandsUseCase;
use visiontouch_core::pipeline::infrastructure::sequential_pipeline_executor::SequentialPipelineExecutor;
use visiontouch_core::pipeline::infrastructure::threaded_pipeline_executor::ThreadedPipelineExecutor;
use visiontouch_core::pipeline::pipeline_executor::PipelineExecutor;
use visiontouch_core::pipeline::session_logger::{SessionLogger, StdoutSessionLogger};
use visiontouch_core::shared::frame_dimensions::ScreenSize;
use visiontouch_core::shared::gesture_config::GestureConfig;
use visiontouch_core::tracking::infrastructure::json_lines_landmark_source::JsonLinesLandmarkSource;

/// Replays recorded hand landmarks through the gesture interpreter.
#[derive(Parser)]
#[command(name = "visiontouch")]
struct Cli {
    /// Landmark recording (JSON lines: header, then one frame per line).
    recording: PathBuf,

    /// Write emitted actions as JSON lines to this file instead of logging them.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Gesture config file (defaults to the user config dir, if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Screen width in pixels.
    #[arg(long)]
    screen_width: Option<f64>,

    /// Screen height in pixels.
    #[arg(long)]
    screen_height: Option<f64>,

    /// Camera border, in pixels, excluded from the pointer control area.
    #[arg(long)]
    frame_margin: Option<f64>,

    /// Pointer smoothing divisor (1 = no smoothing).
    #[arg(long)]
    smoothing: Option<f64>,

    /// Scroll steps per pixel of index-tip motion.
    #[arg(long)]
    scroll_gain: Option<f64>,

    /// The camera feed is already mirrored: swap hand roles, keep pointer x.
    #[arg(long)]
    camera_mirrored: bool,

    /// Read landmarks on a separate thread.
    #[arg(long)]
    threaded: bool,

    /// Log action sink failures and keep going instead of stopping.
    #[arg(long)]
    keep_going: bool,

    /// Log progress every N frames.
    #[arg(long, default_value = "100")]
    progress_every: usize,

    /// Write the effective config, overrides included, to this file.
    #[arg(long)]
    save_config: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = build_config(&cli)?;
    if let Some(path) = &cli.save_config {
        config.save(path)?;
        log::info!("Saved config to {}", path.display());
    }
    let sink = build_sink(cli.output.as_deref())?;
    let executor: Box<dyn PipelineExecutor> = if cli.threaded {
        Box::new(ThreadedPipelineExecutor::new())
    } else {
        Box::new(SequentialPipelineExecutor::new())
    };

    let mut use_case = ControlHandsUseCase::new(
        Box::new(JsonLinesLandmarkSource::new(&cli.recording)),
        sink,
        config,
        executor,
        cli.keep_going,
        None,
        None,
    );

    let mut logger = StdoutSessionLogger::new(cli.progress_every);
    let summary = use_case.execute(&mut logger)?;

    logger.info(&format!(
        "Processed {} frames ({} with a hand), {} actions",
        summary.frames, summary.hand_frames, summary.actions
    ));
    if summary.sink_failures > 0 {
        log::warn!("{} frames had action sink failures", summary.sink_failures);
    }
    if let Some(output) = &cli.output {
        logger.info(&format!("Actions written to {}", output.display()));
    }

    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.recording.exists() {
        return Err(format!("Recording not found: {}", cli.recording.display()).into());
    }
    if let Some(path) = &cli.config {
        if !path.exists() {
            return Err(format!("Config file not found: {}", path.display()).into());
        }
    }
    if cli.progress_every == 0 {
        return Err("--progress-every must be at least 1".into());
    }
    Ok(())
}

/// Explicit `--config` first, then the user config file, then defaults.
/// Command-line overrides are applied last and re-validated.
fn build_config(cli: &Cli) -> Result<GestureConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => GestureConfig::load(path)?,
        None => match GestureConfig::default_path() {
            Ok(path) if path.exists() => {
                log::info!("Using config {}", path.display());
                GestureConfig::load(&path)?
            }
            _ => GestureConfig::default(),
        },
    };

    if cli.screen_width.is_some() || cli.screen_height.is_some() {
        config.screen = ScreenSize::new(
            cli.screen_width.unwrap_or(config.screen.width),
            cli.screen_height.unwrap_or(config.screen.height),
        );
    }
    if let Some(margin) = cli.frame_margin {
        config.frame_margin = margin;
    }
    if let Some(smoothing) = cli.smoothing {
        config.smoothing_factor = smoothing;
    }
    if let Some(gain) = cli.scroll_gain {
        config.scroll_gain = gain;
    }
    if cli.camera_mirrored {
        config.camera_mirrored = true;
    }

    config.validate()?;
    Ok(config)
}

fn build_sink(output: Option<&Path>) -> Result<Box<dyn ActionSink>, Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            let sink = JsonLinesActionSink::create(path)
                .map_err(|e| format!("Cannot create {}: {e}", path.display()))?;
            Ok(Box::new(sink))
        }
        None => Ok(Box::new(LoggingActionSink::new())),
    }
}
