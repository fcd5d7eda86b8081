use crate::gesture::domain::hysteresis_latch::HysteresisLatch;
use crate::gesture::domain::pointer_smoother::{
    PointerSmoother, PointerSmootherInterface, ScreenPoint,
};
use crate::gesture::domain::scroll_tracker::ScrollTracker;
use crate::gesture::domain::volume_mapper::VolumeReading;
use crate::shared::gesture_config::GestureConfig;

/// Pointer-channel mode chosen for a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerMode {
    Scroll,
    Click,
    Move,
    Idle,
}

impl std::fmt::Display for PointerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointerMode::Scroll => write!(f, "palm scroll"),
            PointerMode::Click => write!(f, "click"),
            PointerMode::Move => write!(f, "move"),
            PointerMode::Idle => write!(f, "idle"),
        }
    }
}

/// Everything carried from one frame to the next.
///
/// The pointer and volume channels own disjoint fields; nothing here is
/// shared between them.
pub struct GestureSession {
    pub(crate) click: HysteresisLatch,
    pub(crate) right_click: HysteresisLatch,
    pub(crate) scroll: ScrollTracker,
    pub(crate) pointer: Box<dyn PointerSmootherInterface>,
    pub(crate) pointer_mode: Option<PointerMode>,
    pub(crate) volume_gate: HysteresisLatch,
    pub(crate) last_volume: Option<VolumeReading>,
}

impl GestureSession {
    pub fn new(config: &GestureConfig) -> Self {
        Self::with_smoother(config, Box::new(PointerSmoother::new(config.smoothing_factor)))
    }

    pub fn with_smoother(
        config: &GestureConfig,
        pointer: Box<dyn PointerSmootherInterface>,
    ) -> Self {
        Self {
            click: HysteresisLatch::new(config.click),
            right_click: HysteresisLatch::new(config.right_click),
            scroll: ScrollTracker::new(config.scroll_deadzone, config.scroll_gain),
            pointer,
            pointer_mode: None,
            volume_gate: HysteresisLatch::new(config.volume_gate),
            last_volume: None,
        }
    }

    /// Back to the start-of-run state: latches released, no scroll
    /// baseline, pointer at the origin.
    pub fn reset(&mut self) {
        self.click.reset();
        self.right_click.reset();
        self.scroll.reset();
        self.pointer.reset();
        self.pointer_mode = None;
        self.volume_gate.reset();
        self.last_volume = None;
    }

    pub fn click_latched(&self) -> bool {
        self.click.is_engaged()
    }

    pub fn right_click_latched(&self) -> bool {
        self.right_click.is_engaged()
    }

    pub fn volume_active(&self) -> bool {
        self.volume_gate.is_engaged()
    }

    pub fn scroll_baseline(&self) -> f64 {
        self.scroll.baseline()
    }

    pub fn pointer_position(&self) -> ScreenPoint {
        self.pointer.position()
    }

    pub fn pointer_mode(&self) -> Option<PointerMode> {
        self.pointer_mode
    }

    pub fn last_volume(&self) -> Option<VolumeReading> {
        self.last_volume
    }
}
