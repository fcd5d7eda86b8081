/// Thumb–index distance (px) below which a left click engages.
pub const PINCH_DISTANCE: f64 = 20.0;
/// Thumb–index distance (px) above which the click latch releases.
/// Also the minimum finger spread for palm scroll and pointer movement.
pub const RELEASE_DISTANCE: f64 = 35.0;

pub const RIGHT_CLICK_PINCH_DISTANCE: f64 = 20.0;
pub const RIGHT_CLICK_RELEASE_DISTANCE: f64 = 30.0;

/// Thumb–middle hysteresis band gating volume control.
pub const VOLUME_GATE_ENGAGE_DISTANCE: f64 = 25.0;
pub const VOLUME_GATE_RELEASE_DISTANCE: f64 = 40.0;

/// Thumb–index distance range (px) mapped onto volume 0.0..=1.0.
pub const VOLUME_INPUT_RANGE: (f64, f64) = (10.0, 150.0);
/// Volume bar fill in overlay pixels; inverted so a full bar has the smaller y.
pub const VOLUME_BAR_RANGE: (f64, f64) = (400.0, 150.0);

/// Index-tip vertical motion (px) ignored while palm scrolling.
pub const SCROLL_DEADZONE: f64 = 6.0;
pub const SCROLL_GAIN: f64 = 2.0;

/// Divisor of the pointer low-pass filter; higher is smoother but laggier.
pub const SMOOTHING_FACTOR: f64 = 6.0;

/// Margin (px) trimmed from every camera edge before mapping to the screen.
pub const FRAME_MARGIN: f64 = 100.0;

pub const DEFAULT_SCREEN_WIDTH: f64 = 1920.0;
pub const DEFAULT_SCREEN_HEIGHT: f64 = 1080.0;

pub const CONFIG_DIR_NAME: &str = "VisionTouch";
pub const CONFIG_FILE_NAME: &str = "config.json";
