use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::*;
use crate::shared::frame_dimensions::ScreenSize;
use crate::shared::landmark_frame::Handedness;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Two-threshold band: engage strictly below `engage_below`, release
/// strictly above `release_above`, hold in between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HysteresisBand {
    pub engage_below: f64,
    pub release_above: f64,
}

impl HysteresisBand {
    pub const fn new(engage_below: f64, release_above: f64) -> Self {
        Self {
            engage_below,
            release_above,
        }
    }
}

/// Which control channel a detected hand drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Pointer,
    Volume,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Pointer => write!(f, "pointer"),
            Channel::Volume => write!(f, "volume"),
        }
    }
}

/// Tunable gesture thresholds and mapping parameters.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub click: HysteresisBand,
    pub right_click: HysteresisBand,
    pub volume_gate: HysteresisBand,
    pub volume_input_range: (f64, f64),
    pub volume_bar_range: (f64, f64),
    pub scroll_deadzone: f64,
    pub scroll_gain: f64,
    pub smoothing_factor: f64,
    pub frame_margin: f64,
    pub screen: ScreenSize,
    /// The detector labels a non-mirrored feed's hands reversed. When the
    /// camera already mirrors, labels are taken as-is and pointer X is not
    /// flipped.
    pub camera_mirrored: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            click: HysteresisBand::new(PINCH_DISTANCE, RELEASE_DISTANCE),
            right_click: HysteresisBand::new(
                RIGHT_CLICK_PINCH_DISTANCE,
                RIGHT_CLICK_RELEASE_DISTANCE,
            ),
            volume_gate: HysteresisBand::new(
                VOLUME_GATE_ENGAGE_DISTANCE,
                VOLUME_GATE_RELEASE_DISTANCE,
            ),
            volume_input_range: VOLUME_INPUT_RANGE,
            volume_bar_range: VOLUME_BAR_RANGE,
            scroll_deadzone: SCROLL_DEADZONE,
            scroll_gain: SCROLL_GAIN,
            smoothing_factor: SMOOTHING_FACTOR,
            frame_margin: FRAME_MARGIN,
            screen: ScreenSize::new(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT),
            camera_mirrored: false,
        }
    }
}

impl GestureConfig {
    /// `<config dir>/VisionTouch/config.json`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            ConfigError::Invalid(format!("could not serialize config: {e}"))
        })?;
        fs::write(path, json).map_err(write_err)
    }

    /// Rejects values the interpreter cannot work with. Every check also
    /// rejects NaN and infinities.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, band) in [
            ("click", self.click),
            ("right_click", self.right_click),
            ("volume_gate", self.volume_gate),
        ] {
            if !(band.engage_below.is_finite()
                && band.release_above.is_finite()
                && band.engage_below > 0.0
                && band.engage_below <= band.release_above)
            {
                return Err(ConfigError::Invalid(format!(
                    "{name} band must satisfy 0 < engage_below <= release_above, got {} / {}",
                    band.engage_below, band.release_above
                )));
            }
        }
        let (input_start, input_end) = self.volume_input_range;
        if !(input_start.is_finite() && input_end.is_finite() && input_start < input_end) {
            return Err(ConfigError::Invalid(format!(
                "volume_input_range must be finite and increasing, got {:?}",
                self.volume_input_range
            )));
        }
        if !(self.volume_bar_range.0.is_finite() && self.volume_bar_range.1.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "volume_bar_range must be finite, got {:?}",
                self.volume_bar_range
            )));
        }
        if !(self.smoothing_factor.is_finite() && self.smoothing_factor >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "smoothing_factor must be >= 1, got {}",
                self.smoothing_factor
            )));
        }
        if !(self.scroll_deadzone.is_finite() && self.scroll_deadzone >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "scroll_deadzone must be non-negative, got {}",
                self.scroll_deadzone
            )));
        }
        // Any motion past the dead zone must scroll by at least one step.
        if !(self.scroll_gain.is_finite() && self.scroll_deadzone * self.scroll_gain >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "scroll_gain must be finite with scroll_deadzone * scroll_gain >= 1, got {} * {}",
                self.scroll_deadzone, self.scroll_gain
            )));
        }
        if !(self.frame_margin.is_finite() && self.frame_margin >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "frame_margin must be non-negative, got {}",
                self.frame_margin
            )));
        }
        if !(self.screen.width.is_finite()
            && self.screen.height.is_finite()
            && self.screen.width > 0.0
            && self.screen.height > 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "screen size must be positive, got {}x{}",
                self.screen.width, self.screen.height
            )));
        }
        Ok(())
    }

    /// Channel driven by a hand carrying the given detector label.
    pub fn channel_for(&self, handedness: Handedness) -> Channel {
        let volume_label = if self.camera_mirrored {
            Handedness::Left
        } else {
            Handedness::Right
        };
        if handedness == volume_label {
            Channel::Volume
        } else {
            Channel::Pointer
        }
    }

    pub fn mirror_pointer_x(&self) -> bool {
        !self.camera_mirrored
    }
}
