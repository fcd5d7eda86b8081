use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
}

/// A control command produced by gesture interpretation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Absolute pointer target in screen coordinates.
    MoveCursor { x: f64, y: f64 },
    Click { button: MouseButton },
    /// Signed scroll amount; positive follows the image y-axis.
    Scroll { amount: i32 },
    /// Absolute system volume in `[0.0, 1.0]`.
    SetVolume { level: f64 },
}

impl Action {
    /// Short name used for logging and per-kind counters.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::MoveCursor { .. } => "move",
            Action::Click {
                button: MouseButton::Left,
            } => "left_click",
            Action::Click {
                button: MouseButton::Right,
            } => "right_click",
            Action::Scroll { .. } => "scroll",
            Action::SetVolume { .. } => "volume",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::MoveCursor { x, y } => write!(f, "move cursor to ({x:.1}, {y:.1})"),
            Action::Click { button } => write!(f, "{button:?} click"),
            Action::Scroll { amount } => write!(f, "scroll {amount}"),
            Action::SetVolume { level } => write!(f, "set volume {:.0}%", level * 100.0),
        }
    }
}
