//! 21-point hand landmark set in pixel coordinates.
//!
//! Index numbering follows the usual hand-landmark topology: 0 is the wrist,
//! then four joints per digit from thumb to pinky, ending at each fingertip.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_KNUCKLE: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_KNUCKLE: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_KNUCKLE: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_KNUCKLE: usize = 18;
pub const PINKY_TIP: usize = 20;

/// (tip, knuckle) pairs for the four non-thumb fingers.
pub const FINGERS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_KNUCKLE),
    (MIDDLE_TIP, MIDDLE_KNUCKLE),
    (RING_TIP, RING_KNUCKLE),
    (PINKY_TIP, PINKY_KNUCKLE),
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LandmarkError {
    #[error("expected 21 landmarks, got {0}")]
    InvalidCount(usize),
}

/// A 2-D point in camera pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Handedness label as reported by the upstream detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl std::fmt::Display for Handedness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Handedness::Left => write!(f, "Left"),
            Handedness::Right => write!(f, "Right"),
        }
    }
}

/// Exactly 21 landmarks of one detected hand.
///
/// A frame with no hand is represented by the absence of a `LandmarkFrame`,
/// never by a partial one.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkFrame {
    points: [Point; LANDMARK_COUNT],
}

impl LandmarkFrame {
    pub fn new(points: [Point; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    pub fn from_points(points: &[Point]) -> Result<Self, LandmarkError> {
        let points: [Point; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| LandmarkError::InvalidCount(points.len()))?;
        Ok(Self { points })
    }

    pub fn point(&self, index: usize) -> Point {
        self.points[index]
    }

    pub fn points(&self) -> &[Point; LANDMARK_COUNT] {
        &self.points
    }
}
