use serde::{Deserialize, Serialize};

use crate::shared::frame_dimensions::FrameDimensions;
use crate::shared::landmark_frame::{Handedness, Point};

/// One hand as reported by the detector.
///
/// `points` is passed through unvalidated; the gesture core decides what to
/// do with a hand that does not have exactly 21 landmarks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedHand {
    pub handedness: Handedness,
    pub points: Vec<Point>,
}

/// Detector output for one camera frame: at most one hand.
#[derive(Clone, Debug, PartialEq)]
pub struct HandObservation {
    pub index: usize,
    pub hand: Option<DetectedHand>,
}

impl HandObservation {
    pub fn empty(index: usize) -> Self {
        Self { index, hand: None }
    }

    pub fn with_hand(index: usize, handedness: Handedness, points: Vec<Point>) -> Self {
        Self {
            index,
            hand: Some(DetectedHand { handedness, points }),
        }
    }
}

/// Yields per-frame hand landmarks from a camera + detector, a recording,
/// or anything else that can produce them.
pub trait LandmarkSource: Send {
    /// Prepares the source and returns the pixel size of its frames.
    fn open(&mut self) -> Result<FrameDimensions, Box<dyn std::error::Error>>;

    /// Observations in capture order. An error ends the stream.
    fn observations(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<HandObservation, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the source.
    fn close(&mut self);
}
