//! Pure geometric features of a single hand.
//!
//! Everything here is a function of one `LandmarkFrame`; no state is carried
//! between frames.

use crate::shared::bounding_box::BoundingBox;
use crate::shared::landmark_frame::{
    LandmarkFrame, Point, FINGERS, INDEX_TIP, MIDDLE_TIP, THUMB_TIP,
};

/// Euclidean distance between landmarks `a` and `b`.
pub fn pinch_distance(frame: &LandmarkFrame, a: usize, b: usize) -> f64 {
    frame.point(a).distance_to(&frame.point(b))
}

/// True when every non-thumb fingertip sits above its knuckle in image space
/// (strictly smaller y).
pub fn is_palm_open(frame: &LandmarkFrame) -> bool {
    FINGERS
        .iter()
        .all(|&(tip, knuckle)| frame.point(tip).y < frame.point(knuckle).y)
}

pub fn bounding_box(frame: &LandmarkFrame) -> BoundingBox {
    BoundingBox::around(frame)
}

/// Per-frame measurements consumed by the debounce layer.
#[derive(Clone, Debug, PartialEq)]
pub struct HandFeatures {
    pub thumb_index: f64,
    pub thumb_middle: f64,
    pub palm_open: bool,
    pub index_tip: Point,
    pub bounds: BoundingBox,
}

impl HandFeatures {
    pub fn measure(frame: &LandmarkFrame) -> Self {
        Self {
            thumb_index: pinch_distance(frame, THUMB_TIP, INDEX_TIP),
            thumb_middle: pinch_distance(frame, THUMB_TIP, MIDDLE_TIP),
            palm_open: is_palm_open(frame),
            index_tip: frame.point(INDEX_TIP),
            bounds: bounding_box(frame),
        }
    }
}
