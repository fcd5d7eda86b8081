//! Synthetic hands with exact pinch distances, for tests.

use crate::shared::landmark_frame::*;

/// Builds a hand whose thumb–index and thumb–middle distances are exact.
///
/// The thumb sits `thumb_index` px right of the index tip and the middle
/// tip sits `thumb_middle` px above the thumb. Knuckles are placed 30 px
/// below each fingertip for an open palm, 30 px above for a curled hand.
pub fn hand(thumb_index: f64, thumb_middle: f64, palm_open: bool, index_tip: Point) -> LandmarkFrame {
    let thumb = Point::new(index_tip.x + thumb_index, index_tip.y);
    let mut pts = [Point::new(index_tip.x, index_tip.y + 150.0); LANDMARK_COUNT];
    pts[THUMB_TIP] = thumb;
    pts[INDEX_TIP] = index_tip;
    pts[MIDDLE_TIP] = Point::new(thumb.x, thumb.y - thumb_middle);
    pts[RING_TIP] = Point::new(index_tip.x - 20.0, index_tip.y + 10.0);
    pts[PINKY_TIP] = Point::new(index_tip.x - 40.0, index_tip.y + 20.0);

    let knuckle_offset = if palm_open { 30.0 } else { -30.0 };
    for &(tip, knuckle) in FINGERS.iter() {
        pts[knuckle] = Point::new(pts[tip].x, pts[tip].y + knuckle_offset);
    }
    LandmarkFrame::new(pts)
}

/// Curled hand with the index tip in the middle of a 640x480 frame and the
/// middle finger far from the thumb.
pub fn pointer_hand(thumb_index: f64) -> LandmarkFrame {
    hand(thumb_index, 120.0, false, Point::new(320.0, 240.0))
}

/// Open palm, fingers spread, index tip at height `y`.
pub fn scrolling_hand(y: f64) -> LandmarkFrame {
    hand(80.0, 120.0, true, Point::new(320.0, y))
}

/// Curled hand for the volume channel.
pub fn volume_hand(thumb_middle: f64, thumb_index: f64) -> LandmarkFrame {
    hand(thumb_index, thumb_middle, false, Point::new(200.0, 200.0))
}

pub fn raw_points(count: usize) -> Vec<Point> {
    (0..count).map(|i| Point::new(i as f64, i as f64)).collect()
}

#[test]
fn test_hand_distances_are_exact() {
    use crate::gesture::domain::classifier::{is_palm_open, pinch_distance};

    let open = hand(42.0, 17.0, true, Point::new(300.0, 200.0));
    assert!((pinch_distance(&open, THUMB_TIP, INDEX_TIP) - 42.0).abs() < 1e-9);
    assert!((pinch_distance(&open, THUMB_TIP, MIDDLE_TIP) - 17.0).abs() < 1e-9);
    assert!(is_palm_open(&open));
    assert!(!is_palm_open(&hand(42.0, 17.0, false, Point::new(300.0, 200.0))));
}
