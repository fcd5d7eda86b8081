use crate::gesture::domain::pointer_smoother::ScreenPoint;
use crate::shared::frame_dimensions::{FrameDimensions, ScreenSize};
use crate::shared::landmark_frame::Point;
use crate::shared::math::interp_clamped;

/// Maps camera pixels inside the control rectangle onto the full screen.
///
/// The control rectangle is the camera frame shrunk by `margin` on every
/// side; positions in the margin clamp to the screen edge.
#[derive(Clone, Debug)]
pub struct ScreenMapper {
    x_range: (f64, f64),
    y_range: (f64, f64),
    screen: ScreenSize,
}

impl ScreenMapper {
    pub fn new(camera: FrameDimensions, margin: f64, screen: ScreenSize) -> Self {
        Self {
            x_range: (margin, camera.width as f64 - margin),
            y_range: (margin, camera.height as f64 - margin),
            screen,
        }
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// True when the margin leaves a usable control rectangle.
    pub fn has_control_area(&self) -> bool {
        self.x_range.0 < self.x_range.1 && self.y_range.0 < self.y_range.1
    }

    /// Without a control area every point maps to the origin.
    pub fn map(&self, camera_point: Point) -> ScreenPoint {
        if !self.has_control_area() {
            return [0.0, 0.0];
        }
        [
            interp_clamped(camera_point.x, self.x_range, (0.0, self.screen.width)),
            interp_clamped(camera_point.y, self.y_range, (0.0, self.screen.height)),
        ]
    }
}
