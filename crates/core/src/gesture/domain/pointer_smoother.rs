use crate::shared::constants::SMOOTHING_FACTOR;

/// Pointer position in screen coordinates: [x, y].
pub type ScreenPoint = [f64; 2];

/// Domain interface for temporal smoothing of the pointer target.
pub trait PointerSmootherInterface: Send {
    fn smooth(&mut self, target: ScreenPoint) -> ScreenPoint;

    fn position(&self) -> ScreenPoint;

    fn reset(&mut self);
}

/// First-order low-pass filter, applied per axis.
///
/// Formula: `p[t] = p[t-1] + (target - p[t-1]) / factor`
/// Starts at the screen origin, matching a cursor that has not moved yet.
pub struct PointerSmoother {
    factor: f64,
    position: ScreenPoint,
}

impl PointerSmoother {
    pub fn new(factor: f64) -> Self {
        Self {
            factor,
            position: [0.0, 0.0],
        }
    }
}

impl Default for PointerSmoother {
    fn default() -> Self {
        Self::new(SMOOTHING_FACTOR)
    }
}

impl PointerSmootherInterface for PointerSmoother {
    fn smooth(&mut self, target: ScreenPoint) -> ScreenPoint {
        for (axis, goal) in self.position.iter_mut().zip(target) {
            *axis += (goal - *axis) / self.factor;
        }
        self.position
    }

    fn position(&self) -> ScreenPoint {
        self.position
    }

    fn reset(&mut self) {
        self.position = [0.0, 0.0];
    }
}
