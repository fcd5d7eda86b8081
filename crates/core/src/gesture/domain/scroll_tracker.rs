use crate::shared::constants::{SCROLL_DEADZONE, SCROLL_GAIN};

/// Converts vertical index-tip motion into scroll steps while palm-scrolling.
///
/// The baseline is the index-tip y of the previous scrolling frame; zero
/// means "unset", so the first frame of a scroll gesture only records it.
#[derive(Clone, Debug)]
pub struct ScrollTracker {
    deadzone: f64,
    gain: f64,
    baseline: f64,
}

impl ScrollTracker {
    pub fn new(deadzone: f64, gain: f64) -> Self {
        Self {
            deadzone,
            gain,
            baseline: 0.0,
        }
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Feeds the current index-tip y of a scrolling frame.
    ///
    /// Returns the scroll amount when the motion since the previous frame
    /// exceeds the dead zone. Positive amounts follow the image y-axis
    /// (hand moving down).
    pub fn track(&mut self, index_tip_y: f64) -> Option<i32> {
        let amount = if self.baseline != 0.0 {
            let delta = self.baseline - index_tip_y;
            (delta.abs() > self.deadzone).then(|| (-delta * self.gain) as i32)
        } else {
            None
        };
        self.baseline = index_tip_y;
        amount.filter(|a| *a != 0)
    }

    /// Drops the baseline; called on every frame that is not scrolling.
    pub fn reset(&mut self) {
        self.baseline = 0.0;
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(SCROLL_DEADZONE, SCROLL_GAIN)
    }
}
