use crate::shared::gesture_config::HysteresisBand;

/// Edge reported by a single latch update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LatchTransition {
    Engaged,
    Released,
    Unchanged,
}

/// Schmitt-trigger latch over a distance measurement.
///
/// Engages when the value drops below the band, releases only once it rises
/// above it. Values inside the band (and NaN) leave the state untouched.
#[derive(Clone, Debug)]
pub struct HysteresisLatch {
    band: HysteresisBand,
    engaged: bool,
}

impl HysteresisLatch {
    pub fn new(band: HysteresisBand) -> Self {
        Self {
            band,
            engaged: false,
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn band(&self) -> HysteresisBand {
        self.band
    }

    pub fn update(&mut self, value: f64) -> LatchTransition {
        if !self.engaged && value < self.band.engage_below {
            self.engaged = true;
            LatchTransition::Engaged
        } else if self.engaged && value > self.band.release_above {
            self.engaged = false;
            LatchTransition::Released
        } else {
            LatchTransition::Unchanged
        }
    }

    pub fn reset(&mut self) {
        self.engaged = false;
    }
}
