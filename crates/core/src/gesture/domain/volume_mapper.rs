use crate::shared::constants::{VOLUME_BAR_RANGE, VOLUME_INPUT_RANGE};
use crate::shared::math::interp_clamped;

/// Volume derived from one frame's thumb–index spread.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeReading {
    /// Normalized level in `[0.0, 1.0]`.
    pub level: f64,
    /// Overlay bar top, in overlay pixels (inverted: full volume is smaller).
    pub bar_fill: f64,
}

impl VolumeReading {
    pub fn percent(&self) -> u32 {
        (self.level * 100.0) as u32
    }
}

/// Linear, clamped distance → volume mapping.
#[derive(Clone, Debug)]
pub struct VolumeMapper {
    input_range: (f64, f64),
    bar_range: (f64, f64),
}

impl VolumeMapper {
    pub fn new(input_range: (f64, f64), bar_range: (f64, f64)) -> Self {
        Self {
            input_range,
            bar_range,
        }
    }

    pub fn read(&self, thumb_index: f64) -> VolumeReading {
        VolumeReading {
            level: interp_clamped(thumb_index, self.input_range, (0.0, 1.0)),
            bar_fill: interp_clamped(thumb_index, self.input_range, self.bar_range),
        }
    }
}

impl Default for VolumeMapper {
    fn default() -> Self {
        Self::new(VOLUME_INPUT_RANGE, VOLUME_BAR_RANGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::far_below(0.0, 0.0)]
    #[case::just_below(9.99, 0.0)]
    #[case::low_edge(10.0, 0.0)]
    #[case::middle(80.0, 0.5)]
    #[case::high_edge(150.0, 1.0)]
    #[case::far_above(1000.0, 1.0)]
    fn test_level_is_clamped_linear(#[case] d: f64, #[case] level: f64) {
        assert_relative_eq!(VolumeMapper::default().read(d).level, level);
    }

    #[test]
    fn test_level_monotonic_over_range() {
        let mapper = VolumeMapper::default();
        let mut previous = mapper.read(0.0).level;
        let mut d = 0.0;
        while d <= 200.0 {
            let level = mapper.read(d).level;
            assert!(level >= previous, "level dropped at d = {d}");
            assert!((0.0..=1.0).contains(&level));
            previous = level;
            d += 0.5;
        }
    }

    #[test]
    fn test_bar_fill_is_inverted() {
        let mapper = VolumeMapper::default();
        assert_relative_eq!(mapper.read(10.0).bar_fill, 400.0);
        assert_relative_eq!(mapper.read(150.0).bar_fill, 150.0);
        assert_relative_eq!(mapper.read(80.0).bar_fill, 275.0);
        assert_relative_eq!(mapper.read(300.0).bar_fill, 150.0);
    }

    #[test]
    fn test_percent_truncates() {
        let reading = VolumeMapper::default().read(80.0);
        assert_eq!(reading.percent(), 50);
        assert_eq!(VolumeMapper::default().read(150.0).percent(), 100);
        // 0.499 -> 49
        let reading = VolumeReading {
            level: 0.499,
            bar_fill: 0.0,
        };
        assert_eq!(reading.percent(), 49);
    }
}
