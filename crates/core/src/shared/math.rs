//! Shared numeric helpers for gesture mapping.

/// Piecewise-linear interpolation of `value` from `[in_start, in_end]` onto
/// `[out_start, out_end]`, clamped to the output endpoints.
///
/// Inputs outside the source range map to the nearest endpoint instead of
/// being extrapolated. Inverted output ranges (e.g. `400 → 150`) are allowed.
/// A degenerate input range maps everything to `out_start`.
pub fn interp_clamped(
    value: f64,
    (in_start, in_end): (f64, f64),
    (out_start, out_end): (f64, f64),
) -> f64 {
    let span = in_end - in_start;
    if span == 0.0 {
        return out_start;
    }
    let t = ((value - in_start) / span).clamp(0.0, 1.0);
    out_start + t * (out_end - out_start)
}
