//! Shared math utilities.

/// Default number of decimal places kept by [`ratio_reduce`].
pub const DEFAULT_RATIO_PRECISION: u32 = 4;

/// Round a value to `precision` decimal places (half away from zero).
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Reduce a rational sequence by dividing left to right (`a / b / c / ...`).
///
/// EXIF rationals arrive as `[numerator, denominator, ...]`. An empty
/// sequence or a zero denominator reduces to `0.0` rather than failing, so
/// a malformed tag degrades to a present-but-zero value.
pub fn ratio_reduce(items: &[f64], precision: u32) -> f64 {
    let Some((first, rest)) = items.split_first() else {
        return 0.0;
    };
    let reduced = rest.iter().fold(*first, |acc, next| acc / next);
    if !reduced.is_finite() {
        return 0.0;
    }
    round_to(reduced, precision)
}

/// Return `Some(value)` only for finite, non-zero values.
///
/// Zero and NaN both mean "could not be computed" for the geometry and
/// GPS fields.
pub(crate) fn non_zero(value: f64) -> Option<f64> {
    (value.is_finite() && value != 0.0).then_some(value)
}
