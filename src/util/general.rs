//! General-purpose utility functions.

/// Calculates amplitude in decibels from a linear power level.
#[inline]
pub fn level_to_db(level: f64) -> f64 {
    20.0 * level.log10()
}

/// Calculates the linear power level from amplitude as decibels.
#[inline]
pub fn db_to_level(db_value: f64) -> f64 {
    10.0f64.powf(db_value / 20.0)
}

/// Returns whether `value` and `target` are equal, with a tolerance of
/// [`f64::EPSILON`].
pub fn eps_eq(value: f64, target: f64) -> bool {
    (target - value).abs() < f64::EPSILON
}

/// Returns whether the absolute difference of `value` and `target` is less
/// than the provided `tolerance` value. Useful for checking approximate
/// equality.
pub fn within_tolerance(value: f64, target: f64, tolerance: f64) -> bool {
    (value - target).abs() <= tolerance
}
