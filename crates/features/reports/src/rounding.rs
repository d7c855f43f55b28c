//! Two-decimal rounding of ratios, done on integers so that `6 / 14 * 100` gives
//! exactly `42.86` and halves always round up.

/// `numerator / denominator * scale`, rounded half-up to two decimals.
///
/// A zero denominator yields `0.0`.
///
/// ```rust
/// use campus_reports::rounding::round_ratio;
///
/// assert_eq!(round_ratio(6, 14, 100), 42.86);
/// assert_eq!(round_ratio(2675, 1000, 1), 2.68);
/// assert_eq!(round_ratio(3, 0, 100), 0.0);
/// ```
#[must_use]
pub fn round_ratio(numerator: u64, denominator: u64, scale: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }

    let den = u128::from(denominator);
    let scaled = u128::from(numerator) * u128::from(scale) * 100;
    let hundredths = (scaled * 2 + den) / (den * 2);

    #[allow(clippy::cast_precision_loss)]
    let hundredths = hundredths as f64;
    hundredths / 100.0
}

/// Percentage of `part` in `whole`.
#[must_use]
pub fn percent(part: u64, whole: u64) -> f64 {
    round_ratio(part, whole, 100)
}

/// Mean of `count` values adding up to `sum`.
#[must_use]
pub fn mean(sum: u64, count: u64) -> f64 {
    round_ratio(sum, count, 1)
}
