//! Monetary rounding for line-item totals.
//!
//! Totals are plain `f64` values carried at two-decimal precision. The single
//! rounding rule used everywhere is round-half-away-from-zero at two decimals,
//! applied whenever a derived amount is produced.

/// Round a monetary amount to two decimals, half away from zero.
///
/// `f64::round` rounds halves away from zero, so `round2(2.675 * 1.0)` and
/// negative amounts behave symmetrically. Representation error in the inputs
/// (e.g. `0.1 + 0.2`) is absorbed by this step rather than propagated into
/// totals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Minimum accepted monetary amount (one cent).
pub const MIN_AMOUNT: f64 = 0.01;
