//! Integer helpers for brightness scaling.

/// Divide and round to the nearest integer, halves away from zero.
///
/// Widens to 64 bits internally so `numerator` may be a full
/// `u32 * u32` product without overflow.
///
/// The divisor must be non-zero; device construction guarantees
/// `max_brightness > 0` before any scaling runs.
pub(crate) fn div_round_closest(numerator: u64, divisor: u64) -> u64 {
    debug_assert!(divisor > 0);
    (numerator + divisor / 2) / divisor
}
