//! # Arithmetic Primitives
//!
//! Integer-only helpers shared by the breakdown, decoder and resolver.
//!
//! The engine never touches floating point: percentages and stage means are
//! computed with exact integer arithmetic so that results are reproducible
//! across platforms and compilers.

/// Scale used for every percentage the engine reports.
pub const PERCENT_SCALE: usize = 100;

/// `round(100 * part / whole)`, rounding halves up. Returns 0 when `whole == 0`.
///
/// Computed as `(200 * part + whole) / (2 * whole)`, which is
/// `floor(100 * part / whole + 1/2)` without leaving the integers.
#[must_use]
pub fn rounded_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let numerator = part
        .saturating_mul(PERCENT_SCALE)
        .saturating_mul(2)
        .saturating_add(whole);
    let denominator = whole.saturating_mul(2);
    (numerator / denominator).min(u8::MAX as usize) as u8
}

/// `ceil(sum / count)`. Returns 0 when `count == 0`.
#[must_use]
pub fn ceil_mean(sum: usize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    sum.saturating_add(count - 1) / count
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_zero_denominator() {
        assert_eq!(rounded_percent(0, 0), 0);
        assert_eq!(rounded_percent(5, 0), 0);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(rounded_percent(1, 2), 50);
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(2, 3), 67);
        // 100 * 1 / 8 = 12.5 -> 13
        assert_eq!(rounded_percent(1, 8), 13);
        // 100 * 1 / 200 = 0.5 -> 1
        assert_eq!(rounded_percent(1, 200), 1);
        assert_eq!(rounded_percent(7, 7), 100);
    }

    #[test]
    fn ceil_mean_rounds_one_one_three_up() {
        // [1, 1, 3] -> 5 / 3 = 1.667 -> 2
        assert_eq!(ceil_mean(5, 3), 2);
        assert_eq!(ceil_mean(6, 3), 2);
        assert_eq!(ceil_mean(7, 3), 3);
        assert_eq!(ceil_mean(0, 4), 0);
        assert_eq!(ceil_mean(9, 0), 0);
    }
}
