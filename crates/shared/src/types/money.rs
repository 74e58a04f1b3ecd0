//! Money rounding helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All valuation math runs on `rust_decimal::Decimal`; this module owns the
//! single rounding entry point so every posted amount is quantized the same
//! way.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places for all monetary amounts.
pub const MONEY_SCALE: u32 = 2;

/// Rounds a monetary amount to 2 decimal places, half-up.
///
/// Statutory bookkeeping rounds half away from zero, so 0.005 becomes 0.01.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns true if the amount is strictly positive.
#[must_use]
pub fn is_positive(value: Decimal) -> bool {
    value > Decimal::ZERO
}

/// Clamps a value to be no less than `floor`.
#[must_use]
pub fn at_least(value: Decimal, floor: Decimal) -> Decimal {
    if value < floor { floor } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(1.004)), dec!(1.00));
        assert_eq!(round_money(dec!(2.675)), dec!(2.68));
        assert_eq!(round_money(dec!(-1.005)), dec!(-1.01));
    }

    #[test]
    fn test_round_money_preserves_exact_values() {
        assert_eq!(round_money(dec!(1000.00)), dec!(1000.00));
        assert_eq!(round_money(dec!(0)), dec!(0.00));
    }

    #[test]
    fn test_is_positive() {
        assert!(is_positive(dec!(0.01)));
        assert!(!is_positive(dec!(0)));
        assert!(!is_positive(dec!(-0.01)));
    }

    #[test]
    fn test_at_least() {
        assert_eq!(at_least(dec!(5), dec!(10)), dec!(10));
        assert_eq!(at_least(dec!(15), dec!(10)), dec!(15));
        assert_eq!(at_least(dec!(10), dec!(10)), dec!(10));
    }
}
