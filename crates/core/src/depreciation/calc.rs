//! Monthly depreciation calculation for the five statutory methods.
//!
//! Every function is pure: parameters in, a 2-dp monthly amount out. The
//! dispatcher clamps so that accumulated depreciation can never pass
//! `initial_cost - residual_value`; the last period posts the exact
//! remainder that brings book value to the residual floor.

use rust_decimal::{Decimal, MathematicalOps};

use oblik_shared::types::money::round_money;

use super::error::DepreciationError;
use super::method::DepreciationMethod;

/// Months per year as a decimal constant.
const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// One hundred, for percentage rates.
const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Everything a strategy needs to price one period.
#[derive(Debug, Clone)]
pub struct MethodInput {
    /// The configured method.
    pub method: DepreciationMethod,
    /// Initial (gross) cost.
    pub initial_cost: Decimal,
    /// Residual (salvage) value, the floor for book value.
    pub residual_value: Decimal,
    /// Depreciation accrued before this system took custody.
    pub incoming_depreciation: Decimal,
    /// Useful life in months.
    pub useful_life_months: u32,
    /// Optional configured annual rate in percent; overrides the derived
    /// rate for the reducing methods.
    pub depreciation_rate: Option<Decimal>,
    /// Total production capacity in units (production method only).
    pub total_production_capacity: Option<Decimal>,
    /// Book value before this period's accrual.
    pub current_book_value: Decimal,
    /// Whole months between the depreciation start and the target period.
    pub months_used: u32,
    /// Units produced in the target period (production method only).
    pub production_volume: Option<Decimal>,
}

/// Computes the monthly amount for the configured method, clamped so the
/// book value never drops below the residual floor.
///
/// Returns `Ok(0)` when the asset is already at its residual value; the
/// caller treats a zero amount as "skip this asset", not as an error.
///
/// # Errors
///
/// Returns `DepreciationError` when a method-specific required parameter
/// is missing or out of range.
pub fn monthly_depreciation(input: &MethodInput) -> Result<Decimal, DepreciationError> {
    let headroom = input.current_book_value - input.residual_value;
    if headroom <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let amount = match input.method {
        DepreciationMethod::StraightLine => straight_line(
            input.initial_cost,
            input.residual_value,
            input.incoming_depreciation,
            input.useful_life_months,
        )?,
        DepreciationMethod::ReducingBalance => reducing_balance(
            input.initial_cost,
            input.residual_value,
            input.useful_life_months,
            input.current_book_value,
            input.depreciation_rate,
        )?,
        DepreciationMethod::AcceleratedReducing => accelerated_reducing(
            input.useful_life_months,
            input.current_book_value,
            input.depreciation_rate,
        )?,
        DepreciationMethod::Cumulative => cumulative(
            input.initial_cost,
            input.residual_value,
            input.incoming_depreciation,
            input.useful_life_months,
            input.months_used,
        )?,
        DepreciationMethod::Production => production(
            input.initial_cost,
            input.residual_value,
            input.incoming_depreciation,
            input.total_production_capacity,
            input.production_volume,
        )?,
    };

    // Final period: post exactly the remainder, never overshoot the floor.
    Ok(round_money(amount.min(headroom)))
}

/// Straight-line: even write-off of the depreciable base over the
/// (remaining) useful life.
pub fn straight_line(
    initial_cost: Decimal,
    residual_value: Decimal,
    incoming_depreciation: Decimal,
    useful_life_months: u32,
) -> Result<Decimal, DepreciationError> {
    if useful_life_months == 0 {
        return Err(DepreciationError::NonPositiveLife {
            method: DepreciationMethod::StraightLine,
        });
    }
    let depreciable = initial_cost - residual_value - incoming_depreciation;
    if depreciable <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    Ok(round_money(depreciable / Decimal::from(useful_life_months)))
}

/// Reducing balance: a fixed annual percentage of the running book value.
///
/// When no rate is configured, the statutory rate
/// `1 - (residual / cost)^(12 / life_months)` is derived. A zero residual
/// value makes the root degenerate to a 100% rate, so the calculation
/// falls back to straight-line for that configuration.
pub fn reducing_balance(
    initial_cost: Decimal,
    residual_value: Decimal,
    useful_life_months: u32,
    current_book_value: Decimal,
    rate_override: Option<Decimal>,
) -> Result<Decimal, DepreciationError> {
    if useful_life_months == 0 {
        return Err(DepreciationError::NonPositiveLife {
            method: DepreciationMethod::ReducingBalance,
        });
    }
    if initial_cost <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let annual_rate = match rate_override {
        Some(rate) => annual_rate_from_percent(rate)?,
        None => {
            if residual_value <= Decimal::ZERO {
                return straight_line(initial_cost, residual_value, Decimal::ZERO, useful_life_months);
            }
            derived_declining_rate(initial_cost, residual_value, useful_life_months)
        }
    };

    Ok(round_money(
        current_book_value * annual_rate / MONTHS_PER_YEAR,
    ))
}

/// Accelerated reducing balance: double the straight-line annual rate
/// applied to the running book value.
pub fn accelerated_reducing(
    useful_life_months: u32,
    current_book_value: Decimal,
    rate_override: Option<Decimal>,
) -> Result<Decimal, DepreciationError> {
    if useful_life_months == 0 {
        return Err(DepreciationError::NonPositiveLife {
            method: DepreciationMethod::AcceleratedReducing,
        });
    }

    let annual_rate = match rate_override {
        Some(rate) => annual_rate_from_percent(rate)?,
        None => {
            // 2 / life_in_years == 24 / life_in_months
            Decimal::from(24) / Decimal::from(useful_life_months)
        }
    };

    Ok(round_money(
        current_book_value * annual_rate / MONTHS_PER_YEAR,
    ))
}

/// Cumulative (sum-of-years-digits): the depreciable base times the
/// remaining-years coefficient, spread over the year's months.
pub fn cumulative(
    initial_cost: Decimal,
    residual_value: Decimal,
    incoming_depreciation: Decimal,
    useful_life_months: u32,
    months_used: u32,
) -> Result<Decimal, DepreciationError> {
    if useful_life_months == 0 {
        return Err(DepreciationError::NonPositiveLife {
            method: DepreciationMethod::Cumulative,
        });
    }

    let useful_life_years = u64::from((useful_life_months / 12).max(1));
    let current_year = u64::from(months_used / 12) + 1;
    let Some(remaining_years) = (useful_life_years + 1).checked_sub(current_year) else {
        return Ok(Decimal::ZERO);
    };
    if remaining_years == 0 {
        return Ok(Decimal::ZERO);
    }

    // Sum of years digits: 1 + 2 + ... + n = n * (n + 1) / 2.
    let sum_of_years = useful_life_years * (useful_life_years + 1) / 2;

    let depreciable = initial_cost - residual_value - incoming_depreciation;
    if depreciable <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let annual = depreciable * Decimal::from(remaining_years) / Decimal::from(sum_of_years);
    Ok(round_money(annual / MONTHS_PER_YEAR))
}

/// Production method: depreciable base per unit of capacity, times the
/// units produced this period.
pub fn production(
    initial_cost: Decimal,
    residual_value: Decimal,
    incoming_depreciation: Decimal,
    total_capacity: Option<Decimal>,
    monthly_volume: Option<Decimal>,
) -> Result<Decimal, DepreciationError> {
    let capacity = match total_capacity {
        Some(capacity) if capacity > Decimal::ZERO => capacity,
        _ => return Err(DepreciationError::MissingProductionCapacity),
    };
    let Some(volume) = monthly_volume else {
        return Err(DepreciationError::MissingProductionVolume);
    };
    if volume <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let depreciable = initial_cost - residual_value - incoming_depreciation;
    if depreciable <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    Ok(round_money(depreciable / capacity * volume))
}

/// Converts a configured annual percentage into a fractional rate.
fn annual_rate_from_percent(rate: Decimal) -> Result<Decimal, DepreciationError> {
    if rate <= Decimal::ZERO || rate > HUNDRED {
        return Err(DepreciationError::InvalidRate(rate));
    }
    Ok(rate / HUNDRED)
}

/// Statutory declining-balance rate: `1 - (residual / cost)^(12 / life)`.
///
/// The n-th root is computed as `exp(ln(ratio) * 12 / life)`; both operands
/// are guarded to keep `ln` in its domain.
fn derived_declining_rate(
    initial_cost: Decimal,
    residual_value: Decimal,
    useful_life_months: u32,
) -> Decimal {
    let ratio = residual_value / initial_cost;
    let exponent = MONTHS_PER_YEAR / Decimal::from(useful_life_months);
    Decimal::ONE - (ratio.ln() * exponent).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn base_input(method: DepreciationMethod) -> MethodInput {
        MethodInput {
            method,
            initial_cost: dec!(120000),
            residual_value: dec!(0),
            incoming_depreciation: dec!(0),
            useful_life_months: 120,
            depreciation_rate: None,
            total_production_capacity: None,
            current_book_value: dec!(120000),
            months_used: 0,
            production_volume: None,
        }
    }

    #[test]
    fn test_straight_line_even_amount() {
        let input = base_input(DepreciationMethod::StraightLine);
        assert_eq!(monthly_depreciation(&input).unwrap(), dec!(1000.00));
    }

    #[test]
    fn test_straight_line_subtracts_incoming_depreciation() {
        // 30000 already accrued elsewhere; the remaining 90000 is spread
        // over the remaining 90-month life.
        let amount = straight_line(dec!(120000), dec!(0), dec!(30000), 90).unwrap();
        assert_eq!(amount, dec!(1000.00));
    }

    #[test]
    fn test_straight_line_zero_when_base_exhausted() {
        let amount = straight_line(dec!(1000), dec!(1000), dec!(0), 60).unwrap();
        assert_eq!(amount, dec!(0));
    }

    #[test]
    fn test_straight_line_zero_life_is_configuration_error() {
        assert!(matches!(
            straight_line(dec!(1000), dec!(0), dec!(0), 0),
            Err(DepreciationError::NonPositiveLife { .. })
        ));
    }

    #[test]
    fn test_reducing_balance_with_explicit_rate() {
        // 24% annual on a 50000 book value: 50000 * 0.24 / 12 = 1000.
        let amount =
            reducing_balance(dec!(100000), dec!(5000), 60, dec!(50000), Some(dec!(24))).unwrap();
        assert_eq!(amount, dec!(1000.00));
    }

    #[test]
    fn test_reducing_balance_derived_rate_shrinks_amounts() {
        // Derived rate is a fixed percentage, so a smaller book value
        // must always produce a smaller monthly amount.
        let first = reducing_balance(dec!(100000), dec!(10000), 60, dec!(100000), None).unwrap();
        let later = reducing_balance(dec!(100000), dec!(10000), 60, dec!(60000), None).unwrap();
        assert!(first > later);
        assert!(later > Decimal::ZERO);
    }

    #[test]
    fn test_reducing_balance_derived_rate_magnitude() {
        // residual/cost = 0.1 over 5 years: annual rate = 1 - 0.1^(1/5)
        // = 0.3690426..., so the first monthly amount on a 100000 book
        // value is 100000 * rate / 12 = 3075.36.
        let amount = reducing_balance(dec!(100000), dec!(10000), 60, dec!(100000), None).unwrap();
        assert_eq!(amount, dec!(3075.36));
    }

    #[test]
    fn test_reducing_balance_zero_residual_falls_back_to_straight_line() {
        let amount = reducing_balance(dec!(120000), dec!(0), 120, dec!(80000), None).unwrap();
        assert_eq!(amount, dec!(1000.00));
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-5))]
    #[case(dec!(101))]
    fn test_invalid_rate_rejected(#[case] rate: Decimal) {
        assert!(matches!(
            reducing_balance(dec!(100000), dec!(0), 60, dec!(100000), Some(rate)),
            Err(DepreciationError::InvalidRate(_))
        ));
    }

    #[test]
    fn test_accelerated_reducing_doubles_straight_line_rate() {
        // Life 120 months = 10 years; rate = 2/10 = 20% annual.
        // 120000 * 0.2 / 12 = 2000.
        let amount = accelerated_reducing(120, dec!(120000), None).unwrap();
        assert_eq!(amount, dec!(2000.00));
    }

    #[test]
    fn test_cumulative_first_and_second_year() {
        // 24-month life = 2 years, sum of digits = 3.
        // Year 1: 120000 * 2/3 = 80000 annual, 6666.67 monthly.
        // Year 2: 120000 * 1/3 = 40000 annual, 3333.33 monthly.
        let year1 = cumulative(dec!(120000), dec!(0), dec!(0), 24, 0).unwrap();
        assert_eq!(year1, dec!(6666.67));

        let year2 = cumulative(dec!(120000), dec!(0), dec!(0), 24, 12).unwrap();
        assert_eq!(year2, dec!(3333.33));
    }

    #[test]
    fn test_cumulative_zero_after_life_ends() {
        let amount = cumulative(dec!(120000), dec!(0), dec!(0), 24, 24).unwrap();
        assert_eq!(amount, dec!(0));
    }

    #[test]
    fn test_production_proportional_to_volume() {
        // Base 100000 over 50000 units = 2.00/unit; 1500 units => 3000.
        let amount = production(
            dec!(100000),
            dec!(0),
            dec!(0),
            Some(dec!(50000)),
            Some(dec!(1500)),
        )
        .unwrap();
        assert_eq!(amount, dec!(3000.00));
    }

    #[test]
    fn test_production_requires_capacity() {
        assert!(matches!(
            production(dec!(100000), dec!(0), dec!(0), None, Some(dec!(100))),
            Err(DepreciationError::MissingProductionCapacity)
        ));
        assert!(matches!(
            production(dec!(100000), dec!(0), dec!(0), Some(dec!(0)), Some(dec!(100))),
            Err(DepreciationError::MissingProductionCapacity)
        ));
    }

    #[test]
    fn test_production_requires_volume() {
        assert!(matches!(
            production(dec!(100000), dec!(0), dec!(0), Some(dec!(50000)), None),
            Err(DepreciationError::MissingProductionVolume)
        ));
    }

    #[test]
    fn test_production_zero_volume_yields_zero() {
        let amount = production(
            dec!(100000),
            dec!(0),
            dec!(0),
            Some(dec!(50000)),
            Some(dec!(0)),
        )
        .unwrap();
        assert_eq!(amount, dec!(0));
    }

    #[test]
    fn test_dispatch_clamps_final_period_to_residual_floor() {
        let mut input = base_input(DepreciationMethod::StraightLine);
        // Only 300.50 of headroom left; the straight-line 1000 is cut down.
        input.current_book_value = dec!(300.50);
        assert_eq!(monthly_depreciation(&input).unwrap(), dec!(300.50));
    }

    #[test]
    fn test_dispatch_zero_for_fully_depreciated_asset() {
        let mut input = base_input(DepreciationMethod::StraightLine);
        input.current_book_value = dec!(0);
        assert_eq!(monthly_depreciation(&input).unwrap(), dec!(0));
    }

    #[test]
    fn test_dispatch_zero_below_residual_floor() {
        let mut input = base_input(DepreciationMethod::ReducingBalance);
        input.residual_value = dec!(500);
        input.current_book_value = dec!(500);
        assert_eq!(monthly_depreciation(&input).unwrap(), dec!(0));
    }

    #[test]
    fn test_dispatch_production_error_propagates() {
        let mut input = base_input(DepreciationMethod::Production);
        input.production_volume = Some(dec!(100));
        assert!(matches!(
            monthly_depreciation(&input),
            Err(DepreciationError::MissingProductionCapacity)
        ));
    }
}
