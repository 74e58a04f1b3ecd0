//! Property tests for the valuation state transitions.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use oblik_shared::types::GroupId;

use super::types::{AssetInput, AssetSnapshot, GroupAccounts};
use crate::depreciation::DepreciationMethod;

fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn snapshot(cost_cents: i64, accrued_cents: i64) -> AssetSnapshot {
    let mut asset = AssetSnapshot::try_new(AssetInput {
        inventory_number: "INV-PROP".to_string(),
        name: "Prop asset".to_string(),
        group: GroupAccounts {
            id: GroupId::new(),
            code: "104".to_string(),
            asset_account: "104".to_string(),
            depreciation_account: "131".to_string(),
        },
        initial_cost: from_cents(cost_cents),
        residual_value: Decimal::ZERO,
        incoming_depreciation: Decimal::ZERO,
        method: DepreciationMethod::StraightLine,
        useful_life_months: 60,
        depreciation_rate: None,
        total_production_capacity: None,
        commissioning_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        depreciation_start_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        location: None,
        custodian: None,
    })
    .unwrap();
    if accrued_cents > 0 {
        asset.apply_accrual(from_cents(accrued_cents), None).unwrap();
    }
    asset
}

proptest! {
    /// Revaluing to a fair value and immediately back to the original book
    /// value restores the original book value within rounding tolerance.
    #[test]
    fn revaluation_round_trip_restores_book_value(
        cost_cents in 100_000i64..=1_000_000_000,
        accrued_permille in 0i64..=900,
        index_permille in 200i64..=3000,
    ) {
        let accrued_cents = cost_cents * accrued_permille / 1000;
        let mut asset = snapshot(cost_cents, accrued_cents);
        let original_book = asset.book_value();
        prop_assume!(original_book > Decimal::ZERO);

        let fair_value = (original_book * Decimal::new(index_permille, 3)).round_dp(2);
        prop_assume!(fair_value >= Decimal::new(1, 2));

        asset.apply_revaluation(fair_value).unwrap();
        asset.apply_revaluation(original_book).unwrap();

        let tolerance = Decimal::new(1, 2);
        let difference = (asset.book_value() - original_book).abs();
        prop_assert!(
            difference <= tolerance,
            "book value drifted by {difference} after round trip"
        );
    }

    /// The proportional rescale lands the book value exactly on the fair
    /// value, up to a cent of rounding.
    #[test]
    fn revaluation_hits_fair_value(
        cost_cents in 100_000i64..=1_000_000_000,
        accrued_permille in 0i64..=900,
        fair_cents in 100i64..=2_000_000_000,
    ) {
        let accrued_cents = cost_cents * accrued_permille / 1000;
        let mut asset = snapshot(cost_cents, accrued_cents);
        prop_assume!(asset.book_value() > Decimal::ZERO);

        let change = asset.apply_revaluation(from_cents(fair_cents)).unwrap();
        let difference = (change.new_book_value - from_cents(fair_cents)).abs();
        prop_assert!(difference <= Decimal::new(1, 2));
    }

    /// Accumulated depreciation never decreases through accruals, and the
    /// book value never goes below the residual floor.
    #[test]
    fn accruals_are_monotone(
        cost_cents in 100_000i64..=100_000_000,
        steps in proptest::collection::vec(1i64..=500_000, 1..20),
    ) {
        let mut asset = snapshot(cost_cents, 0);
        let mut last_accumulated = asset.accumulated_depreciation;

        for step in steps {
            let remaining = asset.book_value() - asset.residual_value;
            let amount = from_cents(step).min(remaining);
            if amount <= Decimal::ZERO {
                break;
            }
            asset.apply_accrual(amount, None).unwrap();
            prop_assert!(asset.accumulated_depreciation >= last_accumulated);
            prop_assert!(asset.book_value() >= asset.residual_value);
            prop_assert!(asset.accumulated_depreciation <= asset.depreciable_base());
            last_accumulated = asset.accumulated_depreciation;
        }
    }
}
