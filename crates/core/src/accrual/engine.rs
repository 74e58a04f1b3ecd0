//! Per-asset accrual planning.
//!
//! The planner decides, for one asset and one explicit target period,
//! whether to accrue, to skip, or to fail — without touching any state.
//! The batch runner in the storage layer feeds eligible assets through
//! this function and commits each resulting plan independently.

use rust_decimal::Decimal;

use oblik_shared::types::{DepreciationRecordId, Period};

use super::error::AccrualError;
use super::types::{AccrualDecision, AccrualPlan, AccrualSkip, DepreciationRecordDraft};
use crate::depreciation::{monthly_depreciation, MethodInput};
use crate::valuation::AssetSnapshot;

/// Whole months of depreciation elapsed at the target period, counted
/// from the asset's depreciation start date.
#[must_use]
pub fn months_used_at(snapshot: &AssetSnapshot, period: Period) -> u32 {
    let start = Period::from_date(snapshot.depreciation_start_date);
    period.months_since(start).max(0).unsigned_abs()
}

/// Plans one asset's accrual for the target period.
///
/// `already_recorded` is the caller's answer to "does a depreciation
/// record for (asset, period) exist?"; re-running a period is a skip,
/// never a duplicate.
///
/// # Errors
///
/// Returns `AccrualError` when the asset's method configuration cannot
/// produce an amount (for example, the production method without a
/// per-period volume).
pub fn plan_accrual(
    snapshot: &AssetSnapshot,
    period: Period,
    production_volume: Option<Decimal>,
    already_recorded: bool,
) -> Result<AccrualDecision, AccrualError> {
    if already_recorded {
        return Ok(AccrualDecision::Skip(AccrualSkip::AlreadyRecorded));
    }
    if !snapshot.status.is_active() {
        return Ok(AccrualDecision::Skip(AccrualSkip::NotActive));
    }
    if Period::from_date(snapshot.depreciation_start_date) > period {
        return Ok(AccrualDecision::Skip(AccrualSkip::NotStarted));
    }
    if snapshot.is_fully_depreciated() {
        return Ok(AccrualDecision::Skip(AccrualSkip::FullyDepreciated));
    }

    let book_value_before = snapshot.book_value();
    let amount = monthly_depreciation(&MethodInput {
        method: snapshot.method,
        initial_cost: snapshot.initial_cost,
        residual_value: snapshot.residual_value,
        incoming_depreciation: snapshot.incoming_depreciation,
        useful_life_months: snapshot.useful_life_months,
        depreciation_rate: snapshot.depreciation_rate,
        total_production_capacity: snapshot.total_production_capacity,
        current_book_value: book_value_before,
        months_used: months_used_at(snapshot, period),
        production_volume,
    })?;

    if amount <= Decimal::ZERO {
        return Ok(AccrualDecision::Skip(AccrualSkip::ZeroAmount));
    }

    Ok(AccrualDecision::Accrue(AccrualPlan {
        record: DepreciationRecordDraft {
            id: DepreciationRecordId::new(),
            asset_id: snapshot.id,
            period,
            method: snapshot.method,
            book_value_before,
            amount,
            book_value_after: book_value_before - amount,
            production_volume,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use oblik_shared::types::GroupId;

    use crate::depreciation::{DepreciationError, DepreciationMethod};
    use crate::valuation::{AssetInput, GroupAccounts};

    fn snapshot_with(method: DepreciationMethod, capacity: Option<Decimal>) -> AssetSnapshot {
        AssetSnapshot::try_new(AssetInput {
            inventory_number: "INV-0200".to_string(),
            name: "Press".to_string(),
            group: GroupAccounts {
                id: GroupId::new(),
                code: "104".to_string(),
                asset_account: "104".to_string(),
                depreciation_account: "131".to_string(),
            },
            initial_cost: dec!(120000),
            residual_value: dec!(0),
            incoming_depreciation: dec!(0),
            method,
            useful_life_months: 120,
            depreciation_rate: None,
            total_production_capacity: capacity,
            commissioning_date: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
            depreciation_start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            location: None,
            custodian: None,
        })
        .unwrap()
    }

    fn straight_line_asset() -> AssetSnapshot {
        snapshot_with(DepreciationMethod::StraightLine, None)
    }

    #[test]
    fn test_plan_produces_record_draft() {
        let snapshot = straight_line_asset();
        let period = Period::new(2026, 1).unwrap();

        let AccrualDecision::Accrue(plan) =
            plan_accrual(&snapshot, period, None, false).unwrap()
        else {
            panic!("expected a plan");
        };

        assert_eq!(plan.record.amount, dec!(1000.00));
        assert_eq!(plan.record.book_value_before, dec!(120000));
        assert_eq!(plan.record.book_value_after, dec!(119000.00));
        assert_eq!(plan.record.period, period);
        assert_eq!(plan.record.method, DepreciationMethod::StraightLine);
    }

    #[test]
    fn test_already_recorded_is_a_skip_not_an_error() {
        let snapshot = straight_line_asset();
        let decision =
            plan_accrual(&snapshot, Period::new(2026, 1).unwrap(), None, true).unwrap();
        assert_eq!(
            decision,
            AccrualDecision::Skip(AccrualSkip::AlreadyRecorded)
        );
    }

    #[test]
    fn test_conserved_asset_is_skipped() {
        let mut snapshot = straight_line_asset();
        snapshot.conserve().unwrap();
        let decision =
            plan_accrual(&snapshot, Period::new(2026, 1).unwrap(), None, false).unwrap();
        assert_eq!(decision, AccrualDecision::Skip(AccrualSkip::NotActive));
    }

    #[test]
    fn test_period_before_depreciation_start_is_skipped() {
        let snapshot = straight_line_asset();
        let decision =
            plan_accrual(&snapshot, Period::new(2025, 12).unwrap(), None, false).unwrap();
        assert_eq!(decision, AccrualDecision::Skip(AccrualSkip::NotStarted));
    }

    #[test]
    fn test_fully_depreciated_asset_is_skipped() {
        let mut snapshot = straight_line_asset();
        snapshot.apply_accrual(dec!(120000), None).unwrap();
        let decision =
            plan_accrual(&snapshot, Period::new(2026, 6).unwrap(), None, false).unwrap();
        assert_eq!(
            decision,
            AccrualDecision::Skip(AccrualSkip::FullyDepreciated)
        );
    }

    #[test]
    fn test_production_without_volume_is_an_error() {
        let snapshot = snapshot_with(DepreciationMethod::Production, Some(dec!(50000)));
        let result = plan_accrual(&snapshot, Period::new(2026, 1).unwrap(), None, false);
        assert!(matches!(
            result,
            Err(AccrualError::Method(
                DepreciationError::MissingProductionVolume
            ))
        ));
    }

    #[test]
    fn test_production_with_volume_accrues() {
        let snapshot = snapshot_with(DepreciationMethod::Production, Some(dec!(60000)));
        let AccrualDecision::Accrue(plan) =
            plan_accrual(&snapshot, Period::new(2026, 1).unwrap(), Some(dec!(500)), false)
                .unwrap()
        else {
            panic!("expected a plan");
        };
        // 120000 / 60000 * 500 = 1000.
        assert_eq!(plan.record.amount, dec!(1000.00));
        assert_eq!(plan.record.production_volume, Some(dec!(500)));
    }

    /// The full straight-line schedule: 120 equal periods of 1000.00, then
    /// the asset is done and further runs skip it.
    #[test]
    fn test_straight_line_runs_to_exactly_zero() {
        let mut snapshot = straight_line_asset();
        let mut period = Period::new(2026, 1).unwrap();

        for _ in 0..120 {
            let AccrualDecision::Accrue(plan) =
                plan_accrual(&snapshot, period, None, false).unwrap()
            else {
                panic!("expected a plan while book value remains");
            };
            assert_eq!(plan.record.amount, dec!(1000.00));
            snapshot
                .apply_accrual(plan.record.amount, plan.record.production_volume)
                .unwrap();
            period = period.next();
        }

        assert_eq!(snapshot.book_value(), dec!(0.00));
        assert_eq!(snapshot.accumulated_depreciation, dec!(120000.00));

        let decision = plan_accrual(&snapshot, period, None, false).unwrap();
        assert_eq!(
            decision,
            AccrualDecision::Skip(AccrualSkip::FullyDepreciated)
        );
    }

    /// Reducing balance converges to the residual floor without crossing it.
    #[test]
    fn test_reducing_balance_respects_floor_over_time() {
        let mut snapshot = AssetSnapshot::try_new(AssetInput {
            inventory_number: "INV-0300".to_string(),
            name: "Generator".to_string(),
            group: GroupAccounts {
                id: GroupId::new(),
                code: "104".to_string(),
                asset_account: "104".to_string(),
                depreciation_account: "131".to_string(),
            },
            initial_cost: dec!(100000),
            residual_value: dec!(10000),
            incoming_depreciation: dec!(0),
            method: DepreciationMethod::ReducingBalance,
            useful_life_months: 60,
            depreciation_rate: None,
            total_production_capacity: None,
            commissioning_date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            depreciation_start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            location: None,
            custodian: None,
        })
        .unwrap();

        let mut period = Period::new(2026, 1).unwrap();
        for _ in 0..240 {
            match plan_accrual(&snapshot, period, None, false).unwrap() {
                AccrualDecision::Accrue(plan) => {
                    snapshot
                        .apply_accrual(plan.record.amount, plan.record.production_volume)
                        .unwrap();
                    assert!(snapshot.book_value() >= dec!(10000));
                }
                AccrualDecision::Skip(_) => break,
            }
            period = period.next();
        }

        assert!(snapshot.book_value() >= dec!(10000));
    }
}
