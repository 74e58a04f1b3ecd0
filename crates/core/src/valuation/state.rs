//! Lifecycle transitions for the asset valuation snapshot.
//!
//! Every mutation validates first and touches the snapshot only on the
//! success path, so a returned error guarantees an unchanged snapshot.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use oblik_shared::types::money::{at_least, round_money};
use oblik_shared::types::AssetId;

use super::error::ValuationError;
use super::types::{
    AssetInput, AssetSnapshot, AssetStatus, DisposalChange, ImprovementChange, RevaluationChange,
    RevaluationKind, TransferChange,
};
use crate::depreciation::DepreciationMethod;

/// Minimum valid initial cost.
const MIN_COST: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

impl AssetSnapshot {
    /// Validates the input and builds the initial snapshot.
    ///
    /// Accumulated depreciation starts at the incoming depreciation, so the
    /// opening book value is `initial_cost - incoming_depreciation`.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError` without constructing anything when any
    /// setup constraint is violated.
    pub fn try_new(input: AssetInput) -> Result<Self, ValuationError> {
        if input.initial_cost < MIN_COST {
            return Err(ValuationError::InvalidInitialCost(input.initial_cost));
        }
        if input.residual_value < Decimal::ZERO || input.residual_value > input.initial_cost {
            return Err(ValuationError::ResidualOutOfRange {
                residual: input.residual_value,
                cost: input.initial_cost,
            });
        }
        let max_incoming = input.initial_cost - input.residual_value;
        if input.incoming_depreciation < Decimal::ZERO
            || input.incoming_depreciation > max_incoming
        {
            return Err(ValuationError::IncomingDepreciationTooLarge {
                incoming: input.incoming_depreciation,
                max: max_incoming,
            });
        }
        if input.useful_life_months == 0 {
            return Err(ValuationError::NonPositiveUsefulLife);
        }
        if input.depreciation_start_date < input.commissioning_date {
            return Err(ValuationError::DepreciationStartsBeforeCommissioning);
        }
        if input.method == DepreciationMethod::Production
            && !input
                .total_production_capacity
                .is_some_and(|capacity| capacity > Decimal::ZERO)
        {
            return Err(ValuationError::ProductionCapacityRequired);
        }

        Ok(Self {
            id: AssetId::new(),
            inventory_number: input.inventory_number,
            name: input.name,
            group: input.group,
            status: AssetStatus::Active,
            initial_cost: input.initial_cost,
            residual_value: input.residual_value,
            incoming_depreciation: input.incoming_depreciation,
            accumulated_depreciation: input.incoming_depreciation,
            method: input.method,
            useful_life_months: input.useful_life_months,
            depreciation_rate: input.depreciation_rate,
            total_production_capacity: input.total_production_capacity,
            units_produced_to_date: Decimal::ZERO,
            commissioning_date: input.commissioning_date,
            depreciation_start_date: input.depreciation_start_date,
            disposal_date: None,
            location: input.location,
            custodian: input.custodian,
            version: 1,
        })
    }

    /// Current book value: cost minus accumulated depreciation, floored at
    /// the residual value.
    #[must_use]
    pub fn book_value(&self) -> Decimal {
        at_least(
            self.initial_cost - self.accumulated_depreciation,
            self.residual_value,
        )
    }

    /// The total amount this asset can ever depreciate.
    #[must_use]
    pub fn depreciable_base(&self) -> Decimal {
        self.initial_cost - self.residual_value
    }

    /// Returns true when book value has reached the residual floor.
    #[must_use]
    pub fn is_fully_depreciated(&self) -> bool {
        self.book_value() <= self.residual_value
    }

    /// Accumulated depreciation as a fraction of initial cost.
    #[must_use]
    pub fn wear_ratio(&self) -> Decimal {
        if self.initial_cost <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.accumulated_depreciation / self.initial_cost
    }

    /// Records one period's depreciation against the snapshot.
    ///
    /// # Errors
    ///
    /// Fails when the asset is not active, the amount is not positive, or
    /// the amount would push accumulated depreciation past the base.
    pub fn apply_accrual(
        &mut self,
        amount: Decimal,
        production_volume: Option<Decimal>,
    ) -> Result<(), ValuationError> {
        if self.status != AssetStatus::Active {
            return Err(ValuationError::NotActive {
                status: self.status,
            });
        }
        if amount <= Decimal::ZERO {
            return Err(ValuationError::AmountNotPositive(amount));
        }
        let remaining = self.book_value() - self.residual_value;
        if amount > remaining {
            return Err(ValuationError::AccrualExceedsBase { amount, remaining });
        }

        self.accumulated_depreciation += amount;
        if let Some(volume) = production_volume {
            self.units_produced_to_date += volume;
        }
        Ok(())
    }

    /// Rescales cost and accumulated depreciation proportionally so the
    /// book value lands on the appraised fair value.
    ///
    /// # Errors
    ///
    /// Fails for disposed assets and for non-positive fair values.
    pub fn apply_revaluation(
        &mut self,
        fair_value: Decimal,
    ) -> Result<RevaluationChange, ValuationError> {
        if self.status.is_terminal() {
            return Err(ValuationError::AlreadyDisposed);
        }
        if fair_value < MIN_COST {
            return Err(ValuationError::FairValueNotPositive(fair_value));
        }

        let old_initial = self.initial_cost;
        let old_depreciation = self.accumulated_depreciation;
        let old_book = self.book_value();

        // Revaluation index; a fully written-off asset has no base to
        // rescale, so the index degenerates to 1.
        let index = if old_book > Decimal::ZERO {
            fair_value / old_book
        } else {
            Decimal::ONE
        };

        let new_initial = round_money(old_initial * index);
        let new_depreciation = round_money(old_depreciation * index);
        let new_book = new_initial - new_depreciation;

        let kind = if fair_value > old_book {
            RevaluationKind::Upward
        } else {
            RevaluationKind::Downward
        };

        self.initial_cost = new_initial;
        self.accumulated_depreciation = new_depreciation;
        // Keep the floor consistent after a downward rescale.
        self.residual_value = self.residual_value.min(new_book);

        Ok(RevaluationChange {
            kind,
            fair_value,
            old_initial_cost: old_initial,
            old_depreciation,
            old_book_value: old_book,
            new_initial_cost: new_initial,
            new_depreciation,
            new_book_value: new_book,
            amount: new_book - old_book,
        })
    }

    /// Capitalizes an improvement into initial cost, or records a repair
    /// with no balance-sheet effect.
    ///
    /// # Errors
    ///
    /// Fails for disposed assets and for non-positive amounts.
    pub fn apply_improvement(
        &mut self,
        amount: Decimal,
        increases_value: bool,
    ) -> Result<ImprovementChange, ValuationError> {
        if self.status.is_terminal() {
            return Err(ValuationError::AlreadyDisposed);
        }
        if amount <= Decimal::ZERO {
            return Err(ValuationError::AmountNotPositive(amount));
        }

        if increases_value {
            self.initial_cost += amount;
        }

        Ok(ImprovementChange {
            capitalized: increases_value,
            amount,
            new_initial_cost: self.initial_cost,
            new_book_value: self.book_value(),
        })
    }

    /// Writes the asset off. Terminal: no valuation field changes after.
    ///
    /// # Errors
    ///
    /// Fails when the asset is not active; disposing twice reports
    /// `AlreadyDisposed`.
    pub fn apply_disposal(
        &mut self,
        sale_amount: Decimal,
        disposal_date: NaiveDate,
    ) -> Result<DisposalChange, ValuationError> {
        if self.status.is_terminal() {
            return Err(ValuationError::AlreadyDisposed);
        }
        if self.status != AssetStatus::Active {
            return Err(ValuationError::NotActive {
                status: self.status,
            });
        }
        if sale_amount < Decimal::ZERO {
            return Err(ValuationError::AmountNotPositive(sale_amount));
        }

        let book_value = self.book_value();
        let accumulated = self.accumulated_depreciation;

        self.status = AssetStatus::Disposed;
        self.disposal_date = Some(disposal_date);

        Ok(DisposalChange {
            book_value_at_disposal: book_value,
            accumulated_at_disposal: accumulated,
            sale_amount,
            gain_loss: sale_amount - book_value,
        })
    }

    /// Moves the asset between locations/custodians. Valuation untouched.
    ///
    /// # Errors
    ///
    /// Fails for disposed assets.
    pub fn apply_transfer(
        &mut self,
        to_location: Option<String>,
        to_custodian: Option<String>,
    ) -> Result<TransferChange, ValuationError> {
        if self.status.is_terminal() {
            return Err(ValuationError::AlreadyDisposed);
        }

        let change = TransferChange {
            from_location: self.location.clone(),
            to_location: to_location.clone(),
            from_custodian: self.custodian.clone(),
            to_custodian: to_custodian.clone(),
            book_value: self.book_value(),
        };

        self.location = to_location;
        self.custodian = to_custodian;
        Ok(change)
    }

    /// Pauses accrual without resetting valuation state.
    ///
    /// # Errors
    ///
    /// Fails unless the asset is currently active.
    pub fn conserve(&mut self) -> Result<(), ValuationError> {
        if self.status != AssetStatus::Active {
            return Err(ValuationError::NotActive {
                status: self.status,
            });
        }
        self.status = AssetStatus::Conserved;
        Ok(())
    }

    /// Resumes accrual for a conserved asset.
    ///
    /// # Errors
    ///
    /// Fails unless the asset is currently conserved.
    pub fn reactivate(&mut self) -> Result<(), ValuationError> {
        if self.status != AssetStatus::Conserved {
            return Err(ValuationError::NotConserved {
                status: self.status,
            });
        }
        self.status = AssetStatus::Active;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use oblik_shared::types::GroupId;
    use rust_decimal_macros::dec;

    use crate::valuation::types::GroupAccounts;

    fn machinery_group() -> GroupAccounts {
        GroupAccounts {
            id: GroupId::new(),
            code: "104".to_string(),
            asset_account: "104".to_string(),
            depreciation_account: "131".to_string(),
        }
    }

    fn base_input() -> AssetInput {
        AssetInput {
            inventory_number: "INV-0001".to_string(),
            name: "Lathe".to_string(),
            group: machinery_group(),
            initial_cost: dec!(120000),
            residual_value: dec!(0),
            incoming_depreciation: dec!(0),
            method: DepreciationMethod::StraightLine,
            useful_life_months: 120,
            depreciation_rate: None,
            total_production_capacity: None,
            commissioning_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            depreciation_start_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            location: Some("Workshop 1".to_string()),
            custodian: Some("K. Petrenko".to_string()),
        }
    }

    fn active_asset() -> AssetSnapshot {
        AssetSnapshot::try_new(base_input()).unwrap()
    }

    #[test]
    fn test_new_asset_opens_at_cost_minus_incoming() {
        let mut input = base_input();
        input.incoming_depreciation = dec!(20000);
        let asset = AssetSnapshot::try_new(input).unwrap();
        assert_eq!(asset.accumulated_depreciation, dec!(20000));
        assert_eq!(asset.book_value(), dec!(100000));
        assert_eq!(asset.status, AssetStatus::Active);
    }

    #[test]
    fn test_rejects_zero_cost() {
        let mut input = base_input();
        input.initial_cost = dec!(0);
        assert!(matches!(
            AssetSnapshot::try_new(input),
            Err(ValuationError::InvalidInitialCost(_))
        ));
    }

    #[test]
    fn test_rejects_residual_above_cost() {
        let mut input = base_input();
        input.residual_value = dec!(120001);
        assert!(matches!(
            AssetSnapshot::try_new(input),
            Err(ValuationError::ResidualOutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_incoming_depreciation_above_base() {
        let mut input = base_input();
        input.residual_value = dec!(20000);
        input.incoming_depreciation = dec!(100001);
        assert!(matches!(
            AssetSnapshot::try_new(input),
            Err(ValuationError::IncomingDepreciationTooLarge { .. })
        ));
    }

    #[test]
    fn test_rejects_depreciation_start_before_commissioning() {
        let mut input = base_input();
        input.depreciation_start_date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        assert!(matches!(
            AssetSnapshot::try_new(input),
            Err(ValuationError::DepreciationStartsBeforeCommissioning)
        ));
    }

    #[test]
    fn test_production_method_requires_capacity() {
        let mut input = base_input();
        input.method = DepreciationMethod::Production;
        assert!(matches!(
            AssetSnapshot::try_new(input),
            Err(ValuationError::ProductionCapacityRequired)
        ));
    }

    #[test]
    fn test_accrual_moves_book_value_down() {
        let mut asset = active_asset();
        asset.apply_accrual(dec!(1000), None).unwrap();
        assert_eq!(asset.accumulated_depreciation, dec!(1000));
        assert_eq!(asset.book_value(), dec!(119000));
    }

    #[test]
    fn test_accrual_rejected_for_conserved_asset() {
        let mut asset = active_asset();
        asset.conserve().unwrap();
        assert!(matches!(
            asset.apply_accrual(dec!(1000), None),
            Err(ValuationError::NotActive { .. })
        ));
        // Nothing changed.
        assert_eq!(asset.accumulated_depreciation, dec!(0));
    }

    #[test]
    fn test_accrual_cannot_pass_depreciable_base() {
        let mut asset = active_asset();
        asset.apply_accrual(dec!(119500), None).unwrap();
        assert!(matches!(
            asset.apply_accrual(dec!(501), None),
            Err(ValuationError::AccrualExceedsBase { .. })
        ));
        assert_eq!(asset.accumulated_depreciation, dec!(119500));
    }

    #[test]
    fn test_accrual_tracks_production_volume() {
        let mut input = base_input();
        input.method = DepreciationMethod::Production;
        input.total_production_capacity = Some(dec!(50000));
        let mut asset = AssetSnapshot::try_new(input).unwrap();

        asset.apply_accrual(dec!(2000), Some(dec!(1000))).unwrap();
        assert_eq!(asset.units_produced_to_date, dec!(1000));
    }

    #[test]
    fn test_upward_revaluation_rescales_proportionally() {
        let mut asset = active_asset();
        asset.apply_accrual(dec!(20000), None).unwrap();
        // Book value 100000, revalue to 125000: index 1.25.
        let change = asset.apply_revaluation(dec!(125000)).unwrap();

        assert_eq!(change.kind, RevaluationKind::Upward);
        assert_eq!(change.new_initial_cost, dec!(150000.00));
        assert_eq!(change.new_depreciation, dec!(25000.00));
        assert_eq!(change.new_book_value, dec!(125000.00));
        assert_eq!(change.amount, dec!(25000.00));
        assert_eq!(asset.book_value(), dec!(125000.00));
        // Wear ratio is preserved by the proportional rescale.
        assert_eq!(asset.wear_ratio().round_dp(6), dec!(0.166667));
    }

    #[test]
    fn test_downward_revaluation() {
        let mut asset = active_asset();
        let change = asset.apply_revaluation(dec!(90000)).unwrap();
        assert_eq!(change.kind, RevaluationKind::Downward);
        assert_eq!(change.amount, dec!(-30000.00));
        assert_eq!(asset.book_value(), dec!(90000.00));
    }

    #[test]
    fn test_revaluation_rejected_for_disposed_asset() {
        let mut asset = active_asset();
        asset
            .apply_disposal(dec!(0), NaiveDate::from_ymd_opt(2026, 1, 31).unwrap())
            .unwrap();
        assert!(matches!(
            asset.apply_revaluation(dec!(100000)),
            Err(ValuationError::AlreadyDisposed)
        ));
    }

    #[test]
    fn test_capitalized_improvement_raises_cost_and_book_value() {
        let mut asset = active_asset();
        let change = asset.apply_improvement(dec!(15000), true).unwrap();
        assert!(change.capitalized);
        assert_eq!(asset.initial_cost, dec!(135000));
        assert_eq!(asset.book_value(), dec!(135000));
    }

    #[test]
    fn test_expensed_repair_leaves_valuation_untouched() {
        let mut asset = active_asset();
        let change = asset.apply_improvement(dec!(15000), false).unwrap();
        assert!(!change.capitalized);
        assert_eq!(asset.initial_cost, dec!(120000));
        assert_eq!(asset.book_value(), dec!(120000));
    }

    #[test]
    fn test_disposal_computes_gain_and_loss() {
        let mut gain_asset = active_asset();
        gain_asset.apply_accrual(dec!(70000), None).unwrap();
        let disposal_date = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();

        // Book value 50000, sold for 60000: gain of 10000.
        let change = gain_asset.apply_disposal(dec!(60000), disposal_date).unwrap();
        assert_eq!(change.book_value_at_disposal, dec!(50000));
        assert_eq!(change.gain_loss, dec!(10000));
        assert_eq!(gain_asset.status, AssetStatus::Disposed);
        assert_eq!(gain_asset.disposal_date, Some(disposal_date));

        let mut loss_asset = active_asset();
        loss_asset.apply_accrual(dec!(70000), None).unwrap();
        let change = loss_asset.apply_disposal(dec!(40000), disposal_date).unwrap();
        assert_eq!(change.gain_loss, dec!(-10000));
    }

    #[test]
    fn test_second_disposal_rejected() {
        let mut asset = active_asset();
        let date = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        asset.apply_disposal(dec!(0), date).unwrap();
        assert!(matches!(
            asset.apply_disposal(dec!(0), date),
            Err(ValuationError::AlreadyDisposed)
        ));
    }

    #[test]
    fn test_disposal_of_conserved_asset_rejected() {
        let mut asset = active_asset();
        asset.conserve().unwrap();
        assert!(matches!(
            asset.apply_disposal(dec!(0), NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()),
            Err(ValuationError::NotActive { .. })
        ));
    }

    #[test]
    fn test_transfer_changes_custody_only() {
        let mut asset = active_asset();
        let book_before = asset.book_value();
        let change = asset
            .apply_transfer(Some("Workshop 2".to_string()), Some("O. Bondar".to_string()))
            .unwrap();

        assert_eq!(change.from_location.as_deref(), Some("Workshop 1"));
        assert_eq!(change.to_location.as_deref(), Some("Workshop 2"));
        assert_eq!(change.book_value, book_before);
        assert_eq!(asset.location.as_deref(), Some("Workshop 2"));
        assert_eq!(asset.book_value(), book_before);
    }

    #[test]
    fn test_conserve_and_reactivate_cycle() {
        let mut asset = active_asset();
        asset.conserve().unwrap();
        assert_eq!(asset.status, AssetStatus::Conserved);
        assert!(matches!(
            asset.conserve(),
            Err(ValuationError::NotActive { .. })
        ));

        asset.reactivate().unwrap();
        assert_eq!(asset.status, AssetStatus::Active);
        assert!(matches!(
            asset.reactivate(),
            Err(ValuationError::NotConserved { .. })
        ));
    }
}
