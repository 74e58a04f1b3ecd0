//! The five event processors.
//!
//! Each processor validates the payload against the current snapshot,
//! mutates a copy, and returns the full [`Outcome`] for atomic
//! persistence. On any error the caller's snapshot is untouched.

use rust_decimal::Decimal;
use serde_json::Value;

use oblik_shared::types::{DisposalId, ImprovementId, ReceiptId, RevaluationId, TransferId};

use super::types::{
    DisposalInput, DisposalKind, DisposalRecord, ImprovementInput, ImprovementRecord, Outcome,
    ReceiptInput, ReceiptRecord, RevaluationInput, RevaluationRecord, TransferInput,
    TransferRecord,
};
use crate::audit::ChangeSet;
use crate::posting::generator;
use crate::valuation::{AssetInput, AssetSnapshot, ValuationError};

/// Receives a new asset into accounting control.
///
/// Builds the opening snapshot from the asset configuration, records the
/// receipt document, and derives the capitalization posting.
///
/// # Errors
///
/// Returns `ValuationError` when the asset configuration or the receipt
/// amount is invalid; nothing is constructed in that case.
pub fn process_receipt(
    asset: AssetInput,
    input: ReceiptInput,
) -> Result<Outcome<ReceiptRecord>, ValuationError> {
    if input.amount <= Decimal::ZERO {
        return Err(ValuationError::AmountNotPositive(input.amount));
    }

    let snapshot = AssetSnapshot::try_new(asset)?;

    let record = ReceiptRecord {
        id: ReceiptId::new(),
        asset_id: snapshot.id,
        kind: input.kind,
        document: input.document,
        supplier: input.supplier,
        amount: input.amount,
        notes: input.notes,
    };

    let postings = generator::receipt_entries(&snapshot, &record);
    let changes = ChangeSet::new()
        .with("status", Value::Null, snapshot.status.as_str())
        .with("initial_cost", Value::Null, snapshot.initial_cost)
        .with("book_value", Value::Null, snapshot.book_value());

    Ok(Outcome {
        snapshot,
        record,
        postings,
        changes,
    })
}

/// Disposes of an asset.
///
/// Sale proceeds and the gain/loss are recognized only for the `Sale`
/// kind; every other kind writes the asset off at zero proceeds.
///
/// # Errors
///
/// Returns `ValuationError` when the asset is not active or already
/// disposed.
pub fn process_disposal(
    snapshot: &AssetSnapshot,
    input: DisposalInput,
) -> Result<Outcome<DisposalRecord>, ValuationError> {
    let mut snapshot = snapshot.clone();
    let status_before = snapshot.status;
    let book_before = snapshot.book_value();

    let sale_amount = if input.kind == DisposalKind::Sale {
        input.sale_amount
    } else {
        Decimal::ZERO
    };

    let change = snapshot.apply_disposal(sale_amount, input.document.date)?;

    let record = DisposalRecord {
        id: DisposalId::new(),
        asset_id: snapshot.id,
        kind: input.kind,
        document: input.document,
        reason: input.reason,
        sale_amount,
        book_value_at_disposal: change.book_value_at_disposal,
        accumulated_at_disposal: change.accumulated_at_disposal,
        gain_loss: if input.kind == DisposalKind::Sale {
            change.gain_loss
        } else {
            Decimal::ZERO
        },
    };

    let postings = generator::disposal_entries(&snapshot, &record);
    let changes = ChangeSet::new()
        .with("status", status_before.as_str(), snapshot.status.as_str())
        .with("book_value", book_before, Decimal::ZERO)
        .with("disposal_date", Value::Null, snapshot.disposal_date);

    Ok(Outcome {
        snapshot,
        record,
        postings,
        changes,
    })
}

/// Revalues an asset to its appraised fair value.
///
/// # Errors
///
/// Returns `ValuationError` for disposed assets or non-positive fair
/// values.
pub fn process_revaluation(
    snapshot: &AssetSnapshot,
    input: RevaluationInput,
) -> Result<Outcome<RevaluationRecord>, ValuationError> {
    let mut snapshot = snapshot.clone();
    let change = snapshot.apply_revaluation(input.fair_value)?;

    let changes = ChangeSet::new()
        .with(
            "initial_cost",
            change.old_initial_cost,
            change.new_initial_cost,
        )
        .with(
            "accumulated_depreciation",
            change.old_depreciation,
            change.new_depreciation,
        )
        .with("book_value", change.old_book_value, change.new_book_value);

    let record = RevaluationRecord {
        id: RevaluationId::new(),
        asset_id: snapshot.id,
        document: input.document,
        change,
        notes: input.notes,
    };

    let postings = generator::revaluation_entries(&snapshot, &record);

    Ok(Outcome {
        snapshot,
        record,
        postings,
        changes,
    })
}

/// Records an improvement or repair.
///
/// # Errors
///
/// Returns `ValuationError` for disposed assets or non-positive amounts.
pub fn process_improvement(
    snapshot: &AssetSnapshot,
    input: ImprovementInput,
) -> Result<Outcome<ImprovementRecord>, ValuationError> {
    let mut snapshot = snapshot.clone();
    let cost_before = snapshot.initial_cost;
    let book_before = snapshot.book_value();

    let change = snapshot.apply_improvement(input.amount, input.increases_value)?;

    let record = ImprovementRecord {
        id: ImprovementId::new(),
        asset_id: snapshot.id,
        kind: input.kind,
        document: input.document,
        description: input.description,
        amount: change.amount,
        contractor: input.contractor,
        increases_value: change.capitalized,
        expense_account: input.expense_account,
    };

    let postings = generator::improvement_entries(&snapshot, &record);
    let changes = ChangeSet::new()
        .with_if_changed("initial_cost", cost_before, change.new_initial_cost)
        .with_if_changed("book_value", book_before, change.new_book_value);

    Ok(Outcome {
        snapshot,
        record,
        postings,
        changes,
    })
}

/// Transfers an asset between locations/custodians.
///
/// # Errors
///
/// Returns `ValuationError` for disposed assets.
pub fn process_transfer(
    snapshot: &AssetSnapshot,
    input: TransferInput,
) -> Result<Outcome<TransferRecord>, ValuationError> {
    let mut snapshot = snapshot.clone();
    let change = snapshot.apply_transfer(input.to_location, input.to_custodian)?;

    let changes = ChangeSet::new()
        .with_if_changed(
            "location",
            change.from_location.clone(),
            change.to_location.clone(),
        )
        .with_if_changed(
            "custodian",
            change.from_custodian.clone(),
            change.to_custodian.clone(),
        );

    let record = TransferRecord {
        id: TransferId::new(),
        asset_id: snapshot.id,
        document: input.document,
        change,
        reason: input.reason,
    };

    let postings = generator::transfer_entries(&snapshot, &record);

    Ok(Outcome {
        snapshot,
        record,
        postings,
        changes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use oblik_shared::types::GroupId;

    use crate::depreciation::DepreciationMethod;
    use crate::events::types::{Document, ImprovementKind, ReceiptKind};
    use crate::posting::EntryKind;
    use crate::valuation::{AssetStatus, GroupAccounts};

    fn asset_input() -> AssetInput {
        AssetInput {
            inventory_number: "INV-0100".to_string(),
            name: "Compressor".to_string(),
            group: GroupAccounts {
                id: GroupId::new(),
                code: "104".to_string(),
                asset_account: "104".to_string(),
                depreciation_account: "131".to_string(),
            },
            initial_cost: dec!(90000),
            residual_value: dec!(0),
            incoming_depreciation: dec!(0),
            method: DepreciationMethod::StraightLine,
            useful_life_months: 90,
            depreciation_rate: None,
            total_production_capacity: None,
            commissioning_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            depreciation_start_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            location: Some("Plant".to_string()),
            custodian: None,
        }
    }

    fn document() -> Document {
        Document {
            number: "DOC-1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
        }
    }

    fn received_asset() -> AssetSnapshot {
        process_receipt(
            asset_input(),
            ReceiptInput {
                kind: ReceiptKind::Purchase,
                document: document(),
                supplier: None,
                amount: dec!(90000),
                notes: None,
            },
        )
        .unwrap()
        .snapshot
    }

    #[test]
    fn test_receipt_produces_snapshot_record_and_posting() {
        let outcome = process_receipt(
            asset_input(),
            ReceiptInput {
                kind: ReceiptKind::Purchase,
                document: document(),
                supplier: Some("Supplier LLC".to_string()),
                amount: dec!(90000),
                notes: None,
            },
        )
        .unwrap();

        assert_eq!(outcome.snapshot.status, AssetStatus::Active);
        assert_eq!(outcome.record.amount, dec!(90000));
        assert_eq!(outcome.record.asset_id, outcome.snapshot.id);
        assert_eq!(outcome.postings.len(), 1);
        assert_eq!(outcome.postings[0].kind, EntryKind::Receipt);
        assert!(!outcome.changes.is_empty());
    }

    #[test]
    fn test_receipt_rejects_zero_amount() {
        let result = process_receipt(
            asset_input(),
            ReceiptInput {
                kind: ReceiptKind::Purchase,
                document: document(),
                supplier: None,
                amount: dec!(0),
                notes: None,
            },
        );
        assert!(matches!(result, Err(ValuationError::AmountNotPositive(_))));
    }

    #[test]
    fn test_receipt_rejects_invalid_configuration() {
        let mut input = asset_input();
        input.incoming_depreciation = dec!(100000);
        let result = process_receipt(
            input,
            ReceiptInput {
                kind: ReceiptKind::Purchase,
                document: document(),
                supplier: None,
                amount: dec!(90000),
                notes: None,
            },
        );
        assert!(matches!(
            result,
            Err(ValuationError::IncomingDepreciationTooLarge { .. })
        ));
    }

    #[test]
    fn test_disposal_of_sale_records_gain() {
        let mut snapshot = received_asset();
        snapshot.apply_accrual(dec!(40000), None).unwrap();

        let outcome = process_disposal(
            &snapshot,
            DisposalInput {
                kind: DisposalKind::Sale,
                document: document(),
                reason: "Sold to contractor".to_string(),
                sale_amount: dec!(60000),
            },
        )
        .unwrap();

        assert_eq!(outcome.snapshot.status, AssetStatus::Disposed);
        assert_eq!(outcome.record.book_value_at_disposal, dec!(50000));
        assert_eq!(outcome.record.gain_loss, dec!(10000));
        // Write-off of depreciation + write-off of book value + gain.
        assert_eq!(outcome.postings.len(), 3);
        // The caller's snapshot is untouched.
        assert_eq!(snapshot.status, AssetStatus::Active);
    }

    #[test]
    fn test_liquidation_ignores_sale_amount() {
        let snapshot = received_asset();
        let outcome = process_disposal(
            &snapshot,
            DisposalInput {
                kind: DisposalKind::Liquidation,
                document: document(),
                reason: "Beyond repair".to_string(),
                sale_amount: dec!(12345),
            },
        )
        .unwrap();

        assert_eq!(outcome.record.sale_amount, dec!(0));
        assert_eq!(outcome.record.gain_loss, dec!(0));
    }

    #[test]
    fn test_disposal_of_disposed_asset_fails() {
        let snapshot = received_asset();
        let disposed = process_disposal(
            &snapshot,
            DisposalInput {
                kind: DisposalKind::Liquidation,
                document: document(),
                reason: "Worn".to_string(),
                sale_amount: dec!(0),
            },
        )
        .unwrap()
        .snapshot;

        let result = process_disposal(
            &disposed,
            DisposalInput {
                kind: DisposalKind::Liquidation,
                document: document(),
                reason: "Again".to_string(),
                sale_amount: dec!(0),
            },
        );
        assert!(matches!(result, Err(ValuationError::AlreadyDisposed)));
    }

    #[test]
    fn test_revaluation_outcome_carries_rescale() {
        let snapshot = received_asset();
        let outcome = process_revaluation(
            &snapshot,
            RevaluationInput {
                document: document(),
                fair_value: dec!(108000),
                notes: None,
            },
        )
        .unwrap();

        assert_eq!(outcome.record.change.new_book_value, dec!(108000.00));
        assert_eq!(outcome.postings.len(), 1);
        assert_eq!(outcome.snapshot.book_value(), dec!(108000.00));
        assert_eq!(outcome.changes.changes.len(), 3);
    }

    #[test]
    fn test_improvement_capitalization() {
        let snapshot = received_asset();
        let outcome = process_improvement(
            &snapshot,
            ImprovementInput {
                kind: ImprovementKind::Modernization,
                document: document(),
                description: "Controller upgrade".to_string(),
                amount: dec!(10000),
                contractor: None,
                increases_value: true,
                expense_account: "91".to_string(),
            },
        )
        .unwrap();

        assert_eq!(outcome.snapshot.initial_cost, dec!(100000));
        assert_eq!(outcome.postings.len(), 1);
        assert!(!outcome.changes.is_empty());
    }

    #[test]
    fn test_expensed_repair_leaves_no_valuation_changes() {
        let snapshot = received_asset();
        let outcome = process_improvement(
            &snapshot,
            ImprovementInput {
                kind: ImprovementKind::CurrentRepair,
                document: document(),
                description: "Seals".to_string(),
                amount: dec!(700),
                contractor: None,
                increases_value: false,
                expense_account: "91".to_string(),
            },
        )
        .unwrap();

        assert_eq!(outcome.snapshot.initial_cost, dec!(90000));
        // No valuation field changed, so the change set is empty.
        assert!(outcome.changes.is_empty());
        assert_eq!(outcome.postings.len(), 1);
    }

    #[test]
    fn test_transfer_moves_custody_and_emits_reference_entry() {
        let snapshot = received_asset();
        let outcome = process_transfer(
            &snapshot,
            TransferInput {
                document: document(),
                to_location: Some("Warehouse".to_string()),
                to_custodian: Some("I. Kovalenko".to_string()),
                reason: None,
            },
        )
        .unwrap();

        assert_eq!(outcome.snapshot.location.as_deref(), Some("Warehouse"));
        assert_eq!(outcome.postings.len(), 1);
        assert_eq!(
            outcome.postings[0].debit_account,
            outcome.postings[0].credit_account
        );
        assert_eq!(outcome.changes.changes.len(), 2);
        // Book value unchanged by the transfer.
        assert_eq!(outcome.snapshot.book_value(), snapshot.book_value());
    }
}
