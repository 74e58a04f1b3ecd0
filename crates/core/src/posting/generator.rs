//! Posting generators, one per business event.
//!
//! Every generator is a pure function from (snapshot, event record) to
//! entry drafts. Amounts are strictly positive per entry; a zero-amount
//! event produces no entry at all.

use rust_decimal::Decimal;

use oblik_shared::types::money::is_positive;

use super::types::{accounts, EntryKind, PostingDraft};
use crate::accrual::types::DepreciationRecordDraft;
use crate::events::types::{
    DisposalKind, DisposalRecord, ImprovementRecord, ReceiptRecord, RevaluationRecord,
    TransferRecord,
};
use crate::valuation::{AssetSnapshot, RevaluationKind};

/// Receipt: debit the group's asset account, credit capital investments.
#[must_use]
pub fn receipt_entries(asset: &AssetSnapshot, record: &ReceiptRecord) -> Vec<PostingDraft> {
    if !is_positive(record.amount) {
        return Vec::new();
    }

    vec![PostingDraft {
        kind: EntryKind::Receipt,
        date: record.document.date,
        debit_account: asset.group.asset_account.clone(),
        credit_account: accounts::CAPITAL_INVESTMENT.to_string(),
        amount: record.amount,
        description: format!(
            "Receipt of asset {} \"{}\" ({})",
            asset.inventory_number,
            asset.name,
            record.kind.as_str()
        ),
        document_number: Some(record.document.number.clone()),
        document_date: Some(record.document.date),
    }]
}

/// Depreciation: debit the expense account, credit the group's
/// accumulated depreciation account.
#[must_use]
pub fn depreciation_entries(
    asset: &AssetSnapshot,
    record: &DepreciationRecordDraft,
    expense_account: &str,
) -> Vec<PostingDraft> {
    if !is_positive(record.amount) {
        return Vec::new();
    }

    let period_date = record.period.first_day();
    vec![PostingDraft {
        kind: EntryKind::Depreciation,
        date: period_date,
        debit_account: expense_account.to_string(),
        credit_account: asset.group.depreciation_account.clone(),
        amount: record.amount,
        description: format!(
            "Depreciation of asset {} \"{}\" for {}, method {}",
            asset.inventory_number, asset.name, record.period, record.method
        ),
        document_number: None,
        document_date: Some(period_date),
    }]
}

/// Disposal: write off accumulated depreciation and residual book value
/// against the asset account; for sales, recognize the net gain or loss.
#[must_use]
pub fn disposal_entries(asset: &AssetSnapshot, record: &DisposalRecord) -> Vec<PostingDraft> {
    let mut entries = Vec::with_capacity(3);
    let asset_account = &asset.group.asset_account;
    let document_number = Some(record.document.number.clone());
    let document_date = Some(record.document.date);

    if is_positive(record.accumulated_at_disposal) {
        entries.push(PostingDraft {
            kind: EntryKind::Disposal,
            date: record.document.date,
            debit_account: asset.group.depreciation_account.clone(),
            credit_account: asset_account.clone(),
            amount: record.accumulated_at_disposal,
            description: format!(
                "Write-off of accumulated depreciation on disposal of asset {} \"{}\" ({})",
                asset.inventory_number,
                asset.name,
                record.kind.as_str()
            ),
            document_number: document_number.clone(),
            document_date,
        });
    }

    if is_positive(record.book_value_at_disposal) {
        entries.push(PostingDraft {
            kind: EntryKind::Disposal,
            date: record.document.date,
            debit_account: accounts::DISPOSAL_WRITE_OFF.to_string(),
            credit_account: asset_account.clone(),
            amount: record.book_value_at_disposal,
            description: format!(
                "Write-off of residual value on disposal of asset {} \"{}\" ({})",
                asset.inventory_number,
                asset.name,
                record.kind.as_str()
            ),
            document_number: document_number.clone(),
            document_date,
        });
    }

    if record.kind == DisposalKind::Sale && !record.gain_loss.is_zero() {
        let gain = record.gain_loss > Decimal::ZERO;
        let (debit, credit) = if gain {
            (
                accounts::OTHER_DEBTORS.to_string(),
                accounts::OTHER_INCOME.to_string(),
            )
        } else {
            (
                accounts::WRITE_DOWN_EXPENSE.to_string(),
                accounts::OTHER_DEBTORS.to_string(),
            )
        };
        entries.push(PostingDraft {
            kind: EntryKind::Disposal,
            date: record.document.date,
            debit_account: debit,
            credit_account: credit,
            amount: record.gain_loss.abs(),
            description: format!(
                "{} on sale of asset {} \"{}\"",
                if gain { "Gain" } else { "Loss" },
                asset.inventory_number,
                asset.name
            ),
            document_number,
            document_date,
        });
    }

    entries
}

/// Revaluation: upward goes to revaluation capital, downward to the
/// write-down expense account.
#[must_use]
pub fn revaluation_entries(asset: &AssetSnapshot, record: &RevaluationRecord) -> Vec<PostingDraft> {
    let amount = record.change.amount.abs();
    if !is_positive(amount) {
        return Vec::new();
    }

    let asset_account = asset.group.asset_account.clone();
    let (debit, credit, label) = match record.change.kind {
        RevaluationKind::Upward => (
            asset_account,
            accounts::REVALUATION_CAPITAL.to_string(),
            "Upward revaluation",
        ),
        RevaluationKind::Downward => (
            accounts::WRITE_DOWN_EXPENSE.to_string(),
            asset_account,
            "Downward revaluation",
        ),
    };

    vec![PostingDraft {
        kind: EntryKind::Revaluation,
        date: record.document.date,
        debit_account: debit,
        credit_account: credit,
        amount,
        description: format!(
            "{label} of asset {} \"{}\", fair value {}",
            asset.inventory_number, asset.name, record.change.fair_value
        ),
        document_number: Some(record.document.number.clone()),
        document_date: Some(record.document.date),
    }]
}

/// Improvement: capitalized work goes to the asset account against
/// capital investments, expensed repairs go to the configured expense
/// account against supplier settlements.
#[must_use]
pub fn improvement_entries(asset: &AssetSnapshot, record: &ImprovementRecord) -> Vec<PostingDraft> {
    if !is_positive(record.amount) {
        return Vec::new();
    }

    let (debit, credit, label) = if record.increases_value {
        (
            asset.group.asset_account.clone(),
            accounts::CAPITAL_INVESTMENT.to_string(),
            "Improvement",
        )
    } else {
        (
            record.expense_account.clone(),
            accounts::SUPPLIER_SETTLEMENTS.to_string(),
            "Repair",
        )
    };

    vec![PostingDraft {
        kind: EntryKind::Improvement,
        date: record.document.date,
        debit_account: debit,
        credit_account: credit,
        amount: record.amount,
        description: format!(
            "{label} of asset {} \"{}\" ({}): {}",
            asset.inventory_number,
            asset.name,
            record.kind.as_str(),
            record.description
        ),
        document_number: Some(record.document.number.clone()),
        document_date: Some(record.document.date),
    }]
}

/// Transfer: a reference-only entry with identical debit and credit
/// accounts for the asset's book value. Custody is the real change.
#[must_use]
pub fn transfer_entries(asset: &AssetSnapshot, record: &TransferRecord) -> Vec<PostingDraft> {
    if !is_positive(record.change.book_value) {
        return Vec::new();
    }

    let from = record.change.from_location.as_deref().unwrap_or("-");
    let to = record.change.to_location.as_deref().unwrap_or("-");

    vec![PostingDraft {
        kind: EntryKind::Transfer,
        date: record.document.date,
        debit_account: asset.group.asset_account.clone(),
        credit_account: asset.group.asset_account.clone(),
        amount: record.change.book_value,
        description: format!(
            "Transfer of asset {} \"{}\" from \"{from}\" to \"{to}\"",
            asset.inventory_number, asset.name
        ),
        document_number: Some(record.document.number.clone()),
        document_date: Some(record.document.date),
    }]
}

/// Builds the reversing set for already-posted entries by swapping debit
/// and credit. Posted entries are never mutated; a mistake is corrected
/// by appending these.
#[must_use]
pub fn reversing_entries(entries: &[PostingDraft]) -> Vec<PostingDraft> {
    entries
        .iter()
        .map(|entry| PostingDraft {
            kind: entry.kind,
            date: entry.date,
            debit_account: entry.credit_account.clone(),
            credit_account: entry.debit_account.clone(),
            amount: entry.amount,
            description: format!("Reversal: {}", entry.description),
            document_number: entry.document_number.clone(),
            document_date: entry.document_date,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use oblik_shared::types::{
        AssetId, DepreciationRecordId, DisposalId, GroupId, ImprovementId, Period, ReceiptId,
        RevaluationId, TransferId,
    };

    use crate::depreciation::DepreciationMethod;
    use crate::events::types::{Document, ImprovementKind, ReceiptKind};
    use crate::valuation::{AssetStatus, GroupAccounts, RevaluationChange, TransferChange};

    fn asset() -> AssetSnapshot {
        AssetSnapshot {
            id: AssetId::new(),
            inventory_number: "INV-0042".to_string(),
            name: "Forklift".to_string(),
            group: GroupAccounts {
                id: GroupId::new(),
                code: "105".to_string(),
                asset_account: "105".to_string(),
                depreciation_account: "131".to_string(),
            },
            status: AssetStatus::Active,
            initial_cost: dec!(200000),
            residual_value: dec!(0),
            incoming_depreciation: dec!(0),
            accumulated_depreciation: dec!(150000),
            method: DepreciationMethod::StraightLine,
            useful_life_months: 96,
            depreciation_rate: None,
            total_production_capacity: None,
            units_produced_to_date: dec!(0),
            commissioning_date: NaiveDate::from_ymd_opt(2020, 5, 1).unwrap(),
            depreciation_start_date: NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
            disposal_date: None,
            location: None,
            custodian: None,
            version: 7,
        }
    }

    fn document() -> Document {
        Document {
            number: "AKT-17".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 4, 30).unwrap(),
        }
    }

    fn disposal_record(kind: DisposalKind, sale: Decimal, gain_loss: Decimal) -> DisposalRecord {
        DisposalRecord {
            id: DisposalId::new(),
            asset_id: AssetId::new(),
            kind,
            document: document(),
            reason: "Worn out".to_string(),
            sale_amount: sale,
            book_value_at_disposal: dec!(50000),
            accumulated_at_disposal: dec!(150000),
            gain_loss,
        }
    }

    #[test]
    fn test_receipt_entry_uses_group_account() {
        let record = ReceiptRecord {
            id: ReceiptId::new(),
            asset_id: AssetId::new(),
            kind: ReceiptKind::Purchase,
            document: document(),
            supplier: Some("Machinery LLC".to_string()),
            amount: dec!(200000),
            notes: None,
        };

        let entries = receipt_entries(&asset(), &record);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].debit_account, "105");
        assert_eq!(entries[0].credit_account, accounts::CAPITAL_INVESTMENT);
        assert_eq!(entries[0].amount, dec!(200000));
        assert_eq!(entries[0].kind, EntryKind::Receipt);
    }

    #[test]
    fn test_zero_receipt_produces_no_entry() {
        let record = ReceiptRecord {
            id: ReceiptId::new(),
            asset_id: AssetId::new(),
            kind: ReceiptKind::FreeReceipt,
            document: document(),
            supplier: None,
            amount: dec!(0),
            notes: None,
        };
        assert!(receipt_entries(&asset(), &record).is_empty());
    }

    #[test]
    fn test_depreciation_entry_dated_to_period() {
        let record = DepreciationRecordDraft {
            id: DepreciationRecordId::new(),
            asset_id: AssetId::new(),
            period: Period::new(2026, 3).unwrap(),
            method: DepreciationMethod::StraightLine,
            book_value_before: dec!(51000),
            amount: dec!(1000),
            book_value_after: dec!(50000),
            production_volume: None,
        };

        let entries =
            depreciation_entries(&asset(), &record, accounts::DEFAULT_DEPRECIATION_EXPENSE);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].debit_account, "92");
        assert_eq!(entries[0].credit_account, "131");
        assert_eq!(
            entries[0].date,
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
        assert!(entries[0].description.contains("03.2026"));
    }

    #[test]
    fn test_sale_at_gain_adds_income_entry() {
        // Book value 50000, sold for 60000.
        let entries = disposal_entries(
            &asset(),
            &disposal_record(DisposalKind::Sale, dec!(60000), dec!(10000)),
        );

        assert_eq!(entries.len(), 3);
        // Accumulated depreciation write-off.
        assert_eq!(entries[0].debit_account, "131");
        assert_eq!(entries[0].credit_account, "105");
        assert_eq!(entries[0].amount, dec!(150000));
        // Residual value write-off.
        assert_eq!(entries[1].debit_account, accounts::DISPOSAL_WRITE_OFF);
        assert_eq!(entries[1].amount, dec!(50000));
        // Gain of 10000.
        assert_eq!(entries[2].debit_account, accounts::OTHER_DEBTORS);
        assert_eq!(entries[2].credit_account, accounts::OTHER_INCOME);
        assert_eq!(entries[2].amount, dec!(10000));
    }

    #[test]
    fn test_sale_at_loss_adds_expense_entry() {
        let entries = disposal_entries(
            &asset(),
            &disposal_record(DisposalKind::Sale, dec!(40000), dec!(-10000)),
        );

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].debit_account, accounts::WRITE_DOWN_EXPENSE);
        assert_eq!(entries[2].credit_account, accounts::OTHER_DEBTORS);
        assert_eq!(entries[2].amount, dec!(10000));
    }

    #[test]
    fn test_sale_at_book_value_has_no_gain_loss_entry() {
        let entries = disposal_entries(
            &asset(),
            &disposal_record(DisposalKind::Sale, dec!(50000), dec!(0)),
        );
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_liquidation_never_emits_gain_loss() {
        let entries = disposal_entries(
            &asset(),
            &disposal_record(DisposalKind::Liquidation, dec!(0), dec!(0)),
        );
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_upward_revaluation_entry() {
        let record = RevaluationRecord {
            id: RevaluationId::new(),
            asset_id: AssetId::new(),
            document: document(),
            change: RevaluationChange {
                kind: RevaluationKind::Upward,
                fair_value: dec!(60000),
                old_initial_cost: dec!(200000),
                old_depreciation: dec!(150000),
                old_book_value: dec!(50000),
                new_initial_cost: dec!(240000),
                new_depreciation: dec!(180000),
                new_book_value: dec!(60000),
                amount: dec!(10000),
            },
            notes: None,
        };

        let entries = revaluation_entries(&asset(), &record);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].debit_account, "105");
        assert_eq!(entries[0].credit_account, accounts::REVALUATION_CAPITAL);
        assert_eq!(entries[0].amount, dec!(10000));
    }

    #[test]
    fn test_downward_revaluation_entry() {
        let record = RevaluationRecord {
            id: RevaluationId::new(),
            asset_id: AssetId::new(),
            document: document(),
            change: RevaluationChange {
                kind: RevaluationKind::Downward,
                fair_value: dec!(40000),
                old_initial_cost: dec!(200000),
                old_depreciation: dec!(150000),
                old_book_value: dec!(50000),
                new_initial_cost: dec!(160000),
                new_depreciation: dec!(120000),
                new_book_value: dec!(40000),
                amount: dec!(-10000),
            },
            notes: None,
        };

        let entries = revaluation_entries(&asset(), &record);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].debit_account, accounts::WRITE_DOWN_EXPENSE);
        assert_eq!(entries[0].credit_account, "105");
        assert_eq!(entries[0].amount, dec!(10000));
    }

    #[test]
    fn test_capitalized_improvement_entry() {
        let record = ImprovementRecord {
            id: ImprovementId::new(),
            asset_id: AssetId::new(),
            kind: ImprovementKind::Modernization,
            document: document(),
            description: "New engine".to_string(),
            amount: dec!(30000),
            contractor: None,
            increases_value: true,
            expense_account: "91".to_string(),
        };

        let entries = improvement_entries(&asset(), &record);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].debit_account, "105");
        assert_eq!(entries[0].credit_account, accounts::CAPITAL_INVESTMENT);
    }

    #[test]
    fn test_expensed_repair_entry() {
        let record = ImprovementRecord {
            id: ImprovementId::new(),
            asset_id: AssetId::new(),
            kind: ImprovementKind::CurrentRepair,
            document: document(),
            description: "Brake pads".to_string(),
            amount: dec!(2500),
            contractor: Some("Service Co".to_string()),
            increases_value: false,
            expense_account: "91".to_string(),
        };

        let entries = improvement_entries(&asset(), &record);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].debit_account, "91");
        assert_eq!(entries[0].credit_account, accounts::SUPPLIER_SETTLEMENTS);
    }

    #[test]
    fn test_transfer_reference_entry_is_same_account() {
        let record = TransferRecord {
            id: TransferId::new(),
            asset_id: AssetId::new(),
            document: document(),
            change: TransferChange {
                from_location: Some("Warehouse".to_string()),
                to_location: Some("Workshop 2".to_string()),
                from_custodian: None,
                to_custodian: None,
                book_value: dec!(50000),
            },
            reason: None,
        };

        let entries = transfer_entries(&asset(), &record);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].debit_account, entries[0].credit_account);
        assert_eq!(entries[0].amount, dec!(50000));
    }

    #[test]
    fn test_reversing_entries_swap_sides() {
        let entries = disposal_entries(
            &asset(),
            &disposal_record(DisposalKind::Sale, dec!(60000), dec!(10000)),
        );
        let reversed = reversing_entries(&entries);

        assert_eq!(reversed.len(), entries.len());
        for (original, reversal) in entries.iter().zip(&reversed) {
            assert_eq!(original.debit_account, reversal.credit_account);
            assert_eq!(original.credit_account, reversal.debit_account);
            assert_eq!(original.amount, reversal.amount);
            assert!(reversal.description.starts_with("Reversal: "));
        }
    }
}
