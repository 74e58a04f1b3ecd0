//! Accrual domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use oblik_shared::types::{AssetId, DepreciationRecordId, Period};

use crate::depreciation::DepreciationMethod;

/// An immutable depreciation record draft for one (asset, period).
///
/// At most one record may ever exist per (asset, period); the storage
/// layer enforces this with a uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationRecordDraft {
    /// Record identity.
    pub id: DepreciationRecordId,
    /// The asset being depreciated.
    pub asset_id: AssetId,
    /// The accrual period.
    pub period: Period,
    /// Method in force when the record was created.
    pub method: DepreciationMethod,
    /// Book value before this accrual.
    pub book_value_before: Decimal,
    /// The accrued amount.
    pub amount: Decimal,
    /// Book value after this accrual.
    pub book_value_after: Decimal,
    /// Units produced in the period (production method only).
    pub production_volume: Option<Decimal>,
}

/// Why an asset was skipped by a batch run without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccrualSkip {
    /// A record for the period already exists (idempotent re-run).
    AlreadyRecorded,
    /// The asset is not active.
    NotActive,
    /// Depreciation has not started by the target period.
    NotStarted,
    /// Book value is already at the residual floor.
    FullyDepreciated,
    /// The method produced a zero amount for this period.
    ZeroAmount,
}

/// The per-asset result of accrual planning: either a plan, a benign skip
/// reason, or (via `Result`) a per-asset error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccrualPlan {
    /// The record to persist.
    pub record: DepreciationRecordDraft,
}

/// What a batch run should do with one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccrualDecision {
    /// Accrue and persist this plan.
    Accrue(AccrualPlan),
    /// Skip the asset; not an error.
    Skip(AccrualSkip),
}

/// Aggregate outcome of one batch accrual run.
///
/// Per-asset failures never abort the batch; the contract is partial
/// success with a reported error list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// The target period of the run.
    pub period: Option<Period>,
    /// Number of records created.
    pub created: u64,
    /// Number of assets skipped without error.
    pub skipped: u64,
    /// Total amount accrued across all created records.
    pub total_amount: Decimal,
    /// Per-asset failures.
    pub errors: Vec<AssetRunError>,
}

/// One asset's failure inside a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRunError {
    /// The failing asset.
    pub asset_id: AssetId,
    /// Its inventory number, for operator-facing reports.
    pub inventory_number: String,
    /// Stable error code.
    pub code: String,
    /// Human-readable reason.
    pub message: String,
}

impl RunSummary {
    /// Creates an empty summary for a period.
    #[must_use]
    pub fn for_period(period: Period) -> Self {
        Self {
            period: Some(period),
            ..Self::default()
        }
    }

    /// Folds one created record into the summary.
    pub fn record_created(&mut self, amount: Decimal) {
        self.created += 1;
        self.total_amount += amount;
    }

    /// Folds one benign skip into the summary.
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Folds one per-asset failure into the summary.
    pub fn record_error(&mut self, error: AssetRunError) {
        self.errors.push(error);
    }
}
