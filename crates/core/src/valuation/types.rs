//! Valuation domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use oblik_shared::types::{AssetId, GroupId};

use crate::depreciation::DepreciationMethod;

/// Lifecycle status of an asset.
///
/// Depreciation accrues only while `Active`. `Conserved` pauses accrual
/// without resetting state. `Disposed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    /// In service; eligible for accrual and all events.
    Active,
    /// Mothballed; accrual is paused, status change is reversible.
    Conserved,
    /// Written off; no further valuation mutation.
    Disposed,
}

impl AssetStatus {
    /// Returns true if the asset accrues depreciation.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns true if no further valuation mutation is allowed.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Disposed)
    }

    /// Stable string form used in the database and on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Conserved => "conserved",
            Self::Disposed => "disposed",
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "conserved" => Ok(Self::Conserved),
            "disposed" => Ok(Self::Disposed),
            other => Err(format!("Unknown asset status: {other}")),
        }
    }
}

/// The ledger accounts configured on an asset's group.
///
/// Groups carry the statutory account pair: the asset account (10x) and
/// the accumulated depreciation account (13x).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAccounts {
    /// Group identity.
    pub id: GroupId,
    /// Group code from the statutory classification.
    pub code: String,
    /// Asset balance account (10x).
    pub asset_account: String,
    /// Accumulated depreciation account (13x).
    pub depreciation_account: String,
}

/// Input for registering a new asset under accounting control.
#[derive(Debug, Clone)]
pub struct AssetInput {
    /// Unique inventory number, immutable once issued.
    pub inventory_number: String,
    /// Human-readable name.
    pub name: String,
    /// Group with its configured ledger accounts.
    pub group: GroupAccounts,
    /// Initial (gross) cost.
    pub initial_cost: Decimal,
    /// Residual (salvage) value.
    pub residual_value: Decimal,
    /// Depreciation accrued before this system took custody.
    pub incoming_depreciation: Decimal,
    /// Configured depreciation method.
    pub method: DepreciationMethod,
    /// Useful life in months.
    pub useful_life_months: u32,
    /// Optional annual depreciation rate in percent.
    pub depreciation_rate: Option<Decimal>,
    /// Total production capacity (production method only).
    pub total_production_capacity: Option<Decimal>,
    /// Date the asset entered service.
    pub commissioning_date: NaiveDate,
    /// First period eligible for accrual.
    pub depreciation_start_date: NaiveDate,
    /// Current location.
    pub location: Option<String>,
    /// Materially responsible person.
    pub custodian: Option<String>,
}

/// The authoritative valuation snapshot for one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    /// Asset identity.
    pub id: AssetId,
    /// Unique inventory number, immutable once issued.
    pub inventory_number: String,
    /// Human-readable name.
    pub name: String,
    /// Group with its configured ledger accounts.
    pub group: GroupAccounts,
    /// Lifecycle status.
    pub status: AssetStatus,
    /// Initial (gross) cost; grows on capitalized improvements and is
    /// rescaled by revaluations.
    pub initial_cost: Decimal,
    /// Residual (salvage) value, the floor for book value.
    pub residual_value: Decimal,
    /// Depreciation accrued before this system took custody.
    pub incoming_depreciation: Decimal,
    /// Accumulated depreciation, monotonically non-decreasing while active.
    pub accumulated_depreciation: Decimal,
    /// Configured depreciation method.
    pub method: DepreciationMethod,
    /// Useful life in months.
    pub useful_life_months: u32,
    /// Optional annual depreciation rate in percent.
    pub depreciation_rate: Option<Decimal>,
    /// Total production capacity (production method only).
    pub total_production_capacity: Option<Decimal>,
    /// Units produced to date (production method only).
    pub units_produced_to_date: Decimal,
    /// Date the asset entered service.
    pub commissioning_date: NaiveDate,
    /// First period eligible for accrual.
    pub depreciation_start_date: NaiveDate,
    /// Date of disposal, once disposed.
    pub disposal_date: Option<NaiveDate>,
    /// Current location.
    pub location: Option<String>,
    /// Materially responsible person.
    pub custodian: Option<String>,
    /// Optimistic concurrency version; bumped on every persisted mutation.
    pub version: i64,
}

/// Direction of a revaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevaluationKind {
    /// Fair value above book value.
    Upward,
    /// Fair value at or below book value.
    Downward,
}

impl RevaluationKind {
    /// Stable string form used in the database and on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upward => "upward",
            Self::Downward => "downward",
        }
    }
}

impl std::fmt::Display for RevaluationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The proportional-rescaling outcome of a revaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevaluationChange {
    /// Upward or downward.
    pub kind: RevaluationKind,
    /// Appraised fair value driving the rescale.
    pub fair_value: Decimal,
    /// Initial cost before the revaluation.
    pub old_initial_cost: Decimal,
    /// Accumulated depreciation before the revaluation.
    pub old_depreciation: Decimal,
    /// Book value before the revaluation.
    pub old_book_value: Decimal,
    /// Initial cost after the rescale.
    pub new_initial_cost: Decimal,
    /// Accumulated depreciation after the rescale.
    pub new_depreciation: Decimal,
    /// Book value after the rescale.
    pub new_book_value: Decimal,
    /// Signed change in book value.
    pub amount: Decimal,
}

/// The valuation outcome of a disposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisposalChange {
    /// Book value written off at disposal.
    pub book_value_at_disposal: Decimal,
    /// Accumulated depreciation written off at disposal.
    pub accumulated_at_disposal: Decimal,
    /// Sale proceeds, zero for non-sale disposals.
    pub sale_amount: Decimal,
    /// `sale_amount - book_value_at_disposal`; positive is a gain.
    pub gain_loss: Decimal,
}

/// The valuation outcome of an improvement or repair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementChange {
    /// True when the amount was capitalized into initial cost.
    pub capitalized: bool,
    /// Improvement amount.
    pub amount: Decimal,
    /// Initial cost after the event.
    pub new_initial_cost: Decimal,
    /// Book value after the event.
    pub new_book_value: Decimal,
}

/// The custody outcome of a transfer. Valuation is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferChange {
    /// Location before the transfer.
    pub from_location: Option<String>,
    /// Location after the transfer.
    pub to_location: Option<String>,
    /// Custodian before the transfer.
    pub from_custodian: Option<String>,
    /// Custodian after the transfer.
    pub to_custodian: Option<String>,
    /// Book value at the moment of transfer, for the reference entry.
    pub book_value: Decimal,
}
