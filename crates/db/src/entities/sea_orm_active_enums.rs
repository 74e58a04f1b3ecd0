//! `SeaORM` active enums backed by Postgres enum types.
//!
//! Conversions to and from the core domain enums live here so the
//! repositories never match on raw strings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use oblik_core::audit::AuditAction as CoreAuditAction;
use oblik_core::depreciation::DepreciationMethod as CoreMethod;
use oblik_core::events::{
    DisposalKind as CoreDisposalKind, ImprovementKind as CoreImprovementKind,
    ReceiptKind as CoreReceiptKind,
};
use oblik_core::posting::EntryKind as CoreEntryKind;
use oblik_core::valuation::{AssetStatus as CoreStatus, RevaluationKind as CoreRevaluationKind};

/// Asset lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "asset_status")]
pub enum AssetStatus {
    /// In service.
    #[sea_orm(string_value = "active")]
    Active,
    /// Accrual paused.
    #[sea_orm(string_value = "conserved")]
    Conserved,
    /// Written off.
    #[sea_orm(string_value = "disposed")]
    Disposed,
}

/// Depreciation method.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "depreciation_method")]
pub enum DepreciationMethod {
    /// Even write-off.
    #[sea_orm(string_value = "straight_line")]
    StraightLine,
    /// Percentage of book value.
    #[sea_orm(string_value = "reducing_balance")]
    ReducingBalance,
    /// Double straight-line rate.
    #[sea_orm(string_value = "accelerated_reducing")]
    AcceleratedReducing,
    /// Sum-of-years-digits.
    #[sea_orm(string_value = "cumulative")]
    Cumulative,
    /// Per unit produced.
    #[sea_orm(string_value = "production")]
    Production,
}

/// Receipt classification.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "receipt_kind")]
pub enum ReceiptKind {
    /// Purchased.
    #[sea_orm(string_value = "purchase")]
    Purchase,
    /// Received free of charge.
    #[sea_orm(string_value = "free_receipt")]
    FreeReceipt,
    /// Capital contribution.
    #[sea_orm(string_value = "contribution")]
    Contribution,
    /// Exchange.
    #[sea_orm(string_value = "exchange")]
    Exchange,
    /// Self-constructed.
    #[sea_orm(string_value = "self_constructed")]
    SelfConstructed,
    /// Anything else.
    #[sea_orm(string_value = "other")]
    Other,
}

/// Disposal classification.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "disposal_kind")]
pub enum DisposalKind {
    /// Sold.
    #[sea_orm(string_value = "sale")]
    Sale,
    /// Scrapped.
    #[sea_orm(string_value = "liquidation")]
    Liquidation,
    /// Handed over free of charge.
    #[sea_orm(string_value = "free_transfer")]
    FreeTransfer,
    /// Inventory shortage.
    #[sea_orm(string_value = "shortage")]
    Shortage,
    /// Anything else.
    #[sea_orm(string_value = "other")]
    Other,
}

/// Improvement classification.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "improvement_kind")]
pub enum ImprovementKind {
    /// Capital repair.
    #[sea_orm(string_value = "capital_repair")]
    CapitalRepair,
    /// Current repair.
    #[sea_orm(string_value = "current_repair")]
    CurrentRepair,
    /// Modernization.
    #[sea_orm(string_value = "modernization")]
    Modernization,
    /// Reconstruction.
    #[sea_orm(string_value = "reconstruction")]
    Reconstruction,
}

/// Revaluation direction.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "revaluation_kind")]
pub enum RevaluationKind {
    /// Fair value above book value.
    #[sea_orm(string_value = "upward")]
    Upward,
    /// Fair value at or below book value.
    #[sea_orm(string_value = "downward")]
    Downward,
}

/// Ledger posting classification.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_kind")]
pub enum EntryKind {
    /// Asset receipt.
    #[sea_orm(string_value = "receipt")]
    Receipt,
    /// Depreciation accrual.
    #[sea_orm(string_value = "depreciation")]
    Depreciation,
    /// Disposal.
    #[sea_orm(string_value = "disposal")]
    Disposal,
    /// Revaluation.
    #[sea_orm(string_value = "revaluation")]
    Revaluation,
    /// Improvement or repair.
    #[sea_orm(string_value = "improvement")]
    Improvement,
    /// Transfer reference entry.
    #[sea_orm(string_value = "transfer")]
    Transfer,
}

/// Audit action.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "audit_action")]
pub enum AuditAction {
    /// Entity created.
    #[sea_orm(string_value = "create")]
    Create,
    /// Entity updated.
    #[sea_orm(string_value = "update")]
    Update,
    /// Asset received.
    #[sea_orm(string_value = "receipt")]
    Receipt,
    /// Asset disposed.
    #[sea_orm(string_value = "disposal")]
    Disposal,
    /// Depreciation accrued.
    #[sea_orm(string_value = "depreciation")]
    Depreciation,
    /// Asset revalued.
    #[sea_orm(string_value = "revaluation")]
    Revaluation,
    /// Asset improved.
    #[sea_orm(string_value = "improvement")]
    Improvement,
    /// Asset transferred.
    #[sea_orm(string_value = "transfer")]
    Transfer,
    /// Status changed.
    #[sea_orm(string_value = "status_change")]
    StatusChange,
}

// ============================================================================
// Conversions to/from core domain enums
// ============================================================================

impl From<CoreStatus> for AssetStatus {
    fn from(value: CoreStatus) -> Self {
        match value {
            CoreStatus::Active => Self::Active,
            CoreStatus::Conserved => Self::Conserved,
            CoreStatus::Disposed => Self::Disposed,
        }
    }
}

impl From<AssetStatus> for CoreStatus {
    fn from(value: AssetStatus) -> Self {
        match value {
            AssetStatus::Active => Self::Active,
            AssetStatus::Conserved => Self::Conserved,
            AssetStatus::Disposed => Self::Disposed,
        }
    }
}

impl From<CoreMethod> for DepreciationMethod {
    fn from(value: CoreMethod) -> Self {
        match value {
            CoreMethod::StraightLine => Self::StraightLine,
            CoreMethod::ReducingBalance => Self::ReducingBalance,
            CoreMethod::AcceleratedReducing => Self::AcceleratedReducing,
            CoreMethod::Cumulative => Self::Cumulative,
            CoreMethod::Production => Self::Production,
        }
    }
}

impl From<DepreciationMethod> for CoreMethod {
    fn from(value: DepreciationMethod) -> Self {
        match value {
            DepreciationMethod::StraightLine => Self::StraightLine,
            DepreciationMethod::ReducingBalance => Self::ReducingBalance,
            DepreciationMethod::AcceleratedReducing => Self::AcceleratedReducing,
            DepreciationMethod::Cumulative => Self::Cumulative,
            DepreciationMethod::Production => Self::Production,
        }
    }
}

impl From<CoreReceiptKind> for ReceiptKind {
    fn from(value: CoreReceiptKind) -> Self {
        match value {
            CoreReceiptKind::Purchase => Self::Purchase,
            CoreReceiptKind::FreeReceipt => Self::FreeReceipt,
            CoreReceiptKind::Contribution => Self::Contribution,
            CoreReceiptKind::Exchange => Self::Exchange,
            CoreReceiptKind::SelfConstructed => Self::SelfConstructed,
            CoreReceiptKind::Other => Self::Other,
        }
    }
}

impl From<CoreDisposalKind> for DisposalKind {
    fn from(value: CoreDisposalKind) -> Self {
        match value {
            CoreDisposalKind::Sale => Self::Sale,
            CoreDisposalKind::Liquidation => Self::Liquidation,
            CoreDisposalKind::FreeTransfer => Self::FreeTransfer,
            CoreDisposalKind::Shortage => Self::Shortage,
            CoreDisposalKind::Other => Self::Other,
        }
    }
}

impl From<CoreImprovementKind> for ImprovementKind {
    fn from(value: CoreImprovementKind) -> Self {
        match value {
            CoreImprovementKind::CapitalRepair => Self::CapitalRepair,
            CoreImprovementKind::CurrentRepair => Self::CurrentRepair,
            CoreImprovementKind::Modernization => Self::Modernization,
            CoreImprovementKind::Reconstruction => Self::Reconstruction,
        }
    }
}

impl From<CoreRevaluationKind> for RevaluationKind {
    fn from(value: CoreRevaluationKind) -> Self {
        match value {
            CoreRevaluationKind::Upward => Self::Upward,
            CoreRevaluationKind::Downward => Self::Downward,
        }
    }
}

impl From<CoreEntryKind> for EntryKind {
    fn from(value: CoreEntryKind) -> Self {
        match value {
            CoreEntryKind::Receipt => Self::Receipt,
            CoreEntryKind::Depreciation => Self::Depreciation,
            CoreEntryKind::Disposal => Self::Disposal,
            CoreEntryKind::Revaluation => Self::Revaluation,
            CoreEntryKind::Improvement => Self::Improvement,
            CoreEntryKind::Transfer => Self::Transfer,
        }
    }
}

impl From<EntryKind> for CoreEntryKind {
    fn from(value: EntryKind) -> Self {
        match value {
            EntryKind::Receipt => Self::Receipt,
            EntryKind::Depreciation => Self::Depreciation,
            EntryKind::Disposal => Self::Disposal,
            EntryKind::Revaluation => Self::Revaluation,
            EntryKind::Improvement => Self::Improvement,
            EntryKind::Transfer => Self::Transfer,
        }
    }
}

impl From<CoreAuditAction> for AuditAction {
    fn from(value: CoreAuditAction) -> Self {
        match value {
            CoreAuditAction::Create => Self::Create,
            CoreAuditAction::Update => Self::Update,
            CoreAuditAction::Receipt => Self::Receipt,
            CoreAuditAction::Disposal => Self::Disposal,
            CoreAuditAction::Depreciation => Self::Depreciation,
            CoreAuditAction::Revaluation => Self::Revaluation,
            CoreAuditAction::Improvement => Self::Improvement,
            CoreAuditAction::Transfer => Self::Transfer,
            CoreAuditAction::StatusChange => Self::StatusChange,
        }
    }
}
