//! Event payloads and immutable event records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use oblik_shared::types::{
    AssetId, DisposalId, ImprovementId, ReceiptId, RevaluationId, TransferId,
};

use crate::audit::ChangeSet;
use crate::posting::PostingDraft;
use crate::valuation::{AssetSnapshot, RevaluationChange, TransferChange};

/// Source document reference carried by every business event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document number.
    pub number: String,
    /// Document date.
    pub date: NaiveDate,
}

/// How an asset entered accounting control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptKind {
    /// Purchased from a supplier.
    Purchase,
    /// Received free of charge.
    FreeReceipt,
    /// Contributed to statutory capital.
    Contribution,
    /// Acquired through exchange.
    Exchange,
    /// Self-constructed.
    SelfConstructed,
    /// Anything else.
    Other,
}

impl ReceiptKind {
    /// Stable string form used in the database and on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::FreeReceipt => "free_receipt",
            Self::Contribution => "contribution",
            Self::Exchange => "exchange",
            Self::SelfConstructed => "self_constructed",
            Self::Other => "other",
        }
    }
}

/// How an asset left accounting control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisposalKind {
    /// Sold; proceeds and gain/loss are recognized.
    Sale,
    /// Scrapped.
    Liquidation,
    /// Handed over free of charge.
    FreeTransfer,
    /// Written off after an inventory shortage.
    Shortage,
    /// Anything else.
    Other,
}

impl DisposalKind {
    /// Stable string form used in the database and on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Liquidation => "liquidation",
            Self::FreeTransfer => "free_transfer",
            Self::Shortage => "shortage",
            Self::Other => "other",
        }
    }
}

/// Classification of an improvement or repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementKind {
    /// Capital repair; normally capitalized.
    CapitalRepair,
    /// Current repair; expensed.
    CurrentRepair,
    /// Modernization; normally capitalized.
    Modernization,
    /// Reconstruction; normally capitalized.
    Reconstruction,
}

impl ImprovementKind {
    /// Stable string form used in the database and on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CapitalRepair => "capital_repair",
            Self::CurrentRepair => "current_repair",
            Self::Modernization => "modernization",
            Self::Reconstruction => "reconstruction",
        }
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// Payload for receiving an asset into accounting control.
#[derive(Debug, Clone)]
pub struct ReceiptInput {
    /// Receipt classification.
    pub kind: ReceiptKind,
    /// Source document.
    pub document: Document,
    /// Supplier or source, free text.
    pub supplier: Option<String>,
    /// Receipt amount posted to the capital investment account.
    pub amount: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Payload for disposing of an asset.
#[derive(Debug, Clone)]
pub struct DisposalInput {
    /// Disposal classification.
    pub kind: DisposalKind,
    /// Source document.
    pub document: Document,
    /// Reason for disposal.
    pub reason: String,
    /// Sale proceeds; meaningful only for sales.
    pub sale_amount: Decimal,
}

/// Payload for revaluing an asset to fair value.
#[derive(Debug, Clone)]
pub struct RevaluationInput {
    /// Source document.
    pub document: Document,
    /// Appraised fair value.
    pub fair_value: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Payload for an improvement or repair.
#[derive(Debug, Clone)]
pub struct ImprovementInput {
    /// Improvement classification.
    pub kind: ImprovementKind,
    /// Source document.
    pub document: Document,
    /// Description of the work performed.
    pub description: String,
    /// Cost of the work.
    pub amount: Decimal,
    /// Contractor, free text.
    pub contractor: Option<String>,
    /// True when the amount is capitalized into initial cost.
    pub increases_value: bool,
    /// Expense account for the non-capitalized branch (91/92/93/23).
    pub expense_account: String,
}

/// Payload for an internal transfer.
#[derive(Debug, Clone)]
pub struct TransferInput {
    /// Source document.
    pub document: Document,
    /// Destination location.
    pub to_location: Option<String>,
    /// Destination custodian.
    pub to_custodian: Option<String>,
    /// Free-text reason.
    pub reason: Option<String>,
}

// ============================================================================
// Immutable event records
// ============================================================================

/// A posted receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Record identity.
    pub id: ReceiptId,
    /// The received asset.
    pub asset_id: AssetId,
    /// Receipt classification.
    pub kind: ReceiptKind,
    /// Source document.
    pub document: Document,
    /// Supplier or source.
    pub supplier: Option<String>,
    /// Receipt amount.
    pub amount: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// A posted disposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisposalRecord {
    /// Record identity.
    pub id: DisposalId,
    /// The disposed asset.
    pub asset_id: AssetId,
    /// Disposal classification.
    pub kind: DisposalKind,
    /// Source document.
    pub document: Document,
    /// Reason for disposal.
    pub reason: String,
    /// Sale proceeds (zero for non-sale disposals).
    pub sale_amount: Decimal,
    /// Book value written off.
    pub book_value_at_disposal: Decimal,
    /// Accumulated depreciation written off.
    pub accumulated_at_disposal: Decimal,
    /// Gain (positive) or loss (negative) on sale; zero for non-sales.
    pub gain_loss: Decimal,
}

/// A posted revaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevaluationRecord {
    /// Record identity.
    pub id: RevaluationId,
    /// The revalued asset.
    pub asset_id: AssetId,
    /// Source document.
    pub document: Document,
    /// The full before/after rescale.
    pub change: RevaluationChange,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// A posted improvement or repair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementRecord {
    /// Record identity.
    pub id: ImprovementId,
    /// The improved asset.
    pub asset_id: AssetId,
    /// Improvement classification.
    pub kind: ImprovementKind,
    /// Source document.
    pub document: Document,
    /// Description of the work performed.
    pub description: String,
    /// Cost of the work.
    pub amount: Decimal,
    /// Contractor.
    pub contractor: Option<String>,
    /// True when the amount was capitalized.
    pub increases_value: bool,
    /// Expense account used by the expensed branch.
    pub expense_account: String,
}

/// A posted transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Record identity.
    pub id: TransferId,
    /// The transferred asset.
    pub asset_id: AssetId,
    /// Source document.
    pub document: Document,
    /// The custody change.
    pub change: TransferChange,
    /// Free-text reason.
    pub reason: Option<String>,
}

/// Everything a successful event produces, for the storage layer to commit
/// as one atomic unit.
#[derive(Debug, Clone)]
pub struct Outcome<R> {
    /// The mutated snapshot.
    pub snapshot: AssetSnapshot,
    /// The immutable event record.
    pub record: R,
    /// Ledger postings derived from the event.
    pub postings: Vec<PostingDraft>,
    /// Audit change-set describing the mutation.
    pub changes: ChangeSet,
}
