//! Posting domain types and the statutory account constants.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fixed accounts from the statutory chart of accounts.
///
/// Group-specific accounts (the 10x asset account and 13x depreciation
/// account) live on the asset's group; everything else is fixed here.
pub mod accounts {
    /// Capital investments (acquisition and construction in progress).
    pub const CAPITAL_INVESTMENT: &str = "152";
    /// Settlements with other debtors.
    pub const OTHER_DEBTORS: &str = "377";
    /// Revaluation capital (upward revaluations).
    pub const REVALUATION_CAPITAL: &str = "411";
    /// Settlements with domestic suppliers.
    pub const SUPPLIER_SETTLEMENTS: &str = "631";
    /// Other operating income (gains on disposal).
    pub const OTHER_INCOME: &str = "746";
    /// Write-downs of non-current assets (downward revaluations, losses).
    pub const WRITE_DOWN_EXPENSE: &str = "975";
    /// Write-off of non-current assets (disposals).
    pub const DISPOSAL_WRITE_OFF: &str = "976";
    /// Administrative expenses, the default depreciation expense account.
    pub const DEFAULT_DEPRECIATION_EXPENSE: &str = "92";
}

/// Classification of a ledger posting by originating event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Asset received into accounting control.
    Receipt,
    /// Monthly depreciation accrual.
    Depreciation,
    /// Asset disposal.
    Disposal,
    /// Revaluation to fair value.
    Revaluation,
    /// Improvement or repair.
    Improvement,
    /// Internal transfer (reference entry).
    Transfer,
}

impl EntryKind {
    /// Stable string form used in the database and on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Receipt => "receipt",
            Self::Depreciation => "depreciation",
            Self::Disposal => "disposal",
            Self::Revaluation => "revaluation",
            Self::Improvement => "improvement",
            Self::Transfer => "transfer",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One double-entry posting, before persistence assigns it an identity.
///
/// Entries are append-only once stored; corrections go through
/// [`super::generator::reversing_entries`], never through mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingDraft {
    /// Classification by originating event.
    pub kind: EntryKind,
    /// Posting date.
    pub date: NaiveDate,
    /// Debit account number.
    pub debit_account: String,
    /// Credit account number.
    pub credit_account: String,
    /// Posted amount; strictly positive by construction.
    pub amount: Decimal,
    /// Human-readable description of the operation.
    pub description: String,
    /// Source document number, when the event carries one.
    pub document_number: Option<String>,
    /// Source document date, when the event carries one.
    pub document_date: Option<NaiveDate>,
}
