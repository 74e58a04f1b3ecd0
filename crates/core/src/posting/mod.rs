//! Double-entry posting generation.
//!
//! Pure mapping from business events to account-entry drafts. The debit
//! and credit accounts come either from the asset's group configuration
//! or from the fixed statutory accounts in [`accounts`].

pub mod generator;
pub mod types;

pub use generator::{
    depreciation_entries, disposal_entries, improvement_entries, receipt_entries,
    reversing_entries, revaluation_entries, transfer_entries,
};
pub use types::{accounts, EntryKind, PostingDraft};
