//! Asset valuation state.
//!
//! The single source of truth for "what is this asset worth now and why":
//! the snapshot type, its setup validation, and the lifecycle transitions
//! that the event processors and the accrual engine drive.

pub mod error;
pub mod state;
pub mod types;

#[cfg(test)]
mod state_props;

pub use error::ValuationError;
pub use types::{
    AssetInput, AssetSnapshot, AssetStatus, DisposalChange, GroupAccounts, ImprovementChange,
    RevaluationChange, RevaluationKind, TransferChange,
};
