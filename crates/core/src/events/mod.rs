//! Event processors for the five asset business events.
//!
//! Each processor validates a payload against the current snapshot,
//! produces the mutated snapshot, the immutable event record, the ledger
//! posting drafts, and the audit change-set. Persistence of all four as
//! one atomic unit is the storage layer's responsibility.

pub mod processor;
pub mod types;

pub use processor::{
    process_disposal, process_improvement, process_receipt, process_revaluation, process_transfer,
};
pub use types::{
    DisposalInput, DisposalKind, DisposalRecord, Document, ImprovementInput, ImprovementKind,
    ImprovementRecord, Outcome, ReceiptInput, ReceiptKind, ReceiptRecord, RevaluationInput,
    RevaluationRecord, TransferInput, TransferRecord,
};
