//! Per-period accrual planning and batch run summaries.

pub mod engine;
pub mod error;
pub mod types;

pub use engine::{months_used_at, plan_accrual};
pub use error::AccrualError;
pub use types::{
    AccrualDecision, AccrualPlan, AccrualSkip, AssetRunError, DepreciationRecordDraft, RunSummary,
};
