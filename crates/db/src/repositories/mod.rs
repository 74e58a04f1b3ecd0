//! Repository abstractions for data access.
//!
//! One repository per aggregate. Every event-posting method commits the
//! snapshot update, the event record, and the generated postings as one
//! database transaction, guarded by a compare-and-set on the asset's
//! `version` column; the audit record is written after the commit and is
//! never allowed to roll the mutation back.

pub mod asset;
pub mod audit;
pub mod depreciation;
pub mod disposal;
pub mod entry;
pub mod improvement;
pub mod receipt;
pub mod revaluation;
pub mod transfer;

pub use asset::{AssetFilter, AssetRepository, AssetStatistics, GroupTotals};
pub use audit::{AuditFilter, AuditRepository};
pub use depreciation::{DepreciationRepository, PeriodSummary, RunAccrualInput};
pub use disposal::DisposalRepository;
pub use entry::{AccountEntryRepository, EntryFilter, JournalSummary, JournalTotals};
pub use improvement::ImprovementRepository;
pub use receipt::{NewAssetReceipt, ReceiptRepository};
pub use revaluation::RevaluationRepository;
pub use transfer::TransferRepository;

use sea_orm::DbErr;
use uuid::Uuid;

use oblik_core::accrual::AccrualError;
use oblik_core::valuation::ValuationError;
use oblik_shared::AppError;

/// Errors produced by the repository layer.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Asset not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(Uuid),

    /// Asset group not found.
    #[error("Asset group not found: {0}")]
    GroupNotFound(Uuid),

    /// Inventory number already in use.
    #[error("Inventory number already in use: {0}")]
    DuplicateInventoryNumber(String),

    /// The core valuation logic rejected the mutation.
    #[error(transparent)]
    Valuation(#[from] ValuationError),

    /// The core accrual logic rejected the mutation.
    #[error(transparent)]
    Accrual(#[from] AccrualError),

    /// A concurrent mutation won the compare-and-set race.
    #[error("Concurrent modification detected for asset {0}, please retry")]
    ConcurrentModification(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::AssetNotFound(_) | RepoError::GroupNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            RepoError::DuplicateInventoryNumber(_) | RepoError::ConcurrentModification(_) => {
                Self::Conflict(err.to_string())
            }
            RepoError::Valuation(inner) => inner.into(),
            RepoError::Accrual(inner) => inner.into(),
            RepoError::Database(inner) => Self::Database(inner.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use oblik_core::valuation::ValuationError;

    #[rstest]
    #[case(RepoError::AssetNotFound(Uuid::nil()), 404)]
    #[case(RepoError::GroupNotFound(Uuid::nil()), 404)]
    #[case(RepoError::DuplicateInventoryNumber("INV-1".into()), 409)]
    #[case(RepoError::ConcurrentModification(Uuid::nil()), 409)]
    #[case(RepoError::Valuation(ValuationError::AlreadyDisposed), 422)]
    fn test_error_status_mapping(#[case] err: RepoError, #[case] status: u16) {
        let app: AppError = err.into();
        assert_eq!(app.status_code(), status);
    }

    #[test]
    fn test_conflict_is_retryable() {
        let app: AppError = RepoError::ConcurrentModification(Uuid::nil()).into();
        assert!(app.is_retryable());

        let app: AppError = RepoError::Valuation(ValuationError::AlreadyDisposed).into();
        assert!(!app.is_retryable());
    }
}
