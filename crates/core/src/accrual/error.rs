//! Accrual error types.

use thiserror::Error;

use oblik_shared::types::Period;

use crate::depreciation::DepreciationError;
use crate::valuation::ValuationError;

/// Errors raised while planning or applying one asset's accrual.
#[derive(Debug, Error)]
pub enum AccrualError {
    /// The method configuration is unusable for this asset.
    #[error(transparent)]
    Method(#[from] DepreciationError),

    /// The snapshot rejected the accrual.
    #[error(transparent)]
    Valuation(#[from] ValuationError),

    /// A record for this (asset, period) already exists.
    #[error("Depreciation for {period} has already been recorded")]
    PeriodAlreadyRecorded {
        /// The duplicated period.
        period: Period,
    },
}

impl AccrualError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Method(err) => err.error_code(),
            Self::Valuation(err) => err.error_code(),
            Self::PeriodAlreadyRecorded { .. } => "PERIOD_ALREADY_RECORDED",
        }
    }
}

impl From<AccrualError> for oblik_shared::AppError {
    fn from(err: AccrualError) -> Self {
        match err {
            AccrualError::Method(inner) => inner.into(),
            AccrualError::Valuation(inner) => inner.into(),
            AccrualError::PeriodAlreadyRecorded { period } => Self::InvalidState(format!(
                "Depreciation for {period} has already been recorded"
            )),
        }
    }
}
