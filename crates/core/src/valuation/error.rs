//! Valuation error types for setup validation and state transitions.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::AssetStatus;

/// Errors that can occur while validating or mutating asset valuation state.
#[derive(Debug, Error)]
pub enum ValuationError {
    // ========== Validation Errors ==========
    /// Initial cost must be at least 0.01.
    #[error("Initial cost must be at least 0.01, got {0}")]
    InvalidInitialCost(Decimal),

    /// Residual value must lie in [0, initial_cost].
    #[error("Residual value {residual} must be between 0 and the initial cost {cost}")]
    ResidualOutOfRange {
        /// Configured residual value.
        residual: Decimal,
        /// Configured initial cost.
        cost: Decimal,
    },

    /// Incoming depreciation must not exceed the depreciable base.
    #[error("Incoming depreciation {incoming} exceeds the depreciable base {max}")]
    IncomingDepreciationTooLarge {
        /// Configured incoming depreciation.
        incoming: Decimal,
        /// Maximum allowed (initial cost minus residual value).
        max: Decimal,
    },

    /// Useful life must be positive.
    #[error("Useful life must be a positive number of months")]
    NonPositiveUsefulLife,

    /// Depreciation cannot start before commissioning.
    #[error("Depreciation start date cannot be before the commissioning date")]
    DepreciationStartsBeforeCommissioning,

    /// Monetary event amounts must be strictly positive.
    #[error("Amount must be positive, got {0}")]
    AmountNotPositive(Decimal),

    /// Fair value for a revaluation must be at least 0.01.
    #[error("Fair value must be at least 0.01, got {0}")]
    FairValueNotPositive(Decimal),

    // ========== Configuration Errors ==========
    /// The production method requires a positive total capacity.
    #[error("Production method requires a positive total production capacity")]
    ProductionCapacityRequired,

    // ========== State Errors ==========
    /// The operation requires an active asset.
    #[error("Operation requires an active asset, current status is {status}")]
    NotActive {
        /// The asset's current status.
        status: AssetStatus,
    },

    /// The asset has already been disposed; valuation is frozen.
    #[error("Asset is disposed; valuation fields can no longer change")]
    AlreadyDisposed,

    /// Accrual would push accumulated depreciation past the depreciable base.
    #[error("Accrual of {amount} exceeds the remaining depreciable base {remaining}")]
    AccrualExceedsBase {
        /// Requested accrual amount.
        amount: Decimal,
        /// Remaining headroom above the residual floor.
        remaining: Decimal,
    },

    /// Only conserved assets can be reactivated.
    #[error("Only conserved assets can be reactivated, current status is {status}")]
    NotConserved {
        /// The asset's current status.
        status: AssetStatus,
    },
}

impl ValuationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInitialCost(_) => "INVALID_INITIAL_COST",
            Self::ResidualOutOfRange { .. } => "RESIDUAL_OUT_OF_RANGE",
            Self::IncomingDepreciationTooLarge { .. } => "INCOMING_DEPRECIATION_TOO_LARGE",
            Self::NonPositiveUsefulLife => "NON_POSITIVE_USEFUL_LIFE",
            Self::DepreciationStartsBeforeCommissioning => "DEPRECIATION_STARTS_BEFORE_COMMISSIONING",
            Self::AmountNotPositive(_) => "AMOUNT_NOT_POSITIVE",
            Self::FairValueNotPositive(_) => "FAIR_VALUE_NOT_POSITIVE",
            Self::ProductionCapacityRequired => "PRODUCTION_CAPACITY_REQUIRED",
            Self::NotActive { .. } => "ASSET_NOT_ACTIVE",
            Self::AlreadyDisposed => "ASSET_ALREADY_DISPOSED",
            Self::AccrualExceedsBase { .. } => "ACCRUAL_EXCEEDS_BASE",
            Self::NotConserved { .. } => "ASSET_NOT_CONSERVED",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation and configuration errors
            Self::InvalidInitialCost(_)
            | Self::ResidualOutOfRange { .. }
            | Self::IncomingDepreciationTooLarge { .. }
            | Self::NonPositiveUsefulLife
            | Self::DepreciationStartsBeforeCommissioning
            | Self::AmountNotPositive(_)
            | Self::FairValueNotPositive(_)
            | Self::ProductionCapacityRequired => 400,

            // 422 Unprocessable - event not permitted in the current state
            Self::NotActive { .. }
            | Self::AlreadyDisposed
            | Self::AccrualExceedsBase { .. }
            | Self::NotConserved { .. } => 422,
        }
    }
}

impl From<ValuationError> for oblik_shared::AppError {
    fn from(err: ValuationError) -> Self {
        match err.http_status_code() {
            400 => Self::Validation(err.to_string()),
            _ => Self::InvalidState(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validation_errors_are_400() {
        assert_eq!(
            ValuationError::InvalidInitialCost(dec!(0)).http_status_code(),
            400
        );
        assert_eq!(
            ValuationError::ProductionCapacityRequired.http_status_code(),
            400
        );
    }

    #[test]
    fn test_state_errors_are_422() {
        assert_eq!(ValuationError::AlreadyDisposed.http_status_code(), 422);
        assert_eq!(
            ValuationError::NotActive {
                status: AssetStatus::Conserved
            }
            .http_status_code(),
            422
        );
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            ValuationError::AlreadyDisposed.error_code(),
            "ASSET_ALREADY_DISPOSED"
        );
        assert_eq!(
            ValuationError::IncomingDepreciationTooLarge {
                incoming: dec!(10),
                max: dec!(5)
            }
            .error_code(),
            "INCOMING_DEPRECIATION_TOO_LARGE"
        );
    }
}
