//! Depreciation strategy error types.

use thiserror::Error;

use super::method::DepreciationMethod;

/// Errors raised while computing a monthly depreciation amount.
#[derive(Debug, Error)]
pub enum DepreciationError {
    /// The production method requires a positive total capacity.
    #[error("Production method requires a positive total production capacity")]
    MissingProductionCapacity,

    /// The production method requires the units produced in the period.
    #[error("Production method requires the units produced for the period")]
    MissingProductionVolume,

    /// A configured annual rate must be a percentage in (0, 100].
    #[error("Depreciation rate must be between 0 and 100 percent, got {0}")]
    InvalidRate(rust_decimal::Decimal),

    /// The method cannot run with a non-positive useful life.
    #[error("Method {method} requires a positive useful life in months")]
    NonPositiveLife {
        /// The configured method.
        method: DepreciationMethod,
    },
}

impl DepreciationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingProductionCapacity => "MISSING_PRODUCTION_CAPACITY",
            Self::MissingProductionVolume => "MISSING_PRODUCTION_VOLUME",
            Self::InvalidRate(_) => "INVALID_DEPRECIATION_RATE",
            Self::NonPositiveLife { .. } => "NON_POSITIVE_USEFUL_LIFE",
        }
    }
}

impl From<DepreciationError> for oblik_shared::AppError {
    fn from(err: DepreciationError) -> Self {
        Self::Configuration(err.to_string())
    }
}
