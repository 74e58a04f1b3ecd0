//! The closed set of depreciation methods.

use serde::{Deserialize, Serialize};

/// Depreciation method selected once at asset configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepreciationMethod {
    /// Even write-off over the useful life.
    StraightLine,
    /// Fixed annual percentage of the running book value.
    ReducingBalance,
    /// Reducing balance at double the straight-line rate.
    AcceleratedReducing,
    /// Sum-of-years-digits.
    Cumulative,
    /// Proportional to units produced in the period.
    Production,
}

impl DepreciationMethod {
    /// Stable string form used in the database and on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StraightLine => "straight_line",
            Self::ReducingBalance => "reducing_balance",
            Self::AcceleratedReducing => "accelerated_reducing",
            Self::Cumulative => "cumulative",
            Self::Production => "production",
        }
    }

    /// Returns true if the method needs a per-period units-produced input.
    #[must_use]
    pub const fn needs_production_volume(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for DepreciationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DepreciationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "straight_line" => Ok(Self::StraightLine),
            "reducing_balance" => Ok(Self::ReducingBalance),
            "accelerated_reducing" => Ok(Self::AcceleratedReducing),
            "cumulative" => Ok(Self::Cumulative),
            "production" => Ok(Self::Production),
            other => Err(format!("Unknown depreciation method: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_round_trip_all_methods() {
        for method in [
            DepreciationMethod::StraightLine,
            DepreciationMethod::ReducingBalance,
            DepreciationMethod::AcceleratedReducing,
            DepreciationMethod::Cumulative,
            DepreciationMethod::Production,
        ] {
            assert_eq!(
                DepreciationMethod::from_str(method.as_str()).unwrap(),
                method
            );
        }
    }

    #[test]
    fn test_unknown_method_rejected() {
        assert!(DepreciationMethod::from_str("double_declining").is_err());
    }

    #[test]
    fn test_only_production_needs_volume() {
        assert!(DepreciationMethod::Production.needs_production_volume());
        assert!(!DepreciationMethod::StraightLine.needs_production_volume());
        assert!(!DepreciationMethod::Cumulative.needs_production_volume());
    }
}
