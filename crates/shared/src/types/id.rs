//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing an `AssetId` where a
//! `ReceiptId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(AssetId, "Unique identifier for a fixed asset.");
typed_id!(GroupId, "Unique identifier for an asset group.");
typed_id!(ReceiptId, "Unique identifier for an asset receipt.");
typed_id!(DisposalId, "Unique identifier for an asset disposal.");
typed_id!(RevaluationId, "Unique identifier for an asset revaluation.");
typed_id!(ImprovementId, "Unique identifier for an asset improvement.");
typed_id!(TransferId, "Unique identifier for an asset transfer.");
typed_id!(
    DepreciationRecordId,
    "Unique identifier for a depreciation record."
);
typed_id!(AccountEntryId, "Unique identifier for a ledger posting.");
typed_id!(AuditRecordId, "Unique identifier for an audit log record.");
typed_id!(UserId, "Unique identifier for an acting user.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(AssetId::new(), AssetId::new());
    }

    #[test]
    fn test_round_trip_through_string() {
        let id = AssetId::new();
        let parsed = AssetId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_from_uuid_preserves_value() {
        let uuid = Uuid::now_v7();
        assert_eq!(ReceiptId::from_uuid(uuid).into_inner(), uuid);
    }

    #[test]
    fn test_invalid_string_rejected() {
        assert!(AssetId::from_str("not-a-uuid").is_err());
    }
}
