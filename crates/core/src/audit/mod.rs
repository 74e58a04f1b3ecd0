//! Change-set types for the audit collaborator.
//!
//! The engine only produces structured change records; storing, diff
//! formatting, and display are external concerns. Failures to record an
//! audit entry are surfaced to operators but never roll back the financial
//! mutation that produced it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The action recorded against an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Entity created.
    Create,
    /// Entity updated.
    Update,
    /// Asset received into accounting control.
    Receipt,
    /// Asset disposed.
    Disposal,
    /// Depreciation accrued.
    Depreciation,
    /// Asset revalued.
    Revaluation,
    /// Asset improved or repaired.
    Improvement,
    /// Asset transferred between custodians.
    Transfer,
    /// Asset conserved or reactivated.
    StatusChange,
}

impl AuditAction {
    /// Stable string form used in the database and on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Receipt => "receipt",
            Self::Disposal => "disposal",
            Self::Depreciation => "depreciation",
            Self::Revaluation => "revaluation",
            Self::Improvement => "improvement",
            Self::Transfer => "transfer",
            Self::StatusChange => "status_change",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field's before/after pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Field name on the mutated entity.
    pub field: String,
    /// Value before the mutation.
    pub before: Value,
    /// Value after the mutation.
    pub after: Value,
}

/// An ordered collection of field changes for one mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// The recorded field changes.
    pub changes: Vec<FieldChange>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a field change; values that fail to serialize are stored as
    /// their `Debug` representation rather than dropped.
    #[must_use]
    pub fn with<B, A>(mut self, field: &str, before: B, after: A) -> Self
    where
        B: Serialize + std::fmt::Debug,
        A: Serialize + std::fmt::Debug,
    {
        let before = serde_json::to_value(&before).unwrap_or_else(|_| Value::String(format!("{before:?}")));
        let after = serde_json::to_value(&after).unwrap_or_else(|_| Value::String(format!("{after:?}")));
        self.changes.push(FieldChange {
            field: field.to_string(),
            before,
            after,
        });
        self
    }

    /// Records a change only when the values differ.
    #[must_use]
    pub fn with_if_changed<V>(self, field: &str, before: V, after: V) -> Self
    where
        V: Serialize + std::fmt::Debug + PartialEq,
    {
        if before == after {
            self
        } else {
            self.with(field, before, after)
        }
    }

    /// Returns true when no field changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_change_set_records_pairs() {
        let changes = ChangeSet::new()
            .with("status", "active", "disposed")
            .with("book_value", "50000.00", "0.00");

        assert_eq!(changes.changes.len(), 2);
        assert_eq!(changes.changes[0].field, "status");
        assert_eq!(changes.changes[0].before, json!("active"));
        assert_eq!(changes.changes[0].after, json!("disposed"));
    }

    #[test]
    fn test_with_if_changed_skips_equal_values() {
        let changes = ChangeSet::new()
            .with_if_changed("location", "Workshop 1", "Workshop 1")
            .with_if_changed("custodian", "A", "B");

        assert_eq!(changes.changes.len(), 1);
        assert_eq!(changes.changes[0].field, "custodian");
    }

    #[test]
    fn test_action_strings() {
        assert_eq!(AuditAction::Disposal.as_str(), "disposal");
        assert_eq!(AuditAction::StatusChange.as_str(), "status_change");
    }
}
