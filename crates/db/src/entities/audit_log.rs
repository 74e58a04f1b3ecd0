//! `SeaORM` Entity for the audit_log table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::AuditAction;

/// One audit record: who did what to which entity, with the field-level
/// change set as JSON.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_log")]
pub struct Model {
    /// Monotonic record identity.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The acting user.
    pub actor: Uuid,
    /// The recorded action.
    pub action: AuditAction,
    /// Entity type name, e.g. "asset" or "depreciation_record".
    pub entity_type: String,
    /// The mutated entity's id.
    pub entity_id: Uuid,
    /// Human-readable representation of the entity.
    pub entity_repr: String,
    /// Field-level before/after pairs.
    pub changes: Json,
    /// Record timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
