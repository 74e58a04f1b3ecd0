//! `SeaORM` Entity for the account_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::EntryKind;

/// One double-entry ledger posting. The table is append-only: a posted
/// entry is never mutated, mistakes are corrected with reversing entries.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "account_entries")]
pub struct Model {
    /// Monotonic entry identity.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Classification by originating event.
    pub entry_kind: EntryKind,
    /// Posting date.
    pub date: Date,
    /// Debit account number.
    pub debit_account: String,
    /// Credit account number.
    pub credit_account: String,
    /// Posted amount, strictly positive.
    pub amount: Decimal,
    /// Human-readable description of the operation.
    pub description: String,
    /// The asset the posting refers to, where applicable.
    pub asset_id: Option<Uuid>,
    /// Source document number.
    pub document_number: Option<String>,
    /// Source document date.
    pub document_date: Option<Date>,
    /// Whether the entry is posted to the journal.
    pub is_posted: bool,
    /// User who produced the entry.
    pub created_by: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The referenced asset.
    #[sea_orm(
        belongs_to = "super::assets::Entity",
        from = "Column::AssetId",
        to = "super::assets::Column::Id"
    )]
    Assets,
}

impl Related<super::assets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
