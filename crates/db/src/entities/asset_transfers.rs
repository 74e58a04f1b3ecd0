//! `SeaORM` Entity for the asset_transfers table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An internal transfer document. Custody-only; valuation is untouched.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "asset_transfers")]
pub struct Model {
    /// Record identity.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// The transferred asset.
    pub asset_id: Uuid,
    /// Document number.
    pub document_number: String,
    /// Document date.
    pub document_date: Date,
    /// Location before the transfer.
    pub from_location: Option<String>,
    /// Location after the transfer.
    pub to_location: Option<String>,
    /// Custodian before the transfer.
    pub from_custodian: Option<String>,
    /// Custodian after the transfer.
    pub to_custodian: Option<String>,
    /// Book value at the moment of transfer.
    pub book_value: Decimal,
    /// Free-text reason.
    pub reason: Option<String>,
    /// User who posted the transfer.
    pub created_by: Uuid,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The transferred asset.
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
