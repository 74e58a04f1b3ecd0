//! `SeaORM` Entity for the asset_receipts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ReceiptKind;

/// An asset receipt document.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "asset_receipts")]
pub struct Model {
    /// Record identity.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// The received asset.
    pub asset_id: Uuid,
    /// Receipt classification.
    pub receipt_kind: ReceiptKind,
    /// Document number.
    pub document_number: String,
    /// Document date.
    pub document_date: Date,
    /// Supplier or source, free text.
    pub supplier: Option<String>,
    /// Receipt amount.
    pub amount: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
    /// User who posted the receipt.
    pub created_by: Uuid,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The received asset.
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
