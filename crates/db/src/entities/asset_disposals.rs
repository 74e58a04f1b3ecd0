//! `SeaORM` Entity for the asset_disposals table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::DisposalKind;

/// An asset disposal document with the valuation captured at write-off.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "asset_disposals")]
pub struct Model {
    /// Record identity.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// The disposed asset.
    pub asset_id: Uuid,
    /// Disposal classification.
    pub disposal_kind: DisposalKind,
    /// Document number.
    pub document_number: String,
    /// Document date.
    pub document_date: Date,
    /// Reason for disposal.
    pub reason: String,
    /// Sale proceeds (zero for non-sale disposals).
    pub sale_amount: Decimal,
    /// Book value written off.
    pub book_value_at_disposal: Decimal,
    /// Accumulated depreciation written off.
    pub accumulated_depreciation_at_disposal: Decimal,
    /// Gain (positive) or loss (negative) on sale.
    pub gain_loss: Decimal,
    /// User who posted the disposal.
    pub created_by: Uuid,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The disposed asset.
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
