//! `SeaORM` Entity for the asset_revaluations table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::RevaluationKind;

/// A revaluation document with the full before/after valuation triplets.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "asset_revaluations")]
pub struct Model {
    /// Record identity.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// The revalued asset.
    pub asset_id: Uuid,
    /// Upward or downward.
    pub revaluation_kind: RevaluationKind,
    /// Document number.
    pub document_number: String,
    /// Document date.
    pub document_date: Date,
    /// Appraised fair value.
    pub fair_value: Decimal,
    /// Initial cost before the revaluation.
    pub old_initial_cost: Decimal,
    /// Accumulated depreciation before the revaluation.
    pub old_depreciation: Decimal,
    /// Book value before the revaluation.
    pub old_book_value: Decimal,
    /// Initial cost after the rescale.
    pub new_initial_cost: Decimal,
    /// Accumulated depreciation after the rescale.
    pub new_depreciation: Decimal,
    /// Book value after the rescale.
    pub new_book_value: Decimal,
    /// Signed change in book value.
    pub revaluation_amount: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
    /// User who posted the revaluation.
    pub created_by: Uuid,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The revalued asset.
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
