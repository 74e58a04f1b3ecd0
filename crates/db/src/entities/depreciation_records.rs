//! `SeaORM` Entity for the depreciation_records table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::DepreciationMethod;

/// One period's accrual for one asset. Immutable once created; the table
/// carries a uniqueness constraint on (asset_id, period_year, period_month).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "depreciation_records")]
pub struct Model {
    /// Record identity.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// The depreciated asset.
    pub asset_id: Uuid,
    /// Accrual period year.
    pub period_year: i32,
    /// Accrual period month (1-12).
    pub period_month: i32,
    /// Method in force when the record was created.
    pub depreciation_method: DepreciationMethod,
    /// The accrued amount.
    pub amount: Decimal,
    /// Book value before this accrual.
    pub book_value_before: Decimal,
    /// Book value after this accrual.
    pub book_value_after: Decimal,
    /// Units produced in the period (production method only).
    pub production_volume: Option<Decimal>,
    /// Whether the posting set has been generated.
    pub is_posted: bool,
    /// User who triggered the accrual, when run interactively.
    pub created_by: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The depreciated asset.
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
