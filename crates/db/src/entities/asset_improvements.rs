//! `SeaORM` Entity for the asset_improvements table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ImprovementKind;

/// An improvement or repair document.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "asset_improvements")]
pub struct Model {
    /// Record identity.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// The improved asset.
    pub asset_id: Uuid,
    /// Improvement classification.
    pub improvement_kind: ImprovementKind,
    /// Document number.
    pub document_number: String,
    /// Document date.
    pub document_date: Date,
    /// Description of the work performed.
    pub description: String,
    /// Cost of the work.
    pub amount: Decimal,
    /// Contractor, free text.
    pub contractor: Option<String>,
    /// True when the amount was capitalized into initial cost.
    pub increases_value: bool,
    /// Expense account used by the expensed branch.
    pub expense_account: String,
    /// User who posted the improvement.
    pub created_by: Uuid,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The improved asset.
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
