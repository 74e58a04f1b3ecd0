//! `SeaORM` Entity for the asset_groups table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Asset group with its statutory ledger account pair.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "asset_groups")]
pub struct Model {
    /// Group identity.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Statutory group code (unique).
    #[sea_orm(unique)]
    pub code: String,
    /// Group name.
    pub name: String,
    /// Minimum useful life in months per the tax code; null means
    /// unrestricted.
    pub min_useful_life_months: Option<i32>,
    /// Asset balance account (10x).
    pub account_number: String,
    /// Accumulated depreciation account (13x).
    pub depreciation_account: String,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Assets in this group.
    #[sea_orm(has_many = "super::assets::Entity")]
    Assets,
}

impl Related<super::assets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
