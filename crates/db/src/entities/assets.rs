//! `SeaORM` Entity for the assets table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{AssetStatus, DepreciationMethod};

/// The authoritative valuation row for one asset.
///
/// The `version` column drives optimistic per-asset concurrency control:
/// every mutation is a compare-and-set on (id, version).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    /// Asset identity.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Inventory number, unique and immutable once issued.
    #[sea_orm(unique)]
    pub inventory_number: String,
    /// Human-readable name.
    pub name: String,
    /// Owning group.
    pub group_id: Uuid,
    /// Lifecycle status.
    pub status: AssetStatus,
    /// Initial (gross) cost.
    pub initial_cost: Decimal,
    /// Residual (salvage) value.
    pub residual_value: Decimal,
    /// Depreciation accrued before this system took custody.
    pub incoming_depreciation: Decimal,
    /// Accumulated depreciation to date.
    pub accumulated_depreciation: Decimal,
    /// Current book value, maintained alongside the components.
    pub current_book_value: Decimal,
    /// Configured depreciation method.
    pub depreciation_method: DepreciationMethod,
    /// Useful life in months.
    pub useful_life_months: i32,
    /// Optional annual depreciation rate in percent.
    pub depreciation_rate: Option<Decimal>,
    /// Total production capacity (production method only).
    pub total_production_capacity: Option<Decimal>,
    /// Units produced to date (production method only).
    pub units_produced_to_date: Decimal,
    /// Date the asset entered service.
    pub commissioning_date: Date,
    /// First period eligible for accrual.
    pub depreciation_start_date: Date,
    /// Date of disposal, once disposed.
    pub disposal_date: Option<Date>,
    /// Current location.
    pub location: Option<String>,
    /// Materially responsible person.
    pub custodian: Option<String>,
    /// Optimistic concurrency version.
    pub version: i64,
    /// User who created the asset.
    pub created_by: Uuid,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The owning group.
    #[sea_orm(
        belongs_to = "super::asset_groups::Entity",
        from = "Column::GroupId",
        to = "super::asset_groups::Column::Id"
    )]
    AssetGroups,
    /// Depreciation records for this asset.
    #[sea_orm(has_many = "super::depreciation_records::Entity")]
    DepreciationRecords,
    /// Ledger postings referencing this asset.
    #[sea_orm(has_many = "super::account_entries::Entity")]
    AccountEntries,
}

impl Related<super::asset_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssetGroups.def()
    }
}

impl Related<super::depreciation_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DepreciationRecords.def()
    }
}

impl Related<super::account_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
