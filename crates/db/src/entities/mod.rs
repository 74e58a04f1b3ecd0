//! `SeaORM` entity definitions for the asset ledger tables.

pub mod account_entries;
pub mod asset_disposals;
pub mod asset_groups;
pub mod asset_improvements;
pub mod asset_receipts;
pub mod asset_revaluations;
pub mod asset_transfers;
pub mod assets;
pub mod audit_log;
pub mod depreciation_records;
pub mod sea_orm_active_enums;
