//! Receipt repository: registers an asset and posts its receipt as one
//! atomic unit.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use oblik_core::audit::AuditAction;
use oblik_core::depreciation::DepreciationMethod;
use oblik_core::events::{process_receipt, Outcome, ReceiptInput, ReceiptRecord};
use oblik_core::valuation::{AssetInput, GroupAccounts};
use oblik_shared::types::{GroupId, UserId};

use super::asset::insert_snapshot;
use super::audit::AuditRepository;
use super::entry::insert_drafts;
use super::RepoError;
use crate::entities::{asset_groups, asset_receipts, assets};

/// Everything needed to take a new asset into accounting control.
#[derive(Debug, Clone)]
pub struct NewAssetReceipt {
    /// Unique inventory number.
    pub inventory_number: String,
    /// Human-readable name.
    pub name: String,
    /// Owning group.
    pub group_id: Uuid,
    /// Initial (gross) cost.
    pub initial_cost: Decimal,
    /// Residual (salvage) value.
    pub residual_value: Decimal,
    /// Depreciation accrued before this system took custody.
    pub incoming_depreciation: Decimal,
    /// Configured depreciation method.
    pub method: DepreciationMethod,
    /// Useful life in months.
    pub useful_life_months: u32,
    /// Optional annual depreciation rate in percent.
    pub depreciation_rate: Option<Decimal>,
    /// Total production capacity (production method only).
    pub total_production_capacity: Option<Decimal>,
    /// Date the asset entered service.
    pub commissioning_date: NaiveDate,
    /// First period eligible for accrual.
    pub depreciation_start_date: NaiveDate,
    /// Initial location.
    pub location: Option<String>,
    /// Initial custodian.
    pub custodian: Option<String>,
    /// The receipt document.
    pub receipt: ReceiptInput,
}

/// Receipt repository.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    db: DatabaseConnection,
}

impl ReceiptRepository {
    /// Creates a new receipt repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Takes a new asset into accounting control: snapshot, receipt
    /// record, and capitalization posting commit together.
    ///
    /// # Errors
    ///
    /// Returns an error when the inventory number is taken, the group is
    /// unknown, or the core validation rejects the configuration.
    pub async fn post_receipt(
        &self,
        input: NewAssetReceipt,
        actor: UserId,
    ) -> Result<Outcome<ReceiptRecord>, RepoError> {
        let existing = assets::Entity::find()
            .filter(assets::Column::InventoryNumber.eq(&input.inventory_number))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(RepoError::DuplicateInventoryNumber(input.inventory_number));
        }

        let group = asset_groups::Entity::find_by_id(input.group_id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::GroupNotFound(input.group_id))?;

        let asset_input = AssetInput {
            inventory_number: input.inventory_number,
            name: input.name,
            group: GroupAccounts {
                id: GroupId::from_uuid(group.id),
                code: group.code,
                asset_account: group.account_number,
                depreciation_account: group.depreciation_account,
            },
            initial_cost: input.initial_cost,
            residual_value: input.residual_value,
            incoming_depreciation: input.incoming_depreciation,
            method: input.method,
            useful_life_months: input.useful_life_months,
            depreciation_rate: input.depreciation_rate,
            total_production_capacity: input.total_production_capacity,
            commissioning_date: input.commissioning_date,
            depreciation_start_date: input.depreciation_start_date,
            location: input.location,
            custodian: input.custodian,
        };

        let outcome = process_receipt(asset_input, input.receipt)?;

        let txn = self.db.begin().await?;
        insert_snapshot(&txn, &outcome.snapshot, actor).await?;
        insert_receipt(&txn, &outcome.record, actor).await?;
        insert_drafts(&txn, outcome.snapshot.id.into_inner(), &outcome.postings, actor).await?;
        txn.commit().await?;

        info!(
            asset = %outcome.snapshot.inventory_number,
            amount = %outcome.record.amount,
            "Asset received"
        );

        let audit = AuditRepository::new(self.db.clone());
        audit
            .record_change(
                actor,
                AuditAction::Receipt,
                "asset",
                outcome.snapshot.id.into_inner(),
                &format!(
                    "{} - {}",
                    outcome.snapshot.inventory_number, outcome.snapshot.name
                ),
                &outcome.changes,
            )
            .await;

        Ok(outcome)
    }

    /// Lists receipts for one asset, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_asset(
        &self,
        asset_id: Uuid,
    ) -> Result<Vec<asset_receipts::Model>, RepoError> {
        let receipts = asset_receipts::Entity::find()
            .filter(asset_receipts::Column::AssetId.eq(asset_id))
            .order_by_desc(asset_receipts::Column::DocumentDate)
            .all(&self.db)
            .await?;
        Ok(receipts)
    }
}

async fn insert_receipt<C: sea_orm::ConnectionTrait>(
    conn: &C,
    record: &ReceiptRecord,
    created_by: UserId,
) -> Result<(), RepoError> {
    let row = asset_receipts::ActiveModel {
        id: Set(record.id.into_inner()),
        asset_id: Set(record.asset_id.into_inner()),
        receipt_kind: Set(record.kind.into()),
        document_number: Set(record.document.number.clone()),
        document_date: Set(record.document.date),
        supplier: Set(record.supplier.clone()),
        amount: Set(record.amount),
        notes: Set(record.notes.clone()),
        created_by: Set(created_by.into_inner()),
        created_at: Set(Utc::now().into()),
    };
    row.insert(conn).await?;
    Ok(())
}
