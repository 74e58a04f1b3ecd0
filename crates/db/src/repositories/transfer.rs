//! Transfer repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use oblik_core::audit::AuditAction;
use oblik_core::events::{process_transfer, Outcome, TransferInput, TransferRecord};
use oblik_shared::types::UserId;

use super::asset::{find_with_group, snapshot_from_models, update_snapshot_cas};
use super::audit::AuditRepository;
use super::entry::insert_drafts;
use super::RepoError;
use crate::entities::asset_transfers;

/// Transfer repository.
#[derive(Debug, Clone)]
pub struct TransferRepository {
    db: DatabaseConnection,
}

impl TransferRepository {
    /// Creates a new transfer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Moves an asset between locations/custodians. Valuation is
    /// untouched; the reference entry and custody record commit together.
    ///
    /// # Errors
    ///
    /// Returns an error when the asset is missing or disposed, or the
    /// compare-and-set loses a race.
    pub async fn post_transfer(
        &self,
        asset_id: Uuid,
        input: TransferInput,
        actor: UserId,
    ) -> Result<Outcome<TransferRecord>, RepoError> {
        let (asset, group) = find_with_group(&self.db, asset_id).await?;
        let snapshot = snapshot_from_models(&asset, &group);
        let expected_version = snapshot.version;

        let mut outcome = process_transfer(&snapshot, input)?;

        let txn = self.db.begin().await?;
        update_snapshot_cas(&txn, &outcome.snapshot, expected_version).await?;
        insert_transfer(&txn, &outcome.record, actor).await?;
        insert_drafts(&txn, asset_id, &outcome.postings, actor).await?;
        txn.commit().await?;
        outcome.snapshot.version = expected_version + 1;

        info!(
            asset = %outcome.snapshot.inventory_number,
            to_location = outcome.record.change.to_location.as_deref().unwrap_or("-"),
            "Asset transferred"
        );

        let audit = AuditRepository::new(self.db.clone());
        audit
            .record_change(
                actor,
                AuditAction::Transfer,
                "asset",
                asset_id,
                &format!(
                    "{} - {}",
                    outcome.snapshot.inventory_number, outcome.snapshot.name
                ),
                &outcome.changes,
            )
            .await;

        Ok(outcome)
    }

    /// Lists transfers for one asset, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_asset(
        &self,
        asset_id: Uuid,
    ) -> Result<Vec<asset_transfers::Model>, RepoError> {
        let transfers = asset_transfers::Entity::find()
            .filter(asset_transfers::Column::AssetId.eq(asset_id))
            .order_by_desc(asset_transfers::Column::DocumentDate)
            .all(&self.db)
            .await?;
        Ok(transfers)
    }
}

async fn insert_transfer<C: sea_orm::ConnectionTrait>(
    conn: &C,
    record: &TransferRecord,
    created_by: UserId,
) -> Result<(), RepoError> {
    let row = asset_transfers::ActiveModel {
        id: Set(record.id.into_inner()),
        asset_id: Set(record.asset_id.into_inner()),
        document_number: Set(record.document.number.clone()),
        document_date: Set(record.document.date),
        from_location: Set(record.change.from_location.clone()),
        to_location: Set(record.change.to_location.clone()),
        from_custodian: Set(record.change.from_custodian.clone()),
        to_custodian: Set(record.change.to_custodian.clone()),
        book_value: Set(record.change.book_value),
        reason: Set(record.reason.clone()),
        created_by: Set(created_by.into_inner()),
        created_at: Set(chrono::Utc::now().into()),
    };
    row.insert(conn).await?;
    Ok(())
}
