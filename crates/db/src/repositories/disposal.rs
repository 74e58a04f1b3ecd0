//! Disposal repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use oblik_core::audit::AuditAction;
use oblik_core::events::{process_disposal, DisposalInput, DisposalRecord, Outcome};
use oblik_shared::types::UserId;

use super::asset::{find_with_group, snapshot_from_models, update_snapshot_cas};
use super::audit::AuditRepository;
use super::entry::insert_drafts;
use super::RepoError;
use crate::entities::asset_disposals;

/// Disposal repository.
#[derive(Debug, Clone)]
pub struct DisposalRepository {
    db: DatabaseConnection,
}

impl DisposalRepository {
    /// Creates a new disposal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Disposes of an asset: status flip, disposal record, and write-off
    /// postings commit together. Exactly one of two concurrent disposals
    /// can win the version check.
    ///
    /// # Errors
    ///
    /// Returns an error when the asset is missing, not active, already
    /// disposed, or the compare-and-set loses a race.
    pub async fn post_disposal(
        &self,
        asset_id: Uuid,
        input: DisposalInput,
        actor: UserId,
    ) -> Result<Outcome<DisposalRecord>, RepoError> {
        let (asset, group) = find_with_group(&self.db, asset_id).await?;
        let snapshot = snapshot_from_models(&asset, &group);
        let expected_version = snapshot.version;

        let mut outcome = process_disposal(&snapshot, input)?;

        let txn = self.db.begin().await?;
        update_snapshot_cas(&txn, &outcome.snapshot, expected_version).await?;
        insert_disposal(&txn, &outcome.record, actor).await?;
        insert_drafts(&txn, asset_id, &outcome.postings, actor).await?;
        txn.commit().await?;
        outcome.snapshot.version = expected_version + 1;

        info!(
            asset = %outcome.snapshot.inventory_number,
            kind = outcome.record.kind.as_str(),
            book_value = %outcome.record.book_value_at_disposal,
            gain_loss = %outcome.record.gain_loss,
            "Asset disposed"
        );

        let audit = AuditRepository::new(self.db.clone());
        audit
            .record_change(
                actor,
                AuditAction::Disposal,
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

    /// Lists disposals for one asset, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_asset(
        &self,
        asset_id: Uuid,
    ) -> Result<Vec<asset_disposals::Model>, RepoError> {
        let disposals = asset_disposals::Entity::find()
            .filter(asset_disposals::Column::AssetId.eq(asset_id))
            .order_by_desc(asset_disposals::Column::DocumentDate)
            .all(&self.db)
            .await?;
        Ok(disposals)
    }
}

async fn insert_disposal<C: sea_orm::ConnectionTrait>(
    conn: &C,
    record: &DisposalRecord,
    created_by: UserId,
) -> Result<(), RepoError> {
    let row = asset_disposals::ActiveModel {
        id: Set(record.id.into_inner()),
        asset_id: Set(record.asset_id.into_inner()),
        disposal_kind: Set(record.kind.into()),
        document_number: Set(record.document.number.clone()),
        document_date: Set(record.document.date),
        reason: Set(record.reason.clone()),
        sale_amount: Set(record.sale_amount),
        book_value_at_disposal: Set(record.book_value_at_disposal),
        accumulated_depreciation_at_disposal: Set(record.accumulated_at_disposal),
        gain_loss: Set(record.gain_loss),
        created_by: Set(created_by.into_inner()),
        created_at: Set(chrono::Utc::now().into()),
    };
    row.insert(conn).await?;
    Ok(())
}
