//! Revaluation repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use oblik_core::audit::AuditAction;
use oblik_core::events::{process_revaluation, Outcome, RevaluationInput, RevaluationRecord};
use oblik_shared::types::UserId;

use super::asset::{find_with_group, snapshot_from_models, update_snapshot_cas};
use super::audit::AuditRepository;
use super::entry::insert_drafts;
use super::RepoError;
use crate::entities::asset_revaluations;

/// Revaluation repository.
#[derive(Debug, Clone)]
pub struct RevaluationRepository {
    db: DatabaseConnection,
}

impl RevaluationRepository {
    /// Creates a new revaluation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Revalues an asset to fair value: proportional rescale, revaluation
    /// record, and posting commit together.
    ///
    /// # Errors
    ///
    /// Returns an error when the asset is missing or disposed, the fair
    /// value is invalid, or the compare-and-set loses a race.
    pub async fn post_revaluation(
        &self,
        asset_id: Uuid,
        input: RevaluationInput,
        actor: UserId,
    ) -> Result<Outcome<RevaluationRecord>, RepoError> {
        let (asset, group) = find_with_group(&self.db, asset_id).await?;
        let snapshot = snapshot_from_models(&asset, &group);
        let expected_version = snapshot.version;

        let mut outcome = process_revaluation(&snapshot, input)?;

        let txn = self.db.begin().await?;
        update_snapshot_cas(&txn, &outcome.snapshot, expected_version).await?;
        insert_revaluation(&txn, &outcome.record, actor).await?;
        insert_drafts(&txn, asset_id, &outcome.postings, actor).await?;
        txn.commit().await?;
        outcome.snapshot.version = expected_version + 1;

        info!(
            asset = %outcome.snapshot.inventory_number,
            kind = outcome.record.change.kind.as_str(),
            fair_value = %outcome.record.change.fair_value,
            amount = %outcome.record.change.amount,
            "Asset revalued"
        );

        let audit = AuditRepository::new(self.db.clone());
        audit
            .record_change(
                actor,
                AuditAction::Revaluation,
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

    /// Lists revaluations for one asset, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_asset(
        &self,
        asset_id: Uuid,
    ) -> Result<Vec<asset_revaluations::Model>, RepoError> {
        let revaluations = asset_revaluations::Entity::find()
            .filter(asset_revaluations::Column::AssetId.eq(asset_id))
            .order_by_desc(asset_revaluations::Column::DocumentDate)
            .all(&self.db)
            .await?;
        Ok(revaluations)
    }
}

async fn insert_revaluation<C: sea_orm::ConnectionTrait>(
    conn: &C,
    record: &RevaluationRecord,
    created_by: UserId,
) -> Result<(), RepoError> {
    let row = asset_revaluations::ActiveModel {
        id: Set(record.id.into_inner()),
        asset_id: Set(record.asset_id.into_inner()),
        revaluation_kind: Set(record.change.kind.into()),
        document_number: Set(record.document.number.clone()),
        document_date: Set(record.document.date),
        fair_value: Set(record.change.fair_value),
        old_initial_cost: Set(record.change.old_initial_cost),
        old_depreciation: Set(record.change.old_depreciation),
        old_book_value: Set(record.change.old_book_value),
        new_initial_cost: Set(record.change.new_initial_cost),
        new_depreciation: Set(record.change.new_depreciation),
        new_book_value: Set(record.change.new_book_value),
        revaluation_amount: Set(record.change.amount),
        notes: Set(record.notes.clone()),
        created_by: Set(created_by.into_inner()),
        created_at: Set(chrono::Utc::now().into()),
    };
    row.insert(conn).await?;
    Ok(())
}
