//! Improvement repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use oblik_core::audit::AuditAction;
use oblik_core::events::{process_improvement, ImprovementInput, ImprovementRecord, Outcome};
use oblik_shared::types::UserId;

use super::asset::{find_with_group, snapshot_from_models, update_snapshot_cas};
use super::audit::AuditRepository;
use super::entry::insert_drafts;
use super::RepoError;
use crate::entities::asset_improvements;

/// Improvement repository.
#[derive(Debug, Clone)]
pub struct ImprovementRepository {
    db: DatabaseConnection,
}

impl ImprovementRepository {
    /// Creates a new improvement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an improvement or repair: optional capitalization, the
    /// improvement record, and the posting commit together.
    ///
    /// # Errors
    ///
    /// Returns an error when the asset is missing or disposed, the amount
    /// is invalid, or the compare-and-set loses a race.
    pub async fn post_improvement(
        &self,
        asset_id: Uuid,
        input: ImprovementInput,
        actor: UserId,
    ) -> Result<Outcome<ImprovementRecord>, RepoError> {
        let (asset, group) = find_with_group(&self.db, asset_id).await?;
        let snapshot = snapshot_from_models(&asset, &group);
        let expected_version = snapshot.version;

        let mut outcome = process_improvement(&snapshot, input)?;

        let txn = self.db.begin().await?;
        update_snapshot_cas(&txn, &outcome.snapshot, expected_version).await?;
        insert_improvement(&txn, &outcome.record, actor).await?;
        insert_drafts(&txn, asset_id, &outcome.postings, actor).await?;
        txn.commit().await?;
        outcome.snapshot.version = expected_version + 1;

        info!(
            asset = %outcome.snapshot.inventory_number,
            kind = outcome.record.kind.as_str(),
            amount = %outcome.record.amount,
            capitalized = outcome.record.increases_value,
            "Improvement recorded"
        );

        let audit = AuditRepository::new(self.db.clone());
        audit
            .record_change(
                actor,
                AuditAction::Improvement,
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

    /// Lists improvements for one asset, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_asset(
        &self,
        asset_id: Uuid,
    ) -> Result<Vec<asset_improvements::Model>, RepoError> {
        let improvements = asset_improvements::Entity::find()
            .filter(asset_improvements::Column::AssetId.eq(asset_id))
            .order_by_desc(asset_improvements::Column::DocumentDate)
            .all(&self.db)
            .await?;
        Ok(improvements)
    }
}

async fn insert_improvement<C: sea_orm::ConnectionTrait>(
    conn: &C,
    record: &ImprovementRecord,
    created_by: UserId,
) -> Result<(), RepoError> {
    let row = asset_improvements::ActiveModel {
        id: Set(record.id.into_inner()),
        asset_id: Set(record.asset_id.into_inner()),
        improvement_kind: Set(record.kind.into()),
        document_number: Set(record.document.number.clone()),
        document_date: Set(record.document.date),
        description: Set(record.description.clone()),
        amount: Set(record.amount),
        contractor: Set(record.contractor.clone()),
        increases_value: Set(record.increases_value),
        expense_account: Set(record.expense_account.clone()),
        created_by: Set(created_by.into_inner()),
        created_at: Set(chrono::Utc::now().into()),
    };
    row.insert(conn).await?;
    Ok(())
}
