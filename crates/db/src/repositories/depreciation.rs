//! Depreciation repository: the batch accrual run and the record
//! projections.
//!
//! The batch processes the eligible asset population with a bounded
//! number of concurrent workers. Each asset commits independently, so a
//! cancelled or partially failed run never corrupts state: per-asset
//! failures land in the summary's error list and the rest of the batch
//! proceeds.

use std::collections::HashMap;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{info, warn};
use uuid::Uuid;

use oblik_core::accrual::{plan_accrual, AccrualDecision, AssetRunError, RunSummary};
use oblik_core::audit::{AuditAction, ChangeSet};
use oblik_core::posting::{accounts, depreciation_entries};
use oblik_shared::types::{Period, UserId};

use super::asset::{snapshot_from_models, update_snapshot_cas};
use super::audit::AuditRepository;
use super::entry::insert_drafts;
use super::RepoError;
use crate::entities::{asset_groups, assets, depreciation_records};
use crate::entities::sea_orm_active_enums::AssetStatus;

/// Input for one batch accrual run.
#[derive(Debug, Clone)]
pub struct RunAccrualInput {
    /// Target period.
    pub period: Period,
    /// Restrict the run to these assets; empty means the whole population.
    pub asset_ids: Vec<Uuid>,
    /// Units produced per asset for the period (production method).
    pub production_volumes: HashMap<Uuid, Decimal>,
    /// Expense account to debit; defaults to administrative expenses.
    pub expense_account: Option<String>,
}

/// The per-period projection over depreciation records.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PeriodSummary {
    /// Target period year.
    pub year: i32,
    /// Target period month.
    pub month: u32,
    /// Total accrued amount over the period.
    pub total_amount: Decimal,
    /// Number of records in the period.
    pub records_count: u64,
    /// The records themselves.
    pub records: Vec<depreciation_records::Model>,
}

enum AssetOutcome {
    Created { amount: Decimal },
    Skipped,
    Failed(AssetRunError),
}

/// Depreciation repository.
#[derive(Debug, Clone)]
pub struct DepreciationRepository {
    db: DatabaseConnection,
    workers: usize,
}

impl DepreciationRepository {
    /// Creates a new depreciation repository with the given worker bound
    /// for batch runs.
    #[must_use]
    pub const fn new(db: DatabaseConnection, workers: usize) -> Self {
        Self { db, workers }
    }

    /// Runs accrual for the target period over every eligible asset.
    ///
    /// Idempotent: assets already recorded for the period are skipped.
    /// Per-asset failures are collected, never fatal to the batch.
    ///
    /// # Errors
    ///
    /// Returns an error only when the asset population cannot be loaded;
    /// everything downstream is per-asset and lands in the summary.
    pub async fn run_accrual(
        &self,
        input: RunAccrualInput,
        actor: UserId,
    ) -> Result<RunSummary, RepoError> {
        let mut query = assets::Entity::find()
            .filter(assets::Column::Status.eq(AssetStatus::Active));
        if !input.asset_ids.is_empty() {
            query = query.filter(assets::Column::Id.is_in(input.asset_ids.clone()));
        }
        let population = query
            .find_also_related(asset_groups::Entity)
            .all(&self.db)
            .await?;

        let expense_account = input
            .expense_account
            .unwrap_or_else(|| accounts::DEFAULT_DEPRECIATION_EXPENSE.to_string());
        let period = input.period;

        info!(
            %period,
            assets = population.len(),
            workers = self.workers,
            "Starting accrual run"
        );

        let outcomes = stream::iter(population)
            .map(|(asset, group)| {
                let db = self.db.clone();
                let expense_account = expense_account.clone();
                let volume = input.production_volumes.get(&asset.id).copied();
                async move {
                    accrue_one(&db, asset, group, period, volume, &expense_account, actor).await
                }
            })
            .buffer_unordered(self.workers.max(1))
            .collect::<Vec<_>>()
            .await;

        let mut summary = RunSummary::for_period(period);
        for outcome in outcomes {
            match outcome {
                AssetOutcome::Created { amount } => summary.record_created(amount),
                AssetOutcome::Skipped => summary.record_skipped(),
                AssetOutcome::Failed(error) => summary.record_error(error),
            }
        }

        info!(
            %period,
            created = summary.created,
            skipped = summary.skipped,
            failed = summary.errors.len(),
            total = %summary.total_amount,
            "Accrual run finished"
        );

        Ok(summary)
    }

    /// Lists depreciation records for one asset, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_asset(
        &self,
        asset_id: Uuid,
    ) -> Result<Vec<depreciation_records::Model>, RepoError> {
        let records = depreciation_records::Entity::find()
            .filter(depreciation_records::Column::AssetId.eq(asset_id))
            .order_by_desc(depreciation_records::Column::PeriodYear)
            .order_by_desc(depreciation_records::Column::PeriodMonth)
            .all(&self.db)
            .await?;
        Ok(records)
    }

    /// The consolidated accrual statement for one period.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn summary(&self, period: Period) -> Result<PeriodSummary, RepoError> {
        let records = depreciation_records::Entity::find()
            .filter(depreciation_records::Column::PeriodYear.eq(period.year))
            .filter(depreciation_records::Column::PeriodMonth.eq(i32::try_from(period.month).unwrap_or(1)))
            .all(&self.db)
            .await?;

        let total_amount = records.iter().map(|r| r.amount).sum();

        Ok(PeriodSummary {
            year: period.year,
            month: period.month,
            total_amount,
            records_count: records.len() as u64,
            records,
        })
    }
}

/// Accrues one asset for one period, committing independently.
async fn accrue_one(
    db: &DatabaseConnection,
    asset: assets::Model,
    group: Option<asset_groups::Model>,
    period: Period,
    production_volume: Option<Decimal>,
    expense_account: &str,
    actor: UserId,
) -> AssetOutcome {
    let asset_id = asset.id;
    let inventory_number = asset.inventory_number.clone();

    let Some(group) = group else {
        return AssetOutcome::Failed(AssetRunError {
            asset_id: oblik_shared::types::AssetId::from_uuid(asset_id),
            inventory_number,
            code: "GROUP_NOT_FOUND".to_string(),
            message: format!("Asset group {} not found", asset.group_id),
        });
    };

    let snapshot = snapshot_from_models(&asset, &group);
    let expected_version = snapshot.version;

    let result: Result<AssetOutcome, RepoError> = async {
        let already_recorded = depreciation_records::Entity::find()
            .filter(depreciation_records::Column::AssetId.eq(asset_id))
            .filter(depreciation_records::Column::PeriodYear.eq(period.year))
            .filter(
                depreciation_records::Column::PeriodMonth
                    .eq(i32::try_from(period.month).unwrap_or(1)),
            )
            .one(db)
            .await?
            .is_some();

        let plan = match plan_accrual(&snapshot, period, production_volume, already_recorded)? {
            AccrualDecision::Skip(_) => return Ok(AssetOutcome::Skipped),
            AccrualDecision::Accrue(plan) => plan,
        };

        let mut updated = snapshot.clone();
        updated.apply_accrual(plan.record.amount, plan.record.production_volume)?;

        let txn = db.begin().await?;
        update_snapshot_cas(&txn, &updated, expected_version).await?;

        let row = depreciation_records::ActiveModel {
            id: Set(plan.record.id.into_inner()),
            asset_id: Set(asset_id),
            period_year: Set(period.year),
            period_month: Set(i32::try_from(period.month).unwrap_or(1)),
            depreciation_method: Set(plan.record.method.into()),
            amount: Set(plan.record.amount),
            book_value_before: Set(plan.record.book_value_before),
            book_value_after: Set(plan.record.book_value_after),
            production_volume: Set(plan.record.production_volume),
            is_posted: Set(true),
            created_by: Set(Some(actor.into_inner())),
            created_at: Set(Utc::now().into()),
        };
        row.insert(&txn).await?;

        let postings = depreciation_entries(&updated, &plan.record, expense_account);
        insert_drafts(&txn, asset_id, &postings, actor).await?;
        txn.commit().await?;

        let audit = AuditRepository::new(db.clone());
        let changes = ChangeSet::new()
            .with(
                "book_value",
                plan.record.book_value_before,
                plan.record.book_value_after,
            )
            .with("period", serde_json::Value::Null, period.to_string());
        audit
            .record_change(
                actor,
                AuditAction::Depreciation,
                "depreciation_record",
                plan.record.id.into_inner(),
                &format!(
                    "{} - {} - {}",
                    updated.inventory_number, period, plan.record.amount
                ),
                &changes,
            )
            .await;

        Ok(AssetOutcome::Created {
            amount: plan.record.amount,
        })
    }
    .await;

    match result {
        Ok(outcome) => outcome,
        // A concurrent run already recorded this period; idempotent skip.
        Err(RepoError::Database(err))
            if err.to_string().contains("depreciation_records_one_per_period") =>
        {
            AssetOutcome::Skipped
        }
        Err(err) => {
            warn!(
                asset = %inventory_number,
                %period,
                error = %err,
                "Accrual failed for asset"
            );
            let code = match &err {
                RepoError::Valuation(inner) => inner.error_code(),
                RepoError::Accrual(inner) => inner.error_code(),
                RepoError::ConcurrentModification(_) => "CONCURRENT_MODIFICATION",
                _ => "DATABASE_ERROR",
            };
            AssetOutcome::Failed(AssetRunError {
                asset_id: oblik_shared::types::AssetId::from_uuid(asset_id),
                inventory_number,
                code: code.to_string(),
                message: err.to_string(),
            })
        }
    }
}
