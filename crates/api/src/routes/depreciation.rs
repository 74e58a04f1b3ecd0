//! Depreciation routes: the batch accrual run and period projections.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oblik_db::repositories::depreciation::{DepreciationRepository, RunAccrualInput};
use oblik_shared::types::Period;

use crate::error::ApiError;
use crate::extractors::Actor;
use crate::AppState;

/// Creates the depreciation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/depreciation/runs", post(run_accrual))
        .route("/depreciation/summary", get(period_summary))
        .route("/depreciation/records", get(list_records))
}

/// Request body for a batch accrual run.
#[derive(Debug, Deserialize)]
pub struct RunAccrualRequest {
    /// Target period year.
    pub year: i32,
    /// Target period month (1-12).
    pub month: u32,
    /// Restrict the run to these assets; empty means all active assets.
    #[serde(default)]
    pub asset_ids: Vec<Uuid>,
    /// Units produced per asset for the period (production method).
    #[serde(default)]
    pub production_volumes: HashMap<Uuid, Decimal>,
    /// Expense account to debit; defaults to administrative expenses.
    pub expense_account: Option<String>,
}

/// Response for a batch accrual run: the partial-success contract.
#[derive(Debug, Serialize)]
pub struct RunAccrualResponse {
    /// Target period, `MM.YYYY`.
    pub period: String,
    /// Number of records created.
    pub created: u64,
    /// Number of assets skipped without error.
    pub skipped: u64,
    /// Total accrued amount.
    pub total_amount: String,
    /// Per-asset failures.
    pub errors: Vec<RunErrorResponse>,
}

/// One asset's failure inside a batch run.
#[derive(Debug, Serialize)]
pub struct RunErrorResponse {
    /// The failing asset.
    pub asset_id: Uuid,
    /// Its inventory number.
    pub inventory_number: String,
    /// Stable error code.
    pub code: String,
    /// Human-readable reason.
    pub message: String,
}

/// Query parameters for the period projections.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    /// Period year.
    pub year: i32,
    /// Period month (1-12).
    pub month: u32,
}

/// Query parameters for listing one asset's records.
#[derive(Debug, Deserialize)]
pub struct RecordsQuery {
    /// The asset whose records to list.
    pub asset_id: Uuid,
}

/// POST `/depreciation/runs` - Run accrual for a period (`RunAccrual`).
async fn run_accrual(
    State(state): State<AppState>,
    actor: Actor,
    Json(payload): Json<RunAccrualRequest>,
) -> Result<Json<RunAccrualResponse>, ApiError> {
    let period = Period::new(payload.year, payload.month)?;

    let repo = DepreciationRepository::new((*state.db).clone(), state.accrual_workers);
    let summary = repo
        .run_accrual(
            RunAccrualInput {
                period,
                asset_ids: payload.asset_ids,
                production_volumes: payload.production_volumes,
                expense_account: payload.expense_account,
            },
            actor.user_id(),
        )
        .await?;

    Ok(Json(RunAccrualResponse {
        period: period.to_string(),
        created: summary.created,
        skipped: summary.skipped,
        total_amount: summary.total_amount.to_string(),
        errors: summary
            .errors
            .into_iter()
            .map(|error| RunErrorResponse {
                asset_id: error.asset_id.into_inner(),
                inventory_number: error.inventory_number,
                code: error.code,
                message: error.message,
            })
            .collect(),
    }))
}

/// GET `/depreciation/summary?year=&month=` - Consolidated statement for
/// one period.
async fn period_summary(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let period = Period::new(query.year, query.month)?;
    let repo = DepreciationRepository::new((*state.db).clone(), state.accrual_workers);
    let summary = repo.summary(period).await?;
    Ok(Json(serde_json::to_value(&summary).unwrap_or_default()))
}

/// GET `/depreciation/records?asset_id=` - One asset's accrual history.
async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<RecordsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = DepreciationRepository::new((*state.db).clone(), state.accrual_workers);
    let records = repo.list_for_asset(query.asset_id).await?;
    Ok(Json(serde_json::to_value(&records).unwrap_or_default()))
}
