//! Improvement route.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oblik_core::events::{Document, ImprovementInput, ImprovementKind};
use oblik_db::repositories::improvement::ImprovementRepository;
use oblik_shared::AppError;

use super::assets::AssetSnapshotResponse;
use super::entries::PostingResponse;
use crate::error::ApiError;
use crate::extractors::Actor;
use crate::AppState;

/// Creates the improvement routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/improvements", post(post_improvement))
        .route("/assets/{asset_id}/improvements", get(list_improvements))
}

/// Request body for posting an improvement or repair.
#[derive(Debug, Deserialize)]
pub struct CreateImprovementRequest {
    /// The improved asset.
    pub asset_id: Uuid,
    /// Improvement type.
    pub improvement_type: String,
    /// Document number.
    pub document_number: String,
    /// Document date.
    pub document_date: NaiveDate,
    /// Description of the work performed.
    pub description: String,
    /// Cost of the work.
    pub amount: Decimal,
    /// Contractor.
    pub contractor: Option<String>,
    /// True when the amount is capitalized into initial cost.
    #[serde(default)]
    pub increases_value: bool,
    /// Expense account for the expensed branch (91/92/93/23).
    #[serde(default = "default_expense_account")]
    pub expense_account: String,
}

fn default_expense_account() -> String {
    "91".to_string()
}

/// Response for a posted improvement.
#[derive(Debug, Serialize)]
pub struct ImprovementResponse {
    /// Improvement record id.
    pub id: Uuid,
    /// Whether the amount was capitalized.
    pub increases_value: bool,
    /// The updated snapshot.
    pub asset: AssetSnapshotResponse,
    /// Generated postings.
    pub postings: Vec<PostingResponse>,
}

fn parse_improvement_kind(raw: &str) -> Result<ImprovementKind, ApiError> {
    match raw {
        "capital_repair" => Ok(ImprovementKind::CapitalRepair),
        "current_repair" => Ok(ImprovementKind::CurrentRepair),
        "modernization" => Ok(ImprovementKind::Modernization),
        "reconstruction" => Ok(ImprovementKind::Reconstruction),
        other => Err(ApiError(AppError::Validation(format!(
            "Unknown improvement type: {other}"
        )))),
    }
}

/// POST `/improvements` - Record an improvement or repair.
async fn post_improvement(
    State(state): State<AppState>,
    actor: Actor,
    Json(payload): Json<CreateImprovementRequest>,
) -> Result<Json<ImprovementResponse>, ApiError> {
    let kind = parse_improvement_kind(&payload.improvement_type)?;

    let repo = ImprovementRepository::new((*state.db).clone());
    let outcome = repo
        .post_improvement(
            payload.asset_id,
            ImprovementInput {
                kind,
                document: Document {
                    number: payload.document_number,
                    date: payload.document_date,
                },
                description: payload.description,
                amount: payload.amount,
                contractor: payload.contractor,
                increases_value: payload.increases_value,
                expense_account: payload.expense_account,
            },
            actor.user_id(),
        )
        .await?;

    Ok(Json(ImprovementResponse {
        id: outcome.record.id.into_inner(),
        increases_value: outcome.record.increases_value,
        asset: AssetSnapshotResponse::from(&outcome.snapshot),
        postings: outcome.postings.iter().map(PostingResponse::from).collect(),
    }))
}

/// GET `/assets/{asset_id}/improvements` - Improvement history for one
/// asset.
async fn list_improvements(
    State(state): State<AppState>,
    Path(asset_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = ImprovementRepository::new((*state.db).clone());
    let improvements = repo.list_for_asset(asset_id).await?;
    Ok(Json(serde_json::to_value(&improvements).unwrap_or_default()))
}
