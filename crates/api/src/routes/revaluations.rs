//! Revaluation route.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oblik_core::events::{Document, RevaluationInput};
use oblik_db::repositories::revaluation::RevaluationRepository;

use super::assets::AssetSnapshotResponse;
use super::entries::PostingResponse;
use crate::error::ApiError;
use crate::extractors::Actor;
use crate::AppState;

/// Creates the revaluation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/revaluations", post(post_revaluation))
        .route("/assets/{asset_id}/revaluations", get(list_revaluations))
}

/// Request body for posting a revaluation.
#[derive(Debug, Deserialize)]
pub struct CreateRevaluationRequest {
    /// The asset to revalue.
    pub asset_id: Uuid,
    /// Document number.
    pub document_number: String,
    /// Document date.
    pub document_date: NaiveDate,
    /// Appraised fair value.
    pub fair_value: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Response for a posted revaluation.
#[derive(Debug, Serialize)]
pub struct RevaluationResponse {
    /// Revaluation record id.
    pub id: Uuid,
    /// Upward or downward.
    pub revaluation_type: String,
    /// Book value before.
    pub old_book_value: String,
    /// Book value after.
    pub new_book_value: String,
    /// Signed change in book value.
    pub amount: String,
    /// The rescaled snapshot.
    pub asset: AssetSnapshotResponse,
    /// Generated postings.
    pub postings: Vec<PostingResponse>,
}

/// POST `/revaluations` - Revalue an asset to fair value.
async fn post_revaluation(
    State(state): State<AppState>,
    actor: Actor,
    Json(payload): Json<CreateRevaluationRequest>,
) -> Result<Json<RevaluationResponse>, ApiError> {
    let repo = RevaluationRepository::new((*state.db).clone());
    let outcome = repo
        .post_revaluation(
            payload.asset_id,
            RevaluationInput {
                document: Document {
                    number: payload.document_number,
                    date: payload.document_date,
                },
                fair_value: payload.fair_value,
                notes: payload.notes,
            },
            actor.user_id(),
        )
        .await?;

    Ok(Json(RevaluationResponse {
        id: outcome.record.id.into_inner(),
        revaluation_type: outcome.record.change.kind.as_str().to_string(),
        old_book_value: outcome.record.change.old_book_value.to_string(),
        new_book_value: outcome.record.change.new_book_value.to_string(),
        amount: outcome.record.change.amount.to_string(),
        asset: AssetSnapshotResponse::from(&outcome.snapshot),
        postings: outcome.postings.iter().map(PostingResponse::from).collect(),
    }))
}

/// GET `/assets/{asset_id}/revaluations` - Revaluation history for one
/// asset.
async fn list_revaluations(
    State(state): State<AppState>,
    Path(asset_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = RevaluationRepository::new((*state.db).clone());
    let revaluations = repo.list_for_asset(asset_id).await?;
    Ok(Json(serde_json::to_value(&revaluations).unwrap_or_default()))
}
