//! Transfer route.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oblik_core::events::{Document, TransferInput};
use oblik_db::repositories::transfer::TransferRepository;

use super::assets::AssetSnapshotResponse;
use super::entries::PostingResponse;
use crate::error::ApiError;
use crate::extractors::Actor;
use crate::AppState;

/// Creates the transfer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transfers", post(post_transfer))
        .route("/assets/{asset_id}/transfers", get(list_transfers))
}

/// Request body for posting a transfer.
#[derive(Debug, Deserialize)]
pub struct CreateTransferRequest {
    /// The transferred asset.
    pub asset_id: Uuid,
    /// Document number.
    pub document_number: String,
    /// Document date.
    pub document_date: NaiveDate,
    /// Destination location.
    pub to_location: Option<String>,
    /// Destination custodian.
    pub to_custodian: Option<String>,
    /// Free-text reason.
    pub reason: Option<String>,
}

/// Response for a posted transfer.
#[derive(Debug, Serialize)]
pub struct TransferResponse {
    /// Transfer record id.
    pub id: Uuid,
    /// The updated snapshot.
    pub asset: AssetSnapshotResponse,
    /// Generated reference postings.
    pub postings: Vec<PostingResponse>,
}

/// POST `/transfers` - Move an asset between locations/custodians.
async fn post_transfer(
    State(state): State<AppState>,
    actor: Actor,
    Json(payload): Json<CreateTransferRequest>,
) -> Result<Json<TransferResponse>, ApiError> {
    let repo = TransferRepository::new((*state.db).clone());
    let outcome = repo
        .post_transfer(
            payload.asset_id,
            TransferInput {
                document: Document {
                    number: payload.document_number,
                    date: payload.document_date,
                },
                to_location: payload.to_location,
                to_custodian: payload.to_custodian,
                reason: payload.reason,
            },
            actor.user_id(),
        )
        .await?;

    Ok(Json(TransferResponse {
        id: outcome.record.id.into_inner(),
        asset: AssetSnapshotResponse::from(&outcome.snapshot),
        postings: outcome.postings.iter().map(PostingResponse::from).collect(),
    }))
}

/// GET `/assets/{asset_id}/transfers` - Transfer history for one asset.
async fn list_transfers(
    State(state): State<AppState>,
    Path(asset_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = TransferRepository::new((*state.db).clone());
    let transfers = repo.list_for_asset(asset_id).await?;
    Ok(Json(serde_json::to_value(&transfers).unwrap_or_default()))
}
