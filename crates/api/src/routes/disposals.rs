//! Disposal route.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oblik_core::events::{DisposalInput, DisposalKind, Document};
use oblik_db::repositories::disposal::DisposalRepository;
use oblik_shared::AppError;

use super::assets::AssetSnapshotResponse;
use super::entries::PostingResponse;
use crate::error::ApiError;
use crate::extractors::Actor;
use crate::AppState;

/// Creates the disposal routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/disposals", post(post_disposal))
        .route("/assets/{asset_id}/disposals", get(list_disposals))
}

/// Request body for posting a disposal.
#[derive(Debug, Deserialize)]
pub struct CreateDisposalRequest {
    /// The asset to dispose of.
    pub asset_id: Uuid,
    /// Disposal type.
    pub disposal_type: String,
    /// Document number.
    pub document_number: String,
    /// Document date.
    pub document_date: NaiveDate,
    /// Reason for disposal.
    pub reason: String,
    /// Sale proceeds (sales only).
    #[serde(default)]
    pub sale_amount: Decimal,
}

/// Response for a posted disposal.
#[derive(Debug, Serialize)]
pub struct DisposalResponse {
    /// Disposal record id.
    pub id: Uuid,
    /// Book value written off.
    pub book_value_at_disposal: String,
    /// Gain (positive) or loss (negative) on sale.
    pub gain_loss: String,
    /// The terminal snapshot.
    pub asset: AssetSnapshotResponse,
    /// Generated postings.
    pub postings: Vec<PostingResponse>,
}

fn parse_disposal_kind(raw: &str) -> Result<DisposalKind, ApiError> {
    match raw {
        "sale" => Ok(DisposalKind::Sale),
        "liquidation" => Ok(DisposalKind::Liquidation),
        "free_transfer" => Ok(DisposalKind::FreeTransfer),
        "shortage" => Ok(DisposalKind::Shortage),
        "other" => Ok(DisposalKind::Other),
        other => Err(ApiError(AppError::Validation(format!(
            "Unknown disposal type: {other}"
        )))),
    }
}

/// POST `/disposals` - Dispose of an asset.
async fn post_disposal(
    State(state): State<AppState>,
    actor: Actor,
    Json(payload): Json<CreateDisposalRequest>,
) -> Result<Json<DisposalResponse>, ApiError> {
    let kind = parse_disposal_kind(&payload.disposal_type)?;

    let repo = DisposalRepository::new((*state.db).clone());
    let outcome = repo
        .post_disposal(
            payload.asset_id,
            DisposalInput {
                kind,
                document: Document {
                    number: payload.document_number,
                    date: payload.document_date,
                },
                reason: payload.reason,
                sale_amount: payload.sale_amount,
            },
            actor.user_id(),
        )
        .await?;

    Ok(Json(DisposalResponse {
        id: outcome.record.id.into_inner(),
        book_value_at_disposal: outcome.record.book_value_at_disposal.to_string(),
        gain_loss: outcome.record.gain_loss.to_string(),
        asset: AssetSnapshotResponse::from(&outcome.snapshot),
        postings: outcome.postings.iter().map(PostingResponse::from).collect(),
    }))
}

/// GET `/assets/{asset_id}/disposals` - Disposal history for one asset.
async fn list_disposals(
    State(state): State<AppState>,
    Path(asset_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = DisposalRepository::new((*state.db).clone());
    let disposals = repo.list_for_asset(asset_id).await?;
    Ok(Json(serde_json::to_value(&disposals).unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("sale", DisposalKind::Sale)]
    #[case("liquidation", DisposalKind::Liquidation)]
    #[case("free_transfer", DisposalKind::FreeTransfer)]
    #[case("shortage", DisposalKind::Shortage)]
    #[case("other", DisposalKind::Other)]
    fn test_parse_disposal_kind(#[case] raw: &str, #[case] expected: DisposalKind) {
        assert_eq!(parse_disposal_kind(raw).unwrap(), expected);
    }

    #[test]
    fn test_unknown_disposal_kind_rejected() {
        assert!(parse_disposal_kind("demolition").is_err());
    }
}
