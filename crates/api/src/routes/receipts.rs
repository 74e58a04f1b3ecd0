//! Receipt route: taking a new asset into accounting control.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use oblik_core::depreciation::DepreciationMethod;
use oblik_core::events::{Document, ReceiptInput, ReceiptKind};
use oblik_db::repositories::receipt::{NewAssetReceipt, ReceiptRepository};
use oblik_shared::AppError;

use super::assets::AssetSnapshotResponse;
use super::entries::PostingResponse;
use crate::error::ApiError;
use crate::extractors::Actor;
use crate::AppState;

/// Creates the receipt routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/receipts", post(post_receipt))
        .route("/assets/{asset_id}/receipts", get(list_receipts))
}

/// Request body for posting a receipt.
#[derive(Debug, Deserialize)]
pub struct CreateReceiptRequest {
    /// Unique inventory number.
    pub inventory_number: String,
    /// Asset name.
    pub name: String,
    /// Owning group id.
    pub group_id: Uuid,
    /// Initial cost.
    pub initial_cost: Decimal,
    /// Residual value.
    #[serde(default)]
    pub residual_value: Decimal,
    /// Depreciation accrued before this system took custody.
    #[serde(default)]
    pub incoming_depreciation: Decimal,
    /// Depreciation method.
    pub depreciation_method: String,
    /// Useful life in months.
    pub useful_life_months: u32,
    /// Optional annual depreciation rate in percent.
    pub depreciation_rate: Option<Decimal>,
    /// Total production capacity (production method only).
    pub total_production_capacity: Option<Decimal>,
    /// Commissioning date.
    pub commissioning_date: NaiveDate,
    /// Depreciation start date.
    pub depreciation_start_date: NaiveDate,
    /// Initial location.
    pub location: Option<String>,
    /// Initial custodian.
    pub custodian: Option<String>,
    /// Receipt type.
    #[serde(default = "default_receipt_type")]
    pub receipt_type: String,
    /// Document number.
    pub document_number: String,
    /// Document date.
    pub document_date: NaiveDate,
    /// Supplier or source.
    pub supplier: Option<String>,
    /// Receipt amount.
    pub amount: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
}

fn default_receipt_type() -> String {
    "purchase".to_string()
}

/// Response for a posted receipt.
#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    /// Receipt record id.
    pub id: Uuid,
    /// The opening snapshot.
    pub asset: AssetSnapshotResponse,
    /// Generated postings.
    pub postings: Vec<PostingResponse>,
}

fn parse_receipt_kind(raw: &str) -> Result<ReceiptKind, ApiError> {
    match raw {
        "purchase" => Ok(ReceiptKind::Purchase),
        "free_receipt" => Ok(ReceiptKind::FreeReceipt),
        "contribution" => Ok(ReceiptKind::Contribution),
        "exchange" => Ok(ReceiptKind::Exchange),
        "self_constructed" => Ok(ReceiptKind::SelfConstructed),
        "other" => Ok(ReceiptKind::Other),
        other => Err(ApiError(AppError::Validation(format!(
            "Unknown receipt type: {other}"
        )))),
    }
}

/// POST `/receipts` - Register an asset and post its receipt.
async fn post_receipt(
    State(state): State<AppState>,
    actor: Actor,
    Json(payload): Json<CreateReceiptRequest>,
) -> Result<Json<ReceiptResponse>, ApiError> {
    let kind = parse_receipt_kind(&payload.receipt_type)?;
    let method = DepreciationMethod::from_str(&payload.depreciation_method)
        .map_err(|err| ApiError(AppError::Validation(err)))?;

    let repo = ReceiptRepository::new((*state.db).clone());
    let outcome = repo
        .post_receipt(
            NewAssetReceipt {
                inventory_number: payload.inventory_number,
                name: payload.name,
                group_id: payload.group_id,
                initial_cost: payload.initial_cost,
                residual_value: payload.residual_value,
                incoming_depreciation: payload.incoming_depreciation,
                method,
                useful_life_months: payload.useful_life_months,
                depreciation_rate: payload.depreciation_rate,
                total_production_capacity: payload.total_production_capacity,
                commissioning_date: payload.commissioning_date,
                depreciation_start_date: payload.depreciation_start_date,
                location: payload.location,
                custodian: payload.custodian,
                receipt: ReceiptInput {
                    kind,
                    document: Document {
                        number: payload.document_number,
                        date: payload.document_date,
                    },
                    supplier: payload.supplier,
                    amount: payload.amount,
                    notes: payload.notes,
                },
            },
            actor.user_id(),
        )
        .await?;

    Ok(Json(ReceiptResponse {
        id: outcome.record.id.into_inner(),
        asset: AssetSnapshotResponse::from(&outcome.snapshot),
        postings: outcome.postings.iter().map(PostingResponse::from).collect(),
    }))
}

/// GET `/assets/{asset_id}/receipts` - Receipt history for one asset.
async fn list_receipts(
    State(state): State<AppState>,
    Path(asset_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = ReceiptRepository::new((*state.db).clone());
    let receipts = repo.list_for_asset(asset_id).await?;
    Ok(Json(serde_json::to_value(&receipts).unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("purchase", ReceiptKind::Purchase)]
    #[case("free_receipt", ReceiptKind::FreeReceipt)]
    #[case("contribution", ReceiptKind::Contribution)]
    #[case("exchange", ReceiptKind::Exchange)]
    #[case("self_constructed", ReceiptKind::SelfConstructed)]
    #[case("other", ReceiptKind::Other)]
    fn test_parse_receipt_kind(#[case] raw: &str, #[case] expected: ReceiptKind) {
        assert_eq!(parse_receipt_kind(raw).unwrap(), expected);
    }

    #[test]
    fn test_unknown_receipt_kind_rejected() {
        assert!(parse_receipt_kind("donation").is_err());
    }
}
