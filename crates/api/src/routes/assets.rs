//! Asset routes: listing, lookup, statistics, and status changes.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use oblik_core::valuation::{AssetSnapshot, AssetStatus};
use oblik_db::repositories::asset::{AssetFilter, AssetRepository};
use oblik_shared::types::PageRequest;
use oblik_shared::AppError;

use crate::error::ApiError;
use crate::extractors::Actor;
use crate::AppState;

/// Creates the asset routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/assets", get(list_assets))
        .route("/assets/lookup", get(lookup_asset))
        .route("/assets/statistics", get(asset_statistics))
        .route("/assets/groups", get(list_groups))
        .route("/assets/high-wear", get(high_wear_assets))
        .route("/assets/fully-depreciated", get(fully_depreciated_assets))
        .route("/assets/{asset_id}", get(get_asset))
        .route("/assets/{asset_id}/conserve", post(conserve_asset))
        .route("/assets/{asset_id}/reactivate", post(reactivate_asset))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing assets.
#[derive(Debug, Deserialize)]
pub struct ListAssetsQuery {
    /// Filter by status.
    pub status: Option<String>,
    /// Filter by group id.
    pub group: Option<Uuid>,
    /// Filter by location substring.
    pub location: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

/// Query parameters for inventory-number lookup.
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    /// The inventory number to find.
    pub inventory_number: String,
}

/// Response for one asset's valuation snapshot.
#[derive(Debug, Serialize)]
pub struct AssetSnapshotResponse {
    /// Asset id.
    pub id: Uuid,
    /// Inventory number.
    pub inventory_number: String,
    /// Name.
    pub name: String,
    /// Group code.
    pub group_code: String,
    /// Lifecycle status.
    pub status: String,
    /// Initial cost.
    pub initial_cost: String,
    /// Residual value.
    pub residual_value: String,
    /// Incoming depreciation.
    pub incoming_depreciation: String,
    /// Accumulated depreciation.
    pub accumulated_depreciation: String,
    /// Current book value.
    pub current_book_value: String,
    /// Depreciation method.
    pub depreciation_method: String,
    /// Useful life in months.
    pub useful_life_months: u32,
    /// Commissioning date.
    pub commissioning_date: String,
    /// Depreciation start date.
    pub depreciation_start_date: String,
    /// Disposal date, once disposed.
    pub disposal_date: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Custodian.
    pub custodian: Option<String>,
    /// Concurrency version.
    pub version: i64,
}

impl From<&AssetSnapshot> for AssetSnapshotResponse {
    fn from(snapshot: &AssetSnapshot) -> Self {
        Self {
            id: snapshot.id.into_inner(),
            inventory_number: snapshot.inventory_number.clone(),
            name: snapshot.name.clone(),
            group_code: snapshot.group.code.clone(),
            status: snapshot.status.as_str().to_string(),
            initial_cost: snapshot.initial_cost.to_string(),
            residual_value: snapshot.residual_value.to_string(),
            incoming_depreciation: snapshot.incoming_depreciation.to_string(),
            accumulated_depreciation: snapshot.accumulated_depreciation.to_string(),
            current_book_value: snapshot.book_value().to_string(),
            depreciation_method: snapshot.method.as_str().to_string(),
            useful_life_months: snapshot.useful_life_months,
            commissioning_date: snapshot.commissioning_date.to_string(),
            depreciation_start_date: snapshot.depreciation_start_date.to_string(),
            disposal_date: snapshot.disposal_date.map(|date| date.to_string()),
            location: snapshot.location.clone(),
            custodian: snapshot.custodian.clone(),
            version: snapshot.version,
        }
    }
}

fn page_request(page: Option<u32>, per_page: Option<u32>) -> PageRequest {
    let default = PageRequest::default();
    PageRequest {
        page: page.unwrap_or(default.page).max(1),
        per_page: per_page.unwrap_or(default.per_page).clamp(1, 100),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/assets` - List assets with filters and pagination.
async fn list_assets(
    State(state): State<AppState>,
    Query(query): Query<ListAssetsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => Some(
            AssetStatus::from_str(raw).map_err(|err| ApiError(AppError::Validation(err)))?,
        ),
    };

    let repo = AssetRepository::new((*state.db).clone());
    let page = repo
        .list(
            AssetFilter {
                status,
                group_id: query.group,
                location: query.location,
            },
            page_request(query.page, query.per_page),
        )
        .await?;

    Ok(Json(serde_json::to_value(&page).unwrap_or_default()))
}

/// GET `/assets/{asset_id}` - One asset's valuation snapshot.
async fn get_asset(
    State(state): State<AppState>,
    Path(asset_id): Path<Uuid>,
) -> Result<Json<AssetSnapshotResponse>, ApiError> {
    let repo = AssetRepository::new((*state.db).clone());
    let snapshot = repo.load_snapshot(asset_id).await?;
    Ok(Json(AssetSnapshotResponse::from(&snapshot)))
}

/// GET `/assets/lookup?inventory_number=...` - Find by inventory number.
async fn lookup_asset(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<AssetSnapshotResponse>, ApiError> {
    let inventory_number = query.inventory_number.trim();
    if inventory_number.is_empty() {
        return Err(ApiError(AppError::Validation(
            "inventory_number is required".to_string(),
        )));
    }

    let repo = AssetRepository::new((*state.db).clone());
    let asset = repo
        .find_by_inventory_number(inventory_number)
        .await?
        .ok_or_else(|| {
            ApiError(AppError::NotFound(format!(
                "Asset with inventory number {inventory_number} not found"
            )))
        })?;
    let snapshot = repo.load_snapshot(asset.id).await?;
    Ok(Json(AssetSnapshotResponse::from(&snapshot)))
}

/// GET `/assets/statistics` - Aggregate figures for the dashboard.
async fn asset_statistics(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = AssetRepository::new((*state.db).clone());
    let statistics = repo.statistics().await?;
    Ok(Json(serde_json::to_value(&statistics).unwrap_or_default()))
}

/// GET `/assets/groups` - The statutory asset-group reference data.
async fn list_groups(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = AssetRepository::new((*state.db).clone());
    let groups = repo.list_groups().await?;
    Ok(Json(serde_json::to_value(&groups).unwrap_or_default()))
}

/// GET `/assets/high-wear` - Active assets worn past 90%, candidates for
/// replacement or write-off.
async fn high_wear_assets(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = AssetRepository::new((*state.db).clone());
    let assets = repo.high_wear(rust_decimal::Decimal::new(9, 1)).await?;
    Ok(Json(serde_json::to_value(&assets).unwrap_or_default()))
}

/// GET `/assets/fully-depreciated` - Active assets already at their
/// residual floor.
async fn fully_depreciated_assets(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = AssetRepository::new((*state.db).clone());
    let assets = repo.fully_depreciated().await?;
    Ok(Json(serde_json::to_value(&assets).unwrap_or_default()))
}

/// POST `/assets/{asset_id}/conserve` - Pause accrual.
async fn conserve_asset(
    State(state): State<AppState>,
    actor: Actor,
    Path(asset_id): Path<Uuid>,
) -> Result<Json<AssetSnapshotResponse>, ApiError> {
    let repo = AssetRepository::new((*state.db).clone());
    let snapshot = repo.conserve(asset_id, actor.user_id()).await?;
    Ok(Json(AssetSnapshotResponse::from(&snapshot)))
}

/// POST `/assets/{asset_id}/reactivate` - Resume accrual.
async fn reactivate_asset(
    State(state): State<AppState>,
    actor: Actor,
    Path(asset_id): Path<Uuid>,
) -> Result<Json<AssetSnapshotResponse>, ApiError> {
    let repo = AssetRepository::new((*state.db).clone());
    let snapshot = repo.reactivate(asset_id, actor.user_id()).await?;
    Ok(Json(AssetSnapshotResponse::from(&snapshot)))
}
