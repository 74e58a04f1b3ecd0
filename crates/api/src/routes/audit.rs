//! Audit log routes (read-only).

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use oblik_db::repositories::audit::{AuditFilter, AuditRepository};
use oblik_shared::types::PageRequest;

use crate::error::ApiError;
use crate::AppState;

/// Creates the audit routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/audit", get(list_audit))
}

/// Query parameters for reading the audit log.
#[derive(Debug, Deserialize)]
pub struct ListAuditQuery {
    /// Filter by acting user.
    pub actor: Option<Uuid>,
    /// Filter by entity type.
    pub entity_type: Option<String>,
    /// Filter by entity id.
    pub entity_id: Option<Uuid>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

/// GET `/audit` - Read the audit log, newest first.
async fn list_audit(
    State(state): State<AppState>,
    Query(query): Query<ListAuditQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let default = PageRequest::default();
    let repo = AuditRepository::new((*state.db).clone());
    let page = repo
        .list(
            AuditFilter {
                actor: query.actor,
                action: None,
                entity_type: query.entity_type,
                entity_id: query.entity_id,
            },
            PageRequest {
                page: query.page.unwrap_or(default.page).max(1),
                per_page: query.per_page.unwrap_or(default.per_page).clamp(1, 100),
            },
        )
        .await?;

    Ok(Json(serde_json::to_value(&page).unwrap_or_default()))
}
