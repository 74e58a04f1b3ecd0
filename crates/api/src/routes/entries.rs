//! Account-entry routes: the posting list, the turnover journal, and
//! reversing-entry correction.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oblik_core::posting::{EntryKind, PostingDraft};
use oblik_db::repositories::entry::{AccountEntryRepository, EntryFilter};
use oblik_shared::types::PageRequest;
use oblik_shared::AppError;

use crate::error::ApiError;
use crate::extractors::Actor;
use crate::AppState;

/// Creates the account-entry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/entries", get(list_entries))
        .route("/entries/journal", get(journal))
        .route("/entries/reverse", post(reverse_entries))
}

/// Response for one posting draft.
#[derive(Debug, Serialize)]
pub struct PostingResponse {
    /// Entry kind.
    pub kind: String,
    /// Posting date.
    pub date: String,
    /// Debit account.
    pub debit_account: String,
    /// Credit account.
    pub credit_account: String,
    /// Posted amount.
    pub amount: String,
    /// Description.
    pub description: String,
    /// Source document number.
    pub document_number: Option<String>,
}

impl From<&PostingDraft> for PostingResponse {
    fn from(draft: &PostingDraft) -> Self {
        Self {
            kind: draft.kind.as_str().to_string(),
            date: draft.date.to_string(),
            debit_account: draft.debit_account.clone(),
            credit_account: draft.credit_account.clone(),
            amount: draft.amount.to_string(),
            description: draft.description.clone(),
            document_number: draft.document_number.clone(),
        }
    }
}

/// Query parameters for listing entries.
#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    /// Filter by asset.
    pub asset_id: Option<Uuid>,
    /// Filter by entry kind.
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    /// Filter by date range start.
    pub from: Option<NaiveDate>,
    /// Filter by date range end.
    pub to: Option<NaiveDate>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

/// Query parameters for the journal.
#[derive(Debug, Deserialize)]
pub struct JournalQuery {
    /// Date range start.
    pub date_from: Option<NaiveDate>,
    /// Date range end.
    pub date_to: Option<NaiveDate>,
}

/// Request body for reversing posted entries.
#[derive(Debug, Deserialize)]
pub struct ReverseEntriesRequest {
    /// Ids of the entries to reverse.
    pub entry_ids: Vec<i64>,
}

fn parse_entry_kind(raw: &str) -> Result<EntryKind, ApiError> {
    match raw {
        "receipt" => Ok(EntryKind::Receipt),
        "depreciation" => Ok(EntryKind::Depreciation),
        "disposal" => Ok(EntryKind::Disposal),
        "revaluation" => Ok(EntryKind::Revaluation),
        "improvement" => Ok(EntryKind::Improvement),
        "transfer" => Ok(EntryKind::Transfer),
        other => Err(ApiError(AppError::Validation(format!(
            "Unknown entry type: {other}"
        )))),
    }
}

/// GET `/entries` - List postings with filters.
async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ListEntriesQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let kind = match query.entry_type.as_deref() {
        None => None,
        Some(raw) => Some(parse_entry_kind(raw)?),
    };

    let default = PageRequest::default();
    let repo = AccountEntryRepository::new((*state.db).clone());
    let page = repo
        .list(
            EntryFilter {
                asset_id: query.asset_id,
                kind,
                date_from: query.from,
                date_to: query.to,
            },
            PageRequest {
                page: query.page.unwrap_or(default.page).max(1),
                per_page: query.per_page.unwrap_or(default.per_page).clamp(1, 100),
            },
        )
        .await?;

    Ok(Json(serde_json::to_value(&page).unwrap_or_default()))
}

/// GET `/entries/journal` - Turnover journal over a date range.
async fn journal(
    State(state): State<AppState>,
    Query(query): Query<JournalQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = AccountEntryRepository::new((*state.db).clone());
    let summary = repo.journal(query.date_from, query.date_to).await?;
    Ok(Json(serde_json::to_value(&summary).unwrap_or_default()))
}

/// POST `/entries/reverse` - Append the reversing set for posted entries.
async fn reverse_entries(
    State(state): State<AppState>,
    actor: Actor,
    Json(payload): Json<ReverseEntriesRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if payload.entry_ids.is_empty() {
        return Err(ApiError(AppError::Validation(
            "entry_ids must not be empty".to_string(),
        )));
    }

    let repo = AccountEntryRepository::new((*state.db).clone());
    let reversals = repo.reverse(&payload.entry_ids, actor.user_id()).await?;
    Ok(Json(serde_json::to_value(&reversals).unwrap_or_default()))
}
