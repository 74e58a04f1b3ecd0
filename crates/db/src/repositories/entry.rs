//! Account-entry repository: append-only posting storage, the journal
//! projection, and reversing-entry correction.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use oblik_core::posting::{reversing_entries, EntryKind, PostingDraft};
use oblik_shared::types::{PageRequest, PageResponse, UserId};

use super::RepoError;
use crate::entities::account_entries;
use crate::entities::sea_orm_active_enums::EntryKind as DbEntryKind;

/// Filter options for listing account entries.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Filter by asset.
    pub asset_id: Option<Uuid>,
    /// Filter by entry kind.
    pub kind: Option<EntryKind>,
    /// Filter by date range start.
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end.
    pub date_to: Option<NaiveDate>,
}

/// The journal projection: totals per entry kind over a date range.
#[derive(Debug, Clone, serde::Serialize)]
pub struct JournalSummary {
    /// Total posted amount over the range.
    pub total_amount: Decimal,
    /// Number of postings over the range.
    pub count: u64,
    /// Per-kind totals.
    pub by_kind: Vec<JournalTotals>,
    /// The postings themselves, newest first.
    pub entries: Vec<account_entries::Model>,
}

/// One entry kind's totals inside the journal projection.
#[derive(Debug, Clone, serde::Serialize)]
pub struct JournalTotals {
    /// Entry kind.
    pub kind: String,
    /// Number of postings.
    pub count: u64,
    /// Total posted amount.
    pub total_amount: Decimal,
}

/// Account-entry repository.
#[derive(Debug, Clone)]
pub struct AccountEntryRepository {
    db: DatabaseConnection,
}

impl AccountEntryRepository {
    /// Creates a new account-entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists entries with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        filter: EntryFilter,
        page: PageRequest,
    ) -> Result<PageResponse<account_entries::Model>, RepoError> {
        let mut query = account_entries::Entity::find();

        if let Some(asset_id) = filter.asset_id {
            query = query.filter(account_entries::Column::AssetId.eq(asset_id));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(account_entries::Column::EntryKind.eq(DbEntryKind::from(kind)));
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(account_entries::Column::Date.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(account_entries::Column::Date.lte(date_to));
        }

        let query = query
            .order_by_desc(account_entries::Column::Date)
            .order_by_desc(account_entries::Column::Id);
        let total = query.clone().count(&self.db).await?;
        let items = query
            .paginate(&self.db, page.limit().max(1))
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;

        Ok(PageResponse::new(items, page.page, page.per_page, total))
    }

    /// The turnover journal over a date range: per-kind counts and totals
    /// plus the posted entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn journal(
        &self,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<JournalSummary, RepoError> {
        let mut query = account_entries::Entity::find()
            .filter(account_entries::Column::IsPosted.eq(true));

        if let Some(date_from) = date_from {
            query = query.filter(account_entries::Column::Date.gte(date_from));
        }
        if let Some(date_to) = date_to {
            query = query.filter(account_entries::Column::Date.lte(date_to));
        }

        let entries = query
            .order_by_desc(account_entries::Column::Date)
            .order_by_desc(account_entries::Column::Id)
            .all(&self.db)
            .await?;

        let mut total_amount = Decimal::ZERO;
        let mut by_kind: Vec<JournalTotals> = Vec::new();
        for entry in &entries {
            total_amount += entry.amount;
            let kind = EntryKind::from(entry.entry_kind.clone()).as_str().to_string();
            if let Some(index) = by_kind.iter().position(|t| t.kind == kind) {
                by_kind[index].count += 1;
                by_kind[index].total_amount += entry.amount;
            } else {
                by_kind.push(JournalTotals {
                    kind,
                    count: 1,
                    total_amount: entry.amount,
                });
            }
        }
        by_kind.sort_by(|a, b| a.kind.cmp(&b.kind));

        Ok(JournalSummary {
            total_amount,
            count: entries.len() as u64,
            by_kind,
            entries,
        })
    }

    /// Appends the reversing set for the given posted entries.
    ///
    /// Posted entries are never mutated; each reversal swaps the debit and
    /// credit sides of its original.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry id is unknown or the insert fails.
    pub async fn reverse(
        &self,
        entry_ids: &[i64],
        actor: UserId,
    ) -> Result<Vec<account_entries::Model>, RepoError> {
        let originals = account_entries::Entity::find()
            .filter(account_entries::Column::Id.is_in(entry_ids.to_vec()))
            .all(&self.db)
            .await?;

        let drafts: Vec<PostingDraft> = originals.iter().map(draft_from_model).collect();
        let reversals = reversing_entries(&drafts);

        let mut inserted = Vec::with_capacity(reversals.len());
        for (draft, original) in reversals.iter().zip(&originals) {
            let model =
                insert_draft(&self.db, original.asset_id, draft, Some(actor)).await?;
            inserted.push(model);
        }

        info!(count = inserted.len(), "Reversing entries appended");
        Ok(inserted)
    }
}

// ============================================================================
// Draft persistence, shared by the event repositories
// ============================================================================

/// Inserts one posting draft.
pub(crate) async fn insert_draft<C: ConnectionTrait>(
    conn: &C,
    asset_id: Option<Uuid>,
    draft: &PostingDraft,
    created_by: Option<UserId>,
) -> Result<account_entries::Model, RepoError> {
    let row = account_entries::ActiveModel {
        id: NotSet,
        entry_kind: Set(draft.kind.into()),
        date: Set(draft.date),
        debit_account: Set(draft.debit_account.clone()),
        credit_account: Set(draft.credit_account.clone()),
        amount: Set(draft.amount),
        description: Set(draft.description.clone()),
        asset_id: Set(asset_id),
        document_number: Set(draft.document_number.clone()),
        document_date: Set(draft.document_date),
        is_posted: Set(true),
        created_by: Set(created_by.map(UserId::into_inner)),
        created_at: Set(Utc::now().into()),
    };

    let model = row.insert(conn).await?;
    Ok(model)
}

/// Inserts every draft of an event, in order.
pub(crate) async fn insert_drafts<C: ConnectionTrait>(
    conn: &C,
    asset_id: Uuid,
    drafts: &[PostingDraft],
    created_by: UserId,
) -> Result<(), RepoError> {
    for draft in drafts {
        insert_draft(conn, Some(asset_id), draft, Some(created_by)).await?;
    }
    Ok(())
}

/// Rebuilds a posting draft from a stored entry, for reversal.
fn draft_from_model(model: &account_entries::Model) -> PostingDraft {
    PostingDraft {
        kind: model.entry_kind.clone().into(),
        date: model.date,
        debit_account: model.debit_account.clone(),
        credit_account: model.credit_account.clone(),
        amount: model.amount,
        description: model.description.clone(),
        document_number: model.document_number.clone(),
        document_date: model.document_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::entities::sea_orm_active_enums::EntryKind as DbEntryKind;

    fn stored_entry() -> account_entries::Model {
        account_entries::Model {
            id: 42,
            entry_kind: DbEntryKind::Depreciation,
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            debit_account: "92".to_string(),
            credit_account: "131".to_string(),
            amount: Decimal::new(100_000, 2),
            description: "Depreciation of asset INV-1".to_string(),
            asset_id: Some(Uuid::nil()),
            document_number: None,
            document_date: None,
            is_posted: true,
            created_by: None,
            created_at: chrono::Utc::now().into(),
        }
    }

    #[test]
    fn test_draft_round_trips_the_stored_entry() {
        let model = stored_entry();
        let draft = draft_from_model(&model);

        assert_eq!(draft.kind, EntryKind::Depreciation);
        assert_eq!(draft.debit_account, model.debit_account);
        assert_eq!(draft.credit_account, model.credit_account);
        assert_eq!(draft.amount, model.amount);
    }

    #[test]
    fn test_reversal_of_stored_entry_swaps_sides() {
        let draft = draft_from_model(&stored_entry());
        let reversed = reversing_entries(std::slice::from_ref(&draft));

        assert_eq!(reversed.len(), 1);
        assert_eq!(reversed[0].debit_account, "131");
        assert_eq!(reversed[0].credit_account, "92");
        assert_eq!(reversed[0].amount, draft.amount);
    }
}
