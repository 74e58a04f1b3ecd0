//! Audit repository: the narrow `record_change` capability plus the
//! read-only log projection.
//!
//! Audit failures are logged and reported as a flag; they never roll back
//! the financial mutation they describe.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::error;
use uuid::Uuid;

use oblik_core::audit::{AuditAction, ChangeSet};
use oblik_shared::types::{PageRequest, PageResponse, UserId};

use super::RepoError;
use crate::entities::audit_log;
use crate::entities::sea_orm_active_enums::AuditAction as DbAuditAction;

/// Filter options for reading the audit log.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    /// Filter by acting user.
    pub actor: Option<Uuid>,
    /// Filter by action.
    pub action: Option<AuditAction>,
    /// Filter by entity type.
    pub entity_type: Option<String>,
    /// Filter by entity id.
    pub entity_id: Option<Uuid>,
}

/// Audit repository.
#[derive(Debug, Clone)]
pub struct AuditRepository {
    db: DatabaseConnection,
}

impl AuditRepository {
    /// Creates a new audit repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a change against an entity.
    ///
    /// Fire-and-forget from the engine's perspective: a failure is logged
    /// for operators and surfaced as `false`, nothing more.
    pub async fn record_change(
        &self,
        actor: UserId,
        action: AuditAction,
        entity_type: &str,
        entity_id: Uuid,
        entity_repr: &str,
        changes: &ChangeSet,
    ) -> bool {
        let changes_json = serde_json::to_value(changes).unwrap_or_default();

        let row = audit_log::ActiveModel {
            id: NotSet,
            actor: Set(actor.into_inner()),
            action: Set(DbAuditAction::from(action)),
            entity_type: Set(entity_type.to_string()),
            entity_id: Set(entity_id),
            entity_repr: Set(entity_repr.chars().take(500).collect()),
            changes: Set(changes_json),
            created_at: Set(chrono::Utc::now().into()),
        };

        match row.insert(&self.db).await {
            Ok(_) => true,
            Err(err) => {
                error!(
                    %entity_id,
                    entity_type,
                    action = %action,
                    error = %err,
                    "Failed to record audit entry"
                );
                false
            }
        }
    }

    /// Reads the audit log, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        filter: AuditFilter,
        page: PageRequest,
    ) -> Result<PageResponse<audit_log::Model>, RepoError> {
        let mut query = audit_log::Entity::find();

        if let Some(actor) = filter.actor {
            query = query.filter(audit_log::Column::Actor.eq(actor));
        }
        if let Some(action) = filter.action {
            query = query.filter(audit_log::Column::Action.eq(DbAuditAction::from(action)));
        }
        if let Some(entity_type) = filter.entity_type {
            query = query.filter(audit_log::Column::EntityType.eq(entity_type));
        }
        if let Some(entity_id) = filter.entity_id {
            query = query.filter(audit_log::Column::EntityId.eq(entity_id));
        }

        let query = query.order_by_desc(audit_log::Column::CreatedAt);
        let total = query.clone().count(&self.db).await?;
        let items = query
            .paginate(&self.db, page.limit().max(1))
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;

        Ok(PageResponse::new(items, page.page, page.per_page, total))
    }
}
