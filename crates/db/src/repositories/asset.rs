//! Asset repository: snapshot loading, compare-and-set persistence, and
//! read projections over the asset population.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use oblik_core::audit::{AuditAction, ChangeSet};
use oblik_core::valuation::{AssetSnapshot, AssetStatus as CoreStatus, GroupAccounts};
use oblik_shared::types::{AssetId, GroupId, PageRequest, PageResponse, UserId};

use super::audit::AuditRepository;
use super::RepoError;
use crate::entities::sea_orm_active_enums::AssetStatus;
use crate::entities::{asset_groups, assets};

/// Filter options for listing assets.
#[derive(Debug, Clone, Default)]
pub struct AssetFilter {
    /// Filter by status.
    pub status: Option<CoreStatus>,
    /// Filter by group.
    pub group_id: Option<Uuid>,
    /// Filter by location substring.
    pub location: Option<String>,
}

/// Aggregate figures over the asset population.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AssetStatistics {
    /// All assets under accounting control.
    pub total_count: u64,
    /// Active assets.
    pub active_count: u64,
    /// Conserved assets.
    pub conserved_count: u64,
    /// Disposed assets.
    pub disposed_count: u64,
    /// Sum of initial cost over active assets.
    pub total_initial_cost: Decimal,
    /// Sum of book value over active assets.
    pub total_book_value: Decimal,
    /// Sum of accumulated depreciation over active assets.
    pub total_depreciation: Decimal,
    /// Per-group breakdown over active assets.
    pub by_group: Vec<GroupTotals>,
}

/// Per-group totals for the statistics projection.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GroupTotals {
    /// Group code.
    pub code: String,
    /// Group name.
    pub name: String,
    /// Number of active assets in the group.
    pub count: u64,
    /// Sum of initial cost in the group.
    pub total_cost: Decimal,
}

/// Asset repository.
#[derive(Debug, Clone)]
pub struct AssetRepository {
    db: DatabaseConnection,
}

impl AssetRepository {
    /// Creates a new asset repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an asset with its group.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the asset does not exist.
    pub async fn find_with_group(
        &self,
        asset_id: Uuid,
    ) -> Result<(assets::Model, asset_groups::Model), RepoError> {
        find_with_group(&self.db, asset_id).await
    }

    /// Finds an asset by its inventory number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_inventory_number(
        &self,
        inventory_number: &str,
    ) -> Result<Option<assets::Model>, RepoError> {
        let asset = assets::Entity::find()
            .filter(assets::Column::InventoryNumber.eq(inventory_number))
            .one(&self.db)
            .await?;
        Ok(asset)
    }

    /// Loads the valuation snapshot for an asset.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset or its group does not exist.
    pub async fn load_snapshot(&self, asset_id: Uuid) -> Result<AssetSnapshot, RepoError> {
        let (asset, group) = self.find_with_group(asset_id).await?;
        Ok(snapshot_from_models(&asset, &group))
    }

    /// Lists assets with optional filters and pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        filter: AssetFilter,
        page: PageRequest,
    ) -> Result<PageResponse<assets::Model>, RepoError> {
        let mut query = assets::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(assets::Column::Status.eq(AssetStatus::from(status)));
        }
        if let Some(group_id) = filter.group_id {
            query = query.filter(assets::Column::GroupId.eq(group_id));
        }
        if let Some(location) = filter.location {
            query = query.filter(assets::Column::Location.contains(&location));
        }

        let query = query.order_by_asc(assets::Column::InventoryNumber);
        let total = query.clone().count(&self.db).await?;
        let items = query
            .paginate(&self.db, page.limit().max(1))
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;

        Ok(PageResponse::new(items, page.page, page.per_page, total))
    }

    /// Lists all asset groups.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_groups(&self) -> Result<Vec<asset_groups::Model>, RepoError> {
        let groups = asset_groups::Entity::find()
            .order_by_asc(asset_groups::Column::Code)
            .all(&self.db)
            .await?;
        Ok(groups)
    }

    /// Aggregate statistics over the asset population.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn statistics(&self) -> Result<AssetStatistics, RepoError> {
        let assets_with_groups = assets::Entity::find()
            .find_also_related(asset_groups::Entity)
            .all(&self.db)
            .await?;

        let mut stats = AssetStatistics {
            total_count: 0,
            active_count: 0,
            conserved_count: 0,
            disposed_count: 0,
            total_initial_cost: Decimal::ZERO,
            total_book_value: Decimal::ZERO,
            total_depreciation: Decimal::ZERO,
            by_group: Vec::new(),
        };

        let mut group_totals: Vec<GroupTotals> = Vec::new();
        for (asset, group) in assets_with_groups {
            stats.total_count += 1;
            match asset.status {
                AssetStatus::Active => {
                    stats.active_count += 1;
                    stats.total_initial_cost += asset.initial_cost;
                    stats.total_book_value += asset.current_book_value;
                    stats.total_depreciation += asset.accumulated_depreciation;

                    if let Some(group) = group {
                        if let Some(index) =
                            group_totals.iter().position(|t| t.code == group.code)
                        {
                            group_totals[index].count += 1;
                            group_totals[index].total_cost += asset.initial_cost;
                        } else {
                            group_totals.push(GroupTotals {
                                code: group.code,
                                name: group.name,
                                count: 1,
                                total_cost: asset.initial_cost,
                            });
                        }
                    }
                }
                AssetStatus::Conserved => stats.conserved_count += 1,
                AssetStatus::Disposed => stats.disposed_count += 1,
            }
        }

        group_totals.sort_by(|a, b| a.code.cmp(&b.code));
        stats.by_group = group_totals;
        Ok(stats)
    }

    /// Active assets with wear above the given ratio (0.9 = 90%).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn high_wear(&self, threshold: Decimal) -> Result<Vec<assets::Model>, RepoError> {
        let active = assets::Entity::find()
            .filter(assets::Column::Status.eq(AssetStatus::Active))
            .all(&self.db)
            .await?;

        Ok(active
            .into_iter()
            .filter(|asset| {
                asset.initial_cost > Decimal::ZERO
                    && asset.accumulated_depreciation / asset.initial_cost > threshold
            })
            .collect())
    }

    /// Active assets whose book value has reached the residual floor.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn fully_depreciated(&self) -> Result<Vec<assets::Model>, RepoError> {
        let active = assets::Entity::find()
            .filter(assets::Column::Status.eq(AssetStatus::Active))
            .all(&self.db)
            .await?;

        Ok(active
            .into_iter()
            .filter(|asset| asset.current_book_value <= asset.residual_value)
            .collect())
    }

    /// Pauses accrual for an active asset.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset is missing, not active, or the
    /// compare-and-set loses a race.
    pub async fn conserve(&self, asset_id: Uuid, actor: UserId) -> Result<AssetSnapshot, RepoError> {
        self.change_status(asset_id, actor, AssetSnapshot::conserve)
            .await
    }

    /// Resumes accrual for a conserved asset.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset is missing, not conserved, or the
    /// compare-and-set loses a race.
    pub async fn reactivate(
        &self,
        asset_id: Uuid,
        actor: UserId,
    ) -> Result<AssetSnapshot, RepoError> {
        self.change_status(asset_id, actor, AssetSnapshot::reactivate)
            .await
    }

    async fn change_status<F>(
        &self,
        asset_id: Uuid,
        actor: UserId,
        transition: F,
    ) -> Result<AssetSnapshot, RepoError>
    where
        F: FnOnce(&mut AssetSnapshot) -> Result<(), oblik_core::valuation::ValuationError>,
    {
        let (asset, group) = self.find_with_group(asset_id).await?;
        let mut snapshot = snapshot_from_models(&asset, &group);
        let expected_version = snapshot.version;
        let status_before = snapshot.status;

        transition(&mut snapshot)?;

        update_snapshot_cas(&self.db, &snapshot, expected_version).await?;
        snapshot.version = expected_version + 1;

        info!(
            asset = %snapshot.inventory_number,
            from = %status_before,
            to = %snapshot.status,
            "Asset status changed"
        );

        let audit = AuditRepository::new(self.db.clone());
        let changes = ChangeSet::new().with(
            "status",
            status_before.as_str(),
            snapshot.status.as_str(),
        );
        audit
            .record_change(
                actor,
                AuditAction::StatusChange,
                "asset",
                asset_id,
                &format!("{} - {}", snapshot.inventory_number, snapshot.name),
                &changes,
            )
            .await;

        Ok(snapshot)
    }
}

// ============================================================================
// Snapshot <-> row mapping, shared by the event repositories
// ============================================================================

/// Loads an asset row together with its group, as a `RepoError`.
pub(crate) async fn find_with_group<C: ConnectionTrait>(
    conn: &C,
    asset_id: Uuid,
) -> Result<(assets::Model, asset_groups::Model), RepoError> {
    let found = assets::Entity::find_by_id(asset_id)
        .find_also_related(asset_groups::Entity)
        .one(conn)
        .await?;

    match found {
        Some((asset, Some(group))) => Ok((asset, group)),
        Some((asset, None)) => Err(RepoError::GroupNotFound(asset.group_id)),
        None => Err(RepoError::AssetNotFound(asset_id)),
    }
}

/// Builds the core valuation snapshot from the persisted rows.
pub(crate) fn snapshot_from_models(
    asset: &assets::Model,
    group: &asset_groups::Model,
) -> AssetSnapshot {
    AssetSnapshot {
        id: AssetId::from_uuid(asset.id),
        inventory_number: asset.inventory_number.clone(),
        name: asset.name.clone(),
        group: GroupAccounts {
            id: GroupId::from_uuid(group.id),
            code: group.code.clone(),
            asset_account: group.account_number.clone(),
            depreciation_account: group.depreciation_account.clone(),
        },
        status: asset.status.clone().into(),
        initial_cost: asset.initial_cost,
        residual_value: asset.residual_value,
        incoming_depreciation: asset.incoming_depreciation,
        accumulated_depreciation: asset.accumulated_depreciation,
        method: asset.depreciation_method.clone().into(),
        useful_life_months: u32::try_from(asset.useful_life_months).unwrap_or(1),
        depreciation_rate: asset.depreciation_rate,
        total_production_capacity: asset.total_production_capacity,
        units_produced_to_date: asset.units_produced_to_date,
        commissioning_date: asset.commissioning_date,
        depreciation_start_date: asset.depreciation_start_date,
        disposal_date: asset.disposal_date,
        location: asset.location.clone(),
        custodian: asset.custodian.clone(),
        version: asset.version,
    }
}

/// Inserts the opening asset row for a freshly received snapshot.
pub(crate) async fn insert_snapshot<C: ConnectionTrait>(
    conn: &C,
    snapshot: &AssetSnapshot,
    created_by: UserId,
) -> Result<assets::Model, RepoError> {
    let now = Utc::now().into();
    let row = assets::ActiveModel {
        id: Set(snapshot.id.into_inner()),
        inventory_number: Set(snapshot.inventory_number.clone()),
        name: Set(snapshot.name.clone()),
        group_id: Set(snapshot.group.id.into_inner()),
        status: Set(snapshot.status.into()),
        initial_cost: Set(snapshot.initial_cost),
        residual_value: Set(snapshot.residual_value),
        incoming_depreciation: Set(snapshot.incoming_depreciation),
        accumulated_depreciation: Set(snapshot.accumulated_depreciation),
        current_book_value: Set(snapshot.book_value()),
        depreciation_method: Set(snapshot.method.into()),
        useful_life_months: Set(i32::try_from(snapshot.useful_life_months).unwrap_or(i32::MAX)),
        depreciation_rate: Set(snapshot.depreciation_rate),
        total_production_capacity: Set(snapshot.total_production_capacity),
        units_produced_to_date: Set(snapshot.units_produced_to_date),
        commissioning_date: Set(snapshot.commissioning_date),
        depreciation_start_date: Set(snapshot.depreciation_start_date),
        disposal_date: Set(snapshot.disposal_date),
        location: Set(snapshot.location.clone()),
        custodian: Set(snapshot.custodian.clone()),
        version: Set(snapshot.version),
        created_by: Set(created_by.into_inner()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = sea_orm::ActiveModelTrait::insert(row, conn).await?;
    Ok(model)
}

/// Persists a mutated snapshot with a compare-and-set on the version
/// column. The losing writer of a race observes `ConcurrentModification`
/// and must re-read before retrying.
pub(crate) async fn update_snapshot_cas<C: ConnectionTrait>(
    conn: &C,
    snapshot: &AssetSnapshot,
    expected_version: i64,
) -> Result<(), RepoError> {
    let update = assets::ActiveModel {
        status: Set(snapshot.status.into()),
        initial_cost: Set(snapshot.initial_cost),
        residual_value: Set(snapshot.residual_value),
        accumulated_depreciation: Set(snapshot.accumulated_depreciation),
        current_book_value: Set(snapshot.book_value()),
        units_produced_to_date: Set(snapshot.units_produced_to_date),
        disposal_date: Set(snapshot.disposal_date),
        location: Set(snapshot.location.clone()),
        custodian: Set(snapshot.custodian.clone()),
        version: Set(expected_version + 1),
        updated_at: Set(Utc::now().into()),
        ..Default::default()
    };

    let result = assets::Entity::update_many()
        .set(update)
        .filter(assets::Column::Id.eq(snapshot.id.into_inner()))
        .filter(assets::Column::Version.eq(expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(RepoError::ConcurrentModification(snapshot.id.into_inner()));
    }
    Ok(())
}
