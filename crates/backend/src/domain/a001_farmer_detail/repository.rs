use async_trait::async_trait;
use chrono::{DateTime, Utc};
use contracts::domain::a001_farmer_detail::aggregate::{FarmerDetail, FarmerDetailId};
use contracts::domain::common::EntityMetadata;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::query::FarmerFilter;

use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
    SqlErr,
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_farmer_detail")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub temp_id: String,
    pub coop_id: String,
    pub customer_id: String,
    pub vendor_id: String,
    pub customer_id_updated_at: Option<DateTime<Utc>>,
    pub vendor_id_updated_at: Option<DateTime<Utc>>,
    pub farmer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub region_id: i32,
    pub region_part_id: i32,
    pub settlement_id: i32,
    pub settlement_part_id: i32,
    pub custom_geography_structure1_id: String,
    pub custom_geography_structure2_id: String,
    pub zip_code: String,
    pub farmer_kyc_type_id: i32,
    pub farmer_kyc_type: String,
    /// NULL when the farmer has no KYC id, so the unique index skips it
    pub farmer_kyc_id: Option<String>,
    pub club_id: String,
    pub club_name: String,
    pub club_leader_farmer_id: String,
    pub raithu_created_date: Option<String>,
    pub raithu_updated_at: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for FarmerDetail {
    fn from(m: Model) -> Self {
        FarmerDetail {
            id: Some(FarmerDetailId::new(m.id)),
            temp_id: m.temp_id,
            coop_id: m.coop_id,
            customer_id: m.customer_id,
            vendor_id: m.vendor_id,
            customer_id_updated_at: m.customer_id_updated_at,
            vendor_id_updated_at: m.vendor_id_updated_at,
            farmer_id: m.farmer_id,
            first_name: m.first_name,
            last_name: m.last_name,
            mobile_number: m.mobile_number,
            region_id: m.region_id,
            region_part_id: m.region_part_id,
            settlement_id: m.settlement_id,
            settlement_part_id: m.settlement_part_id,
            custom_geography_structure1_id: m.custom_geography_structure1_id,
            custom_geography_structure2_id: m.custom_geography_structure2_id,
            zip_code: m.zip_code,
            farmer_kyc_type_id: m.farmer_kyc_type_id,
            farmer_kyc_type: m.farmer_kyc_type,
            farmer_kyc_id: m.farmer_kyc_id.unwrap_or_default(),
            club_id: m.club_id,
            club_name: m.club_name,
            club_leader_farmer_id: m.club_leader_farmer_id,
            raithu_created_date: m.raithu_created_date,
            raithu_updated_at: m.raithu_updated_at,
            metadata: EntityMetadata {
                created_at: m.created_at,
                updated_at: m.updated_at,
            },
        }
    }
}

fn to_active_model(aggregate: &FarmerDetail) -> ActiveModel {
    let kyc_id = aggregate.farmer_kyc_id.trim();
    ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        temp_id: Set(aggregate.temp_id.clone()),
        coop_id: Set(aggregate.coop_id.clone()),
        customer_id: Set(aggregate.customer_id.clone()),
        vendor_id: Set(aggregate.vendor_id.clone()),
        customer_id_updated_at: Set(aggregate.customer_id_updated_at),
        vendor_id_updated_at: Set(aggregate.vendor_id_updated_at),
        farmer_id: Set(aggregate.farmer_id.clone()),
        first_name: Set(aggregate.first_name.clone()),
        last_name: Set(aggregate.last_name.clone()),
        mobile_number: Set(aggregate.mobile_number.clone()),
        region_id: Set(aggregate.region_id),
        region_part_id: Set(aggregate.region_part_id),
        settlement_id: Set(aggregate.settlement_id),
        settlement_part_id: Set(aggregate.settlement_part_id),
        custom_geography_structure1_id: Set(aggregate.custom_geography_structure1_id.clone()),
        custom_geography_structure2_id: Set(aggregate.custom_geography_structure2_id.clone()),
        zip_code: Set(aggregate.zip_code.clone()),
        farmer_kyc_type_id: Set(aggregate.farmer_kyc_type_id),
        farmer_kyc_type: Set(aggregate.farmer_kyc_type.clone()),
        farmer_kyc_id: Set(if kyc_id.is_empty() {
            None
        } else {
            Some(aggregate.farmer_kyc_id.clone())
        }),
        club_id: Set(aggregate.club_id.clone()),
        club_name: Set(aggregate.club_name.clone()),
        club_leader_farmer_id: Set(aggregate.club_leader_farmer_id.clone()),
        raithu_created_date: Set(aggregate.raithu_created_date.clone()),
        raithu_updated_at: Set(aggregate.raithu_updated_at.clone()),
        created_at: Set(aggregate.metadata.created_at),
        updated_at: Set(aggregate.metadata.updated_at),
    }
}

// ============================================================================
// Store contract
// ============================================================================

/// Which uniqueness rule a rejected insert collided with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    KycId,
    CoopFarmer,
    TempId,
}

impl UniqueKey {
    /// Reads the offending column list out of a driver message such as
    /// `UNIQUE constraint failed: a001_farmer_detail.farmer_kyc_id`.
    fn from_violation(message: &str) -> Self {
        if message.contains("farmer_kyc_id") {
            UniqueKey::KycId
        } else if message.contains("temp_id") {
            UniqueKey::TempId
        } else {
            UniqueKey::CoopFarmer
        }
    }
}

impl std::fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UniqueKey::KycId => "farmer_kyc_id",
            UniqueKey::CoopFarmer => "(coop_id, farmer_id)",
            UniqueKey::TempId => "temp_id",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key on {0}")]
    DuplicateKey(UniqueKey),

    #[error(transparent)]
    Backend(#[from] DbErr),
}

impl StoreError {
    fn classify(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(message)) = err.sql_err() {
            return StoreError::DuplicateKey(UniqueKey::from_violation(&message));
        }
        // Drivers that do not expose an error code still name the constraint
        let text = err.to_string();
        if text.contains("UNIQUE constraint failed") {
            return StoreError::DuplicateKey(UniqueKey::from_violation(&text));
        }
        StoreError::Backend(err)
    }
}

/// Durable storage of farmer records.
///
/// Implementations must enforce uniqueness of `(coop_id, farmer_id)` and of
/// non-empty `farmer_kyc_id` atomically with `insert`, reporting a collision
/// as [`StoreError::DuplicateKey`].
#[async_trait]
pub trait FarmerStore: Send + Sync {
    async fn find_by_kyc_id(&self, kyc_id: &str) -> Result<Option<FarmerDetail>, StoreError>;

    async fn find_by_coop_and_farmer(
        &self,
        coop_id: &str,
        farmer_id: &str,
    ) -> Result<Option<FarmerDetail>, StoreError>;

    /// Persists a new record and returns it with the store-assigned id.
    async fn insert(&self, aggregate: &FarmerDetail) -> Result<FarmerDetail, StoreError>;

    async fn count(&self, filter: &FarmerFilter) -> Result<u64, StoreError>;

    /// Records matching `filter`, ordered by id ascending.
    async fn fetch_page(
        &self,
        filter: &FarmerFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<FarmerDetail>, StoreError>;
}

// ============================================================================
// SeaORM implementation
// ============================================================================

pub struct SeaOrmFarmerStore {
    conn: DatabaseConnection,
}

impl SeaOrmFarmerStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn filtered(filter: &FarmerFilter) -> Select<Entity> {
        let mut query = Entity::find().filter(Column::CoopId.eq(filter.coop_id.as_str()));
        if let Some(from) = filter.updated_from {
            query = query.filter(Column::UpdatedAt.gte(from));
        }
        if let Some(to) = filter.updated_to {
            query = query.filter(Column::UpdatedAt.lte(to));
        }
        query
    }
}

#[async_trait]
impl FarmerStore for SeaOrmFarmerStore {
    async fn find_by_kyc_id(&self, kyc_id: &str) -> Result<Option<FarmerDetail>, StoreError> {
        let result = Entity::find()
            .filter(Column::FarmerKycId.eq(kyc_id))
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn find_by_coop_and_farmer(
        &self,
        coop_id: &str,
        farmer_id: &str,
    ) -> Result<Option<FarmerDetail>, StoreError> {
        let result = Entity::find()
            .filter(Column::CoopId.eq(coop_id))
            .filter(Column::FarmerId.eq(farmer_id))
            .order_by_asc(Column::Id)
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn insert(&self, aggregate: &FarmerDetail) -> Result<FarmerDetail, StoreError> {
        let model = to_active_model(aggregate)
            .insert(&self.conn)
            .await
            .map_err(StoreError::classify)?;
        Ok(model.into())
    }

    async fn count(&self, filter: &FarmerFilter) -> Result<u64, StoreError> {
        let total = Self::filtered(filter).count(&self.conn).await?;
        Ok(total)
    }

    async fn fetch_page(
        &self,
        filter: &FarmerFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<FarmerDetail>, StoreError> {
        let items = Self::filtered(filter)
            .order_by_asc(Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_farmer_detail::test_support::{memory_store, record_at, sample_dto};
    use chrono::TimeZone;
    use contracts::domain::common::AggregateRoot;

    #[test]
    fn entity_table_matches_aggregate_name() {
        assert_eq!(
            Entity.table_name(),
            <FarmerDetail as AggregateRoot>::full_name()
        );
    }

    #[test]
    fn violation_messages_map_to_keys() {
        assert_eq!(
            UniqueKey::from_violation("UNIQUE constraint failed: a001_farmer_detail.farmer_kyc_id"),
            UniqueKey::KycId
        );
        assert_eq!(
            UniqueKey::from_violation(
                "UNIQUE constraint failed: a001_farmer_detail.coop_id, a001_farmer_detail.farmer_id"
            ),
            UniqueKey::CoopFarmer
        );
    }

    #[tokio::test]
    async fn insert_assigns_id_and_round_trips() {
        let store = memory_store().await;
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap();
        let mut record = record_at("C1", &sample_dto("F1", "KYC-1"), now);
        record.customer_id = "CUST-1".into();
        record.vendor_id_updated_at = Some(now);

        let stored = store.insert(&record).await.unwrap();
        assert!(stored.id.is_some());
        assert_eq!(FarmerDetail { id: None, ..stored.clone() }, record);

        let found = store.find_by_coop_and_farmer("C1", "F1").await.unwrap();
        assert_eq!(found, Some(stored.clone()));
        let by_kyc = store.find_by_kyc_id("KYC-1").await.unwrap();
        assert_eq!(by_kyc, Some(stored));
    }

    #[tokio::test]
    async fn unique_indexes_reject_duplicates() {
        let store = memory_store().await;
        let now = Utc::now();
        store
            .insert(&record_at("C1", &sample_dto("F1", "KYC-1"), now))
            .await
            .unwrap();

        let same_kyc = record_at("C2", &sample_dto("F9", "KYC-1"), now);
        match store.insert(&same_kyc).await {
            Err(StoreError::DuplicateKey(key)) => assert_eq!(key, UniqueKey::KycId),
            other => panic!("expected kyc violation, got {:?}", other),
        }

        let same_farmer = record_at("C1", &sample_dto("F1", "KYC-2"), now);
        match store.insert(&same_farmer).await {
            Err(StoreError::DuplicateKey(key)) => assert_eq!(key, UniqueKey::CoopFarmer),
            other => panic!("expected coop/farmer violation, got {:?}", other),
        }

        assert_eq!(store.count(&FarmerFilter::for_cooperative("C1")).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn records_without_kyc_do_not_collide() {
        let store = memory_store().await;
        let now = Utc::now();
        for farmer in ["F1", "F2", "F3"] {
            store
                .insert(&record_at("C1", &sample_dto(farmer, ""), now))
                .await
                .unwrap();
        }
        assert_eq!(store.count(&FarmerFilter::for_cooperative("C1")).await.unwrap(), 3);
        assert_eq!(store.find_by_kyc_id("").await.unwrap(), None);
    }

    #[tokio::test]
    async fn window_bounds_are_inclusive() {
        let store = memory_store().await;
        let base = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
        for day in 0..5 {
            let at = base + chrono::Duration::days(day);
            let farmer = format!("F{day}");
            store
                .insert(&record_at("C1", &sample_dto(&farmer, ""), at))
                .await
                .unwrap();
        }

        let filter = FarmerFilter {
            coop_id: "C1".into(),
            updated_from: Some(base + chrono::Duration::days(1)),
            updated_to: Some(base + chrono::Duration::days(3)),
        };
        assert_eq!(store.count(&filter).await.unwrap(), 3);

        let page = store.fetch_page(&filter, 0, 10).await.unwrap();
        let ids: Vec<&str> = page.iter().map(|r| r.farmer_id.as_str()).collect();
        assert_eq!(ids, vec!["F1", "F2", "F3"]);
    }

    #[tokio::test]
    async fn pages_follow_insertion_order_within_cooperative() {
        let store = memory_store().await;
        let now = Utc::now();
        for i in 0..7 {
            let coop = if i % 2 == 0 { "C1" } else { "C2" };
            store
                .insert(&record_at(coop, &sample_dto(&format!("F{i}"), ""), now))
                .await
                .unwrap();
        }

        let filter = FarmerFilter::for_cooperative("C1");
        let second = store.fetch_page(&filter, 2, 2).await.unwrap();
        let ids: Vec<&str> = second.iter().map(|r| r.farmer_id.as_str()).collect();
        assert_eq!(ids, vec!["F4", "F6"]);
    }
}
