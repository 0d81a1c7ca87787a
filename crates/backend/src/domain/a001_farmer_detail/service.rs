use std::sync::Arc;

use chrono::Utc;
use contracts::domain::a001_farmer_detail::aggregate::{
    CreateFarmerDetailDto, FarmerDetail, Realm,
};
use contracts::domain::a001_farmer_detail::responses::PageInfo;

use super::identity::assign_temp_id;
use super::projector;
use super::query::{FarmerFilter, PageRequest};
use super::repository::{FarmerStore, StoreError, UniqueKey};
use super::validator;
use super::FarmerDetailError;

/// Registry of farmer details. Holds the store handed to it at startup;
/// every call is an independent unit of work against that store.
#[derive(Clone)]
pub struct FarmerDetailService {
    store: Arc<dyn FarmerStore>,
}

impl FarmerDetailService {
    pub fn new(store: Arc<dyn FarmerStore>) -> Self {
        Self { store }
    }

    /// Validates and stores a new farmer detail for `coop_id`.
    ///
    /// The temp id and both timestamps are fixed here, before the insert.
    /// Nothing is retried: a failed insert is reported as is.
    pub async fn admit(
        &self,
        realm: Realm,
        coop_id: &str,
        dto: CreateFarmerDetailDto,
    ) -> Result<FarmerDetail, FarmerDetailError> {
        if let Err(e) = validator::validate(self.store.as_ref(), coop_id, &dto).await {
            if e.is_validation() {
                tracing::warn!(%realm, coop_id, farmer_id = %dto.farmer_id, "Admission rejected: {}", e);
            } else {
                tracing::error!(%realm, coop_id, farmer_id = %dto.farmer_id, "Admission check failed: {}", e);
            }
            return Err(e);
        }

        let aggregate = FarmerDetail::new_for_insert(coop_id, &dto, assign_temp_id(), Utc::now());

        match self.store.insert(&aggregate).await {
            Ok(stored) => {
                tracing::info!(
                    %realm,
                    coop_id,
                    farmer_id = %stored.farmer_id,
                    temp_id = %stored.temp_id,
                    "Farmer detail admitted"
                );
                Ok(stored)
            }
            Err(StoreError::DuplicateKey(key)) => {
                // Lost a race with a concurrent admission of the same identity
                tracing::warn!(%realm, coop_id, farmer_id = %dto.farmer_id, "Insert hit unique key {}", key);
                Err(duplicate_error(key, coop_id, &dto))
            }
            Err(e) => {
                tracing::error!(%realm, coop_id, farmer_id = %dto.farmer_id, "Failed to store farmer detail: {}", e);
                Err(e.into())
            }
        }
    }

    pub async fn get_one(
        &self,
        coop_id: &str,
        farmer_id: &str,
    ) -> Result<FarmerDetail, FarmerDetailError> {
        self.store
            .find_by_coop_and_farmer(coop_id, farmer_id)
            .await
            .map_err(|e| {
                tracing::error!(coop_id, farmer_id, "Failed to load farmer detail: {}", e);
                FarmerDetailError::from(e)
            })?
            .ok_or(FarmerDetailError::NotFound)
    }

    pub async fn list(
        &self,
        filter: &FarmerFilter,
        page: PageRequest,
    ) -> Result<(Vec<FarmerDetail>, PageInfo), FarmerDetailError> {
        let total = self.store.count(filter).await.map_err(|e| {
            tracing::error!(coop_id = %filter.coop_id, "Failed to count farmer details: {}", e);
            FarmerDetailError::from(e)
        })?;

        // Past the last record there is nothing to fetch
        let items = if page.offset() >= total {
            Vec::new()
        } else {
            self.store
                .fetch_page(filter, page.offset(), page.limit())
                .await
                .map_err(|e| {
                    tracing::error!(coop_id = %filter.coop_id, "Failed to list farmer details: {}", e);
                    FarmerDetailError::from(e)
                })?
        };

        Ok((items, projector::page_info(page, total)))
    }
}

fn duplicate_error(key: UniqueKey, coop_id: &str, dto: &CreateFarmerDetailDto) -> FarmerDetailError {
    match key {
        UniqueKey::KycId => FarmerDetailError::DuplicateKyc(dto.farmer_kyc_id.clone()),
        UniqueKey::CoopFarmer => FarmerDetailError::DuplicateFarmerInCooperative {
            farmer_id: dto.farmer_id.clone(),
            coop_id: coop_id.to_string(),
        },
        // 128 random bits; a collision here is a store fault, not a caller error
        UniqueKey::TempId => {
            FarmerDetailError::Persistence(StoreError::DuplicateKey(key).to_string())
        }
    }
}
