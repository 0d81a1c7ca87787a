use std::sync::Arc;

use chrono::{DateTime, Utc};
use contracts::domain::a001_farmer_detail::aggregate::{CreateFarmerDetailDto, FarmerDetail};

use super::identity::assign_temp_id;
use super::repository::SeaOrmFarmerStore;
use super::FarmerDetailService;
use crate::shared::data::db::connect_in_memory;

pub async fn memory_store() -> SeaOrmFarmerStore {
    let conn = connect_in_memory()
        .await
        .expect("in-memory database should open");
    SeaOrmFarmerStore::new(conn)
}

pub async fn memory_service() -> FarmerDetailService {
    FarmerDetailService::new(Arc::new(memory_store().await))
}

/// A payload that passes every presence rule
pub fn sample_dto(farmer_id: &str, kyc_id: &str) -> CreateFarmerDetailDto {
    CreateFarmerDetailDto {
        farmer_id: farmer_id.to_string(),
        first_name: "Lakshmi".to_string(),
        last_name: "Reddy".to_string(),
        mobile_number: "9876543210".to_string(),
        region_id: 1,
        region_part_id: 2,
        settlement_id: 30,
        settlement_part_id: 4,
        zip_code: "522001".to_string(),
        farmer_kyc_type_id: 1,
        farmer_kyc_type: "AADHAAR".to_string(),
        farmer_kyc_id: kyc_id.to_string(),
        club_id: "CLUB-1".to_string(),
        club_name: "Guntur East".to_string(),
        club_leader_farmer_id: "LEADER-1".to_string(),
        raithu_created_date: "2025-12-30T05:03:17.863Z".to_string(),
        ..Default::default()
    }
}

pub fn record_at(coop_id: &str, dto: &CreateFarmerDetailDto, at: DateTime<Utc>) -> FarmerDetail {
    FarmerDetail::new_for_insert(coop_id, dto, assign_temp_id(), at)
}
