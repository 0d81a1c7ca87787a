//! Response bodies of the farmer registry HTTP API.

use serde::{Deserialize, Serialize};

pub const CREATED_MESSAGE: &str = "Farmer detail created successfully";
pub const FETCHED_MESSAGE: &str = "Farmer detail fetched successfully";
pub const NOT_FOUND_MESSAGE: &str = "Farmer not found";

/// Creation receipt; also used for list items (with an empty message)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmerReceiptDto {
    #[serde(rename = "tempERPCustomerId")]
    pub temp_erp_customer_id: String,
    #[serde(rename = "erpCustomerId")]
    pub erp_customer_id: String,
    #[serde(rename = "erpVendorId")]
    pub erp_vendor_id: String,
    #[serde(rename = "farmerId")]
    pub farmer_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFarmerResponse {
    pub success: bool,
    pub data: FarmerReceiptDto,
}

/// Payload of a rejected admission. `createdAt`/`updatedAt` carry the
/// rejection time with millisecond precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmerErrorData {
    #[serde(rename = "tempERPCustomerId")]
    pub temp_erp_customer_id: String,
    #[serde(rename = "erpCustomerId")]
    pub erp_customer_id: String,
    #[serde(rename = "farmerId")]
    pub farmer_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmerErrorResponse {
    pub success: bool,
    pub data: FarmerErrorData,
}

/// Generic failure body for lookups and store failures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureResponse {
    pub success: bool,
    pub message: String,
}

impl FailureResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u64,
    pub limit: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmerListResponse {
    pub success: bool,
    pub data: Vec<FarmerReceiptDto>,
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerDetailViewDto {
    pub farmer_id: String,
    pub name: String,
    pub mobile_number: String,
    pub cooperative: String,
    pub region_id: i32,
    pub region_part_id: i32,
    pub settlement_id: i32,
    pub settlement_part_id: i32,
    pub custom_geography_structure1_id: String,
    pub custom_geography_structure2_id: String,
    pub zip_code: String,
    pub farmer_kyc_type_id: i32,
    pub farmer_kyc_type: String,
    pub farmer_kyc_id: String,
    pub club_id: String,
    pub club_name: String,
    pub club_leader_farmer_id: String,
    pub entity_id: String,
    pub customer_code: String,
    pub vendor_code: String,
    pub created_date: String,
    pub updated_date: String,
    pub raithu_created_date: Option<String>,
    pub raithu_updated_at: Option<String>,
    pub message: String,
}
