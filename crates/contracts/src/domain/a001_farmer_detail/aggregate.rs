use crate::domain::common::{AggregateRoot, EntityMetadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================
/// Store-assigned surrogate key. Distinct from the temp id and the ERP ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FarmerDetailId(pub i64);

impl FarmerDetailId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }
}

// ============================================================================
// Realm
// ============================================================================
/// ERP identity a request is addressed to. Both realms share one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Realm {
    Customers,
    Vendors,
}

impl Realm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Realm::Customers => "customers",
            Realm::Vendors => "vendors",
        }
    }
}

impl std::fmt::Display for Realm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerDetail {
    pub id: Option<FarmerDetailId>,
    pub temp_id: String,
    pub coop_id: String,

    // ERP identifiers, filled in by the external sync
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub vendor_id: String,
    pub customer_id_updated_at: Option<DateTime<Utc>>,
    pub vendor_id_updated_at: Option<DateTime<Utc>>,

    pub farmer_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub mobile_number: String,

    // Geography
    #[serde(default)]
    pub region_id: i32,
    #[serde(default)]
    pub region_part_id: i32,
    #[serde(default)]
    pub settlement_id: i32,
    #[serde(default)]
    pub settlement_part_id: i32,
    #[serde(default)]
    pub custom_geography_structure1_id: String,
    #[serde(default)]
    pub custom_geography_structure2_id: String,
    #[serde(default)]
    pub zip_code: String,

    // KYC
    #[serde(default)]
    pub farmer_kyc_type_id: i32,
    #[serde(default)]
    pub farmer_kyc_type: String,
    #[serde(default)]
    pub farmer_kyc_id: String,

    // Club
    #[serde(default)]
    pub club_id: String,
    #[serde(default)]
    pub club_name: String,
    #[serde(default)]
    pub club_leader_farmer_id: String,

    /// Timestamps from the field app, stored exactly as received
    pub raithu_created_date: Option<String>,
    pub raithu_updated_at: Option<String>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl FarmerDetail {
    /// Builds an unsaved record from an admission payload.
    ///
    /// `temp_id` and `now` are supplied by the caller so that identity and
    /// timestamps are fixed before the record ever reaches the store.
    pub fn new_for_insert(
        coop_id: &str,
        dto: &CreateFarmerDetailDto,
        temp_id: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            temp_id,
            coop_id: coop_id.to_string(),
            customer_id: String::new(),
            vendor_id: String::new(),
            customer_id_updated_at: None,
            vendor_id_updated_at: None,
            farmer_id: dto.farmer_id.clone(),
            first_name: dto.first_name.clone(),
            last_name: dto.last_name.clone(),
            mobile_number: dto.mobile_number.clone(),
            region_id: dto.region_id,
            region_part_id: dto.region_part_id,
            settlement_id: dto.settlement_id,
            settlement_part_id: dto.settlement_part_id,
            custom_geography_structure1_id: dto.custom_geography_structure1_id.clone(),
            custom_geography_structure2_id: dto.custom_geography_structure2_id.clone(),
            zip_code: dto.zip_code.clone(),
            farmer_kyc_type_id: dto.farmer_kyc_type_id,
            farmer_kyc_type: dto.farmer_kyc_type.clone(),
            farmer_kyc_id: dto.farmer_kyc_id.clone(),
            club_id: dto.club_id.clone(),
            club_name: dto.club_name.clone(),
            club_leader_farmer_id: dto.club_leader_farmer_id.clone(),
            raithu_created_date: non_empty(&dto.raithu_created_date),
            raithu_updated_at: non_empty(&dto.raithu_updated_at),
            metadata: EntityMetadata::new_at(now),
        }
    }

    /// "First Last", the display name used by the detail view
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl AggregateRoot for FarmerDetail {
    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "farmer_detail"
    }
}

// ============================================================================
// DTO
// ============================================================================
/// Admission payload as posted by the field app.
///
/// Every field defaults when absent so that required-field checks are
/// reported by admission validation rather than by body decoding.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CreateFarmerDetailDto {
    #[serde(rename = "farmerId")]
    pub farmer_id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "mobile_number")]
    pub mobile_number: String,
    #[serde(rename = "regionId")]
    pub region_id: i32,
    #[serde(rename = "regionPartID")]
    pub region_part_id: i32,
    #[serde(rename = "settlementID")]
    pub settlement_id: i32,
    #[serde(rename = "settlementPartID")]
    pub settlement_part_id: i32,
    #[serde(rename = "custom_geography_structure1_id")]
    pub custom_geography_structure1_id: String,
    #[serde(rename = "custom_geography_structure2_id")]
    pub custom_geography_structure2_id: String,
    #[serde(rename = "ZipCode")]
    pub zip_code: String,
    #[serde(rename = "farmer_kyc_type_id")]
    pub farmer_kyc_type_id: i32,
    #[serde(rename = "farmer_kyc_type")]
    pub farmer_kyc_type: String,
    #[serde(rename = "farmer_kyc_id")]
    pub farmer_kyc_id: String,
    #[serde(rename = "clubId")]
    pub club_id: String,
    #[serde(rename = "clubName")]
    pub club_name: String,
    #[serde(rename = "clubLeaderFarmerId")]
    pub club_leader_farmer_id: String,
    #[serde(rename = "raithuCreatedDate")]
    pub raithu_created_date: String,
    #[serde(rename = "raithuUpdatedAt")]
    pub raithu_updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dto_reads_field_app_names() {
        let body = r#"{
            "farmerId": "F58982",
            "firstName": "Ravi",
            "lastName": "Kumar",
            "mobile_number": "9000000001",
            "regionId": 4,
            "regionPartID": 7,
            "settlementID": 12,
            "settlementPartID": 3,
            "custom_geography_structure1_id": "G1",
            "ZipCode": "500001",
            "farmer_kyc_type_id": 2,
            "farmer_kyc_type": "AADHAAR",
            "farmer_kyc_id": "KYC-1",
            "clubLeaderFarmerId": "F1",
            "raithuCreatedDate": "2025-12-30T05:03:17.863Z"
        }"#;
        let dto: CreateFarmerDetailDto = serde_json::from_str(body).unwrap();

        assert_eq!(dto.farmer_id, "F58982");
        assert_eq!(dto.region_part_id, 7);
        assert_eq!(dto.settlement_part_id, 3);
        assert_eq!(dto.zip_code, "500001");
        assert_eq!(dto.farmer_kyc_id, "KYC-1");
        assert_eq!(dto.custom_geography_structure2_id, "");
        assert_eq!(dto.raithu_updated_at, "");
    }

    #[test]
    fn empty_body_decodes_to_defaults() {
        let dto: CreateFarmerDetailDto = serde_json::from_str("{}").unwrap();
        assert_eq!(dto, CreateFarmerDetailDto::default());
    }

    #[test]
    fn new_for_insert_copies_payload_and_stamps_times() {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let dto = CreateFarmerDetailDto {
            farmer_id: "F1".into(),
            first_name: "Asha".into(),
            last_name: "Devi".into(),
            club_leader_farmer_id: "F0".into(),
            raithu_updated_at: "2025-01-01T00:00:00Z".into(),
            ..Default::default()
        };

        let record = FarmerDetail::new_for_insert("COOP-9", &dto, "tmp-1".into(), now);

        assert_eq!(record.id, None);
        assert_eq!(record.coop_id, "COOP-9");
        assert_eq!(record.temp_id, "tmp-1");
        assert_eq!(record.customer_id, "");
        assert_eq!(record.metadata.created_at, now);
        assert_eq!(record.metadata.updated_at, now);
        assert_eq!(record.raithu_created_date, None);
        assert_eq!(
            record.raithu_updated_at.as_deref(),
            Some("2025-01-01T00:00:00Z")
        );
        assert_eq!(record.display_name(), "Asha Devi");
    }

    #[test]
    fn realm_uses_path_segment_names() {
        let realm: Realm = serde_json::from_str("\"vendors\"").unwrap();
        assert_eq!(realm, Realm::Vendors);
        assert_eq!(Realm::Customers.to_string(), "customers");
        assert!(serde_json::from_str::<Realm>("\"suppliers\"").is_err());
    }

    #[test]
    fn full_name_matches_table_name() {
        assert_eq!(<FarmerDetail as AggregateRoot>::full_name(), "a001_farmer_detail");
    }
}
